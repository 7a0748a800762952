pub mod panels;
pub mod style;
pub mod widget;

pub use panels::{details_panel, toolbar};
pub use style::MapStyle;
pub use widget::MapView;

/// Shorthand for adding a [`MapView`] to a `Ui`
pub trait UiMapExt {
    fn map_view(&mut self, viewer: &mut crate::core::map::MapViewer) -> egui::Response;
}

impl UiMapExt for egui::Ui {
    fn map_view(&mut self, viewer: &mut crate::core::map::MapViewer) -> egui::Response {
        self.add(MapView::new(viewer))
    }
}
