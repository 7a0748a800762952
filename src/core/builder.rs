//! Fluent construction of a [`MapViewer`]
//!
//! Collects configuration, markers and collaborators, then validates them
//! together in [`MapBuilder::build`].

use crate::{
    core::{
        config::ViewConfig,
        constants::DEFAULT_BACKGROUND,
        geo::Size,
        map::MapViewer,
        viewport::{Viewport, ZoomAnchor},
    },
    data::{scene::Scene, seed::initial_markers},
    layers::{marker::Marker, store::MarkerStore},
    traits::PositionSink,
    Result,
};

/// Builder for creating and configuring [`MapViewer`] instances
pub struct MapBuilder {
    config: ViewConfig,
    size: Size,
    markers: Vec<Marker>,
    background: String,
    sink: Option<Box<dyn PositionSink>>,
    edit_mode: bool,
    show_images: bool,
    zoom_anchor: ZoomAnchor,
}

impl MapBuilder {
    /// Starts from the default view tuning and the built-in markers
    pub fn new() -> Self {
        Self {
            config: ViewConfig::default(),
            size: Size::default(),
            markers: initial_markers(),
            background: DEFAULT_BACKGROUND.to_string(),
            sink: None,
            edit_mode: false,
            show_images: false,
            zoom_anchor: ZoomAnchor::default(),
        }
    }

    pub fn with_config(mut self, config: ViewConfig) -> Self {
        self.config = config;
        self
    }

    /// Initial container size in pixels
    pub fn with_container_size(mut self, width: f64, height: f64) -> Self {
        self.size = Size::new(width, height);
        self
    }

    /// Replaces the built-in marker list
    pub fn with_markers(mut self, markers: Vec<Marker>) -> Self {
        self.markers = markers;
        self
    }

    pub fn with_background(mut self, background: impl Into<String>) -> Self {
        self.background = background.into();
        self
    }

    /// Takes background, view tuning and markers from a scene
    pub fn with_scene(mut self, scene: Scene) -> Self {
        self.background = scene.background;
        self.config = scene.view;
        self.markers = scene.markers;
        self
    }

    /// Where committed marker positions go; defaults to the log
    pub fn with_position_sink(mut self, sink: impl PositionSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn with_edit_mode(mut self, enabled: bool) -> Self {
        self.edit_mode = enabled;
        self
    }

    pub fn with_images(mut self, enabled: bool) -> Self {
        self.show_images = enabled;
        self
    }

    pub fn with_zoom_anchor(mut self, anchor: ZoomAnchor) -> Self {
        self.zoom_anchor = anchor;
        self
    }

    /// Validates everything and creates the viewer
    pub fn build(self) -> Result<MapViewer> {
        let mut viewport = Viewport::with_config(self.size, self.config)?;
        viewport.set_zoom_anchor(self.zoom_anchor);
        let store = MarkerStore::from_markers(self.markers)?;

        log::debug!(
            "building viewer: {} markers, container {}x{}",
            store.len(),
            self.size.width,
            self.size.height
        );

        let mut viewer = MapViewer::new(viewport, store);
        viewer.set_background(self.background);
        if let Some(sink) = self.sink {
            viewer.set_sink(sink);
        }
        let selection = viewer.selection_mut();
        selection.set_edit_mode(self.edit_mode);
        selection.set_show_images(self.show_images);

        Ok(viewer)
    }
}

impl Default for MapBuilder {
    fn default() -> Self {
        Self::new()
    }
}
