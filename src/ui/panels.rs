//! Toolbar and details panel for a [`MapViewer`]

use crate::{core::map::MapViewer, input::Command};
use egui::{RichText, Ui};

/// Zoom, reset, edit-mode and image toggles. Returns whether anything changed.
pub fn toolbar(ui: &mut Ui, viewer: &mut MapViewer) -> bool {
    let mut command = None;
    ui.horizontal(|ui| {
        if ui.button("+").on_hover_text("Zoom in").clicked() {
            command = Some(Command::ZoomIn);
        }
        if ui.button("-").on_hover_text("Zoom out").clicked() {
            command = Some(Command::ZoomOut);
        }
        if ui.button("⟲").on_hover_text("Reset view").clicked() {
            command = Some(Command::ResetView);
        }
        ui.separator();

        let edit_mode = viewer.edit_mode();
        let edit_hint = if edit_mode { "Save positions" } else { "Move markers" };
        if ui
            .selectable_label(edit_mode, "✎ Edit")
            .on_hover_text(edit_hint)
            .clicked()
        {
            command = Some(Command::ToggleEditMode);
        }

        let mut show_images = viewer.show_images();
        if ui.checkbox(&mut show_images, "Show images on map").changed() {
            command = Some(Command::ToggleImages);
        }

        ui.separator();
        ui.label(format!("{:.0}%", viewer.view_state().scale * 100.0));
    });

    command.map_or(false, |command| viewer.execute(command))
}

/// Details of the selected marker with a close button.
/// Shows nothing when no marker is selected.
pub fn details_panel(ui: &mut Ui, viewer: &mut MapViewer) -> bool {
    let Some(marker) = viewer.selected_marker().cloned() else {
        return false;
    };

    let mut close = false;
    ui.horizontal(|ui| {
        ui.label(RichText::new(marker.category.to_string().to_uppercase()).small().strong());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            close = ui.button("✕").on_hover_text("Close").clicked();
        });
    });
    ui.heading(marker.title.as_str());
    ui.label(
        RichText::new(format!(
            "Coordinates: {:.1}, {:.1}",
            marker.coordinates.x, marker.coordinates.y
        ))
        .italics(),
    );
    if !marker.image_url.is_empty() {
        ui.label(RichText::new(format!("Image: {}", marker.image_url)).weak());
    }
    ui.separator();
    if marker.description.is_empty() {
        ui.weak("No description.");
    } else {
        ui.label(marker.description.as_str());
    }

    close && viewer.execute(Command::Select(None))
}
