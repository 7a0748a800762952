use crate::layers::marker::MarkerId;
use serde::{Deserialize, Serialize};

/// Application-level UI flags: the selected marker, edit mode and whether
/// marker images replace the category glyphs.
///
/// Setters report whether anything changed so the caller only emits events
/// for real transitions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    selected: Option<MarkerId>,
    edit_mode: bool,
    show_images: bool,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&MarkerId> {
        self.selected.as_ref()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_ref().is_some_and(|s| s.as_str() == id)
    }

    pub fn select(&mut self, id: Option<MarkerId>) -> bool {
        if self.selected == id {
            return false;
        }
        self.selected = id;
        true
    }

    pub fn clear(&mut self) -> bool {
        self.select(None)
    }

    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    pub fn set_edit_mode(&mut self, enabled: bool) -> bool {
        if self.edit_mode == enabled {
            return false;
        }
        self.edit_mode = enabled;
        true
    }

    pub fn show_images(&self) -> bool {
        self.show_images
    }

    pub fn set_show_images(&mut self, enabled: bool) -> bool {
        if self.show_images == enabled {
            return false;
        }
        self.show_images = enabled;
        true
    }
}
