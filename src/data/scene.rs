//! Scene files: background reference, view tuning and the marker list
//!
//! ```json
//! {
//!   "background": "./map.jpg",
//!   "view": { "min_scale": 0.5, "max_scale": 4.0 },
//!   "markers": [
//!     { "id": "1", "title": "Keep", "description": "", "imageUrl": "./keep.jpg",
//!       "coordinates": { "x": 50, "y": 50 }, "type": "city" }
//!   ]
//! }
//! ```

use crate::{
    core::{config::ViewConfig, constants::DEFAULT_BACKGROUND},
    data::seed::initial_markers,
    layers::{marker::Marker, store::MarkerStore},
    Result,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scene {
    /// Opaque background image reference
    pub background: String,
    pub view: ViewConfig,
    pub markers: Vec<Marker>,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            background: DEFAULT_BACKGROUND.to_string(),
            view: ViewConfig::default(),
            markers: initial_markers(),
        }
    }
}

impl Scene {
    /// Parses and validates a scene from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        let scene: Scene = serde_json::from_str(json)?;
        scene.validate()?;
        Ok(scene)
    }

    /// Reads and validates a scene file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("loading scene from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks the view configuration and the marker list
    pub fn validate(&self) -> Result<()> {
        self.view.validate()?;
        MarkerStore::from_markers(self.markers.clone())?;
        Ok(())
    }
}
