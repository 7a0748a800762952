//! # fablemap
//!
//! Interactive viewer core for hand-drawn fantasy maps.
//!
//! A static background image is shown in a pannable, zoomable viewport with
//! category markers positioned in percentage coordinates. Markers can be
//! selected to show their details and, in edit mode, dragged to new
//! positions. Rendering is left to the host; [`MapViewer::render_frame`]
//! describes everything that needs to be drawn.

pub mod core;
pub mod data;
pub mod input;
pub mod layers;
pub mod prelude;
pub mod traits;
#[cfg(feature = "egui")]
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    builder::MapBuilder,
    config::ViewConfig,
    geo::{Coordinates, Point, Size},
    map::{MapViewer, RenderFrame},
    viewport::{ViewState, Viewport},
};

pub use crate::layers::{marker::Marker, store::MarkerStore};

pub use crate::input::{events::InputEvent, handler::InteractionController};

pub use crate::data::scene::Scene;

pub use crate::traits::PositionSink;

#[cfg(feature = "egui")]
pub use crate::ui::widget::MapView;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Duplicate marker id: {0}")]
    DuplicateMarker(String),

    #[error("Invalid coordinates for marker {id}: ({x}, {y})")]
    InvalidCoordinates { id: String, x: f64, y: f64 },
}

/// Error type alias for convenience
pub type Error = MapError;

/// Initializes `env_logger` once; later calls are no-ops.
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .is_test(cfg!(test))
        .try_init();
}
