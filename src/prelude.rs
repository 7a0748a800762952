//! Prelude module for common fablemap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use fablemap::prelude::*;`

pub use crate::core::{
    builder::MapBuilder,
    config::ViewConfig,
    geo::{Coordinates, Point, Size},
    map::{MapViewer, MarkerFace, RenderFrame, RenderedMarker},
    selection::SelectionState,
    viewport::{ViewState, Viewport, ZoomAnchor},
};

pub use crate::layers::{
    marker::{Glyph, Marker, MarkerCategory, MarkerId},
    store::MarkerStore,
};

pub use crate::input::{
    events::{Command, InputEvent, MapEvent, MapEventKind, PointerEvent, PointerPhase, WheelEvent},
    gestures::{GestureState, RawPointerInput},
    handler::{Action, EventManager, InteractionController},
};

pub use crate::data::scene::Scene;

pub use crate::traits::{LogPositionSink, PositionSink};

#[cfg(feature = "egui")]
pub use crate::ui::{panels, widget::MapView, UiMapExt};

pub use crate::{MapError, Result};

pub use std::collections::VecDeque;

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
