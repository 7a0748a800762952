use crate::core::geo::{Point, Size};
use crate::layers::marker::MarkerId;
use serde::{Deserialize, Serialize};

/// Phase of a normalized pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    /// Gesture aborted: pointer left the container or the touch was cancelled
    Cancel,
}

/// Single-contact pointer event in container coordinates.
///
/// Mouse and touch input are both reduced to this shape before reaching
/// the interaction controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub position: Point,
    /// Marker glyph under the pointer, if the host's hit test found one
    pub target: Option<MarkerId>,
}

impl PointerEvent {
    pub fn new(phase: PointerPhase, x: f64, y: f64) -> Self {
        Self {
            phase,
            position: Point::new(x, y),
            target: None,
        }
    }

    pub fn down(x: f64, y: f64) -> Self {
        Self::new(PointerPhase::Down, x, y)
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self::new(PointerPhase::Move, x, y)
    }

    pub fn up(x: f64, y: f64) -> Self {
        Self::new(PointerPhase::Up, x, y)
    }

    pub fn cancel(x: f64, y: f64) -> Self {
        Self::new(PointerPhase::Cancel, x, y)
    }

    /// Marks the marker under the pointer
    pub fn on_marker(mut self, id: impl Into<MarkerId>) -> Self {
        self.target = Some(id.into());
        self
    }
}

/// Scroll wheel input; positive `delta_y` scrolls down (zooms out)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelEvent {
    pub delta_y: f64,
}

impl WheelEvent {
    pub fn new(delta_y: f64) -> Self {
        Self { delta_y }
    }
}

/// Input events that can be handled by the map viewer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    Pointer(PointerEvent),
    Wheel(WheelEvent),
    /// Viewport container resize
    Resize { size: Size },
}

impl InputEvent {
    /// Gets the pointer position associated with this event, if any
    pub fn position(&self) -> Option<Point> {
        match self {
            InputEvent::Pointer(event) => Some(event.position),
            _ => None,
        }
    }

    pub fn is_pointer_event(&self) -> bool {
        matches!(self, InputEvent::Pointer(_))
    }
}

impl From<PointerEvent> for InputEvent {
    fn from(event: PointerEvent) -> Self {
        InputEvent::Pointer(event)
    }
}

impl From<WheelEvent> for InputEvent {
    fn from(event: WheelEvent) -> Self {
        InputEvent::Wheel(event)
    }
}

/// Intents raised by the toolbar and details panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    ZoomIn,
    ZoomOut,
    ResetView,
    ToggleEditMode,
    SetEditMode(bool),
    ToggleImages,
    Select(Option<MarkerId>),
}

/// Events emitted by the viewer after its state changed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MapEvent {
    PanChanged { pan_x: f64, pan_y: f64 },
    ZoomChanged { scale: f64 },
    ViewReset,
    MarkerMoved { id: MarkerId, x: f64, y: f64 },
    SelectionChanged(Option<MarkerId>),
    EditModeChanged(bool),
    ImagesToggled(bool),
    /// Edit mode was turned off and this many marker positions were handed
    /// to the position sink
    PositionsCommitted(usize),
}

/// Discriminant of [`MapEvent`], used to register listeners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapEventKind {
    PanChanged,
    ZoomChanged,
    ViewReset,
    MarkerMoved,
    SelectionChanged,
    EditModeChanged,
    ImagesToggled,
    PositionsCommitted,
}

impl MapEvent {
    pub fn kind(&self) -> MapEventKind {
        match self {
            MapEvent::PanChanged { .. } => MapEventKind::PanChanged,
            MapEvent::ZoomChanged { .. } => MapEventKind::ZoomChanged,
            MapEvent::ViewReset => MapEventKind::ViewReset,
            MapEvent::MarkerMoved { .. } => MapEventKind::MarkerMoved,
            MapEvent::SelectionChanged(_) => MapEventKind::SelectionChanged,
            MapEvent::EditModeChanged(_) => MapEventKind::EditModeChanged,
            MapEvent::ImagesToggled(_) => MapEventKind::ImagesToggled,
            MapEvent::PositionsCommitted(_) => MapEventKind::PositionsCommitted,
        }
    }
}
