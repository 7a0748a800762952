//! Gesture bookkeeping and mouse/touch unification
//!
//! Hosts deliver either mouse or touch input; [`PointerNormalizer`] reduces
//! both to the single-contact [`PointerEvent`] stream the interaction
//! controller understands. Only the first touch contact drives a gesture;
//! additional fingers are ignored (no pinch zoom).

use crate::{
    core::geo::Point,
    input::events::{PointerEvent, PointerPhase},
    layers::marker::MarkerId,
};

/// Types of mouse events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEventType {
    Down,
    Move,
    Up,
    /// Pointer left the viewport container
    Leave,
}

/// Types of touch events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchEventType {
    Start,
    Move,
    End,
    Cancel,
}

/// Individual touch point
#[derive(Debug, Clone, PartialEq)]
pub struct TouchPoint {
    pub id: u64,
    pub position: Point,
}

impl TouchPoint {
    pub fn new(id: u64, x: f64, y: f64) -> Self {
        Self {
            id,
            position: Point::new(x, y),
        }
    }
}

/// Host input before normalization
#[derive(Debug, Clone, PartialEq)]
pub enum RawPointerInput {
    Mouse {
        event_type: MouseEventType,
        position: Point,
        target: Option<MarkerId>,
    },
    Touch {
        event_type: TouchEventType,
        /// Contacts that changed in this event
        touches: Vec<TouchPoint>,
        target: Option<MarkerId>,
    },
}

/// Turns mouse and touch input into one [`PointerEvent`] stream.
#[derive(Debug, Clone, Default)]
pub struct PointerNormalizer {
    primary_touch: Option<u64>,
    last_position: Option<Point>,
}

impl PointerNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizes one host event. Returns `None` when the event does not
    /// concern the primary contact.
    pub fn normalize(&mut self, input: RawPointerInput) -> Option<PointerEvent> {
        match input {
            RawPointerInput::Mouse {
                event_type,
                position,
                target,
            } => {
                let phase = match event_type {
                    MouseEventType::Down => PointerPhase::Down,
                    MouseEventType::Move => PointerPhase::Move,
                    MouseEventType::Up => PointerPhase::Up,
                    MouseEventType::Leave => PointerPhase::Cancel,
                };
                self.last_position = Some(position);
                Some(PointerEvent {
                    phase,
                    position,
                    target,
                })
            }
            RawPointerInput::Touch {
                event_type,
                touches,
                target,
            } => self.normalize_touch(event_type, touches, target),
        }
    }

    fn normalize_touch(
        &mut self,
        event_type: TouchEventType,
        touches: Vec<TouchPoint>,
        target: Option<MarkerId>,
    ) -> Option<PointerEvent> {
        match event_type {
            TouchEventType::Start => {
                if self.primary_touch.is_some() {
                    log::trace!("ignoring additional touch contact");
                    return None;
                }
                let touch = touches.first()?;
                self.primary_touch = Some(touch.id);
                self.last_position = Some(touch.position);
                Some(PointerEvent {
                    phase: PointerPhase::Down,
                    position: touch.position,
                    target,
                })
            }
            TouchEventType::Move => {
                let touch = self.primary_in(&touches)?;
                self.last_position = Some(touch.position);
                Some(PointerEvent {
                    phase: PointerPhase::Move,
                    position: touch.position,
                    target,
                })
            }
            TouchEventType::End | TouchEventType::Cancel => {
                let touch = self.primary_in(&touches)?;
                let position = touch.position;
                self.primary_touch = None;
                self.last_position = Some(position);
                let phase = if event_type == TouchEventType::End {
                    PointerPhase::Up
                } else {
                    PointerPhase::Cancel
                };
                Some(PointerEvent {
                    phase,
                    position,
                    target,
                })
            }
        }
    }

    fn primary_in<'a>(&self, touches: &'a [TouchPoint]) -> Option<&'a TouchPoint> {
        let primary = self.primary_touch?;
        touches.iter().find(|touch| touch.id == primary)
    }

    /// Last position seen for the primary contact or mouse
    pub fn last_position(&self) -> Option<Point> {
        self.last_position
    }

    /// Forgets the active touch contact
    pub fn reset(&mut self) {
        self.primary_touch = None;
        self.last_position = None;
    }
}

/// The press that started the current gesture, used to tell clicks from drags
#[derive(Debug, Clone, PartialEq)]
pub struct Press {
    pub origin: Point,
    pub target: Option<MarkerId>,
    /// Set once the pointer travelled beyond the click tolerance
    pub moved: bool,
}

impl Press {
    pub fn new(origin: Point, target: Option<MarkerId>) -> Self {
        Self {
            origin,
            target,
            moved: false,
        }
    }

    /// Records pointer travel; once moved, a press never becomes a click again.
    pub fn track(&mut self, position: Point, tolerance: f64) {
        if !self.moved && position.distance_to(&self.origin) > tolerance {
            self.moved = true;
        }
    }
}

/// What the active pointer gesture is doing.
///
/// Panning and marker dragging are variants of one enum, so the controller
/// can never be in both at once.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    PanDragging {
        /// `pointer - pan` captured at gesture start
        anchor: Point,
        press: Press,
    },
    MarkerDragging {
        id: MarkerId,
        press: Press,
    },
}

impl GestureState {
    pub fn is_idle(&self) -> bool {
        matches!(self, GestureState::Idle)
    }

    pub fn is_panning(&self) -> bool {
        matches!(self, GestureState::PanDragging { .. })
    }

    /// Id of the marker being dragged, if any
    pub fn dragged_marker(&self) -> Option<&MarkerId> {
        match self {
            GestureState::MarkerDragging { id, .. } => Some(id),
            _ => None,
        }
    }

    pub fn press(&self) -> Option<&Press> {
        match self {
            GestureState::Idle => None,
            GestureState::PanDragging { press, .. } | GestureState::MarkerDragging { press, .. } => {
                Some(press)
            }
        }
    }
}
