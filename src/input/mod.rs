pub mod events;
pub mod gestures;
pub mod handler;

// Re-export the essential types
pub use events::{
    Command, InputEvent, MapEvent, MapEventKind, PointerEvent, PointerPhase, WheelEvent,
};
pub use gestures::{
    GestureState, MouseEventType, PointerNormalizer, Press, RawPointerInput, TouchEventType,
    TouchPoint,
};
pub use handler::{Action, EventCallback, EventManager, InteractionController};
