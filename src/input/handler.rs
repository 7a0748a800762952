use crate::{
    core::{
        constants::CLICK_TOLERANCE_PX,
        geo::{Coordinates, Point},
        viewport::Viewport,
    },
    input::{
        events::{MapEvent, MapEventKind, PointerEvent, PointerPhase},
        gestures::{GestureState, Press},
    },
    layers::marker::MarkerId,
    prelude::{HashMap, VecDeque},
};

/// State change requested by the interaction controller
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Move the content so its origin sits at `pan`
    Pan { pan: Point },
    /// Write new coordinates for a dragged marker
    MoveMarker { id: MarkerId, coordinates: Coordinates },
    /// A click: select the pressed marker, or clear with `None`
    Select(Option<MarkerId>),
}

/// Event listener callback type
pub type EventCallback = Box<dyn Fn(&MapEvent) + Send + Sync>;

/// Single dispatcher for everything the viewer emits
#[derive(Default)]
pub struct EventManager {
    /// Event listeners by event kind
    listeners: HashMap<MapEventKind, Vec<EventCallback>>,
    /// Listeners interested in every event
    catch_all: Vec<EventCallback>,
    /// Event queue for processing
    event_queue: VecDeque<MapEvent>,
}

impl EventManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event listener for one kind of event
    pub fn on<F>(&mut self, kind: MapEventKind, callback: F)
    where
        F: Fn(&MapEvent) + Send + Sync + 'static,
    {
        self.listeners.entry(kind).or_default().push(Box::new(callback));
    }

    /// Register a listener for all events
    pub fn on_any<F>(&mut self, callback: F)
    where
        F: Fn(&MapEvent) + Send + Sync + 'static,
    {
        self.catch_all.push(Box::new(callback));
    }

    /// Emit an event to the queue
    pub fn emit(&mut self, event: MapEvent) {
        self.event_queue.push_back(event);
    }

    /// Deliver all queued events, in emission order, and return them
    pub fn process_events(&mut self) -> Vec<MapEvent> {
        let events: Vec<_> = self.event_queue.drain(..).collect();

        for event in &events {
            if let Some(callbacks) = self.listeners.get(&event.kind()) {
                for callback in callbacks {
                    callback(event);
                }
            }
            for callback in &self.catch_all {
                callback(event);
            }
        }

        events
    }

    /// Clear all events from the queue
    pub fn clear_events(&mut self) {
        self.event_queue.clear();
    }

    /// Get number of pending events
    pub fn pending_events(&self) -> usize {
        self.event_queue.len()
    }
}

impl std::fmt::Debug for EventManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventManager")
            .field("listener_kinds", &self.listeners.len())
            .field("catch_all", &self.catch_all.len())
            .field("pending", &self.event_queue.len())
            .finish()
    }
}

/// Viewport interaction controller.
///
/// Decides whether a pointer gesture pans the map, drags a marker or is a
/// click, and turns it into [`Action`]s. It never mutates the viewport or
/// the marker store itself.
#[derive(Debug, Clone)]
pub struct InteractionController {
    pub enabled: bool,
    gesture: GestureState,
    click_tolerance: f64,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::with_click_tolerance(CLICK_TOLERANCE_PX)
    }

    pub fn with_click_tolerance(click_tolerance: f64) -> Self {
        Self {
            enabled: true,
            gesture: GestureState::Idle,
            click_tolerance: click_tolerance.max(0.0),
        }
    }

    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    pub fn is_interacting(&self) -> bool {
        !self.gesture.is_idle()
    }

    /// Drops the active gesture without producing a click
    pub fn cancel(&mut self) {
        if !self.gesture.is_idle() {
            log::debug!("gesture cancelled");
        }
        self.gesture = GestureState::Idle;
    }

    /// Handle one normalized pointer event and generate actions
    pub fn handle_pointer(
        &mut self,
        event: &PointerEvent,
        viewport: &Viewport,
        edit_mode: bool,
    ) -> Vec<Action> {
        if !self.enabled || !event.position.is_finite() {
            return vec![];
        }

        match event.phase {
            PointerPhase::Down => {
                self.on_down(event, viewport, edit_mode);
                vec![]
            }
            PointerPhase::Move => self.on_move(event.position, viewport, edit_mode),
            PointerPhase::Up => self.on_up(),
            PointerPhase::Cancel => {
                self.cancel();
                vec![]
            }
        }
    }

    fn on_down(&mut self, event: &PointerEvent, viewport: &Viewport, edit_mode: bool) {
        if let GestureState::MarkerDragging { id, .. } = &self.gesture {
            log::debug!("ignoring pointer down while dragging marker {id}");
            return;
        }
        if self.gesture.is_panning() {
            log::debug!("pointer down during pan; restarting gesture");
        }

        let press = Press::new(event.position, event.target.clone());
        self.gesture = match (&event.target, edit_mode) {
            // Marker drag takes priority over map pan
            (Some(id), true) => {
                log::debug!("marker drag started: {id}");
                GestureState::MarkerDragging {
                    id: id.clone(),
                    press,
                }
            }
            _ => {
                let anchor = viewport.pan_anchor(event.position);
                log::debug!("pan started at ({:.1}, {:.1})", event.position.x, event.position.y);
                GestureState::PanDragging { anchor, press }
            }
        };
    }

    fn on_move(&mut self, position: Point, viewport: &Viewport, edit_mode: bool) -> Vec<Action> {
        let tolerance = self.click_tolerance;
        match &mut self.gesture {
            GestureState::Idle => vec![],
            GestureState::PanDragging { anchor, press } => {
                press.track(position, tolerance);
                if !press.moved {
                    return vec![];
                }
                vec![Action::Pan {
                    pan: position.subtract(anchor),
                }]
            }
            GestureState::MarkerDragging { id, press } => {
                press.track(position, tolerance);
                if !press.moved || !edit_mode {
                    return vec![];
                }
                let coordinates = viewport.screen_to_content(position);
                log::trace!(
                    "marker {id} dragged to ({:.2}, {:.2})",
                    coordinates.x,
                    coordinates.y
                );
                vec![Action::MoveMarker {
                    id: id.clone(),
                    coordinates,
                }]
            }
        }
    }

    fn on_up(&mut self) -> Vec<Action> {
        let finished = std::mem::take(&mut self.gesture);
        match finished.press() {
            None => vec![],
            Some(press) if press.moved => {
                log::debug!("gesture ended");
                vec![]
            }
            Some(press) => vec![Action::Select(press.target.clone())],
        }
    }
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new()
    }
}
