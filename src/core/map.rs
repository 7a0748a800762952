use crate::{
    core::{
        constants::{DEFAULT_BACKGROUND, PIN_HEIGHT_PX},
        geo::{Point, Size},
        selection::SelectionState,
        viewport::{ViewState, Viewport},
    },
    input::{
        Action, Command, EventManager, GestureState, InputEvent, InteractionController, MapEvent,
        MapEventKind, PointerEvent, PointerNormalizer, RawPointerInput, WheelEvent,
    },
    layers::{
        marker::{Glyph, Marker, MarkerId},
        store::MarkerStore,
    },
    traits::{LogPositionSink, PositionSink},
};
use serde::{Deserialize, Serialize};

/// What a marker shows inside its circle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MarkerFace {
    Glyph(Glyph),
    /// Opaque image reference for the host to resolve
    Image(String),
}

/// A marker resolved to screen space for drawing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedMarker {
    pub id: MarkerId,
    pub title: String,
    /// Pin tip: the forward-transformed marker position
    pub anchor: Point,
    /// Edge length of the marker circle
    pub size: f64,
    pub face: MarkerFace,
    pub selected: bool,
    /// Top-left of the hit box
    pub bounds_min: Point,
    /// Bottom-right of the hit box
    pub bounds_max: Point,
}

impl RenderedMarker {
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.bounds_min.x
            && point.x <= self.bounds_max.x
            && point.y >= self.bounds_min.y
            && point.y <= self.bounds_max.y
    }

    /// Center of the marker circle
    pub fn glyph_center(&self) -> Point {
        Point::new(self.anchor.x, self.anchor.y - PIN_HEIGHT_PX - self.size / 2.0)
    }
}

/// Everything a presentation layer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub view: ViewState,
    pub container: Size,
    pub background: String,
    /// Markers in draw order; the selected marker comes last
    pub markers: Vec<RenderedMarker>,
    pub selected: Option<MarkerId>,
    pub edit_mode: bool,
    pub show_images: bool,
    /// A pan or drag gesture is in progress
    pub interacting: bool,
}

impl RenderFrame {
    /// Topmost marker whose hit box contains `point`
    pub fn hit_test(&self, point: Point) -> Option<&RenderedMarker> {
        self.markers.iter().rev().find(|marker| marker.contains(point))
    }
}

/// Top-level viewer controller.
///
/// Owns the marker store, the view state, selection and edit mode, and the
/// gesture controller. Every mutation goes through this type; listeners
/// registered on its [`EventManager`] observe the results.
pub struct MapViewer {
    viewport: Viewport,
    store: MarkerStore,
    selection: SelectionState,
    controller: InteractionController,
    normalizer: PointerNormalizer,
    events: EventManager,
    sink: Box<dyn PositionSink>,
    background: String,
}

impl MapViewer {
    /// Creates a viewer with the default sink and background.
    /// Use [`crate::core::builder::MapBuilder`] for validated configuration.
    pub fn new(viewport: Viewport, store: MarkerStore) -> Self {
        let controller =
            InteractionController::with_click_tolerance(viewport.config().click_tolerance_px);
        Self {
            viewport,
            store,
            selection: SelectionState::new(),
            controller,
            normalizer: PointerNormalizer::new(),
            events: EventManager::new(),
            sink: Box::new(LogPositionSink),
            background: DEFAULT_BACKGROUND.to_string(),
        }
    }

    pub(crate) fn set_sink(&mut self, sink: Box<dyn PositionSink>) {
        self.sink = sink;
    }

    pub(crate) fn set_background(&mut self, background: String) {
        self.background = background;
    }

    pub(crate) fn selection_mut(&mut self) -> &mut SelectionState {
        &mut self.selection
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn view_state(&self) -> ViewState {
        self.viewport.state()
    }

    pub fn markers(&self) -> &[Marker] {
        self.store.list()
    }

    pub fn marker(&self, id: &str) -> Option<&Marker> {
        self.store.get(id)
    }

    pub fn selected(&self) -> Option<&MarkerId> {
        self.selection.selected()
    }

    /// The selected marker record, for a details panel
    pub fn selected_marker(&self) -> Option<&Marker> {
        self.selection
            .selected()
            .and_then(|id| self.store.get(id.as_str()))
    }

    pub fn edit_mode(&self) -> bool {
        self.selection.edit_mode()
    }

    pub fn show_images(&self) -> bool {
        self.selection.show_images()
    }

    pub fn background(&self) -> &str {
        &self.background
    }

    pub fn gesture(&self) -> &GestureState {
        self.controller.gesture()
    }

    /// Register an event listener
    pub fn on<F>(&mut self, kind: MapEventKind, callback: F)
    where
        F: Fn(&MapEvent) + Send + Sync + 'static,
    {
        self.events.on(kind, callback);
    }

    /// Register a listener for every event
    pub fn on_any<F>(&mut self, callback: F)
    where
        F: Fn(&MapEvent) + Send + Sync + 'static,
    {
        self.events.on_any(callback);
    }

    /// Deliver queued events to listeners and return them
    pub fn process_events(&mut self) -> Vec<MapEvent> {
        self.events.process_events()
    }

    /// Handle one input event. Returns whether any state changed.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::Pointer(pointer) => self.handle_pointer(&pointer),
            InputEvent::Wheel(wheel) => self.handle_wheel(wheel),
            InputEvent::Resize { size } => self.resize(size),
        }
    }

    pub fn handle_pointer(&mut self, event: &PointerEvent) -> bool {
        let was_interacting = self.controller.is_interacting();
        let actions =
            self.controller
                .handle_pointer(event, &self.viewport, self.selection.edit_mode());
        let mut changed = was_interacting != self.controller.is_interacting();
        for action in actions {
            changed |= self.apply(action);
        }
        changed
    }

    /// Feeds a raw mouse or touch event through the pointer normalizer
    pub fn handle_raw(&mut self, input: RawPointerInput) -> bool {
        match self.normalizer.normalize(input) {
            Some(event) => self.handle_pointer(&event),
            None => false,
        }
    }

    pub fn handle_wheel(&mut self, event: WheelEvent) -> bool {
        if self.viewport.zoom_by_wheel(event.delta_y) {
            self.emit_zoom();
            true
        } else {
            false
        }
    }

    pub fn resize(&mut self, size: Size) -> bool {
        if self.viewport.size() == size {
            return false;
        }
        self.viewport.set_size(size);
        true
    }

    /// Negative or non-finite extents become zero
    pub fn set_container_size(&mut self, width: f64, height: f64) -> bool {
        self.resize(Size::new(width, height))
    }

    /// Apply one controller action to the owned state
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::Pan { pan } => {
                if self.viewport.set_pan(pan) {
                    let state = self.viewport.state();
                    self.events.emit(MapEvent::PanChanged {
                        pan_x: state.pan_x,
                        pan_y: state.pan_y,
                    });
                    true
                } else {
                    false
                }
            }
            Action::MoveMarker { id, coordinates } => {
                self.update_marker_position(&id, coordinates.x, coordinates.y)
            }
            Action::Select(id) => self.select(id),
        }
    }

    /// Run a toolbar or panel intent
    pub fn execute(&mut self, command: Command) -> bool {
        match command {
            Command::ZoomIn => self.zoom_in(),
            Command::ZoomOut => self.zoom_out(),
            Command::ResetView => self.reset_view(),
            Command::ToggleEditMode => self.toggle_edit_mode(),
            Command::SetEditMode(enabled) => self.set_edit_mode(enabled),
            Command::ToggleImages => self.toggle_images(),
            Command::Select(id) => self.select(id),
        }
    }

    /// Writes new coordinates for `id`, emitting `MarkerMoved`.
    /// Unknown ids are a logged no-op.
    pub fn update_marker_position(&mut self, id: &MarkerId, x: f64, y: f64) -> bool {
        if !self.store.update(id.as_str(), x, y) {
            return false;
        }
        self.sink.marker_moved(id, x, y);
        self.events.emit(MapEvent::MarkerMoved {
            id: id.clone(),
            x,
            y,
        });
        true
    }

    /// Selects a marker, or clears the selection with `None`.
    pub fn select(&mut self, id: Option<MarkerId>) -> bool {
        if let Some(id) = &id {
            if !self.store.contains(id.as_str()) {
                log::warn!("ignoring selection of unknown marker {id}");
                return false;
            }
        }
        if self.selection.select(id) {
            let selected = self.selection.selected().cloned();
            log::debug!("selection changed: {selected:?}");
            self.events.emit(MapEvent::SelectionChanged(selected));
            true
        } else {
            false
        }
    }

    pub fn clear_selection(&mut self) -> bool {
        self.select(None)
    }

    pub fn toggle_edit_mode(&mut self) -> bool {
        let enabled = !self.selection.edit_mode();
        self.set_edit_mode(enabled)
    }

    /// Switches edit mode. Leaving edit mode hands every marker position
    /// to the position sink; coordinates and selection stay as they are.
    pub fn set_edit_mode(&mut self, enabled: bool) -> bool {
        if !self.selection.set_edit_mode(enabled) {
            return false;
        }
        self.events.emit(MapEvent::EditModeChanged(enabled));
        if !enabled {
            if self.controller.gesture().dragged_marker().is_some() {
                self.controller.cancel();
            }
            self.sink.commit(self.store.list());
            self.events
                .emit(MapEvent::PositionsCommitted(self.store.len()));
        }
        log::debug!("edit mode {}", if enabled { "on" } else { "off" });
        true
    }

    pub fn toggle_images(&mut self) -> bool {
        let enabled = !self.selection.show_images();
        self.selection.set_show_images(enabled);
        self.events.emit(MapEvent::ImagesToggled(enabled));
        true
    }

    pub fn zoom_in(&mut self) -> bool {
        let changed = self.viewport.zoom_in();
        if changed {
            self.emit_zoom();
        }
        changed
    }

    pub fn zoom_out(&mut self) -> bool {
        let changed = self.viewport.zoom_out();
        if changed {
            self.emit_zoom();
        }
        changed
    }

    pub fn reset_view(&mut self) -> bool {
        let changed = self.viewport.reset();
        if changed {
            self.events.emit(MapEvent::ViewReset);
        }
        changed
    }

    fn emit_zoom(&mut self) {
        self.events.emit(MapEvent::ZoomChanged {
            scale: self.viewport.scale(),
        });
    }

    /// Resolves every marker to screen space
    pub fn render_frame(&self) -> RenderFrame {
        let size = self.viewport.marker_size();
        let show_images = self.selection.show_images();

        let mut markers: Vec<RenderedMarker> = self
            .store
            .iter()
            .map(|marker| {
                let anchor = self.viewport.content_to_screen(marker.coordinates);
                let face = if show_images && !marker.image_url.is_empty() {
                    MarkerFace::Image(marker.image_url.clone())
                } else {
                    MarkerFace::Glyph(marker.category.glyph())
                };
                RenderedMarker {
                    id: marker.id.clone(),
                    title: marker.title.clone(),
                    anchor,
                    size,
                    face,
                    selected: self.selection.is_selected(marker.id.as_str()),
                    bounds_min: Point::new(anchor.x - size / 2.0, anchor.y - size - PIN_HEIGHT_PX),
                    bounds_max: Point::new(anchor.x + size / 2.0, anchor.y),
                }
            })
            .collect();
        // Stable: keeps list order apart from lifting the selection to the top
        markers.sort_by_key(|marker| marker.selected);

        RenderFrame {
            view: self.viewport.state(),
            container: self.viewport.size(),
            background: self.background.clone(),
            markers,
            selected: self.selection.selected().cloned(),
            edit_mode: self.selection.edit_mode(),
            show_images,
            interacting: self.controller.is_interacting(),
        }
    }

    /// Topmost marker under a screen point, for filling `PointerEvent::target`
    pub fn hit_test(&self, point: Point) -> Option<MarkerId> {
        self.render_frame().hit_test(point).map(|marker| marker.id.clone())
    }
}

impl std::fmt::Debug for MapViewer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapViewer")
            .field("viewport", &self.viewport)
            .field("markers", &self.store.len())
            .field("selection", &self.selection)
            .field("gesture", self.controller.gesture())
            .field("events", &self.events)
            .finish()
    }
}
