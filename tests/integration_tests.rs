use fablemap::{
    input::{
        Command, GestureState, MapEvent, MapEventKind, MouseEventType, PointerEvent,
        RawPointerInput, TouchEventType, TouchPoint, WheelEvent,
    },
    traits::MemoryPositionSink,
    Coordinates, MapBuilder, MapViewer, Point, Scene, Size, ViewConfig, Viewport,
};
use std::sync::{Arc, Mutex};

/// Integration tests driving the viewer the way a host would:
/// normalized pointer events in, state and events out.
#[cfg(test)]
mod integration_tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn viewer() -> MapViewer {
        MapBuilder::new()
            .with_container_size(1000.0, 800.0)
            .build()
            .unwrap()
    }

    fn click(viewer: &mut MapViewer, x: f64, y: f64, target: Option<&str>) {
        let mut down = PointerEvent::down(x, y);
        let mut up = PointerEvent::up(x, y);
        if let Some(id) = target {
            down = down.on_marker(id);
            up = up.on_marker(id);
        }
        viewer.handle_pointer(&down);
        viewer.handle_pointer(&up);
    }

    fn drag(viewer: &mut MapViewer, from: (f64, f64), to: (f64, f64), target: Option<&str>) {
        let mut down = PointerEvent::down(from.0, from.1);
        if let Some(id) = target {
            down = down.on_marker(id);
        }
        viewer.handle_pointer(&down);
        viewer.handle_pointer(&PointerEvent::moved(to.0, to.1));
        viewer.handle_pointer(&PointerEvent::up(to.0, to.1));
    }

    /// Screen position of a marker's pin tip
    fn anchor_of(viewer: &MapViewer, id: &str) -> Point {
        viewer
            .render_frame()
            .markers
            .iter()
            .find(|m| m.id.as_str() == id)
            .map(|m| m.anchor)
            .unwrap()
    }

    #[test]
    fn test_transform_round_trip() {
        for scale in [0.5, 0.75, 1.0, 1.7, 2.5, 4.0] {
            let mut viewport = Viewport::new(Size::new(1280.0, 720.0));
            viewport.set_scale(scale);
            viewport.set_pan(Point::new(-137.5, 42.25));

            for x in [0.0, 12.5, 33.3, 50.0, 99.9, 100.0] {
                for y in [0.0, 7.0, 61.8, 100.0] {
                    let coords = Coordinates::new(x, y);
                    let back = viewport.screen_to_content(viewport.content_to_screen(coords));
                    assert!((back.x - x).abs() < EPS, "x at scale {scale}: {back:?}");
                    assert!((back.y - y).abs() < EPS, "y at scale {scale}: {back:?}");
                }
            }
        }
    }

    #[test]
    fn test_wheel_zoom_converges_to_limits() {
        let mut viewer = viewer();
        for _ in 0..50 {
            viewer.handle_wheel(WheelEvent::new(-5000.0));
            let scale = viewer.view_state().scale;
            assert!((0.5..=4.0).contains(&scale));
        }
        assert_eq!(viewer.view_state().scale, 4.0);

        for _ in 0..50 {
            viewer.handle_wheel(WheelEvent::new(5000.0));
        }
        assert_eq!(viewer.view_state().scale, 0.5);
    }

    #[test]
    fn test_zoom_buttons_and_reset() {
        let mut viewer = viewer();
        for _ in 0..20 {
            viewer.execute(Command::ZoomIn);
        }
        assert_eq!(viewer.view_state().scale, 4.0);

        viewer.execute(Command::ZoomOut);
        assert!((viewer.view_state().scale - 4.0 / 1.2).abs() < EPS);

        drag(&mut viewer, (10.0, 10.0), (60.0, 70.0), None);
        assert!(viewer.execute(Command::ResetView));
        let state = viewer.view_state();
        assert_eq!((state.scale, state.pan_x, state.pan_y), (1.0, 0.0, 0.0));
        assert!(!viewer.execute(Command::ResetView));
    }

    #[test]
    fn test_pan_preserves_anchor() {
        let mut viewer = viewer();
        drag(&mut viewer, (100.0, 100.0), (150.0, 130.0), None);

        let state = viewer.view_state();
        assert_eq!(state.pan_x, 50.0);
        assert_eq!(state.pan_y, 30.0);
        assert_eq!(state.scale, 1.0);
        assert!(viewer.gesture().is_idle());
    }

    #[test]
    fn test_pan_keeps_content_under_pointer_when_zoomed() {
        let mut viewer = viewer();
        viewer.execute(Command::ZoomIn);
        let start = Point::new(320.0, 240.0);
        let under_pointer = viewer.viewport().screen_to_content(start);

        drag(&mut viewer, (start.x, start.y), (410.0, 180.0), None);

        let after = viewer.viewport().screen_to_content(Point::new(410.0, 180.0));
        assert!((after.x - under_pointer.x).abs() < EPS);
        assert!((after.y - under_pointer.y).abs() < EPS);
    }

    #[test]
    fn test_marker_drag_clamps_to_content_bounds() {
        let mut viewer = viewer();
        viewer.execute(Command::SetEditMode(true));

        let anchor = anchor_of(&viewer, "1");
        // Content (-10, 110) in a 1000x800 container at scale 1
        drag(&mut viewer, (anchor.x, anchor.y), (-100.0, 880.0), Some("1"));

        let marker = viewer.marker("1").unwrap();
        assert_eq!(marker.coordinates, Coordinates::new(0.0, 100.0));
        // A drag is not a click
        assert_eq!(viewer.selected(), None);
        // The map itself did not move
        assert_eq!(viewer.view_state().pan(), Point::new(0.0, 0.0));
    }

    #[test]
    fn test_marker_follows_pointer_during_drag() {
        let mut viewer = viewer();
        viewer.execute(Command::SetEditMode(true));

        viewer.handle_pointer(&PointerEvent::down(250.0, 320.0).on_marker("2"));
        viewer.handle_pointer(&PointerEvent::moved(300.0, 400.0));
        assert_eq!(
            viewer.marker("2").unwrap().coordinates,
            Coordinates::new(30.0, 50.0)
        );
        assert!(viewer.render_frame().interacting);

        viewer.handle_pointer(&PointerEvent::moved(400.0, 200.0));
        viewer.handle_pointer(&PointerEvent::up(400.0, 200.0));
        assert_eq!(
            viewer.marker("2").unwrap().coordinates,
            Coordinates::new(40.0, 25.0)
        );
        assert!(!viewer.render_frame().interacting);
    }

    #[test]
    fn test_marker_press_outside_edit_mode_pans() {
        let mut viewer = viewer();
        let anchor = anchor_of(&viewer, "3");
        drag(&mut viewer, (anchor.x, anchor.y), (anchor.x + 20.0, anchor.y), Some("3"));

        assert_eq!(viewer.marker("3").unwrap().coordinates, Coordinates::new(70.0, 70.0));
        assert_eq!(viewer.view_state().pan_x, 20.0);
    }

    #[test]
    fn test_edit_toggle_keeps_coordinates_and_selection() {
        let mut viewer = viewer();
        click(&mut viewer, 10.0, 10.0, Some("2"));
        let before: Vec<_> = viewer.markers().to_vec();

        viewer.execute(Command::ToggleEditMode);
        assert!(viewer.edit_mode());
        viewer.execute(Command::ToggleEditMode);
        assert!(!viewer.edit_mode());

        assert_eq!(viewer.markers(), before.as_slice());
        assert_eq!(viewer.selected().map(|id| id.as_str()), Some("2"));
    }

    #[test]
    fn test_click_marker_then_background() {
        let mut viewer = viewer();
        click(&mut viewer, 250.0, 310.0, Some("2"));
        assert_eq!(viewer.selected().map(|id| id.as_str()), Some("2"));
        assert_eq!(viewer.selected_marker().unwrap().title, "Whispering Forest");

        click(&mut viewer, 900.0, 50.0, None);
        assert_eq!(viewer.selected(), None);

        let selections: Vec<_> = viewer
            .process_events()
            .into_iter()
            .filter(|e| e.kind() == MapEventKind::SelectionChanged)
            .collect();
        assert_eq!(
            selections,
            vec![
                MapEvent::SelectionChanged(Some("2".into())),
                MapEvent::SelectionChanged(None),
            ]
        );
    }

    #[test]
    fn test_click_in_edit_mode_selects() {
        let mut viewer = viewer();
        viewer.execute(Command::SetEditMode(true));
        click(&mut viewer, 700.0, 560.0, Some("3"));

        assert_eq!(viewer.selected().map(|id| id.as_str()), Some("3"));
        assert_eq!(viewer.marker("3").unwrap().coordinates, Coordinates::new(70.0, 70.0));
    }

    #[test]
    fn test_marker_press_preempts_pan() {
        let mut viewer = viewer();
        viewer.execute(Command::SetEditMode(true));

        viewer.handle_pointer(&PointerEvent::down(20.0, 20.0));
        assert!(viewer.gesture().is_panning());

        viewer.handle_pointer(&PointerEvent::down(700.0, 560.0).on_marker("3"));
        assert!(matches!(viewer.gesture(), GestureState::MarkerDragging { .. }));

        viewer.handle_pointer(&PointerEvent::moved(800.0, 560.0));
        viewer.handle_pointer(&PointerEvent::up(800.0, 560.0));

        assert_eq!(viewer.view_state().pan(), Point::new(0.0, 0.0));
        assert_eq!(viewer.marker("3").unwrap().coordinates, Coordinates::new(80.0, 70.0));
    }

    #[test]
    fn test_background_press_during_marker_drag_is_ignored() {
        let mut viewer = viewer();
        viewer.execute(Command::SetEditMode(true));

        viewer.handle_pointer(&PointerEvent::down(500.0, 400.0).on_marker("1"));
        viewer.handle_pointer(&PointerEvent::down(10.0, 10.0));
        assert_eq!(viewer.gesture().dragged_marker().map(|id| id.as_str()), Some("1"));
        assert!(!viewer.gesture().is_panning());
    }

    #[test]
    fn test_cancel_never_selects() {
        let mut viewer = viewer();
        viewer.handle_pointer(&PointerEvent::down(250.0, 310.0).on_marker("2"));
        viewer.handle_pointer(&PointerEvent::cancel(250.0, 310.0));

        assert_eq!(viewer.selected(), None);
        assert!(viewer.gesture().is_idle());
    }

    #[test]
    fn test_leaving_edit_mode_commits_to_sink() {
        let sink = Arc::new(Mutex::new(MemoryPositionSink::default()));
        let mut viewer = MapBuilder::new()
            .with_container_size(1000.0, 800.0)
            .with_position_sink(sink.clone())
            .build()
            .unwrap();

        viewer.execute(Command::SetEditMode(true));
        drag(&mut viewer, (500.0, 400.0), (600.0, 480.0), Some("1"));
        viewer.execute(Command::SetEditMode(false));

        let sink = sink.lock().unwrap();
        assert_eq!(sink.moves, 1);
        let committed = sink.last_commit.as_ref().unwrap();
        assert_eq!(committed.len(), 3);
        assert_eq!(committed[0].coordinates, Coordinates::new(60.0, 60.0));
    }

    #[test]
    fn test_leaving_edit_mode_mid_drag_stops_the_drag() {
        let mut viewer = viewer();
        viewer.execute(Command::SetEditMode(true));
        viewer.handle_pointer(&PointerEvent::down(500.0, 400.0).on_marker("1"));
        viewer.handle_pointer(&PointerEvent::moved(520.0, 400.0));

        viewer.execute(Command::SetEditMode(false));
        assert!(viewer.gesture().is_idle());

        viewer.handle_pointer(&PointerEvent::moved(900.0, 700.0));
        assert_eq!(viewer.marker("1").unwrap().coordinates, Coordinates::new(52.0, 50.0));
    }

    #[test]
    fn test_hit_test_fills_target() {
        let mut viewer = viewer();
        viewer.execute(Command::SetEditMode(true));

        let grab = Point::new(250.0, 300.0);
        let target = viewer.hit_test(grab);
        assert_eq!(target.as_ref().map(|id| id.as_str()), Some("2"));

        let mut down = PointerEvent::down(grab.x, grab.y);
        down.target = target;
        viewer.handle_pointer(&down);
        assert_eq!(viewer.gesture().dragged_marker().map(|id| id.as_str()), Some("2"));
    }

    #[test]
    fn test_touch_input_pans() {
        let mut viewer = viewer();
        let touch = |event_type, x, y| RawPointerInput::Touch {
            event_type,
            touches: vec![TouchPoint::new(7, x, y)],
            target: None,
        };

        viewer.handle_raw(touch(TouchEventType::Start, 100.0, 100.0));
        // A second finger is ignored
        viewer.handle_raw(RawPointerInput::Touch {
            event_type: TouchEventType::Start,
            touches: vec![TouchPoint::new(8, 600.0, 600.0)],
            target: None,
        });
        viewer.handle_raw(touch(TouchEventType::Move, 140.0, 90.0));
        viewer.handle_raw(touch(TouchEventType::End, 140.0, 90.0));

        assert_eq!(viewer.view_state().pan(), Point::new(40.0, -10.0));
        assert!(viewer.gesture().is_idle());
    }

    #[test]
    fn test_mouse_leave_cancels_gesture() {
        let mut viewer = viewer();
        let mouse = |event_type, x, y| RawPointerInput::Mouse {
            event_type,
            position: Point::new(x, y),
            target: None,
        };

        viewer.handle_raw(mouse(MouseEventType::Down, 10.0, 10.0));
        viewer.handle_raw(mouse(MouseEventType::Move, 30.0, 10.0));
        viewer.handle_raw(mouse(MouseEventType::Leave, 30.0, 10.0));
        viewer.handle_raw(mouse(MouseEventType::Move, 300.0, 10.0));

        assert!(viewer.gesture().is_idle());
        assert_eq!(viewer.view_state().pan_x, 20.0);
    }

    #[test]
    fn test_listeners_receive_events() {
        let mut viewer = viewer();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        viewer.on(MapEventKind::PanChanged, move |event| {
            sink.lock().unwrap().push(event.clone());
        });

        drag(&mut viewer, (0.0, 0.0), (5.0, 6.0), None);
        assert!(seen.lock().unwrap().is_empty());

        viewer.process_events();
        assert_eq!(
            *seen.lock().unwrap(),
            vec![MapEvent::PanChanged {
                pan_x: 5.0,
                pan_y: 6.0
            }]
        );
    }

    #[test]
    fn test_images_toggle_round_trip() {
        let mut viewer = viewer();
        assert!(viewer.execute(Command::ToggleImages));
        assert!(viewer.show_images());
        assert!(viewer.execute(Command::ToggleImages));
        assert!(!viewer.show_images());
    }

    #[test]
    fn test_viewer_from_scene_json() {
        let json = r#"{
            "background": "./isles.png",
            "view": { "min_scale": 0.25, "max_scale": 8.0 },
            "markers": [
                { "id": "keep", "title": "Keep", "coordinates": { "x": 10, "y": 20 }, "type": "city" },
                { "id": "ruin", "title": "Ruin", "coordinates": { "x": 90, "y": 80 }, "type": "landmark" }
            ]
        }"#;
        let scene = Scene::from_json_str(json).unwrap();
        let mut viewer = MapBuilder::new()
            .with_scene(scene)
            .with_container_size(400.0, 400.0)
            .build()
            .unwrap();

        for _ in 0..100 {
            viewer.handle_wheel(WheelEvent::new(-1000.0));
        }
        assert_eq!(viewer.view_state().scale, 8.0);
        assert_eq!(viewer.markers().len(), 2);
        assert_eq!(viewer.background(), "./isles.png");
    }

    #[test]
    fn test_custom_scale_range_reset() {
        let config = ViewConfig::default().with_scale_limits(1.5, 3.0);
        let mut viewer = MapBuilder::new()
            .with_config(config)
            .with_container_size(800.0, 600.0)
            .build()
            .unwrap();

        viewer.execute(Command::ZoomIn);
        viewer.execute(Command::ResetView);
        assert_eq!(viewer.view_state().scale, 1.5);
    }
}
