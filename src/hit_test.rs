use super::*;
use crate::camera::from_local_rotated;
use crate::scene::ObjectKind;

const METRICS: HandleMetrics = HandleMetrics { size: 8.0, rotate_offset: 30.0 };

fn rect(x: f64, y: f64, w: f64, h: f64) -> SceneObject {
    SceneObject::new(ObjectKind::Rectangle, x, y, w, h)
}

fn scene_with(objects: Vec<SceneObject>) -> Scene {
    let mut scene = Scene::new();
    for obj in objects {
        scene.add(obj);
    }
    scene
}

/// World position of a local-frame point on `obj`.
fn world_of(obj: &SceneObject, local: Point) -> Point {
    from_local_rotated(local, obj.center(), obj.rotation)
}

// =============================================================
// ResizeAnchor
// =============================================================

#[test]
fn anchor_positions_sit_on_box_edges() {
    assert_eq!(ResizeAnchor::Nw.local_position(100.0, 50.0), Point::new(-50.0, -25.0));
    assert_eq!(ResizeAnchor::E.local_position(100.0, 50.0), Point::new(50.0, 0.0));
    assert_eq!(ResizeAnchor::S.local_position(100.0, 50.0), Point::new(0.0, 25.0));
}

#[test]
fn anchor_horizontal_classification() {
    assert!(ResizeAnchor::E.is_horizontal());
    assert!(ResizeAnchor::Sw.is_horizontal());
    assert!(!ResizeAnchor::N.is_horizontal());
    assert!(!ResizeAnchor::S.is_horizontal());
}

#[test]
fn anchor_cursors() {
    assert_eq!(ResizeAnchor::Nw.cursor(), "nwse-resize");
    assert_eq!(ResizeAnchor::Sw.cursor(), "nesw-resize");
    assert_eq!(ResizeAnchor::N.cursor(), "ns-resize");
    assert_eq!(ResizeAnchor::W.cursor(), "ew-resize");
}

#[test]
fn all_anchors_distinct() {
    for (i, a) in ResizeAnchor::ALL.iter().enumerate() {
        for b in &ResizeAnchor::ALL[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

// =============================================================
// Handles
// =============================================================

#[test]
fn rotation_handle_above_top_edge() {
    let obj = rect(0.0, 0.0, 100.0, 50.0);
    // Center (50, 25); handle 30 above the top edge.
    assert_eq!(hit_handles(&obj, Point::new(50.0, -30.0), &METRICS), Some(HitPart::RotateHandle));
    assert_eq!(hit_handles(&obj, Point::new(50.0, -25.0), &METRICS), Some(HitPart::RotateHandle));
    assert_eq!(hit_handles(&obj, Point::new(50.0, -15.0), &METRICS), None);
}

#[test]
fn resize_handle_box_is_inclusive() {
    let obj = rect(0.0, 0.0, 100.0, 50.0);
    assert_eq!(hit_handles(&obj, Point::new(104.0, 54.0), &METRICS), Some(HitPart::ResizeHandle(ResizeAnchor::Se)));
    assert_eq!(hit_handles(&obj, Point::new(104.5, 54.0), &METRICS), None);
}

#[test]
fn handle_hits_are_rotation_invariant() {
    for degrees in [0.0_f64, 45.0, 90.0, 180.0, 271.0] {
        let mut obj = rect(10.0, 20.0, 120.0, 60.0);
        obj.rotation = degrees.to_radians();
        for anchor in ResizeAnchor::ALL {
            let world = world_of(&obj, anchor.local_position(obj.width, obj.height));
            assert_eq!(hit_handles(&obj, world, &METRICS), Some(HitPart::ResizeHandle(anchor)), "{anchor:?} at {degrees}");
        }
        let rot = world_of(&obj, METRICS.rotate_position(obj.height));
        assert_eq!(hit_handles(&obj, rot, &METRICS), Some(HitPart::RotateHandle), "rotation at {degrees}");
    }
}

// =============================================================
// Bodies
// =============================================================

#[test]
fn body_hits_are_rotation_invariant() {
    for degrees in [0.0_f64, 45.0, 90.0, 180.0, 271.0] {
        let mut obj = rect(-40.0, 0.0, 200.0, 20.0);
        obj.rotation = degrees.to_radians();
        let inside = world_of(&obj, Point::new(90.0, 5.0));
        let outside = world_of(&obj, Point::new(90.0, 15.0));
        assert!(obj.contains(inside), "inside at {degrees}");
        assert!(!obj.contains(outside), "outside at {degrees}");
    }
}

#[test]
fn topmost_prefers_later_objects() {
    let scene = scene_with(vec![rect(0.0, 0.0, 100.0, 100.0), rect(50.0, 50.0, 100.0, 100.0)]);
    assert_eq!(topmost_at(&scene, Point::new(75.0, 75.0)), Some(1));
    assert_eq!(topmost_at(&scene, Point::new(10.0, 10.0)), Some(0));
    assert_eq!(topmost_at(&scene, Point::new(500.0, 500.0)), None);
}

#[test]
fn topmost_skips_hidden_objects() {
    let mut scene = scene_with(vec![rect(0.0, 0.0, 100.0, 100.0), rect(0.0, 0.0, 100.0, 100.0)]);
    scene.toggle_visibility(1);
    assert_eq!(topmost_at(&scene, Point::new(50.0, 50.0)), Some(0));
}

#[test]
fn hit_test_prefers_selected_handles_over_bodies() {
    // Object 1 is selected; its NW handle sits over object 0's body.
    let scene = scene_with(vec![rect(0.0, 0.0, 200.0, 200.0), rect(100.0, 100.0, 50.0, 50.0)]);
    let hit = hit_test(&scene, Point::new(100.0, 100.0), &METRICS);
    assert_eq!(hit, Some(Hit { index: 1, part: HitPart::ResizeHandle(ResizeAnchor::Nw) }));
}

#[test]
fn hit_test_falls_back_to_body_scan() {
    let mut scene = scene_with(vec![rect(0.0, 0.0, 200.0, 200.0), rect(100.0, 100.0, 50.0, 50.0)]);
    scene.select(Some(1));
    let hit = hit_test(&scene, Point::new(20.0, 20.0), &METRICS);
    assert_eq!(hit, Some(Hit { index: 0, part: HitPart::Body }));
}

#[test]
fn hit_test_empty_space() {
    let scene = scene_with(vec![rect(0.0, 0.0, 10.0, 10.0)]);
    assert_eq!(hit_test(&scene, Point::new(300.0, 300.0), &METRICS), None);
}

// =============================================================
// Cursor
// =============================================================

#[test]
fn hover_cursor_reflects_selected_parts() {
    let scene = scene_with(vec![rect(0.0, 0.0, 100.0, 50.0)]);
    assert_eq!(hover_cursor(&scene, Point::new(50.0, -30.0), &METRICS), "crosshair");
    assert_eq!(hover_cursor(&scene, Point::new(100.0, 25.0), &METRICS), "ew-resize");
    assert_eq!(hover_cursor(&scene, Point::new(30.0, 30.0), &METRICS), "move");
    assert_eq!(hover_cursor(&scene, Point::new(300.0, 30.0), &METRICS), "default");
}

#[test]
fn hover_cursor_default_without_selection() {
    let mut scene = scene_with(vec![rect(0.0, 0.0, 100.0, 50.0)]);
    scene.select(None);
    assert_eq!(hover_cursor(&scene, Point::new(30.0, 30.0), &METRICS), "default");
}

#[test]
fn rotate_handle_radius_scales_with_size() {
    assert!((METRICS.rotate_radius() - 8.0 / 1.5).abs() < 1e-12);
}
