#![allow(clippy::float_cmp)]

use std::f64::consts::{FRAC_PI_2, PI};

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

// --- Camera defaults ---

#[test]
fn camera_default_is_identity() {
    let cam = Camera::default();
    assert_eq!(cam.pan_x, 0.0);
    assert_eq!(cam.pan_y, 0.0);
    assert_eq!(cam.zoom, 1.0);
}

// --- screen_to_world ---

#[test]
fn screen_to_world_half_zoom_doubles_coordinates() {
    let cam = Camera { pan_x: 0.0, pan_y: 0.0, zoom: 0.5 };
    let world = cam.screen_to_world(Point::new(100.0, 100.0));
    assert!(point_approx_eq(world, Point::new(200.0, 200.0)));
}

#[test]
fn screen_to_world_with_pan_and_zoom() {
    let cam = Camera { pan_x: 50.0, pan_y: 30.0, zoom: 2.0 };
    let world = cam.screen_to_world(Point::new(0.0, 0.0));
    assert!(approx_eq(world.x, -25.0));
    assert!(approx_eq(world.y, -15.0));
}

#[test]
fn world_to_screen_with_pan_and_zoom() {
    let cam = Camera { pan_x: 20.0, pan_y: 10.0, zoom: 3.0 };
    let screen = cam.world_to_screen(Point::new(5.0, 5.0));
    // 5*3 + 20 = 35, 5*3 + 10 = 25
    assert!(point_approx_eq(screen, Point::new(35.0, 25.0)));
}

#[test]
fn round_trip_fractional_zoom() {
    let cam = Camera { pan_x: 13.7, pan_y: -42.3, zoom: 0.75 };
    let world = Point::new(333.3, -999.9);
    let back = cam.screen_to_world(cam.world_to_screen(world));
    assert!(point_approx_eq(world, back));
}

#[test]
fn screen_dist_to_world_ignores_pan() {
    let cam = Camera { pan_x: 999.0, pan_y: -999.0, zoom: 4.0 };
    assert!(approx_eq(cam.screen_dist_to_world(8.0), 2.0));
}

// --- pan_by ---

#[test]
fn pan_by_accumulates() {
    let mut cam = Camera::default();
    cam.pan_by(10.0, -5.0);
    cam.pan_by(2.5, 1.0);
    assert!(approx_eq(cam.pan_x, 12.5));
    assert!(approx_eq(cam.pan_y, -4.0));
}

// --- zoom_at ---

#[test]
fn zoom_at_keeps_point_under_cursor_fixed() {
    let mut cam = Camera { pan_x: 40.0, pan_y: -15.0, zoom: 1.3 };
    let cursor = Point::new(321.0, 123.0);
    let before = cam.screen_to_world(cursor);
    cam.zoom_at(cursor, true, 0.1, 0.1, 20.0);
    let after = cam.screen_to_world(cursor);
    assert!(point_approx_eq(before, after));
    assert!(approx_eq(cam.zoom, 1.43));
}

#[test]
fn zoom_at_out_shrinks_zoom() {
    let mut cam = Camera::default();
    cam.zoom_at(Point::new(0.0, 0.0), false, 0.1, 0.1, 20.0);
    assert!(approx_eq(cam.zoom, 0.9));
}

#[test]
fn zoom_at_clamps_to_max() {
    let mut cam = Camera { pan_x: 0.0, pan_y: 0.0, zoom: 19.5 };
    let cursor = Point::new(200.0, 100.0);
    let before = cam.screen_to_world(cursor);
    cam.zoom_at(cursor, true, 0.1, 0.1, 20.0);
    assert_eq!(cam.zoom, 20.0);
    assert!(point_approx_eq(before, cam.screen_to_world(cursor)));
}

#[test]
fn zoom_at_clamps_to_min() {
    let mut cam = Camera { pan_x: 0.0, pan_y: 0.0, zoom: 0.105 };
    cam.zoom_at(Point::new(10.0, 10.0), false, 0.1, 0.1, 20.0);
    assert_eq!(cam.zoom, 0.1);
}

#[test]
fn zoom_at_steps_out_then_in() {
    let mut cam = Camera { pan_x: 12.0, pan_y: 7.0, zoom: 2.0 };
    let cursor = Point::new(50.0, 80.0);
    let before = cam.screen_to_world(cursor);
    cam.zoom_at(cursor, false, 0.25, 0.1, 20.0);
    assert!(approx_eq(cam.zoom, 1.5));
    cam.zoom_at(cursor, true, 0.25, 0.1, 20.0);
    assert!(approx_eq(cam.zoom, 1.875));
    assert!(point_approx_eq(before, cam.screen_to_world(cursor)));
}

#[test]
fn zoom_at_inverted_range_settles_on_max() {
    let mut cam = Camera::default();
    cam.zoom_at(Point::new(0.0, 0.0), true, 0.1, 5.0, 1.0);
    assert_eq!(cam.zoom, 1.0);
}

// --- local rotated space ---

#[test]
fn to_local_without_rotation_is_translation() {
    let local = to_local_rotated(Point::new(110.0, 60.0), Point::new(100.0, 50.0), 0.0);
    assert!(point_approx_eq(local, Point::new(10.0, 10.0)));
}

#[test]
fn to_local_undoes_quarter_turn() {
    // After a quarter turn the local +x axis points down the screen.
    let local = to_local_rotated(Point::new(0.0, 10.0), Point::new(0.0, 0.0), FRAC_PI_2);
    assert!(point_approx_eq(local, Point::new(10.0, 0.0)));
}

#[test]
fn local_round_trip() {
    let center = Point::new(-40.0, 75.5);
    for rotation in [0.0, 0.3, FRAC_PI_2, PI, 4.7] {
        let world = Point::new(12.0, -3.0);
        let back = from_local_rotated(to_local_rotated(world, center, rotation), center, rotation);
        assert!(point_approx_eq(world, back));
    }
}
