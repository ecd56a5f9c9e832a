#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

// --- Defaults ---

#[test]
fn camera_default_is_identity() {
    let cam = Camera::default();
    assert_eq!(cam.x, 0.0);
    assert_eq!(cam.y, 0.0);
    assert_eq!(cam.scale, 1.0);
}

#[test]
fn reset_restores_identity() {
    let mut cam = Camera { x: 40.0, y: -12.0, scale: 2.5 };
    cam.reset();
    assert_eq!(cam.x, 0.0);
    assert_eq!(cam.y, 0.0);
    assert_eq!(cam.scale, 1.0);
}

// --- screen_to_canvas ---

#[test]
fn screen_to_canvas_identity() {
    let cam = Camera::default();
    let p = cam.screen_to_canvas(Point::new(50.0, 75.0));
    assert!(point_approx_eq(p, Point::new(50.0, 75.0)));
}

#[test]
fn screen_to_canvas_with_scale() {
    let cam = Camera { x: 0.0, y: 0.0, scale: 4.0 };
    let p = cam.screen_to_canvas(Point::new(40.0, 80.0));
    assert!(point_approx_eq(p, Point::new(10.0, 20.0)));
}

#[test]
fn screen_to_canvas_with_translation() {
    let cam = Camera { x: 10.0, y: 20.0, scale: 1.0 };
    let p = cam.screen_to_canvas(Point::new(40.0, 80.0));
    assert!(point_approx_eq(p, Point::new(30.0, 60.0)));
}

// --- Round trip ---

#[test]
fn round_trip_across_zoom_bounds() {
    let cases = [
        Camera { x: 0.0, y: 0.0, scale: 0.1 },
        Camera { x: -300.0, y: 140.0, scale: 0.5 },
        Camera { x: 17.5, y: -42.25, scale: 1.0 },
        Camera { x: 1000.0, y: 1000.0, scale: 2.7 },
        Camera { x: -5.0, y: 3.0, scale: 5.0 },
    ];
    let p = Point::new(123.4, -56.7);
    for cam in cases {
        let there_and_back = cam.canvas_to_screen(cam.screen_to_canvas(p));
        assert!(point_approx_eq(there_and_back, p), "failed at scale {}", cam.scale);
    }
}

#[test]
fn screen_dist_scales_inverse() {
    let cam = Camera { x: 99.0, y: -3.0, scale: 2.0 };
    assert!(approx_eq(cam.screen_dist_to_canvas(10.0), 5.0));
}

// --- pan_by ---

#[test]
fn pan_accumulates() {
    let mut cam = Camera::default();
    cam.pan_by(5.0, -3.0);
    cam.pan_by(5.0, -3.0);
    assert!(approx_eq(cam.x, 10.0));
    assert!(approx_eq(cam.y, -6.0));
}

// --- zoom_at ---

#[test]
fn zoom_step_of_100_applies_base_factor() {
    let mut cam = Camera::default();
    cam.zoom_at(Point::new(0.0, 0.0), -100.0);
    assert!(approx_eq(cam.scale, 1.1));
}

#[test]
fn zoom_at_cursor_keeps_point_fixed() {
    let mut cam = Camera::default();
    let cursor = Point::new(100.0, 100.0);
    let under_cursor = cam.screen_to_canvas(cursor);
    cam.zoom_at(cursor, -100.0);
    assert!(approx_eq(cam.scale, 1.1));
    assert!(point_approx_eq(cam.screen_to_canvas(cursor), under_cursor));
}

#[test]
fn zoom_at_cursor_keeps_point_fixed_from_offset_camera() {
    let mut cam = Camera { x: 50.0, y: -20.0, scale: 1.6 };
    let cursor = Point::new(320.0, 200.0);
    let under_cursor = cam.screen_to_canvas(cursor);
    cam.zoom_at(cursor, 250.0);
    assert!(point_approx_eq(cam.screen_to_canvas(cursor), under_cursor));
}

#[test]
fn zoom_clamps_at_max() {
    let mut cam = Camera { x: 0.0, y: 0.0, scale: 4.9 };
    cam.zoom_at(Point::new(10.0, 10.0), -10_000.0);
    assert_eq!(cam.scale, ZOOM_MAX);
}

#[test]
fn zoom_clamps_at_min() {
    let mut cam = Camera { x: 0.0, y: 0.0, scale: 0.11 };
    cam.zoom_at(Point::new(10.0, 10.0), 10_000.0);
    assert_eq!(cam.scale, ZOOM_MIN);
}

#[test]
fn zoom_clamped_step_still_keeps_cursor_fixed() {
    let mut cam = Camera { x: 12.0, y: 34.0, scale: 4.9 };
    let cursor = Point::new(77.0, 31.0);
    let under_cursor = cam.screen_to_canvas(cursor);
    cam.zoom_at(cursor, -10_000.0);
    assert!(point_approx_eq(cam.screen_to_canvas(cursor), under_cursor));
}
