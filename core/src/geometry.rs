/// A point in canvas-local coordinates, after the host has applied the
/// inverse screen transform to the raw device position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

pub fn normalize_point(point: Point) -> Option<Point> {
    if !point.x.is_finite() || !point.y.is_finite() {
        return None;
    }
    Some(point)
}

/// Top-left origin plus non-negative extent for the rectangle spanned by two
/// corners, whichever direction the drag went.
pub fn rect_from_corners(anchor: Point, point: Point) -> (Point, f64, f64) {
    let origin = Point {
        x: anchor.x.min(point.x),
        y: anchor.y.min(point.y),
    };
    let width = (point.x - anchor.x).abs();
    let height = (point.y - anchor.y).abs();
    (origin, width, height)
}

pub fn segment_length(a: Point, b: Point) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}
