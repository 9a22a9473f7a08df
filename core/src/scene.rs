use crate::geometry::{rect_from_corners, Point};

pub const DEFAULT_STROKE_COLOR: &str = "#1f1f1f";
pub const DEFAULT_FILL_COLOR: &str = "none";
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    Rect,
    Line,
}

impl ShapeKind {
    /// Toolbar `<select>` values.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "rect" => Some(ShapeKind::Rect),
            "line" => Some(ShapeKind::Line),
            _ => None,
        }
    }
}

/// Snapshot of the toolbar, read once per gesture.
#[derive(Clone, Debug)]
pub struct ToolConfig {
    pub kind: ShapeKind,
    pub stroke: String,
    pub fill: String,
    pub stroke_width: f64,
}

impl ToolConfig {
    pub fn sanitized(&self) -> Self {
        Self {
            kind: self.kind,
            stroke: sanitize_color(self.stroke.clone(), DEFAULT_STROKE_COLOR),
            fill: sanitize_color(self.fill.clone(), DEFAULT_FILL_COLOR),
            stroke_width: sanitize_stroke_width(self.stroke_width),
        }
    }
}

pub fn sanitize_color(mut color: String, fallback: &str) -> String {
    if color.is_empty() {
        return fallback.to_string();
    }
    if color.len() > 32 {
        // back off to a char boundary so multibyte values cannot panic
        let mut cut = 32;
        while !color.is_char_boundary(cut) {
            cut -= 1;
        }
        color.truncate(cut);
    }
    color
}

pub fn sanitize_stroke_width(width: f64) -> f64 {
    if !width.is_finite() || width <= 0.0 {
        return DEFAULT_STROKE_WIDTH;
    }
    width
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ShapeId(pub u64);

impl std::fmt::Display for ShapeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Body {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: String,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    pub id: ShapeId,
    pub stroke: String,
    pub stroke_width: f64,
    pub body: Body,
}

impl Shape {
    /// Zero-extent draft anchored at the gesture start. Style comes from the
    /// config snapshot and is never re-read while the gesture runs.
    pub fn anchored(id: ShapeId, config: &ToolConfig, anchor: Point) -> Self {
        let body = match config.kind {
            ShapeKind::Rect => Body::Rect {
                x: anchor.x,
                y: anchor.y,
                width: 0.0,
                height: 0.0,
                fill: config.fill.clone(),
            },
            ShapeKind::Line => Body::Line {
                x1: anchor.x,
                y1: anchor.y,
                x2: anchor.x,
                y2: anchor.y,
            },
        };
        Self {
            id,
            stroke: config.stroke.clone(),
            stroke_width: config.stroke_width,
            body,
        }
    }

    /// Recompute draft geometry for the current pointer position. Rects keep
    /// their origin at the top-left whichever way the drag goes; lines move
    /// only the free endpoint.
    pub fn drag_to(&mut self, anchor: Point, point: Point) {
        match &mut self.body {
            Body::Rect {
                x,
                y,
                width,
                height,
                ..
            } => {
                let (origin, w, h) = rect_from_corners(anchor, point);
                *x = origin.x;
                *y = origin.y;
                *width = w;
                *height = h;
            }
            Body::Line { x2, y2, .. } => {
                *x2 = point.x;
                *y2 = point.y;
            }
        }
    }
}

/// Ordered committed-and-draft shapes; insertion order is paint order.
#[derive(Default)]
pub struct Scene {
    shapes: Vec<Shape>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|shape| shape.id == id)
    }

    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|shape| shape.id == id)
    }

    pub fn remove(&mut self, id: ShapeId) -> Option<Shape> {
        let index = self.shapes.iter().position(|shape| shape.id == id)?;
        Some(self.shapes.remove(index))
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect_config() -> ToolConfig {
        ToolConfig {
            kind: ShapeKind::Rect,
            stroke: "#ff0000".to_string(),
            fill: "#00ff00".to_string(),
            stroke_width: 3.0,
        }
    }

    #[test]
    fn parse_shape_kind() {
        assert_eq!(ShapeKind::parse("rect"), Some(ShapeKind::Rect));
        assert_eq!(ShapeKind::parse("line"), Some(ShapeKind::Line));
        assert_eq!(ShapeKind::parse("circle"), None);
        assert_eq!(ShapeKind::parse(""), None);
    }

    #[test]
    fn sanitize_stroke_width_falls_back() {
        assert_eq!(sanitize_stroke_width(f64::NAN), DEFAULT_STROKE_WIDTH);
        assert_eq!(sanitize_stroke_width(0.0), DEFAULT_STROKE_WIDTH);
        assert_eq!(sanitize_stroke_width(-4.0), DEFAULT_STROKE_WIDTH);
        assert_eq!(sanitize_stroke_width(5.5), 5.5);
    }

    #[test]
    fn sanitize_color_falls_back_and_truncates() {
        assert_eq!(sanitize_color(String::new(), "#1f1f1f"), "#1f1f1f");
        let long = "x".repeat(40);
        assert_eq!(sanitize_color(long, "#1f1f1f").len(), 32);
        assert_eq!(sanitize_color("#abc".to_string(), "#1f1f1f"), "#abc");
    }

    #[test]
    fn sanitize_color_truncates_multibyte_at_char_boundary() {
        // "é" straddles byte 32; the cut must land on the boundary before it
        let color = format!("{}é{}", "x".repeat(31), "y".repeat(10));
        let sanitized = sanitize_color(color, "#1f1f1f");
        assert_eq!(sanitized, "x".repeat(31));

        // a char ending exactly at byte 32 survives the cut
        let color = format!("{}ézzz", "x".repeat(30));
        assert_eq!(
            sanitize_color(color, "#1f1f1f"),
            format!("{}é", "x".repeat(30))
        );
    }

    #[test]
    fn anchored_rect_has_zero_extent() {
        let shape = Shape::anchored(ShapeId(1), &rect_config(), Point::new(4.0, 9.0));
        match shape.body {
            Body::Rect {
                x,
                y,
                width,
                height,
                ..
            } => {
                assert_eq!((x, y), (4.0, 9.0));
                assert_eq!((width, height), (0.0, 0.0));
            }
            Body::Line { .. } => panic!("expected rect"),
        }
    }

    #[test]
    fn anchored_line_starts_degenerate() {
        let config = ToolConfig {
            kind: ShapeKind::Line,
            ..rect_config()
        };
        let shape = Shape::anchored(ShapeId(1), &config, Point::new(4.0, 9.0));
        match shape.body {
            Body::Line { x1, y1, x2, y2 } => {
                assert_eq!((x1, y1), (4.0, 9.0));
                assert_eq!((x2, y2), (4.0, 9.0));
            }
            Body::Rect { .. } => panic!("expected line"),
        }
    }

    #[test]
    fn drag_to_normalizes_negative_rect_drag() {
        let anchor = Point::new(10.0, 10.0);
        let mut shape = Shape::anchored(ShapeId(1), &rect_config(), anchor);
        shape.drag_to(anchor, Point::new(2.0, 4.0));
        match shape.body {
            Body::Rect {
                x,
                y,
                width,
                height,
                ..
            } => {
                assert_eq!((x, y), (2.0, 4.0));
                assert_eq!((width, height), (8.0, 6.0));
            }
            Body::Line { .. } => panic!("expected rect"),
        }
    }

    #[test]
    fn drag_to_keeps_line_anchor_fixed() {
        let anchor = Point::new(1.0, 2.0);
        let config = ToolConfig {
            kind: ShapeKind::Line,
            ..rect_config()
        };
        let mut shape = Shape::anchored(ShapeId(1), &config, anchor);
        shape.drag_to(anchor, Point::new(8.0, -3.0));
        match shape.body {
            Body::Line { x1, y1, x2, y2 } => {
                assert_eq!((x1, y1), (1.0, 2.0));
                assert_eq!((x2, y2), (8.0, -3.0));
            }
            Body::Rect { .. } => panic!("expected line"),
        }
    }

    #[test]
    fn scene_remove_keeps_order() {
        let mut scene = Scene::new();
        for id in 1..=3 {
            scene.push(Shape::anchored(ShapeId(id), &rect_config(), Point::new(0.0, 0.0)));
        }
        scene.remove(ShapeId(2));
        let ids: Vec<u64> = scene.iter().map(|shape| shape.id.0).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(scene.remove(ShapeId(2)).is_none());
    }
}
