mod controller;
mod geometry;
mod scene;

pub use controller::{Controller, RenderSink, Session, MIN_LINE_LENGTH, MIN_RECT_EDGE};
pub use geometry::{normalize_point, rect_from_corners, segment_length, Point};
pub use scene::{
    sanitize_color, sanitize_stroke_width, Body, Scene, Shape, ShapeId, ShapeKind, ToolConfig,
    DEFAULT_STROKE_COLOR, DEFAULT_STROKE_WIDTH,
};
