use crate::geometry::{normalize_point, segment_length, Point};
use crate::scene::{Body, Scene, Shape, ShapeId, ToolConfig};

/// Rect drafts thinner than this on either axis are dropped on pointer-up.
pub const MIN_RECT_EDGE: f64 = 1.0;
/// Line drafts shorter than this are dropped on pointer-up.
pub const MIN_LINE_LENGTH: f64 = 2.0;

/// Mutation commands issued at the render surface. The controller owns the
/// geometry; whatever actually paints (an `<svg>` element in the browser, a
/// recorder in tests) lives behind this trait.
pub trait RenderSink {
    fn append_shape(&mut self, shape: &Shape);
    fn update_geometry(&mut self, shape: &Shape);
    fn remove_shape(&mut self, id: ShapeId);
    fn clear_shapes(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Session {
    Idle,
    Drawing { id: ShapeId, anchor: Point },
}

/// One gesture at a time: pointer-down anchors a draft, pointer-moves drag
/// it, pointer-up commits or discards it. Events that arrive in the wrong
/// state are ignored rather than treated as errors.
pub struct Controller {
    scene: Scene,
    session: Session,
    next_id: u64,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller {
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            session: Session::Idle,
            next_id: 0,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn session(&self) -> Session {
        self.session
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.session, Session::Drawing { .. })
    }

    fn alloc_id(&mut self) -> ShapeId {
        self.next_id += 1;
        ShapeId(self.next_id)
    }

    /// Start a gesture at `point` with a fresh toolbar snapshot. Ignored
    /// while another gesture is live.
    pub fn begin(&mut self, sink: &mut dyn RenderSink, config: &ToolConfig, point: Point) {
        if self.is_drawing() {
            return;
        }
        let Some(point) = normalize_point(point) else {
            return;
        };
        let config = config.sanitized();
        let id = self.alloc_id();
        let shape = Shape::anchored(id, &config, point);
        sink.append_shape(&shape);
        self.scene.push(shape);
        self.session = Session::Drawing { id, anchor: point };
    }

    /// Drag the live draft to `point`. No-op when idle or when the draft was
    /// swept away by a clear mid-gesture.
    pub fn update(&mut self, sink: &mut dyn RenderSink, point: Point) {
        let Session::Drawing { id, anchor } = self.session else {
            return;
        };
        let Some(point) = normalize_point(point) else {
            return;
        };
        let Some(shape) = self.scene.get_mut(id) else {
            return;
        };
        shape.drag_to(anchor, point);
        sink.update_geometry(shape);
    }

    /// Finish the gesture: commit the draft, or discard it when it is too
    /// small to be a deliberate shape. Always lands back in idle.
    ///
    /// Returns the id of the committed shape, `None` on discard or when idle.
    pub fn end(&mut self, sink: &mut dyn RenderSink) -> Option<ShapeId> {
        let Session::Drawing { id, .. } = self.session else {
            return None;
        };
        self.session = Session::Idle;
        let shape = self.scene.get(id)?;
        if below_discard_threshold(shape) {
            self.scene.remove(id);
            sink.remove_shape(id);
            return None;
        }
        Some(id)
    }

    /// Abort the gesture, dropping the draft whatever its size. No-op when
    /// idle, so a stray escape press changes nothing.
    pub fn cancel(&mut self, sink: &mut dyn RenderSink) {
        let Session::Drawing { id, .. } = self.session else {
            return;
        };
        self.session = Session::Idle;
        if self.scene.remove(id).is_some() {
            sink.remove_shape(id);
        }
    }

    /// Empty the scene, draft included. Clear always wins: a gesture that is
    /// still live afterwards has nothing left to drag or commit, and falls
    /// back to idle on its pointer-up.
    pub fn clear(&mut self, sink: &mut dyn RenderSink) {
        self.scene.clear();
        sink.clear_shapes();
    }
}

fn below_discard_threshold(shape: &Shape) -> bool {
    match &shape.body {
        Body::Rect { width, height, .. } => *width < MIN_RECT_EDGE || *height < MIN_RECT_EDGE,
        Body::Line { x1, y1, x2, y2 } => {
            segment_length(Point::new(*x1, *y1), Point::new(*x2, *y2)) < MIN_LINE_LENGTH
        }
    }
}
