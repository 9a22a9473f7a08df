use std::collections::HashMap;

use web_sys::{Document, Element, SvgsvgElement};

use vectorpad_core::{Body, RenderSink, Shape, ShapeId};

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const RECT_FILL_OPACITY: &str = "0.6";

/// Render sink backed by a live `<svg>` element. Each scene shape maps to one
/// child node, addressed through the id table so geometry updates and
/// removals touch the right element.
pub struct SvgSink {
    document: Document,
    svg: SvgsvgElement,
    nodes: HashMap<ShapeId, Element>,
}

impl SvgSink {
    pub fn new(document: Document, svg: SvgsvgElement) -> Self {
        Self {
            document,
            svg,
            nodes: HashMap::new(),
        }
    }

    fn write_geometry(element: &Element, shape: &Shape) {
        match &shape.body {
            Body::Rect {
                x,
                y,
                width,
                height,
                ..
            } => {
                set_number(element, "x", *x);
                set_number(element, "y", *y);
                set_number(element, "width", *width);
                set_number(element, "height", *height);
            }
            Body::Line { x1, y1, x2, y2 } => {
                set_number(element, "x1", *x1);
                set_number(element, "y1", *y1);
                set_number(element, "x2", *x2);
                set_number(element, "y2", *y2);
            }
        }
    }
}

fn set_number(element: &Element, name: &str, value: f64) {
    let _ = element.set_attribute(name, &value.to_string());
}

impl RenderSink for SvgSink {
    fn append_shape(&mut self, shape: &Shape) {
        let tag = match shape.body {
            Body::Rect { .. } => "rect",
            Body::Line { .. } => "line",
        };
        let Ok(element) = self.document.create_element_ns(Some(SVG_NS), tag) else {
            return;
        };
        let _ = element.set_attribute("stroke", &shape.stroke);
        set_number(&element, "stroke-width", shape.stroke_width);
        let _ = element.set_attribute("data-shape-id", &shape.id.to_string());
        match &shape.body {
            Body::Rect { fill, .. } => {
                let _ = element.set_attribute("fill", fill);
                let _ = element.set_attribute("fill-opacity", RECT_FILL_OPACITY);
                let _ = element.set_attribute("class", "drawn-rect");
            }
            Body::Line { .. } => {
                let _ = element.set_attribute("stroke-linecap", "round");
            }
        }
        Self::write_geometry(&element, shape);
        let _ = self.svg.append_child(&element);
        self.nodes.insert(shape.id, element);
    }

    fn update_geometry(&mut self, shape: &Shape) {
        if let Some(element) = self.nodes.get(&shape.id) {
            Self::write_geometry(element, shape);
        }
    }

    fn remove_shape(&mut self, id: ShapeId) {
        if let Some(element) = self.nodes.remove(&id) {
            element.remove();
        }
    }

    fn clear_shapes(&mut self) {
        for (_, element) in self.nodes.drain() {
            element.remove();
        }
    }
}
