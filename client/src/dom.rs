use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlInputElement, HtmlSelectElement, PointerEvent, SvgsvgElement};

use vectorpad_core::{Point, ShapeKind, ToolConfig};

pub fn get_element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    let element = document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Missing element: {id}")))?;
    element
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("Invalid element type: {id}")))
}

/// Raw client coordinates mapped into the svg's local space. The surface can
/// scroll, resize, or re-scale between events, so the screen transform is
/// rebuilt here on every call instead of being cached for the gesture.
pub fn event_to_svg_point(svg: &SvgsvgElement, event: &PointerEvent) -> Option<Point> {
    let matrix = svg.get_screen_ctm()?;
    let inverse = matrix.inverse().ok()?;
    let point = svg.create_svg_point();
    point.set_x(event.client_x() as f32);
    point.set_y(event.client_y() as f32);
    let local = point.matrix_transform(&inverse);
    Some(Point::new(f64::from(local.x()), f64::from(local.y())))
}

/// The toolbar owns the tool configuration; the controller only reads it, and
/// only at pointer-down.
#[derive(Clone)]
pub struct Toolbar {
    pub shape_select: HtmlSelectElement,
    pub stroke_input: HtmlInputElement,
    pub fill_input: HtmlInputElement,
    pub width_input: HtmlInputElement,
}

impl Toolbar {
    pub fn read(&self) -> ToolConfig {
        let kind = ShapeKind::parse(&self.shape_select.value()).unwrap_or(ShapeKind::Rect);
        // unparseable widths become NaN and fall back to the default in
        // the controller's sanitize pass
        let stroke_width = self
            .width_input
            .value()
            .trim()
            .parse::<f64>()
            .unwrap_or(f64::NAN);
        ToolConfig {
            kind,
            stroke: self.stroke_input.value(),
            fill: self.fill_input.value(),
            stroke_width,
        }
    }
}
