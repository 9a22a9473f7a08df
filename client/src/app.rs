use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlButtonElement, KeyboardEvent, PointerEvent, SvgsvgElement};

use vectorpad_core::Controller;

use crate::dom::{event_to_svg_point, get_element, Toolbar};
use crate::render::SvgSink;

fn debug_enabled(window: &web_sys::Window) -> bool {
    let search = window.location().search().ok().unwrap_or_default();
    search.contains("debug=1")
        || search.contains("debug=true")
        || search.contains("log=1")
        || search.contains("log=true")
}

#[wasm_bindgen(start)]
pub fn run() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))?;
    let started = Rc::new(Cell::new(false));

    if document.ready_state() == "complete" {
        started.set(true);
        return start_app();
    }

    let onload_started = started.clone();
    let onload = Closure::<dyn FnMut(Event)>::new(move |_| {
        if onload_started.replace(true) {
            return;
        }
        if let Err(err) = start_app() {
            web_sys::console::error_1(&err);
        }
    });
    window.add_event_listener_with_callback("load", onload.as_ref().unchecked_ref())?;
    onload.forget();

    Ok(())
}

fn start_app() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))?;

    let debug = debug_enabled(&window);
    if debug {
        web_sys::console::log_1(
            &"Vectorpad debug enabled. Keep the page URL but add `?debug=1` to re-enable logs."
                .into(),
        );
    }

    let svg: SvgsvgElement = get_element(&document, "svgCanvas")?;
    let toolbar = Toolbar {
        shape_select: get_element(&document, "shape-select")?,
        stroke_input: get_element(&document, "stroke-color")?,
        fill_input: get_element(&document, "fill-color")?,
        width_input: get_element(&document, "stroke-width")?,
    };
    let clear_button: HtmlButtonElement = get_element(&document, "clear-btn")?;

    let controller = Rc::new(RefCell::new(Controller::new()));
    let sink = Rc::new(RefCell::new(SvgSink::new(document.clone(), svg.clone())));

    {
        let down_controller = controller.clone();
        let down_sink = sink.clone();
        let down_svg = svg.clone();
        let down_toolbar = toolbar.clone();
        let ondown = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            // primary button only; secondary presses never start a gesture
            if event.button() != 0 {
                return;
            }
            event.prevent_default();
            let Some(point) = event_to_svg_point(&down_svg, &event) else {
                return;
            };
            let config = down_toolbar.read();
            let mut controller = down_controller.borrow_mut();
            let mut sink = down_sink.borrow_mut();
            controller.begin(&mut *sink, &config, point);
            if debug {
                web_sys::console::log_1(
                    &format!(
                        "gesture begin kind={:?} at=({:.1},{:.1})",
                        config.kind, point.x, point.y
                    )
                    .into(),
                );
            }
        });
        svg.add_event_listener_with_callback("pointerdown", ondown.as_ref().unchecked_ref())?;
        ondown.forget();
    }

    // move/up live on the window so a gesture keeps tracking after the
    // pointer leaves the canvas
    {
        let move_controller = controller.clone();
        let move_sink = sink.clone();
        let move_svg = svg.clone();
        let onmove = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            let mut controller = move_controller.borrow_mut();
            if !controller.is_drawing() {
                return;
            }
            event.prevent_default();
            let Some(point) = event_to_svg_point(&move_svg, &event) else {
                return;
            };
            let mut sink = move_sink.borrow_mut();
            controller.update(&mut *sink, point);
        });
        window.add_event_listener_with_callback("pointermove", onmove.as_ref().unchecked_ref())?;
        onmove.forget();
    }

    {
        let up_controller = controller.clone();
        let up_sink = sink.clone();
        let onup = Closure::<dyn FnMut(PointerEvent)>::new(move |_event: PointerEvent| {
            let mut controller = up_controller.borrow_mut();
            let was_drawing = controller.is_drawing();
            let mut sink = up_sink.borrow_mut();
            let committed = controller.end(&mut *sink);
            if debug && was_drawing {
                match committed {
                    Some(id) => {
                        web_sys::console::log_1(&format!("gesture commit id={id}").into());
                    }
                    None => web_sys::console::log_1(&"gesture discard (below threshold)".into()),
                }
            }
        });
        window.add_event_listener_with_callback("pointerup", onup.as_ref().unchecked_ref())?;
        onup.forget();
    }

    // touch input can be torn down by the host mid-gesture; treat that the
    // same as an explicit cancel
    {
        let cancel_controller = controller.clone();
        let cancel_sink = sink.clone();
        let oncancel = Closure::<dyn FnMut(PointerEvent)>::new(move |_event: PointerEvent| {
            let mut controller = cancel_controller.borrow_mut();
            let mut sink = cancel_sink.borrow_mut();
            controller.cancel(&mut *sink);
        });
        window
            .add_event_listener_with_callback("pointercancel", oncancel.as_ref().unchecked_ref())?;
        oncancel.forget();
    }

    {
        let key_controller = controller.clone();
        let key_sink = sink.clone();
        let onkeydown = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            if event.key() != "Escape" {
                return;
            }
            let mut controller = key_controller.borrow_mut();
            if !controller.is_drawing() {
                return;
            }
            let mut sink = key_sink.borrow_mut();
            controller.cancel(&mut *sink);
            if debug {
                web_sys::console::log_1(&"gesture cancel (escape)".into());
            }
        });
        window.add_event_listener_with_callback("keydown", onkeydown.as_ref().unchecked_ref())?;
        onkeydown.forget();
    }

    {
        let clear_controller = controller.clone();
        let clear_sink = sink.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            let mut controller = clear_controller.borrow_mut();
            let mut sink = clear_sink.borrow_mut();
            controller.clear(&mut *sink);
            if debug {
                web_sys::console::log_1(&"scene cleared".into());
            }
        });
        clear_button.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    Ok(())
}
