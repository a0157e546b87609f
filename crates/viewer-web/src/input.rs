//! Pointer wiring for the free-look orbit drag.
//!
//! Deltas are fed into the session's orbit controller; the session ignores
//! them unless the free-look view is active, so these handlers can stay
//! wired permanently.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys as web;

use viewer_core::ViewerSession;

#[derive(Default, Clone, Copy)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
    pub down: bool,
}

pub fn wire_orbit_drag(canvas: &web::HtmlCanvasElement, session: Rc<RefCell<ViewerSession>>) {
    let pointer = Rc::new(RefCell::new(PointerState::default()));
    wire_pointerdown(canvas, pointer.clone());
    wire_pointermove(canvas, pointer.clone(), session);
    wire_pointerup(canvas, pointer);
}

fn wire_pointerdown(canvas: &web::HtmlCanvasElement, pointer: Rc<RefCell<PointerState>>) {
    let canvas_for_capture = canvas.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let mut ps = pointer.borrow_mut();
        ps.down = true;
        ps.x = ev.client_x() as f32;
        ps.y = ev.client_y() as f32;
        _ = canvas_for_capture.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(
    canvas: &web::HtmlCanvasElement,
    pointer: Rc<RefCell<PointerState>>,
    session: Rc<RefCell<ViewerSession>>,
) {
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let mut ps = pointer.borrow_mut();
        if !ps.down {
            return;
        }
        let x = ev.client_x() as f32;
        let y = ev.client_y() as f32;
        let dx = x - ps.x;
        let dy = y - ps.y;
        ps.x = x;
        ps.y = y;
        session.borrow_mut().apply_orbit_drag(dx, dy);
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerup(canvas: &web::HtmlCanvasElement, pointer: Rc<RefCell<PointerState>>) {
    let canvas_for_release = canvas.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        pointer.borrow_mut().down = false;
        _ = canvas_for_release.release_pointer_capture(ev.pointer_id());
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
    closure.forget();
}
