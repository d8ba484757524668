use crate::dom;
use crate::render::ParticleRenderer;
use flow_core::FlowEngine;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Tear down, recompute geometry and restart for the current window size.
pub fn apply_resize(engine: &Rc<RefCell<FlowEngine>>, renderer: &Rc<RefCell<ParticleRenderer>>) {
    let Some(viewport) = dom::viewport_size() else {
        return;
    };
    let mut events = Vec::new();
    engine.borrow_mut().resize(viewport, &mut events);
    let mut r = renderer.borrow_mut();
    r.apply(&events);
    // Anything the engine did not know about goes too.
    r.clear();
}

pub fn wire_resize(engine: Rc<RefCell<FlowEngine>>, renderer: Rc<RefCell<ParticleRenderer>>) {
    let closure = Closure::wrap(Box::new(move || {
        apply_resize(&engine, &renderer);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
