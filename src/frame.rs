use crate::render::ParticleRenderer;
use flow_core::{FlowEngine, FlowEvent};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

// Long gaps (background tab) are clamped so the engine catches up in one
// bounded step instead of replaying every missed spawn.
const MAX_FRAME_DT: Duration = Duration::from_millis(250);

pub struct FrameContext {
    pub engine: Rc<RefCell<FlowEngine>>,
    pub renderer: Rc<RefCell<ParticleRenderer>>,
    pub last_instant: Instant,
    pub events: Vec<FlowEvent>,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_instant).min(MAX_FRAME_DT);
        self.last_instant = now;

        self.events.clear();
        self.engine.borrow_mut().tick(dt, &mut self.events);
        self.renderer.borrow_mut().apply(&self.events);
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
