#![cfg(target_arch = "wasm32")]
use flow_core::{EngineConfig, FlowEngine, DEFAULT_SOURCES};
use instant::Instant;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

mod constants;
mod dom;
mod events;
mod frame;
mod layout;
mod render;
mod scene;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("datamachine-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let container = document
        .get_element_by_id(constants::CONTAINER_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CONTAINER_ID))?;

    let sources = DEFAULT_SOURCES.to_vec();
    let engine = FlowEngine::new(EngineConfig::default(), sources.clone(), StdRng::from_entropy())?;
    let engine = Rc::new(RefCell::new(engine));
    let renderer = Rc::new(RefCell::new(render::ParticleRenderer::new(
        document.clone(),
        container,
        sources,
    )));

    // First geometry + initialize, then keep it in sync with the window
    events::apply_resize(&engine, &renderer);
    events::wire_resize(engine.clone(), renderer.clone());
    scene::highlight_output(&document, engine.borrow().highlighted_output());

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        engine,
        renderer,
        last_instant: Instant::now(),
        events: Vec::new(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
