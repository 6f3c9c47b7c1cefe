#![cfg(target_arch = "wasm32")]
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod overlay;
mod render;
mod viewer;

use constants::{CANVAS_CONTAINER_ID, FALLBACK_PARTICLE_SEED};
use events::InspectBindings;
use viewer::ViewerState;

/// What `dispose_viewer` needs to tear the viewer down.
struct ViewerHandle {
    bindings: InspectBindings,
    running: Rc<Cell<bool>>,
}

thread_local! {
    static VIEWER: RefCell<Option<ViewerHandle>> = const { RefCell::new(None) };
}

static STARTED: AtomicBool = AtomicBool::new(false);

fn create_canvas(document: &web::Document) -> anyhow::Result<web::HtmlCanvasElement> {
    let container = document
        .get_element_by_id(CANVAS_CONTAINER_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_CONTAINER_ID))?;
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    _ = canvas.set_attribute("style", "display:block;width:100%;height:100%");
    container
        .append_child(&canvas)
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    Ok(canvas)
}

fn particle_seed() -> u64 {
    let now = js_sys::Date::now();
    if now.is_finite() && now > 0.0 {
        now as u64
    } else {
        FALLBACK_PARTICLE_SEED
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("our3ddate viewer starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Detach every input and resize listener, stop the render loop and hide the inspect
/// chrome. Calling it again, or before the viewer started, does nothing.
#[wasm_bindgen]
pub fn dispose_viewer() {
    let Some(mut handle) = VIEWER.with(|v| v.borrow_mut().take()) else {
        return;
    };
    handle.bindings.dispose();
    handle.running.set(false);
    if let Some(document) = dom::window_document() {
        if overlay::is_active(&document) {
            overlay::hide(&document);
        }
    }
    log::info!("[viewer] disposed");
}

async fn init() -> anyhow::Result<()> {
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas = create_canvas(&document)?;

    let state = Rc::new(RefCell::new(ViewerState::new(document, particle_seed())?));
    let bindings = InspectBindings::attach(&canvas, &state);
    let running = Rc::new(Cell::new(true));
    VIEWER.with(|v| {
        *v.borrow_mut() = Some(ViewerHandle {
            bindings,
            running: running.clone(),
        })
    });

    // Avoid grabbing a 2D context here to allow WebGPU to acquire the canvas
    let gpu = frame::init_gpu(&canvas).await;
    if gpu.is_none() {
        log::warn!("[gpu] rendering disabled; interaction still runs");
    }

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        state,
        gpu,
        canvas,
        last_instant: Instant::now(),
        frames: 0,
        running,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
