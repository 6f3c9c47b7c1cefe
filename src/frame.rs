use crate::render;
use crate::viewer::ViewerState;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub state: Rc<RefCell<ViewerState>>,
    pub gpu: Option<render::GpuState<'a>>,
    pub canvas: web::HtmlCanvasElement,
    pub last_instant: Instant,
    pub frames: u64,
    /// Cleared by `dispose_viewer`; the loop stops at the next frame.
    pub running: Rc<Cell<bool>>,
}

impl<'a> FrameContext<'a> {
    /// Returns false once the viewer has been disposed.
    pub fn frame(&mut self) -> bool {
        if !self.running.get() {
            return false;
        }
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;
        self.frames += 1;
        if self.frames % 600 == 0 {
            log::debug!(
                "[frame] {} frames, last dt {:.1}ms",
                self.frames,
                dt.as_secs_f32() * 1000.0
            );
        }

        let w = self.canvas.width();
        let h = self.canvas.height();
        // an event handler may still hold the state; catch it next frame
        let Ok(mut st) = self.state.try_borrow_mut() else {
            log::debug!("[frame] state busy; skipped frame {}", self.frames);
            return true;
        };
        st.advance(w as f32, h as f32);

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(w, h);
            if let Err(e) = g.render(&st.desk.scene, &st.camera, &st.lights) {
                log::error!("render error: {:?}", e);
            }
        }
        true
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if frame_ctx_tick.borrow_mut().frame() {
            request_frame(&tick_clone);
        } else {
            log::info!("[frame] loop stopped");
        }
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
