pub mod detach;
pub mod keyboard;
pub mod pointer;

use crate::dom;
use crate::viewer::ViewerState;
use detach::AttachedSet;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// A DOM listener that stays attached until detached or dropped.
pub struct EventListener {
    target: web::EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(web::Event)>,
}

impl EventListener {
    pub fn new(
        target: web::EventTarget,
        kind: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Self {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        _ = target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref());
        Self {
            target,
            kind,
            callback,
        }
    }

    /// Like [`EventListener::new`] but marked non-passive so the handler may
    /// call `prevent_default` (wheel scrolling, for one).
    pub fn new_active(
        target: web::EventTarget,
        kind: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Self {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        let options = web::AddEventListenerOptions::new();
        options.set_passive(false);
        _ = target.add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            callback.as_ref().unchecked_ref(),
            &options,
        );
        Self {
            target,
            kind,
            callback,
        }
    }

    fn detach(&self) {
        let f: &js_sys::Function = self.callback.as_ref().unchecked_ref();
        _ = self.target.remove_event_listener_with_callback(self.kind, f);
    }
}

/// Every listener the viewer attached to the canvas and the window.
#[derive(Default)]
pub struct InspectBindings {
    listeners: AttachedSet<EventListener>,
}

impl InspectBindings {
    pub fn attach(canvas: &web::HtmlCanvasElement, state: &Rc<RefCell<ViewerState>>) -> Self {
        let mut listeners = AttachedSet::from(pointer::wire_pointer_handlers(canvas, state));
        if let Some(l) = keyboard::wire_escape_keydown(state) {
            listeners.push(l);
        }
        if let Some(l) = wire_canvas_resize(canvas) {
            listeners.push(l);
        }
        log::info!("[input] attached {} listeners", listeners.len());
        Self { listeners }
    }

    /// Detach everything. Safe to call any number of times.
    pub fn dispose(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        let n = self.listeners.detach_all(|l| l.detach());
        log::info!("[input] {} listeners detached", n);
    }
}

impl Drop for InspectBindings {
    fn drop(&mut self) {
        self.dispose();
    }
}

// Keep the canvas backing store at CSS size * devicePixelRatio
fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) -> Option<EventListener> {
    dom::sync_canvas_backing_size(canvas);
    let window = web::window()?;
    let canvas = canvas.clone();
    Some(EventListener::new(window.into(), "resize", move |_| {
        dom::sync_canvas_backing_size(&canvas);
    }))
}
