use super::EventListener;
use crate::viewer::ViewerState;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Keys the viewer reacts to; everything else is left to the page.
#[inline]
pub fn is_dismiss_key(key: &str) -> bool {
    key == "Escape"
}

pub fn handle_global_keydown(ev: &web::KeyboardEvent, state: &Rc<RefCell<ViewerState>>) {
    let key = ev.key();
    if !is_dismiss_key(&key) {
        return;
    }
    let Ok(mut st) = state.try_borrow_mut() else {
        log::debug!("[keys] viewer busy; escape dropped");
        return;
    };
    if st.inspect.key_down(&key) {
        log::info!("[keys] escape dismissed inspection");
    }
}

// Window-level so Escape works wherever focus sits on the page
pub fn wire_escape_keydown(state: &Rc<RefCell<ViewerState>>) -> Option<EventListener> {
    let window = web::window()?;
    let state = state.clone();
    Some(EventListener::new(window.into(), "keydown", move |ev| {
        if let Some(ev) = ev.dyn_ref::<web::KeyboardEvent>() {
            handle_global_keydown(ev, &state);
        }
    }))
}
