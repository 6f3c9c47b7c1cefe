use super::EventListener;
use crate::dom;
use crate::viewer::ViewerState;
use std::cell::RefCell;
use std::rc::Rc;
use viewer_core::ClickOutcome;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_pointer_handlers(
    canvas: &web::HtmlCanvasElement,
    state: &Rc<RefCell<ViewerState>>,
) -> Vec<EventListener> {
    vec![
        wire_mousedown(canvas, state),
        wire_mousemove(canvas, state),
        wire_mouseup(canvas, state),
        wire_wheel(canvas, state),
    ]
}

fn wire_mousedown(
    canvas: &web::HtmlCanvasElement,
    state: &Rc<RefCell<ViewerState>>,
) -> EventListener {
    let state = state.clone();
    EventListener::new(canvas.clone().into(), "mousedown", move |ev| {
        let Some(ev) = ev.dyn_ref::<web::MouseEvent>() else {
            return;
        };
        let pos = dom::client_pos(ev);
        let mut st = state.borrow_mut();
        st.inspect.pointer_down(pos);
        st.controls.begin_rotate(pos);
    })
}

fn wire_mousemove(
    canvas: &web::HtmlCanvasElement,
    state: &Rc<RefCell<ViewerState>>,
) -> EventListener {
    let state = state.clone();
    let canvas_move = canvas.clone();
    EventListener::new(canvas.clone().into(), "mousemove", move |ev| {
        let Some(ev) = ev.dyn_ref::<web::MouseEvent>() else {
            return;
        };
        let pos = dom::client_pos(ev);
        let height = dom::surface_rect(&canvas_move).height;
        let mut st = state.borrow_mut();
        st.inspect.pointer_move(pos);
        st.controls.rotate_to(pos, height);
    })
}

fn wire_mouseup(
    canvas: &web::HtmlCanvasElement,
    state: &Rc<RefCell<ViewerState>>,
) -> EventListener {
    let state = state.clone();
    let canvas_up = canvas.clone();
    EventListener::new(canvas.clone().into(), "mouseup", move |ev| {
        let Some(ev) = ev.dyn_ref::<web::MouseEvent>() else {
            return;
        };
        let pos = dom::client_pos(ev);
        let rect = dom::surface_rect(&canvas_up);

        let mut guard = state.borrow_mut();
        let st = &mut *guard;
        let outcome = st.inspect.pointer_up(
            pos,
            &rect,
            &st.desk.scene,
            &st.camera,
            &mut st.controls,
        );
        st.controls.end_rotate();

        match outcome {
            ClickOutcome::Focused(item) => {
                let name = st
                    .desk
                    .scene
                    .get(item)
                    .map(|n| n.name.as_str())
                    .unwrap_or("?");
                log::info!("[click] inspecting {}", name);
            }
            ClickOutcome::Unfocused => log::info!("[click] returning item"),
            ClickOutcome::Ignored => log::info!("[click] ignored while animating"),
            ClickOutcome::Dragged | ClickOutcome::Missed => {}
        }
    })
}

fn wire_wheel(canvas: &web::HtmlCanvasElement, state: &Rc<RefCell<ViewerState>>) -> EventListener {
    let state = state.clone();
    EventListener::new_active(canvas.clone().into(), "wheel", move |ev| {
        let Some(ev) = ev.dyn_ref::<web::WheelEvent>() else {
            return;
        };
        // the rig ignores this while an item is inspected
        state.borrow_mut().controls.dolly(ev.delta_y() as f32);
        ev.prevent_default();
    })
}
