use crate::constants::{INSPECT_OVERLAY_ID, OVERLAY_ACTIVE_CLASS};
use viewer_core::InspectPresenter;
use web_sys as web;

#[inline]
pub fn show(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(INSPECT_OVERLAY_ID) {
        _ = el.class_list().add_1(OVERLAY_ACTIVE_CLASS);
    }
}

#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(INSPECT_OVERLAY_ID) {
        _ = el.class_list().remove_1(OVERLAY_ACTIVE_CLASS);
    }
}

#[inline]
pub fn is_active(document: &web::Document) -> bool {
    document
        .get_element_by_id(INSPECT_OVERLAY_ID)
        .map(|el| el.class_list().contains(OVERLAY_ACTIVE_CLASS))
        .unwrap_or(false)
}

/// Shows the `#inspect-overlay` chrome while an item is inspected. Pages
/// without the element simply get no chrome.
pub struct DomInspectOverlay {
    document: web::Document,
}

impl DomInspectOverlay {
    pub fn new(document: web::Document) -> Self {
        Self { document }
    }
}

impl InspectPresenter for DomInspectOverlay {
    fn on_focus_changed(&mut self, focused: bool) {
        if focused {
            show(&self.document);
        } else {
            hide(&self.document);
        }
        log::info!("[inspect] focused={}", focused);
    }
}
