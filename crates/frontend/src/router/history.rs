//! Address-bar hash and browser-history integration.
//!
//! The location hash is the only persisted piece of navigation state; there
//! are no query parameters and no server-side routes.

use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};

use super::section_id::{SectionId, REVIEWS_DIR};

/// Class marker that forces an anchor to be routed as a review link.
const REVIEW_LINK_CLASS: &str = "resenha-link";

/// Raw location hash, leading `#` included. Empty string when absent.
pub fn current_hash() -> Option<String> {
    web_sys::window()?.location().hash().ok()
}

/// Push a new history entry for `id`.
pub fn push_hash(id: &SectionId) {
    apply_hash(id, false);
}

/// Replace the current history entry with `id`, without adding a
/// back-navigation step.
pub fn replace_hash(id: &SectionId) {
    apply_hash(id, true);
}

fn apply_hash(id: &SectionId, replace: bool) {
    let Some(window) = web_sys::window() else { return };
    let Ok(history) = window.history() else {
        log::warn!("history API unavailable; address bar not updated for '{id}'");
        return;
    };
    let url = format!("#{id}");
    let result = if replace {
        history.replace_state_with_url(&JsValue::NULL, "", Some(&url))
    } else {
        history.push_state_with_url(&JsValue::NULL, "", Some(&url))
    };
    if let Err(err) = result {
        log::warn!("history update for '{id}' failed: {err:?}");
    }
}

/// Subscribe to `hashchange`, covering back/forward navigation and manual
/// hash edits. The listener lives for the page lifetime.
pub fn on_hash_change(handler: impl Fn() + 'static) {
    let Some(window) = web_sys::window() else { return };
    let closure = Closure::wrap(Box::new(handler) as Box<dyn Fn()>);
    let listener = window
        .add_event_listener_with_callback("hashchange", closure.as_ref().unchecked_ref());
    match listener {
        Ok(()) => closure.forget(),
        Err(err) => log::error!("failed to subscribe to hashchange: {err:?}"),
    }
}

/// Classify an anchor as a review link, either by a `resenhas/` path segment
/// or by the explicit class marker. Review links are routed through the
/// section router; every other anchor keeps its native behavior.
pub fn is_review_link(href: &str, class_attr: Option<&str>) -> bool {
    let marked = class_attr
        .map(|classes| classes.split_whitespace().any(|c| c == REVIEW_LINK_CLASS))
        .unwrap_or(false);
    if marked {
        return true;
    }
    let path = href.split(['?', '#']).next().unwrap_or(href);
    let segments: Vec<&str> = path.split('/').collect();
    segments
        .iter()
        .position(|segment| segment.eq_ignore_ascii_case(REVIEWS_DIR))
        .is_some_and(|position| position < segments.len() - 1)
}
