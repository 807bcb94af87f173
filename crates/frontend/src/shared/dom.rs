//! Small DOM access helpers.

/// The page document, when running in a browsing context.
pub fn document() -> Option<web_sys::Document> {
    web_sys::window().and_then(|window| window.document())
}
