//! DOM commit phase of a navigation: loading indicator, content injection
//! and the sole-active-container bookkeeping.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

use super::rewrite;
use super::section_id::SectionId;
use super::store::CacheEntry;

const LOADING_MARKUP: &str = r#"<div class="loading-spinner">Carregando...</div>"#;

/// Localized markup shown in place of a fragment that failed to load.
pub fn error_markup(id: &SectionId) -> String {
    format!(
        r#"<p class="load-error">Não foi possível carregar o conteúdo de "{id}". Tente novamente mais tarde.</p>"#
    )
}

/// Show the loading indicator in `container` and make it the sole active
/// container while its fragment is being fetched. Cache hits skip this state
/// entirely to avoid flicker.
pub fn render_loading(document: &Document, container: &Element) {
    deactivate_others(document, container);
    container.set_inner_html(LOADING_MARKUP);
    let _ = container.class_list().add_2("active", "loading");
}

/// Commit a loaded entry into its container, leaving it the only active one.
pub fn commit(document: &Document, container: &Element, entry: &CacheEntry) {
    deactivate_others(document, container);
    let _ = container.class_list().remove_1("loading");
    match entry {
        CacheEntry::Ready(record) => {
            container.set_inner_html(&record.html);
            rewrite::fix_relative_links(container, &record.source_url);
        }
        CacheEntry::Failed { message } => container.set_inner_html(message),
    }
    let _ = container.class_list().add_1("active");
}

/// Deactivate every other active container and clear its content to bound
/// memory; the store re-injects cached markup on the next visit.
fn deactivate_others(document: &Document, keep: &Element) {
    let Ok(active) = document.query_selector_all(".content.active") else {
        return;
    };
    for i in 0..active.length() {
        let Some(node) = active.get(i) else { continue };
        let Some(element) = node.dyn_ref::<Element>() else { continue };
        if element.is_same_node(Some(keep.as_ref())) {
            continue;
        }
        let _ = element.class_list().remove_1("active");
        element.set_inner_html("");
    }
}
