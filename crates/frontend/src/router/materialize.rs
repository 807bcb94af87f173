//! Section container lookup and creation.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

use super::config::RouterConfig;
use super::error::RouterError;
use super::section_id::SectionId;

/// Return the container element for `id`.
///
/// Statically authored containers are reused. Review ids unknown at
/// page-load time get a container created under the content root (falling
/// back to `<body>`); created containers are never removed, only hidden.
/// Any other unknown id is [`RouterError::ContainerMissing`].
pub fn ensure_container(
    document: &Document,
    id: &SectionId,
    config: &RouterConfig,
) -> Result<Element, RouterError> {
    if let Some(existing) = document.get_element_by_id(id.as_str()) {
        return Ok(existing);
    }
    if !id.is_review() {
        return Err(RouterError::ContainerMissing(id.to_string()));
    }

    let missing = || RouterError::ContainerMissing(id.to_string());
    let container = document.create_element("section").map_err(|_| missing())?;
    container.set_id(id.as_str());
    container.set_class_name("content");

    let root: Element = match document.get_element_by_id(&config.app_root_id) {
        Some(root) => root,
        None => document.body().ok_or_else(missing)?.into(),
    };
    root.append_child(&container).map_err(|_| missing())?;
    Ok(container)
}

/// Ids of the section containers currently authored in the DOM, used by the
/// normalizer to canonicalize casing.
pub fn authored_ids(document: &Document) -> Vec<String> {
    let mut ids = Vec::new();
    let Ok(containers) = document.query_selector_all(".content[id]") else {
        return ids;
    };
    for i in 0..containers.length() {
        if let Some(element) = containers.get(i).as_ref().and_then(|n| n.dyn_ref::<Element>()) {
            ids.push(element.id());
        }
    }
    ids
}
