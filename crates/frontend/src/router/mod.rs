//! Hash-addressed section routing for the single-page shell.
//!
//! Named sections are fetched on demand as HTML fragments, cached for the
//! page lifetime and swapped into their container, with the address bar and
//! back/forward history kept consistent. One [`SectionRouter`] instance owns
//! the cache, the configuration and the navigation state; it is provided via
//! context and closed over by the event handlers.

pub mod config;
pub mod error;
pub mod history;
pub mod loader;
pub mod materialize;
pub mod rewrite;
pub mod section_id;
pub mod store;
mod switcher;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

pub use self::config::RouterConfig;
pub use self::section_id::SectionId;

use self::store::{CacheEntry, FragmentStore};

/// Wait between cache polls while another navigation is already fetching the
/// same id.
const IN_FLIGHT_POLL_MS: u32 = 25;

/// The single owned router instance.
///
/// `Copy` so event handlers can close over it freely; all interior state
/// lives in signals and stored values, as everything runs on the one UI
/// thread.
#[derive(Clone, Copy)]
pub struct SectionRouter {
    /// Currently visible section; drives the menu's active link.
    pub active: RwSignal<Option<SectionId>>,
    store: StoredValue<FragmentStore>,
    config: StoredValue<RouterConfig>,
    /// Navigation generation; a `show` that finishes after a newer one
    /// started must not commit.
    generation: StoredValue<u64>,
}

impl SectionRouter {
    pub fn new(config: RouterConfig) -> Self {
        Self {
            active: RwSignal::new(None),
            store: StoredValue::new(FragmentStore::new()),
            config: StoredValue::new(config),
            generation: StoredValue::new(0),
        }
    }

    /// Resolve the initial section, subscribe to hash changes and intercept
    /// review links. Call once, after the shell is in the DOM.
    pub fn init(&self) {
        let raw = history::current_hash();
        let id = self.resolve(raw.as_deref());

        // Give the section an explicit, canonical hash without adding a
        // back-navigation step; covers the empty initial hash in particular.
        let raw_token = raw.as_deref().unwrap_or("").trim_start_matches('#');
        if raw_token != id.as_str() {
            history::replace_hash(&id);
        }

        let this = *self;
        spawn_local(async move { this.show(id).await });

        let this = *self;
        history::on_hash_change(move || {
            let id = this.resolve(history::current_hash().as_deref());
            // Re-navigation to the visible section is a no-op.
            if this.active.get_untracked().as_ref() == Some(&id) {
                return;
            }
            spawn_local(async move { this.show(id).await });
        });

        self.intercept_review_links();
    }

    /// User-initiated navigation: record a history entry and show the
    /// section. Unknown ids that cannot be materialized are refused with a
    /// warning and no observable effect.
    pub fn navigate(&self, raw: &str) {
        let id = self.resolve(Some(raw));
        if !self.can_materialize(&id) {
            log::warn!("section '{id}' has no container and is not a review id; ignoring");
            return;
        }

        // An explicit trigger is the retry path for a previously failed load.
        self.store.update_value(|store| store.evict_failed(&id));

        let already_current = history::current_hash()
            .map(|hash| hash.trim_start_matches('#') == id.as_str())
            .unwrap_or(false);
        if !already_current {
            history::push_hash(&id);
        }

        let this = *self;
        spawn_local(async move { this.show(id).await });
    }

    /// Whether `target` (any raw navigation token) names the currently
    /// visible section. Reactive through the `active` signal.
    pub fn is_active(&self, target: &str) -> bool {
        let id = self.resolve(Some(target));
        self.active.get().as_ref() == Some(&id)
    }

    fn resolve(&self, raw: Option<&str>) -> SectionId {
        let authored = crate::shared::dom::document()
            .map(|document| materialize::authored_ids(&document))
            .unwrap_or_default();
        SectionId::normalize(raw, &authored)
    }

    fn can_materialize(&self, id: &SectionId) -> bool {
        if id.is_review() {
            return true;
        }
        crate::shared::dom::document()
            .and_then(|document| document.get_element_by_id(id.as_str()))
            .is_some()
    }

    /// Orchestration entry point: make `id` the one visible section.
    async fn show(&self, id: SectionId) {
        let Some(document) = crate::shared::dom::document() else {
            return;
        };

        let container = self
            .config
            .with_value(|config| materialize::ensure_container(&document, &id, config));
        let container = match container {
            Ok(container) => container,
            Err(err) => {
                log::warn!("navigation to '{id}' aborted: {err}");
                return;
            }
        };

        // Armed only once the navigation is known to be committable: a
        // refused id must not invalidate an in-flight navigation.
        let generation = self.next_generation();

        let entry = match self.store.with_value(|store| store.get(&id)) {
            // Cache hit: commit straight away, no indicator flicker.
            Some(entry) => entry,
            None => {
                switcher::render_loading(&document, &container);
                self.load(&id).await
            }
        };

        if self.generation.get_value() != generation {
            log::debug!("navigation to '{id}' superseded; dropping stale result");
            return;
        }

        switcher::commit(&document, &container, &entry);
        self.active.set(Some(id));
        if let Some(window) = web_sys::window() {
            window.scroll_to_with_x_and_y(0.0, 0.0);
        }
    }

    /// Fetch a fragment through the store, de-duplicating concurrent
    /// requests for the same id.
    async fn load(&self, id: &SectionId) -> CacheEntry {
        if self.store.with_value(|store| store.is_loading(id)) {
            // Another navigation is already fetching this id; wait for its
            // result instead of issuing a duplicate request.
            loop {
                TimeoutFuture::new(IN_FLIGHT_POLL_MS).await;
                if let Some(entry) = self.store.with_value(|store| store.get(id)) {
                    return entry;
                }
                if !self.store.with_value(|store| store.is_loading(id)) {
                    break;
                }
            }
        }

        self.store.update_value(|store| {
            store.begin_load(id);
        });
        let config = self.config.get_value();
        let entry = match loader::fetch_fragment(id, &config).await {
            Ok(record) => CacheEntry::Ready(record),
            Err(err) => {
                log::error!("loading section '{id}' failed: {err}");
                CacheEntry::Failed {
                    message: switcher::error_markup(id),
                }
            }
        };
        self.store
            .update_value(|store| store.finish_load(id, entry.clone()));
        // The store keeps the first completed result authoritative.
        self.store
            .with_value(|store| store.get(id))
            .unwrap_or(entry)
    }

    /// One delegated listener on the content root routes review links
    /// through the router; every other anchor keeps its native behavior.
    fn intercept_review_links(&self) {
        let Some(document) = crate::shared::dom::document() else {
            return;
        };
        let root: Element = match self
            .config
            .with_value(|config| document.get_element_by_id(&config.app_root_id))
        {
            Some(root) => root,
            None => match document.body() {
                Some(body) => body.into(),
                None => return,
            },
        };

        let this = *self;
        let closure = Closure::wrap(Box::new(move |event: web_sys::MouseEvent| {
            let Some(target) = event.target() else { return };
            let Some(element) = target.dyn_ref::<Element>() else {
                return;
            };
            let Ok(Some(anchor)) = element.closest("a[href]") else {
                return;
            };
            let Some(href) = anchor.get_attribute("href") else {
                return;
            };
            if history::is_review_link(&href, anchor.get_attribute("class").as_deref()) {
                event.prevent_default();
                this.navigate(&href);
            }
        }) as Box<dyn FnMut(web_sys::MouseEvent)>);

        let listener =
            root.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        match listener {
            // Listener lives for the page lifetime; leak the closure.
            Ok(()) => closure.forget(),
            Err(err) => log::error!("failed to attach review-link listener: {err:?}"),
        }
    }

    fn next_generation(&self) -> u64 {
        let next = self.generation.get_value() + 1;
        self.generation.set_value(next);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leptos::prelude::*;

    // `show` arms the stale guard through `next_generation` only after its
    // container resolves, so a refused navigation (warning only) leaves the
    // armed generation, and with it any pending commit, current.
    #[test]
    fn armed_generation_stays_current_until_another_navigation_arms_one() {
        let owner = Owner::new();
        owner.set();

        let router = SectionRouter::new(RouterConfig::default());
        let pending = router.next_generation();
        assert_eq!(
            router.generation.get_value(),
            pending,
            "nothing armed since; the pending commit must still win"
        );

        let newer = router.next_generation();
        assert_ne!(pending, newer);
        assert_eq!(router.generation.get_value(), newer);
    }
}
