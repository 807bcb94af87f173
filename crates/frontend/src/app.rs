use leptos::prelude::*;

use crate::layout::Shell;
use crate::router::{RouterConfig, SectionRouter};

#[component]
pub fn App() -> impl IntoView {
    // One router instance owns the fragment cache and the navigation state
    // for the whole page session; handlers reach it via context.
    let router = SectionRouter::new(RouterConfig::default());
    provide_context(router);

    // Hook the router up once the shell is in the DOM.
    let initialized = StoredValue::new(false);
    Effect::new(move |_| {
        if !initialized.get_value() {
            initialized.set_value(true);
            router.init();
        }
    });

    view! { <Shell /> }
}
