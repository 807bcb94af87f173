use leptos::prelude::*;

/// Content root with the pre-authored containers for the statically known
/// sections. Review containers are created on demand by the router and
/// appended here; at most one container is active at a time.
#[component]
pub fn ContentRoot() -> impl IntoView {
    view! {
        <div id="app-content">
            <section class="content" id="Home"></section>
            <section class="content" id="Sobre"></section>
            <section class="content" id="Resenhas"></section>
            <section class="content" id="Contato"></section>
        </div>
    }
}
