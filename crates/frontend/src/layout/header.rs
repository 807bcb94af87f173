use leptos::prelude::*;

use crate::router::SectionRouter;

/// Menu entries: canonical section id and label.
const NAV_SECTIONS: &[(&str, &str)] = &[
    ("Home", "Home"),
    ("Sobre", "Sobre"),
    ("Resenhas", "Resenhas"),
    ("Contato", "Contato"),
];

/// Navigation header. Exactly the anchor whose target resolves to the active
/// section carries the `active` class.
#[component]
pub fn Header() -> impl IntoView {
    let router = use_context::<SectionRouter>().expect("SectionRouter context not found");

    view! {
        <header class="site-header">
            <nav>
                <ul class="nav-links">
                    {NAV_SECTIONS
                        .iter()
                        .map(|&(id, label)| {
                            view! {
                                <li>
                                    <a
                                        href=format!("#{id}")
                                        class:active=move || router.is_active(id)
                                        on:click=move |ev| {
                                            ev.prevent_default();
                                            router.navigate(id);
                                        }
                                    >
                                        {label}
                                    </a>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
            </nav>
        </header>
    }
}
