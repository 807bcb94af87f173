pub mod content;
pub mod footer;
pub mod header;

use leptos::prelude::*;

/// Single-page shell: navigation header, content root, footer.
///
/// ```text
/// +------------------------------------------+
/// |              Header (nav)                |
/// +------------------------------------------+
/// |         #app-content (sections)          |
/// +------------------------------------------+
/// |                 Footer                   |
/// +------------------------------------------+
/// ```
#[component]
pub fn Shell() -> impl IntoView {
    view! {
        <header::Header />
        <main class="main-content">
            <content::ContentRoot />
        </main>
        <footer::Footer />
    }
}
