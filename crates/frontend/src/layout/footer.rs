use leptos::prelude::*;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="site-footer">
            <p>"Resenhas e textos. Conteúdo carregado sob demanda."</p>
        </footer>
    }
}
