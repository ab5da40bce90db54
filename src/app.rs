use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <nav class="navbar">
            <span class="navbar-brand">"Theme Toggle"</span>
            <ul class="navbar-nav">
                <li class="nav-item">
                    <a href="/" class="nav-link">"Home"</a>
                </li>
                <li class="nav-item dropdown">
                    <a href="#" class="nav-link">"Language"</a>
                </li>
            </ul>
        </nav>
        <main class="content">
            <h2>"Light and dark"</h2>
            <p class="page-description">
                "Your choice is remembered for this site. "
                "Without one, the page follows your system setting."
            </p>
        </main>
    }
}
