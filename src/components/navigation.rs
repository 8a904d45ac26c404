use leptos::prelude::*;
use leptos_router::components::A;

/// Top navigation bar. The router marks the current route's link with
/// `aria-current`, which the stylesheet uses for the active state.
#[component]
pub fn Navigation() -> impl IntoView {
	view! {
		<nav class="navbar">
			<div class="nav-brand">
				<A href="/">"Portfolio"</A>
			</div>
			<div class="nav-links">
				<A href="/">"Home"</A>
				<A href="/graph">"Graph"</A>
				<A href="/todos">"Todos"</A>
				<A href="/about">"About"</A>
			</div>
		</nav>
	}
}
