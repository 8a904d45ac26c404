use leptos::prelude::*;

/// 404 fallback page.
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div class="page">
			<div class="card">
				<h1>"Page not found"</h1>
				<p>"The page you are looking for does not exist."</p>
				<a href="/">"Back to home"</a>
			</div>
		</div>
	}
}
