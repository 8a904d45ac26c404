use leptos::prelude::*;

/// Static about page.
#[component]
pub fn About() -> impl IntoView {
	view! {
		<div class="page">
			<div class="card">
				<h1>"About"</h1>
				<p>
					"This portfolio doubles as a playground for building interactive "
					"browser applications in Rust. Everything on this site runs as "
					"WebAssembly; the only server involved is the todo backend."
				</p>

				<h2>"Technology Stack"</h2>
				<div class="stack-grid">
					<div class="stack-card">
						<h3>"Frontend"</h3>
						<ul>
							<li>"Rust compiled to WebAssembly"</li>
							<li>"Leptos for components and routing"</li>
							<li>"Canvas 2D for the graph renderer"</li>
						</ul>
					</div>
					<div class="stack-card">
						<h3>"Backend"</h3>
						<ul>
							<li>"External REST todo API"</li>
							<li>"JSON request and response bodies"</li>
						</ul>
					</div>
				</div>

				<h2>"Features"</h2>
				<ul>
					<li>"Force-directed graph layout with drag interaction"</li>
					<li>"Create, read, update, and delete todos"</li>
					<li>"Mark todos as complete or incomplete"</li>
				</ul>

				<div class="note">
					<p>
						<strong>"Note: "</strong>
						"this is a demo application - feel free to explore and test all "
						"the features."
					</p>
				</div>
			</div>
		</div>
	}
}
