use leptos::prelude::*;

/// Portfolio landing page.
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<div class="page">
			<header class="page-header">
				<h1>"Welcome to My Portfolio"</h1>
				<p>"Full-stack developer showcasing modern web applications"</p>
			</header>

			<div class="card">
				<h2>"About This Project"</h2>
				<p>
					"This site is a client-side web application compiled to WebAssembly. "
					"It demonstrates interactive canvas visualization, client-side routing, "
					"and CRUD flows against a REST backend."
				</p>

				<h3>"Projects"</h3>
				<ul>
					<li>
						<strong>"Graph: "</strong>
						"an interactive force-directed visualization - create nodes and "
						"weighted links, then drag circles around while the physics "
						"simulation relaxes the layout."
					</li>
					<li>
						<strong>"Todos: "</strong>
						"a todo list with create, edit, toggle, and delete, backed by an "
						"external REST API."
					</li>
				</ul>

				<h3>"Technologies Used"</h3>
				<ul>
					<li><strong>"Frontend: "</strong>"Rust, Leptos, WebAssembly, Canvas 2D"</li>
					<li><strong>"Backend: "</strong>"REST todo API (external service)"</li>
				</ul>

				<h3>"Getting Started"</h3>
				<p>
					"Navigate through the projects using the menu above. The graph demo "
					"runs entirely in the browser; the todo list expects the backend to "
					"be reachable."
				</p>
			</div>
		</div>
	}
}
