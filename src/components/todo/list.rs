use leptos::prelude::*;

use super::item::TodoItem;
use crate::services::todos::Todo;

/// Client-side visibility filter for the todo list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Filter {
	All,
	Active,
	Completed,
}

impl Filter {
	fn matches(self, todo: &Todo) -> bool {
		match self {
			Filter::All => true,
			Filter::Active => !todo.completed,
			Filter::Completed => todo.completed,
		}
	}

	fn empty_message(self) -> &'static str {
		match self {
			Filter::All => "No todos yet. Create your first todo to get started!",
			Filter::Active => "No active todos. Everything is done!",
			Filter::Completed => "No completed todos yet.",
		}
	}
}

/// Filterable list of todos with per-status counts.
#[component]
pub fn TodoList(
	#[prop(into)] todos: Signal<Vec<Todo>>,
	#[prop(into)] on_toggle: Callback<i64>,
	#[prop(into)] on_delete: Callback<i64>,
	#[prop(into)] on_edit: Callback<Todo>,
) -> impl IntoView {
	let filter = RwSignal::new(Filter::All);
	let total = move || todos.get().len();
	let active = move || todos.get().iter().filter(|t| !t.completed).count();
	let completed = move || todos.get().iter().filter(|t| t.completed).count();

	view! {
		<div class="card">
			<div class="todo-list-header">
				<h2>"Todo List"</h2>
				<span class="todo-counts">
					{move || format!("{} active, {} completed", active(), completed())}
				</span>
			</div>

			<div class="todo-filters">
				<button
					class:selected=move || filter.get() == Filter::All
					on:click=move |_| filter.set(Filter::All)
				>
					{move || format!("All ({})", total())}
				</button>
				<button
					class:selected=move || filter.get() == Filter::Active
					on:click=move |_| filter.set(Filter::Active)
				>
					{move || format!("Active ({})", active())}
				</button>
				<button
					class:selected=move || filter.get() == Filter::Completed
					on:click=move |_| filter.set(Filter::Completed)
				>
					{move || format!("Completed ({})", completed())}
				</button>
			</div>

			{move || {
				let visible: Vec<Todo> = todos
					.get()
					.into_iter()
					.filter(|t| filter.get().matches(t))
					.collect();
				if visible.is_empty() {
					view! { <p class="todo-empty">{filter.get().empty_message()}</p> }
						.into_any()
				} else {
					visible
						.into_iter()
						.map(|todo| {
							view! {
								<TodoItem todo on_toggle on_delete on_edit />
							}
						})
						.collect_view()
						.into_any()
				}
			}}
		</div>
	}
}
