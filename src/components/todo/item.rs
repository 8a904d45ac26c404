use leptos::prelude::*;

use crate::services::todos::Todo;

/// Drop the time component of an ISO timestamp for display.
fn format_date(stamp: &str) -> String {
	stamp.split('T').next().unwrap_or(stamp).to_string()
}

/// Single todo row with toggle, edit, and delete actions.
#[component]
pub fn TodoItem(
	todo: Todo,
	#[prop(into)] on_toggle: Callback<i64>,
	#[prop(into)] on_delete: Callback<i64>,
	#[prop(into)] on_edit: Callback<Todo>,
) -> impl IntoView {
	let id = todo.id;
	let completed = todo.completed;
	let row_class = if completed {
		"todo-item completed"
	} else {
		"todo-item"
	};
	let title_class = if completed { "todo-title done" } else { "todo-title" };

	let created = todo.created_at.as_deref().map(format_date);
	let updated = todo
		.updated_at
		.as_deref()
		.filter(|u| todo.created_at.as_deref() != Some(*u))
		.map(format_date);
	let edit_todo = todo.clone();

	view! {
		<div class=row_class>
			<div class="todo-main">
				<label class="todo-check">
					<input
						type="checkbox"
						prop:checked=completed
						on:change=move |_| on_toggle.run(id)
					/>
					<span class=title_class>{todo.title.clone()}</span>
				</label>
				{todo
					.description
					.clone()
					.map(|d| view! { <p class="todo-description">{d}</p> })}
				<div class="todo-dates">
					{created.map(|c| view! { <span>"Created: " {c}</span> })}
					{updated.map(|u| view! { <span>"Updated: " {u}</span> })}
				</div>
			</div>
			<div class="todo-actions">
				<button class="link-button" on:click=move |_| on_edit.run(edit_todo.clone())>
					"Edit"
				</button>
				<button class="link-button danger" on:click=move |_| on_delete.run(id)>
					"Delete"
				</button>
			</div>
		</div>
	}
}
