//! Todo CRUD page backed by the external REST API.

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::warn;

use crate::components::todo::TodoList;
use crate::services::todos as api;
use crate::services::todos::{NewTodo, Todo};

/// Todo list page: loads from the backend on mount and routes every
/// mutation through the service layer, refreshing the list afterwards.
#[component]
pub fn Todos() -> impl IntoView {
	let items = RwSignal::new(Vec::<Todo>::new());
	let loading = RwSignal::new(true);
	let error = RwSignal::new(None::<String>);
	let editing = RwSignal::new(None::<Todo>);
	let title = RwSignal::new(String::new());
	let description = RwSignal::new(String::new());

	let refresh = move || {
		spawn_local(async move {
			match api::list().await {
				Ok(todos) => {
					items.set(todos);
					error.set(None);
				}
				Err(e) => {
					warn!("failed to load todos: {e}");
					error.set(Some(e.to_string()));
				}
			}
			loading.set(false);
		});
	};
	refresh();

	let submit = move |ev: leptos::ev::SubmitEvent| {
		ev.prevent_default();
		let t = title.get().trim().to_string();
		if t.is_empty() {
			return;
		}
		let d = description.get().trim().to_string();
		let d = (!d.is_empty()).then_some(d);
		let current = editing.get();
		spawn_local(async move {
			let result = match current {
				Some(todo) => api::update(
					todo.id,
					&Todo {
						title: t,
						description: d,
						..todo
					},
				)
				.await
				.map(|_| ()),
				None => api::create(&NewTodo {
					title: t,
					description: d,
					completed: false,
				})
				.await
				.map(|_| ()),
			};
			match result {
				Ok(()) => {
					title.set(String::new());
					description.set(String::new());
					editing.set(None);
					refresh();
				}
				Err(e) => {
					warn!("failed to save todo: {e}");
					error.set(Some(e.to_string()));
				}
			}
		});
	};

	let on_toggle = Callback::new(move |id: i64| {
		spawn_local(async move {
			match api::toggle(id).await {
				Ok(_) => refresh(),
				Err(e) => {
					warn!("failed to toggle todo {id}: {e}");
					error.set(Some(e.to_string()));
				}
			}
		});
	});

	let on_delete = Callback::new(move |id: i64| {
		spawn_local(async move {
			match api::delete(id).await {
				Ok(()) => refresh(),
				Err(e) => {
					warn!("failed to delete todo {id}: {e}");
					error.set(Some(e.to_string()));
				}
			}
		});
	});

	let on_edit = Callback::new(move |todo: Todo| {
		title.set(todo.title.clone());
		description.set(todo.description.clone().unwrap_or_default());
		editing.set(Some(todo));
	});

	let cancel_edit = move |_| {
		editing.set(None);
		title.set(String::new());
		description.set(String::new());
	};

	view! {
		<div class="page">
			<header class="page-header">
				<h1>"Todo List"</h1>
				<p>"Full CRUD against the todo backend"</p>
			</header>

			{move || error.get().map(|e| view! { <div class="error-banner">{e}</div> })}

			<form class="todo-form" on:submit=submit>
				<input
					type="text"
					placeholder="What needs doing?"
					prop:value=move || title.get()
					on:input=move |ev| title.set(event_target_value(&ev))
				/>
				<input
					type="text"
					placeholder="Description (optional)"
					prop:value=move || description.get()
					on:input=move |ev| description.set(event_target_value(&ev))
				/>
				<button type="submit">
					{move || if editing.get().is_some() { "Save changes" } else { "Add todo" }}
				</button>
				<Show when=move || editing.get().is_some()>
					<button type="button" class="secondary" on:click=cancel_edit>
						"Cancel"
					</button>
				</Show>
			</form>

			<Show
				when=move || !loading.get()
				fallback=|| view! { <p class="todo-empty">"Loading todos..."</p> }
			>
				<TodoList todos=items on_toggle on_delete on_edit />
			</Show>
		</div>
	}
}
