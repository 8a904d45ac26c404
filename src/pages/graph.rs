//! Interactive force-directed graph demo page.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;

use crate::components::force_graph::ForceGraphCanvas;
use crate::engine::{Engine, NodeId};

/// Initial surface size; the canvas component resizes the engine to the
/// mounted element's actual size.
const SURFACE: (f64, f64) = (960.0, 600.0);

/// Graph demo page: toolbar for topology edits plus the simulation canvas.
#[component]
pub fn Graph() -> impl IntoView {
	let engine = Rc::new(RefCell::new(Engine::new(SURFACE.0, SURFACE.1)));
	let selected = RwSignal::new(None::<NodeId>);
	let node_text = RwSignal::new(String::new());
	let rename_text = RwSignal::new(String::new());
	let status = RwSignal::new(None::<String>);

	let engine_add = engine.clone();
	let add_node = move |ev: leptos::ev::SubmitEvent| {
		ev.prevent_default();
		let text = node_text.get();
		let text = text.trim();
		if text.is_empty() {
			return;
		}
		engine_add.borrow_mut().add_node(text);
		node_text.set(String::new());
		status.set(None);
	};

	let engine_link = engine.clone();
	let add_link = move |_| {
		if engine_link.borrow_mut().add_random_link().is_none() {
			status.set(Some("need two not-yet-linked nodes for a random link".into()));
		} else {
			status.set(None);
		}
	};

	let engine_rename = engine.clone();
	let rename = move |ev: leptos::ev::SubmitEvent| {
		ev.prevent_default();
		let Some(id) = selected.get() else {
			return;
		};
		let text = rename_text.get();
		let text = text.trim();
		if text.is_empty() {
			return;
		}
		match engine_rename.borrow_mut().edit_node_text(id, text) {
			Ok(()) => {
				rename_text.set(String::new());
				status.set(None);
			}
			Err(e) => status.set(Some(e.to_string())),
		}
	};

	let engine_remove = engine.clone();
	let remove = move |_| {
		let Some(id) = selected.get() else {
			return;
		};
		match engine_remove.borrow_mut().remove_node(id) {
			Ok(()) => {
				selected.set(None);
				status.set(None);
			}
			Err(e) => status.set(Some(e.to_string())),
		}
	};

	let engine_clear = engine.clone();
	let clear = move |_| {
		engine_clear.borrow_mut().clear();
		selected.set(None);
		status.set(None);
	};

	view! {
		<div class="page">
			<header class="page-header">
				<h1>"Force-Directed Graph"</h1>
				<p>"Add nodes and links, then drag circles to reshape the layout."</p>
			</header>

			<div class="graph-toolbar">
				<form on:submit=add_node>
					<input
						type="text"
						placeholder="New node text"
						prop:value=move || node_text.get()
						on:input=move |ev| node_text.set(event_target_value(&ev))
					/>
					<button type="submit">"Add node"</button>
				</form>
				<button on:click=add_link>"Random link"</button>
				<button class="secondary" on:click=clear>"Clear"</button>
			</div>

			<div class="graph-toolbar">
				<form on:submit=rename>
					<input
						type="text"
						placeholder="Rename selected node"
						prop:value=move || rename_text.get()
						on:input=move |ev| rename_text.set(event_target_value(&ev))
					/>
					<button type="submit" disabled=move || selected.get().is_none()>
						"Rename"
					</button>
				</form>
				<button
					class="secondary danger"
					disabled=move || selected.get().is_none()
					on:click=remove
				>
					"Remove selected"
				</button>
				<span class="toolbar-hint">
					{move || match selected.get() {
						Some(id) => format!("node {id} selected"),
						None => "click a node to select it".to_string(),
					}}
				</span>
			</div>

			{move || status.get().map(|s| view! { <div class="error-banner">{s}</div> })}

			<div class="graph-surface">
				<ForceGraphCanvas engine=engine.clone() selected=Some(selected) />
			</div>
		</div>
	}
}
