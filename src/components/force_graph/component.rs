use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::render;
use crate::engine::{Engine, NodeId};

#[component]
pub fn ForceGraphCanvas(
	/// Shared layout engine; the component drives its tick loop and drag
	/// operations, the owner mutates topology through the same handle.
	engine: Rc<RefCell<Engine>>,
	#[prop(default = None)] selected: Option<RwSignal<Option<NodeId>>>,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let drag_id: Rc<RefCell<Option<NodeId>>> = Rc::new(RefCell::new(None));
	let (engine_init, animate_init) = (engine.clone(), animate.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		let (w, h) = (
			width.unwrap_or_else(|| {
				canvas
					.parent_element()
					.map(|p| p.client_width() as f64)
					.unwrap_or(800.0)
			}),
			height.unwrap_or_else(|| {
				canvas
					.parent_element()
					.map(|p| p.client_height() as f64)
					.unwrap_or(600.0)
			}),
		);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();

		{
			let mut eng = engine_init.borrow_mut();
			eng.resize(w, h);
			let render_canvas = canvas.clone();
			eng.on_tick(move |nodes, links| {
				let sel = selected.and_then(|s| s.get_untracked());
				render::draw(
					&ctx,
					nodes,
					links,
					sel,
					f64::from(render_canvas.width()),
					f64::from(render_canvas.height()),
				);
			});
		}

		let (engine_anim, animate_inner) = (engine_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			{
				let mut eng = engine_anim.borrow_mut();
				if !eng.step() {
					// keep the canvas current while the simulation idles
					eng.redraw();
				}
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let (engine_md, drag_md) = (engine.clone(), drag_id.clone());
	let on_mousedown = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		let mut eng = engine_md.borrow_mut();
		let hit = eng.node_at(x, y);
		if let Some(sig) = selected {
			sig.set(hit);
		}
		if let Some(id) = hit {
			eng.begin_drag(id, x, y);
		}
		*drag_md.borrow_mut() = hit;
	};

	let (engine_mm, drag_mm) = (engine.clone(), drag_id.clone());
	let on_mousemove = move |ev: MouseEvent| {
		let Some(id) = *drag_mm.borrow() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);
		engine_mm.borrow_mut().update_drag(id, x, y);
	};

	let (engine_mu, drag_mu) = (engine.clone(), drag_id.clone());
	let on_mouseup = move |_: MouseEvent| {
		if let Some(id) = drag_mu.borrow_mut().take() {
			engine_mu.borrow_mut().end_drag(id);
		}
	};

	let (engine_ml, drag_ml) = (engine.clone(), drag_id.clone());
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(id) = drag_ml.borrow_mut().take() {
			engine_ml.borrow_mut().end_drag(id);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			style="display: block; cursor: grab;"
		/>
	}
}
