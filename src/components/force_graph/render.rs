use std::collections::HashMap;
use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::engine::{Link, NODE_RADIUS, Node, NodeId};

const COLORS: &[&str] = &[
	"#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
	"#bcbd22", "#17becf",
];

const BACKGROUND: &str = "#1a1a2e";
const ARROW_SIZE: f64 = 10.0;

fn node_color(id: NodeId) -> &'static str {
	COLORS[(id.0 as usize) % COLORS.len()]
}

/// Draw one frame from the positions published by the engine.
pub fn draw(
	ctx: &CanvasRenderingContext2d,
	nodes: &[Node],
	links: &[Link],
	selected: Option<NodeId>,
	width: f64,
	height: f64,
) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, width, height);

	let positions: HashMap<NodeId, (f64, f64)> =
		nodes.iter().map(|n| (n.id, (n.x, n.y))).collect();

	draw_links(ctx, links, &positions);
	draw_nodes(ctx, nodes, selected);
}

fn draw_links(
	ctx: &CanvasRenderingContext2d,
	links: &[Link],
	positions: &HashMap<NodeId, (f64, f64)>,
) {
	for link in links {
		let (Some(&(x1, y1)), Some(&(x2, y2))) =
			(positions.get(&link.source), positions.get(&link.target))
		else {
			continue;
		};
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}
		let (ux, uy) = (dx / dist, dy / dist);

		ctx.set_stroke_style_str("rgba(100, 180, 255, 0.6)");
		ctx.set_line_width(1.5);
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(8.0),
			&JsValue::from_f64(4.0),
		));
		ctx.begin_path();
		ctx.move_to(x1 + ux * NODE_RADIUS, y1 + uy * NODE_RADIUS);
		ctx.line_to(
			x2 - ux * (NODE_RADIUS + ARROW_SIZE),
			y2 - uy * (NODE_RADIUS + ARROW_SIZE),
		);
		ctx.stroke();
		let _ = ctx.set_line_dash(&js_sys::Array::new());

		ctx.set_fill_style_str("rgba(100, 180, 255, 0.8)");
		let (tip_x, tip_y) = (x2 - ux * NODE_RADIUS, y2 - uy * NODE_RADIUS);
		let (back_x, back_y) = (tip_x - ux * ARROW_SIZE, tip_y - uy * ARROW_SIZE);
		let (px, py) = (-uy * ARROW_SIZE * 0.5, ux * ARROW_SIZE * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();

		// weight label sits just off the midpoint, on the line's normal
		let (mx, my) = ((x1 + x2) / 2.0, (y1 + y2) / 2.0);
		ctx.set_fill_style_str("rgba(255, 255, 255, 0.85)");
		ctx.set_font("12px sans-serif");
		ctx.set_text_align("center");
		ctx.set_text_baseline("middle");
		let _ = ctx.fill_text(&link.weight.to_string(), mx - uy * 10.0, my + ux * 10.0);
	}
}

fn draw_nodes(ctx: &CanvasRenderingContext2d, nodes: &[Node], selected: Option<NodeId>) {
	for node in nodes {
		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, NODE_RADIUS, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(node_color(node.id));
		ctx.fill();

		if selected == Some(node.id) || node.is_pinned() {
			ctx.begin_path();
			let _ = ctx.arc(node.x, node.y, NODE_RADIUS + 3.0, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str("rgba(255, 255, 255, 0.7)");
			ctx.set_line_width(2.0);
			ctx.stroke();
		}

		ctx.set_fill_style_str("white");
		ctx.set_font("16px sans-serif");
		ctx.set_text_align("center");
		ctx.set_text_baseline("middle");
		let _ = ctx.fill_text(&node.label, node.x, node.y);
	}
}
