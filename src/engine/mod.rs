//! Framework-agnostic force-directed graph layout engine.
//!
//! [`Engine`] owns the node and link collections and advances an iterative
//! physics simulation one [`Engine::step`] at a time: link springs, pairwise
//! repulsion, a weak centering pull, collision separation, and a hard
//! boundary clamp. A rendering layer registers an [`Engine::on_tick`]
//! observer and redraws from the positions published after every tick;
//! pointer interaction pins a node to the pointer through the drag
//! operations while the simulation keeps running around it.
//!
//! The simulation cools through an alpha temperature that decays each tick.
//! Once alpha falls below its threshold the engine is settled and `step`
//! becomes an idle no-op until a topology change or drag perturbs it. The
//! module has no rendering or framework dependencies, so it is exercised
//! directly by host-side tests.

mod error;
mod simulation;
mod types;

pub use error::GraphError;
pub use simulation::{NODE_RADIUS, SimulationParameters};
pub use types::{LABEL_CHARS, Link, Node, NodeId, abbreviate};

use std::collections::HashMap;

use fastrand::Rng;
use log::info;

use simulation::{clamp_x, clamp_y};

/// Alpha target held while a drag keeps the simulation warm.
const DRAG_ALPHA_TARGET: f64 = 0.3;
/// Jitter half-range around the surface center for newly added nodes.
const SPAWN_JITTER: f64 = 50.0;

type TickObserver = Box<dyn FnMut(&[Node], &[Link])>;

/// Mutable graph plus the simulation state that positions it.
pub struct Engine {
	nodes: Vec<Node>,
	links: Vec<Link>,
	index: HashMap<NodeId, usize>,
	params: SimulationParameters,
	alpha: f64,
	alpha_target: f64,
	next_id: u64,
	width: f64,
	height: f64,
	rng: Rng,
	on_tick: Option<TickObserver>,
}

impl Engine {
	/// Create an engine for a surface of the given size.
	pub fn new(width: f64, height: f64) -> Self {
		Self::with_rng(width, height, Rng::new())
	}

	/// Create an engine with a seeded RNG, for reproducible layouts.
	pub fn with_seed(width: f64, height: f64, seed: u64) -> Self {
		Self::with_rng(width, height, Rng::with_seed(seed))
	}

	fn with_rng(width: f64, height: f64, rng: Rng) -> Self {
		Self {
			nodes: Vec::new(),
			links: Vec::new(),
			index: HashMap::new(),
			params: SimulationParameters::default(),
			alpha: 0.0,
			alpha_target: 0.0,
			next_id: 0,
			width,
			height,
			rng,
			on_tick: None,
		}
	}

	/// Current nodes, in insertion order.
	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	/// Current links, in insertion order.
	pub fn links(&self) -> &[Link] {
		&self.links
	}

	/// Look up a node by id.
	pub fn node(&self, id: NodeId) -> Option<&Node> {
		self.index.get(&id).and_then(|&slot| self.nodes.get(slot))
	}

	/// Current simulation temperature.
	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	/// Whether the simulation has cooled below its activity threshold.
	pub fn is_settled(&self) -> bool {
		self.alpha < self.params.alpha_min && self.alpha_target < self.params.alpha_min
	}

	/// Register the observer invoked with the node and link collections
	/// after every active tick. Replaces any previous observer.
	pub fn on_tick(&mut self, callback: impl FnMut(&[Node], &[Link]) + 'static) {
		self.on_tick = Some(Box::new(callback));
	}

	/// Invoke the tick observer without stepping, e.g. to repaint while the
	/// simulation idles.
	pub fn redraw(&mut self) {
		self.notify();
	}

	/// Add a node labeled from `full_text`, placed at the surface center
	/// with a random jitter of up to [`SPAWN_JITTER`] per axis, and wake the
	/// simulation. Always succeeds; returns the new node's id.
	pub fn add_node(&mut self, full_text: &str) -> NodeId {
		let id = NodeId(self.next_id);
		self.next_id += 1;
		let jx = (self.rng.f64() * 2.0 - 1.0) * SPAWN_JITTER;
		let jy = (self.rng.f64() * 2.0 - 1.0) * SPAWN_JITTER;
		let x = clamp_x(self.width / 2.0 + jx, self.width);
		let y = clamp_y(self.height / 2.0 + jy, self.height);
		self.index.insert(id, self.nodes.len());
		self.nodes.push(Node::new(id, full_text, x, y));
		self.alpha = 1.0;
		id
	}

	/// Create a validated link. Rejects zero weights, self-loops, unknown
	/// endpoints, and pairs already linked in either direction.
	pub fn add_link(&mut self, source: NodeId, target: NodeId, weight: u32) -> Result<(), GraphError> {
		if weight == 0 {
			return Err(GraphError::ZeroWeight);
		}
		if source == target {
			return Err(GraphError::SelfLoop);
		}
		if !self.index.contains_key(&source) {
			return Err(GraphError::NodeNotFound(source));
		}
		if !self.index.contains_key(&target) {
			return Err(GraphError::NodeNotFound(target));
		}
		if self.links.iter().any(|link| link.joins(source, target)) {
			return Err(GraphError::DuplicateLink { source, target });
		}
		self.links.push(Link {
			source,
			target,
			weight,
		});
		self.alpha = 1.0;
		Ok(())
	}

	/// Link two distinct nodes picked uniformly at random, with a random
	/// weight in `1..=10`. A no-op returning `None` when fewer than two
	/// nodes exist or the sampled pair is already linked; does not retry.
	pub fn add_random_link(&mut self) -> Option<Link> {
		if self.nodes.len() < 2 {
			return None;
		}
		let i = self.rng.usize(0..self.nodes.len());
		let mut j = self.rng.usize(0..self.nodes.len() - 1);
		if j >= i {
			j += 1;
		}
		let (source, target) = (self.nodes[i].id, self.nodes[j].id);
		if self.links.iter().any(|link| link.joins(source, target)) {
			return None;
		}
		let link = Link {
			source,
			target,
			weight: self.rng.u32(1..=10),
		};
		self.links.push(link);
		self.alpha = 1.0;
		Some(link)
	}

	/// Replace a node's text and recompute its label.
	pub fn edit_node_text(&mut self, id: NodeId, new_text: &str) -> Result<(), GraphError> {
		let slot = *self.index.get(&id).ok_or(GraphError::NodeNotFound(id))?;
		let node = &mut self.nodes[slot];
		node.full_text = new_text.to_string();
		node.label = abbreviate(new_text);
		Ok(())
	}

	/// Remove a node and every link touching it, then wake the simulation.
	pub fn remove_node(&mut self, id: NodeId) -> Result<(), GraphError> {
		if !self.index.contains_key(&id) {
			return Err(GraphError::NodeNotFound(id));
		}
		self.nodes.retain(|node| node.id != id);
		self.links
			.retain(|link| link.source != id && link.target != id);
		self.rebuild_index();
		self.alpha = 1.0;
		Ok(())
	}

	/// Remove every node and link and stop the simulation. Ids issued
	/// before the clear are never reissued.
	pub fn clear(&mut self) {
		info!(
			"graph cleared: {} nodes, {} links dropped",
			self.nodes.len(),
			self.links.len()
		);
		self.nodes.clear();
		self.links.clear();
		self.index.clear();
		self.alpha = 0.0;
		self.alpha_target = 0.0;
	}

	/// Advance the simulation by one tick and notify the observer.
	///
	/// Returns `false` without touching any state when the simulation has
	/// settled; a topology change or drag wakes it again.
	pub fn step(&mut self) -> bool {
		if self.is_settled() {
			return false;
		}
		self.alpha += (self.alpha_target - self.alpha) * self.params.alpha_decay;
		simulation::apply_link_force(
			&mut self.nodes,
			&self.links,
			&self.index,
			&self.params,
			self.alpha,
			&mut self.rng,
		);
		simulation::apply_charge(&mut self.nodes, &self.params, self.alpha, &mut self.rng);
		simulation::apply_center_pull(&mut self.nodes, self.width, self.height, &self.params);
		simulation::apply_collision(&mut self.nodes, &mut self.rng);
		simulation::integrate(&mut self.nodes, &self.params, self.width, self.height);
		self.notify();
		true
	}

	/// Pin a node to the (clamped) pointer position and keep the simulation
	/// warm for the duration of the drag. Unknown ids are ignored.
	pub fn begin_drag(&mut self, id: NodeId, x: f64, y: f64) {
		let (width, height) = (self.width, self.height);
		if let Some(node) = self.node_mut(id) {
			let pin = (clamp_x(x, width), clamp_y(y, height));
			node.fixed = Some(pin);
			node.x = pin.0;
			node.y = pin.1;
			node.vx = 0.0;
			node.vy = 0.0;
			self.alpha_target = DRAG_ALPHA_TARGET;
		}
	}

	/// Move an active drag's pin to the (clamped) pointer position.
	pub fn update_drag(&mut self, id: NodeId, x: f64, y: f64) {
		let (width, height) = (self.width, self.height);
		if let Some(node) = self.node_mut(id) {
			let pin = (clamp_x(x, width), clamp_y(y, height));
			node.fixed = Some(pin);
			node.x = pin.0;
			node.y = pin.1;
		}
	}

	/// Release a dragged node back to simulation control and let the
	/// simulation cool down again.
	pub fn end_drag(&mut self, id: NodeId) {
		if let Some(node) = self.node_mut(id) {
			node.fixed = None;
		}
		self.alpha_target = 0.0;
	}

	/// Update the surface bounds, re-clamping positions and pins.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		for node in &mut self.nodes {
			if let Some((fx, fy)) = node.fixed {
				node.fixed = Some((clamp_x(fx, width), clamp_y(fy, height)));
			}
			node.x = clamp_x(node.x, width);
			node.y = clamp_y(node.y, height);
		}
	}

	/// Topmost node whose circle contains the point, if any.
	pub fn node_at(&self, x: f64, y: f64) -> Option<NodeId> {
		self.nodes
			.iter()
			.rev()
			.find(|node| {
				let (dx, dy) = (node.x - x, node.y - y);
				dx * dx + dy * dy <= NODE_RADIUS * NODE_RADIUS
			})
			.map(|node| node.id)
	}

	fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
		let slot = *self.index.get(&id)?;
		self.nodes.get_mut(slot)
	}

	fn rebuild_index(&mut self) {
		self.index = self
			.nodes
			.iter()
			.enumerate()
			.map(|(slot, node)| (node.id, slot))
			.collect();
	}

	fn notify(&mut self) {
		if let Some(callback) = self.on_tick.as_mut() {
			callback(&self.nodes, &self.links);
		}
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;
	use std::rc::Rc;

	use super::*;

	const W: f64 = 800.0;
	const H: f64 = 600.0;

	fn engine() -> Engine {
		Engine::with_seed(W, H, 7)
	}

	fn triangle(engine: &mut Engine) -> (NodeId, NodeId, NodeId) {
		let a = engine.add_node("alpha");
		let b = engine.add_node("beta");
		let c = engine.add_node("gamma");
		engine.add_link(a, b, 5).unwrap();
		engine.add_link(b, c, 3).unwrap();
		engine.add_link(a, c, 7).unwrap();
		(a, b, c)
	}

	#[test]
	fn labels_derive_from_full_text() {
		let mut e = engine();
		let id = e.add_node("database");
		assert_eq!(e.node(id).unwrap().label, "DAT");
		e.edit_node_text(id, "ui").unwrap();
		let node = e.node(id).unwrap();
		assert_eq!(node.label, "UI");
		assert_eq!(node.full_text, "ui");
		e.edit_node_text(id, "héllo wörld").unwrap();
		assert_eq!(e.node(id).unwrap().label, "HÉL");
	}

	#[test]
	fn new_nodes_spawn_near_the_center() {
		let mut e = engine();
		for i in 0..20 {
			let id = e.add_node(&format!("node {i}"));
			let node = e.node(id).unwrap();
			assert!((node.x - W / 2.0).abs() <= 50.0);
			assert!((node.y - H / 2.0).abs() <= 50.0);
		}
		assert!((e.alpha() - 1.0).abs() < f64::EPSILON);
	}

	#[test]
	fn editing_unknown_node_is_rejected() {
		let mut e = engine();
		let stale = e.add_node("gone");
		e.clear();
		assert_eq!(
			e.edit_node_text(stale, "anything"),
			Err(GraphError::NodeNotFound(stale))
		);
	}

	#[test]
	fn explicit_link_validation() {
		let mut e = engine();
		let a = e.add_node("a");
		let b = e.add_node("b");
		let ghost = NodeId(99);

		assert_eq!(e.add_link(a, a, 1), Err(GraphError::SelfLoop));
		assert_eq!(e.add_link(a, b, 0), Err(GraphError::ZeroWeight));
		assert_eq!(e.add_link(a, ghost, 1), Err(GraphError::NodeNotFound(ghost)));
		assert!(e.links().is_empty(), "rejections must not mutate state");

		e.add_link(a, b, 4).unwrap();
		assert_eq!(
			e.add_link(a, b, 2),
			Err(GraphError::DuplicateLink { source: a, target: b })
		);
		assert_eq!(
			e.add_link(b, a, 2),
			Err(GraphError::DuplicateLink { source: b, target: a })
		);
		assert_eq!(e.links().len(), 1);
	}

	#[test]
	fn random_links_never_self_loop_or_duplicate() {
		let mut e = engine();
		for i in 0..6 {
			e.add_node(&format!("node {i}"));
		}
		for _ in 0..500 {
			e.add_random_link();
		}
		for link in e.links() {
			assert_ne!(link.source, link.target);
			assert!((1..=10).contains(&link.weight));
		}
		for (i, a) in e.links().iter().enumerate() {
			for b in &e.links()[i + 1..] {
				assert!(
					!a.joins(b.source, b.target),
					"duplicate pair: {a:?} vs {b:?}"
				);
			}
		}
		// 6 nodes admit at most C(6,2) undirected pairs
		assert!(e.links().len() <= 15);
	}

	#[test]
	fn random_link_needs_two_nodes() {
		let mut e = engine();
		assert!(e.add_random_link().is_none());
		e.add_node("lonely");
		assert!(e.add_random_link().is_none());
		assert!(e.links().is_empty());
	}

	#[test]
	fn clear_stops_simulation_and_never_reuses_ids() {
		let mut e = engine();
		let first: Vec<NodeId> = (0..3).map(|i| e.add_node(&format!("n{i}"))).collect();
		e.add_random_link();
		e.clear();

		assert!(e.nodes().is_empty());
		assert!(e.links().is_empty());
		assert!(!e.step(), "cleared engine should be settled");

		let next = e.add_node("fresh");
		assert!(
			!first.contains(&next),
			"id {next} was already issued before the clear"
		);
	}

	#[test]
	fn positions_stay_in_bounds() {
		let mut e = Engine::with_seed(400.0, 300.0, 11);
		for i in 0..10 {
			e.add_node(&format!("node {i}"));
		}
		for _ in 0..12 {
			e.add_random_link();
		}
		for _ in 0..100 {
			e.step();
		}
		for node in e.nodes() {
			assert!(
				(NODE_RADIUS..=400.0 - NODE_RADIUS).contains(&node.x),
				"x out of bounds: {}",
				node.x
			);
			assert!(
				(NODE_RADIUS..=300.0 - NODE_RADIUS).contains(&node.y),
				"y out of bounds: {}",
				node.y
			);
		}
	}

	#[test]
	fn pinned_node_holds_position_until_released() {
		let mut e = engine();
		let (a, _, _) = triangle(&mut e);
		e.begin_drag(a, 200.0, 150.0);
		for _ in 0..20 {
			e.step();
		}
		let node = e.node(a).unwrap();
		assert_eq!((node.x, node.y), (200.0, 150.0));

		e.update_drag(a, 9999.0, -40.0);
		e.step();
		let node = e.node(a).unwrap();
		assert_eq!(
			(node.x, node.y),
			(W - NODE_RADIUS, NODE_RADIUS),
			"drag positions are clamped into bounds"
		);

		e.end_drag(a);
		for _ in 0..20 {
			e.step();
		}
		let node = e.node(a).unwrap();
		assert!(node.fixed.is_none());
		assert!(
			node.x != W - NODE_RADIUS || node.y != NODE_RADIUS,
			"released node should come back under simulation control"
		);
	}

	#[test]
	fn triangle_settles_and_stays_put() {
		let mut e = engine();
		triangle(&mut e);

		let mut ticks = 0;
		while e.step() {
			ticks += 1;
			assert!(ticks <= 320, "simulation failed to settle");
		}
		assert!(e.is_settled());

		let settled: Vec<(f64, f64)> = e.nodes().iter().map(|n| (n.x, n.y)).collect();
		for (x, y) in &settled {
			assert!(x.is_finite() && y.is_finite());
		}
		for _ in 0..10 {
			assert!(!e.step());
		}
		let after: Vec<(f64, f64)> = e.nodes().iter().map(|n| (n.x, n.y)).collect();
		assert_eq!(settled, after, "a settled layout must not drift");
	}

	#[test]
	fn removing_a_node_cascades_to_its_links() {
		let mut e = engine();
		let (a, b, c) = triangle(&mut e);
		e.remove_node(b).unwrap();

		assert_eq!(e.nodes().len(), 2);
		assert_eq!(e.links().len(), 1);
		assert!(e.links().iter().all(|l| l.source != b && l.target != b));
		assert!(e.node(b).is_none());

		for _ in 0..50 {
			e.step();
		}
		assert!(e.node(a).is_some());
		assert!(e.node(c).is_some());
	}

	#[test]
	fn observer_fires_once_per_active_step() {
		let mut e = engine();
		e.add_node("only");
		let ticks = Rc::new(Cell::new(0));
		let seen = ticks.clone();
		e.on_tick(move |nodes, links| {
			seen.set(seen.get() + 1);
			assert_eq!(nodes.len(), 1);
			assert!(links.is_empty());
		});

		assert!(e.step());
		assert!(e.step());
		assert_eq!(ticks.get(), 2);

		e.clear();
		assert!(!e.step(), "idle steps must not notify");
		assert_eq!(ticks.get(), 2);
	}

	#[test]
	fn drag_on_unknown_id_is_a_no_op() {
		let mut e = engine();
		let a = e.add_node("a");
		e.clear();
		e.begin_drag(a, 100.0, 100.0);
		e.update_drag(a, 120.0, 100.0);
		e.end_drag(a);
		assert!(e.nodes().is_empty());
		assert!(!e.step());
	}

	#[test]
	fn resize_reclamps_nodes_and_pins() {
		let mut e = engine();
		let a = e.add_node("a");
		e.begin_drag(a, 780.0, 580.0);
		e.resize(200.0, 200.0);
		let node = e.node(a).unwrap();
		assert_eq!(node.fixed, Some((200.0 - NODE_RADIUS, 200.0 - NODE_RADIUS)));
		assert!(node.x <= 200.0 - NODE_RADIUS && node.y <= 200.0 - NODE_RADIUS);
	}
}
