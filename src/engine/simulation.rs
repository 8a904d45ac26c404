//! Force passes and integration for the layout simulation.
//!
//! Each pass accumulates into node velocities (or, for the positional
//! constraints, moves nodes directly) and skips pinned nodes. Pair distances
//! are floored before any division so coincident nodes separate instead of
//! producing NaN positions.

use std::collections::HashMap;

use fastrand::Rng;

use super::types::{Link, Node, NodeId};

/// Visual and collision radius of a node; also the margin the boundary clamp
/// keeps from the surface edges.
pub const NODE_RADIUS: f64 = 35.0;

/// Floor applied to squared pair distances before dividing.
const MIN_DISTANCE_SQ: f64 = 1e-6;

/// Tuning constants for the force simulation.
#[derive(Clone, Debug)]
pub struct SimulationParameters {
	/// Rest length contributed per unit of link weight.
	pub link_distance_scale: f64,
	/// Spring stiffness of the link force.
	pub force_spring: f64,
	/// Charge strength for pairwise repulsion; negative repels.
	pub force_charge: f64,
	/// Fraction of the centroid-to-center offset applied per tick.
	pub center_strength: f64,
	/// Per-tick decay of alpha toward its target.
	pub alpha_decay: f64,
	/// Alpha threshold below which the simulation counts as settled.
	pub alpha_min: f64,
	/// Velocity fraction retained at integration.
	pub damping_factor: f64,
}

impl Default for SimulationParameters {
	fn default() -> Self {
		Self {
			link_distance_scale: 20.0,
			force_spring: 0.1,
			force_charge: -300.0,
			center_strength: 0.1,
			// settles a cold start (alpha = 1.0) in ~300 ticks
			alpha_decay: 1.0 - 0.001_f64.powf(1.0 / 300.0),
			alpha_min: 0.001,
			damping_factor: 0.6,
		}
	}
}

fn jiggle(rng: &mut Rng) -> f64 {
	(rng.f64() - 0.5) * 1e-3
}

/// Offset from `a` to `b` with a floored squared distance. Degenerate zero
/// offsets are replaced by a tiny random one so the pair can separate.
fn offset(a: &Node, b: &Node, rng: &mut Rng) -> (f64, f64, f64) {
	let (mut dx, mut dy) = (b.x - a.x, b.y - a.y);
	let mut d2 = dx * dx + dy * dy;
	if d2 < MIN_DISTANCE_SQ {
		dx = jiggle(rng);
		dy = jiggle(rng);
		d2 = dx * dx + dy * dy;
	}
	(dx, dy, d2.max(MIN_DISTANCE_SQ))
}

/// Spring pull along every link toward its rest length (`weight` times
/// [`SimulationParameters::link_distance_scale`]).
pub(super) fn apply_link_force(
	nodes: &mut [Node],
	links: &[Link],
	index: &HashMap<NodeId, usize>,
	params: &SimulationParameters,
	alpha: f64,
	rng: &mut Rng,
) {
	for link in links {
		let (Some(&si), Some(&ti)) = (index.get(&link.source), index.get(&link.target)) else {
			continue;
		};
		let (dx, dy, d2) = offset(&nodes[si], &nodes[ti], rng);
		let dist = d2.sqrt();
		let rest = f64::from(link.weight) * params.link_distance_scale;
		let k = (dist - rest) / dist * params.force_spring * alpha;
		let (fx, fy) = (dx * k * 0.5, dy * k * 0.5);
		{
			let n = &mut nodes[si];
			if n.fixed.is_none() {
				n.vx += fx;
				n.vy += fy;
			}
		}
		{
			let n = &mut nodes[ti];
			if n.fixed.is_none() {
				n.vx -= fx;
				n.vy -= fy;
			}
		}
	}
}

/// Charge-like repulsion between every node pair, inverse to the squared
/// distance.
pub(super) fn apply_charge(
	nodes: &mut [Node],
	params: &SimulationParameters,
	alpha: f64,
	rng: &mut Rng,
) {
	for i in 0..nodes.len() {
		for j in (i + 1)..nodes.len() {
			let (dx, dy, d2) = offset(&nodes[i], &nodes[j], rng);
			let f = params.force_charge * alpha / d2;
			let (fx, fy) = (dx * f, dy * f);
			{
				let n = &mut nodes[i];
				if n.fixed.is_none() {
					n.vx += fx;
					n.vy += fy;
				}
			}
			{
				let n = &mut nodes[j];
				if n.fixed.is_none() {
					n.vx -= fx;
					n.vy -= fy;
				}
			}
		}
	}
}

/// Weak pull of the layout centroid toward the surface center.
pub(super) fn apply_center_pull(
	nodes: &mut [Node],
	width: f64,
	height: f64,
	params: &SimulationParameters,
) {
	if nodes.is_empty() {
		return;
	}
	let n = nodes.len() as f64;
	let (cx, cy) = nodes
		.iter()
		.fold((0.0, 0.0), |(sx, sy), node| (sx + node.x, sy + node.y));
	let shift_x = (width / 2.0 - cx / n) * params.center_strength;
	let shift_y = (height / 2.0 - cy / n) * params.center_strength;
	for node in nodes.iter_mut().filter(|node| node.fixed.is_none()) {
		node.x += shift_x;
		node.y += shift_y;
	}
}

/// Pairwise minimum-distance constraint: circles of [`NODE_RADIUS`] never
/// overlap. Pinned nodes stay put; their partner absorbs the full push.
pub(super) fn apply_collision(nodes: &mut [Node], rng: &mut Rng) {
	let min_dist = NODE_RADIUS * 2.0;
	for i in 0..nodes.len() {
		for j in (i + 1)..nodes.len() {
			let (dx, dy, d2) = offset(&nodes[i], &nodes[j], rng);
			let dist = d2.sqrt();
			if dist >= min_dist {
				continue;
			}
			let overlap = min_dist - dist;
			let (ux, uy) = (dx / dist, dy / dist);
			match (nodes[i].fixed.is_none(), nodes[j].fixed.is_none()) {
				(true, true) => {
					let half = overlap * 0.5;
					nodes[i].x -= ux * half;
					nodes[i].y -= uy * half;
					nodes[j].x += ux * half;
					nodes[j].y += uy * half;
				}
				(true, false) => {
					nodes[i].x -= ux * overlap;
					nodes[i].y -= uy * overlap;
				}
				(false, true) => {
					nodes[j].x += ux * overlap;
					nodes[j].y += uy * overlap;
				}
				(false, false) => {}
			}
		}
	}
}

/// Damped velocity integration followed by the hard boundary clamp. Pinned
/// nodes are held exactly at their override with zeroed velocity.
pub(super) fn integrate(
	nodes: &mut [Node],
	params: &SimulationParameters,
	width: f64,
	height: f64,
) {
	for node in nodes.iter_mut() {
		if let Some((fx, fy)) = node.fixed {
			node.x = fx;
			node.y = fy;
			node.vx = 0.0;
			node.vy = 0.0;
			continue;
		}
		node.vx *= params.damping_factor;
		node.vy *= params.damping_factor;
		node.x = clamp_x(node.x + node.vx, width);
		node.y = clamp_y(node.y + node.vy, height);
	}
}

/// Clamp a horizontal position into the drawable band, guarding against
/// surfaces narrower than twice the margin.
pub(crate) fn clamp_x(x: f64, width: f64) -> f64 {
	x.clamp(NODE_RADIUS, (width - NODE_RADIUS).max(NODE_RADIUS))
}

/// Clamp a vertical position into the drawable band.
pub(crate) fn clamp_y(y: f64, height: f64) -> f64 {
	y.clamp(NODE_RADIUS, (height - NODE_RADIUS).max(NODE_RADIUS))
}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;

	use fastrand::Rng;

	use super::super::types::{Link, Node, NodeId};
	use super::*;

	fn node(id: u64, x: f64, y: f64) -> Node {
		Node::new(NodeId(id), "node", x, y)
	}

	fn dist(a: &Node, b: &Node) -> f64 {
		((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt()
	}

	#[test]
	fn link_force_pulls_toward_rest_length() {
		let mut nodes = vec![node(0, 100.0, 300.0), node(1, 700.0, 300.0)];
		let links = vec![Link {
			source: NodeId(0),
			target: NodeId(1),
			weight: 5,
		}];
		let index: HashMap<NodeId, usize> = [(NodeId(0), 0), (NodeId(1), 1)].into();
		let params = SimulationParameters::default();
		let mut rng = Rng::with_seed(1);

		let rest = 5.0 * params.link_distance_scale;
		for _ in 0..200 {
			apply_link_force(&mut nodes, &links, &index, &params, 1.0, &mut rng);
			integrate(&mut nodes, &params, 800.0, 600.0);
		}
		let settled = dist(&nodes[0], &nodes[1]);
		assert!((settled - rest).abs() < 5.0, "got {settled}, want ~{rest}");
	}

	#[test]
	fn charge_pushes_pairs_apart() {
		let mut nodes = vec![node(0, 390.0, 300.0), node(1, 410.0, 300.0)];
		let params = SimulationParameters::default();
		let mut rng = Rng::with_seed(2);

		let before = dist(&nodes[0], &nodes[1]);
		apply_charge(&mut nodes, &params, 1.0, &mut rng);
		integrate(&mut nodes, &params, 800.0, 600.0);
		assert!(dist(&nodes[0], &nodes[1]) > before);
	}

	#[test]
	fn collision_enforces_minimum_separation() {
		let mut nodes = vec![node(0, 395.0, 300.0), node(1, 405.0, 300.0)];
		let mut rng = Rng::with_seed(3);

		apply_collision(&mut nodes, &mut rng);
		assert!(dist(&nodes[0], &nodes[1]) >= NODE_RADIUS * 2.0 - 1e-9);
	}

	#[test]
	fn coincident_nodes_separate_without_nan() {
		let mut nodes = vec![node(0, 400.0, 300.0), node(1, 400.0, 300.0)];
		let params = SimulationParameters::default();
		let mut rng = Rng::with_seed(4);

		apply_charge(&mut nodes, &params, 1.0, &mut rng);
		apply_collision(&mut nodes, &mut rng);
		integrate(&mut nodes, &params, 800.0, 600.0);

		for n in &nodes {
			assert!(n.x.is_finite() && n.y.is_finite(), "NaN leaked into {n:?}");
		}
		assert!(dist(&nodes[0], &nodes[1]) > 1.0);
	}

	#[test]
	fn collision_moves_only_the_free_partner_of_a_pinned_node() {
		let mut nodes = vec![node(0, 400.0, 300.0), node(1, 410.0, 300.0)];
		nodes[0].fixed = Some((400.0, 300.0));
		let mut rng = Rng::with_seed(5);

		apply_collision(&mut nodes, &mut rng);
		assert_eq!((nodes[0].x, nodes[0].y), (400.0, 300.0));
		assert!(dist(&nodes[0], &nodes[1]) >= NODE_RADIUS * 2.0 - 1e-9);
	}

	#[test]
	fn clamp_tolerates_degenerate_surfaces() {
		assert_eq!(clamp_x(500.0, 40.0), NODE_RADIUS);
		assert_eq!(clamp_y(-20.0, 10.0), NODE_RADIUS);
	}
}
