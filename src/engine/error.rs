//! Engine validation errors.

use super::types::NodeId;

/// Rejection reasons for graph mutations.
///
/// The simulation state is unchanged whenever one of these is returned.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
	/// Link weight was zero; weights are positive integers.
	#[error("link weight must be a positive integer")]
	ZeroWeight,
	/// Both link endpoints named the same node.
	#[error("a link cannot join a node to itself")]
	SelfLoop,
	/// The referenced node does not exist (or no longer exists).
	#[error("unknown node id: {0}")]
	NodeNotFound(NodeId),
	/// The unordered pair is already linked, in either direction.
	#[error("nodes {source} and {target} are already linked")]
	DuplicateLink {
		/// Source id of the rejected request.
		source: NodeId,
		/// Target id of the rejected request.
		target: NodeId,
	},
}
