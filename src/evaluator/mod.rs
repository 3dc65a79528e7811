//! Node scoring used by the score-driven strategies.

mod degree;
mod lookahead;
mod sampling;

pub use degree::DegreeEvaluator;
pub use lookahead::LookaheadEvaluator;
pub use sampling::SamplingEvaluator;

use crate::graph::{EdgeId, Graph, NodeId};

pub type Score = f64;

/// Estimates how much of a chain can still be built from a node.
///
/// `remove_edge` is called after the edge has been consumed from the graph, so
/// the graph passed in already reflects the removal.
pub trait Evaluator {
	fn prepare(&mut self, _graph: &Graph) {}

	fn score(&mut self, graph: &Graph, node: NodeId) -> Score;

	fn remove_edge(&mut self, _graph: &Graph, _prefix: NodeId, _edge: EdgeId, _suffix: NodeId) {}
}
