use std::cmp::Reverse;

use ordered_float::OrderedFloat;

use crate::evaluator::Evaluator;
use crate::generator::Strategy;
use crate::graph::{EdgeId, Graph, NodeId};

/// Greedy: follows the edge whose successor scores highest, first edge on ties.
pub struct BestScore {
	evaluator: Box<dyn Evaluator>,
}

impl BestScore {
	pub fn new(evaluator: Box<dyn Evaluator>) -> Self {
		Self { evaluator }
	}
}

impl Strategy for BestScore {
	fn prepare(&mut self, graph: &Graph) {
		self.evaluator.prepare(graph);
	}

	fn pick(&mut self, graph: &Graph, node: NodeId) -> Option<EdgeId> {
		graph
			.active_edges(node)
			.map(|edge| (edge, self.evaluator.score(graph, graph.edge(edge).to())))
			// min_by_key keeps the first of equal elements, max_by_key the last.
			.min_by_key(|&(_, score)| Reverse(OrderedFloat(score)))
			.map(|(edge, _)| edge)
	}

	fn edge_consumed(&mut self, graph: &Graph, prefix: NodeId, edge: EdgeId, suffix: NodeId) {
		self.evaluator.remove_edge(graph, prefix, edge, suffix);
	}
}
