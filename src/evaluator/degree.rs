use crate::evaluator::{Evaluator, Score};
use crate::graph::{Graph, NodeId};

/// Scores a node by its current number of active outgoing edges.
#[derive(Debug, Default, Copy, Clone)]
pub struct DegreeEvaluator;

impl Evaluator for DegreeEvaluator {
	fn score(&mut self, graph: &Graph, node: NodeId) -> Score {
		graph.out_degree(node) as Score
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn follows_graph() {
		let mut graph = Graph::new(["abc", "abd"]);
		let ab = graph.find("ab").unwrap();
		let mut evaluator = DegreeEvaluator;

		assert_eq!(evaluator.score(&graph, ab), 3.0);
		graph.consume(ab, "abc").unwrap();
		assert_eq!(evaluator.score(&graph, ab), 2.0);
		assert_eq!(evaluator.score(&graph, graph.end()), 0.0);
	}
}
