use itertools::Itertools;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::evaluator::{Evaluator, Score};
use crate::generator::Strategy;
use crate::graph::{EdgeId, Graph, NodeId};

fn make_rng(seed: Option<u64>) -> StdRng {
	match seed {
		Some(seed) => StdRng::seed_from_u64(seed),
		None => StdRng::from_entropy(),
	}
}

/// Picks uniformly among the active edges.
pub struct UniformRandom {
	rng: StdRng,
}

impl UniformRandom {
	pub fn new(seed: Option<u64>) -> Self {
		Self { rng: make_rng(seed) }
	}
}

impl Strategy for UniformRandom {
	fn pick(&mut self, graph: &Graph, node: NodeId) -> Option<EdgeId> {
		graph
			.active_edges(node)
			.collect_vec()
			.choose(&mut self.rng)
			.copied()
	}
}

/// Picks with probability proportional to the successor's score.
///
/// Zero-score successors, the end sentinel included, are only picked when no
/// successor scores above zero, in which case the pick is uniform.
pub struct WeightedRandom {
	evaluator: Box<dyn Evaluator>,
	rng: StdRng,
}

impl WeightedRandom {
	pub fn new(evaluator: Box<dyn Evaluator>, seed: Option<u64>) -> Self {
		Self {
			evaluator,
			rng: make_rng(seed),
		}
	}
}

impl Strategy for WeightedRandom {
	fn prepare(&mut self, graph: &Graph) {
		self.evaluator.prepare(graph);
	}

	fn pick(&mut self, graph: &Graph, node: NodeId) -> Option<EdgeId> {
		let options: Vec<(EdgeId, Score)> = graph
			.active_edges(node)
			.map(|edge| (edge, self.evaluator.score(graph, graph.edge(edge).to())))
			.collect();
		let positive = options
			.iter()
			.copied()
			.filter(|&(_, score)| score > 0.0)
			.collect_vec();

		if positive.is_empty() {
			return options.choose(&mut self.rng).map(|&(edge, _)| edge);
		}

		let weights = WeightedIndex::new(positive.iter().map(|&(_, score)| score)).ok()?;
		Some(positive[weights.sample(&mut self.rng)].0)
	}

	fn edge_consumed(&mut self, graph: &Graph, prefix: NodeId, edge: EdgeId, suffix: NodeId) {
		self.evaluator.remove_edge(graph, prefix, edge, suffix);
	}
}
