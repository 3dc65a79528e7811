use std::collections::HashSet;

use itertools::Itertools;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::{Error, Result};
use crate::evaluator::{Evaluator, Score};
use crate::graph::{EdgeId, Graph, NodeId};

/// Scores a node by the mean number of words in random walks starting from it.
///
/// Every call samples afresh; nothing is cached between calls.
pub struct SamplingEvaluator {
	samples: usize,
	rng: StdRng,
}

impl SamplingEvaluator {
	pub fn new(samples: usize, seed: Option<u64>) -> Result<Self> {
		if samples < 1 {
			return Err(Error::InvalidSamples(samples));
		}

		let rng = match seed {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::from_entropy(),
		};
		Ok(Self { samples, rng })
	}

	fn sample(&mut self, graph: &Graph, from: NodeId) -> usize {
		let mut used: HashSet<EdgeId> = HashSet::new();
		let mut node = from;
		let mut length = 0;

		while node != graph.end() {
			let options = graph
				.active_edges(node)
				.filter(|edge| !used.contains(edge))
				.collect_vec();
			let Some(&edge) = options.choose(&mut self.rng) else {
				break;
			};

			used.insert(edge);
			if graph.edge(edge).is_word() {
				length += 1;
			}
			node = graph.edge(edge).to();
		}

		length
	}
}

impl Evaluator for SamplingEvaluator {
	fn score(&mut self, graph: &Graph, node: NodeId) -> Score {
		let total: usize = (0..self.samples).map(|_| self.sample(graph, node)).sum();
		total as Score / self.samples as Score
	}
}
