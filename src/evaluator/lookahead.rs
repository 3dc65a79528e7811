use std::collections::{BTreeSet, HashMap};

use tracing::warn;

use crate::error::{Error, Result};
use crate::evaluator::{Evaluator, Score};
use crate::graph::{EdgeId, Graph, NodeId};

const EPSILON: Score = 1e-9;

/// Scores nodes by how many edges stay reachable within a bounded number of hops.
///
/// `reach[node][d - 1]` counts the edges reachable in exactly `d` hops, where the
/// successors of every node are deduplicated before their counts are summed. The
/// score of a node is the deepest non-zero count multiplied by its depth.
///
/// Edge removals update the counts of the affected ancestors in place. With a leaf
/// evaluator, the depth-1 count of a node is the leaf's score instead of its out
/// degree; only the prefix's leaf score change is propagated on removal.
pub struct LookaheadEvaluator {
	lookahead_depth: usize,
	leaf: Option<Box<dyn Evaluator>>,
	reach: Vec<Vec<Score>>,
	scores: Vec<Score>,
	predecessors: Vec<BTreeSet<NodeId>>,
	/// Number of active edges between an ordered pair of nodes.
	links: HashMap<(NodeId, NodeId), usize>,
}

impl LookaheadEvaluator {
	pub fn new(lookahead_depth: usize) -> Result<Self> {
		if lookahead_depth < 1 {
			return Err(Error::InvalidLookaheadDepth(lookahead_depth));
		}

		Ok(Self {
			lookahead_depth,
			leaf: None,
			reach: Vec::new(),
			scores: Vec::new(),
			predecessors: Vec::new(),
			links: HashMap::new(),
		})
	}

	pub fn composed(lookahead_depth: usize, leaf: Box<dyn Evaluator>) -> Result<Self> {
		let mut evaluator = Self::new(lookahead_depth)?;
		evaluator.leaf = Some(leaf);
		Ok(evaluator)
	}

	pub fn lookahead_depth(&self) -> usize {
		self.lookahead_depth
	}

	pub fn reach(&self, node: NodeId) -> &[Score] {
		self.reach.get(node.index()).map(Vec::as_slice).unwrap_or(&[])
	}

	fn base(&mut self, graph: &Graph, node: NodeId) -> Score {
		match &mut self.leaf {
			Some(leaf) => leaf.score(graph, node),
			None => graph.out_degree(node) as Score,
		}
	}

	fn score_of(reach: &[Score]) -> Score {
		reach
			.iter()
			.enumerate()
			.rev()
			.find(|(_, &count)| count > EPSILON)
			.map(|(idx, &count)| (idx + 1) as Score * count)
			.unwrap_or(0.0)
	}

	/// Subtracts `delta` at the relative depth of every path leading back to
	/// `prefix`, and the counts in `lost` at the depths beyond it.
	fn propagate(&mut self, prefix: NodeId, delta: Score, lost: &[Score]) {
		// Paths, not nodes: a node reached twice loses the edge twice.
		let mut frontier = vec![prefix];

		for distance in 0..self.lookahead_depth {
			for &node in &frontier {
				let reach = &mut self.reach[node.index()];
				reach[distance] -= delta;
				for (count, removed) in reach[distance + 1..].iter_mut().zip(lost) {
					*count -= removed;
				}
				self.scores[node.index()] = Self::score_of(reach);
			}

			if distance + 1 < self.lookahead_depth {
				frontier = frontier
					.iter()
					.flat_map(|node| self.predecessors[node.index()].iter().copied())
					.collect();
			}
		}
	}
}

impl Evaluator for LookaheadEvaluator {
	fn prepare(&mut self, graph: &Graph) {
		if let Some(leaf) = &mut self.leaf {
			leaf.prepare(graph);
		}

		let node_count = graph.node_count();
		self.predecessors = vec![BTreeSet::new(); node_count];
		self.links.clear();
		for node in graph.node_ids() {
			for edge in graph.active_edges(node) {
				let successor = graph.edge(edge).to();
				self.predecessors[successor.index()].insert(node);
				*self.links.entry((node, successor)).or_insert(0) += 1;
			}
		}

		let mut reach: Vec<Vec<Score>> = vec![Vec::with_capacity(self.lookahead_depth); node_count];
		for node in graph.node_ids() {
			let base = self.base(graph, node);
			reach[node.index()].push(base);
		}
		for depth in 1..self.lookahead_depth {
			for node in graph.node_ids() {
				let count: Score = graph
					.successors(node)
					.map(|successor| reach[successor.index()][depth - 1])
					.sum();
				reach[node.index()].push(count);
			}
		}

		self.scores = reach.iter().map(|counts| Self::score_of(counts)).collect();
		self.reach = reach;
	}

	fn score(&mut self, _graph: &Graph, node: NodeId) -> Score {
		self.scores.get(node.index()).copied().unwrap_or(0.0)
	}

	fn remove_edge(&mut self, graph: &Graph, prefix: NodeId, edge: EdgeId, suffix: NodeId) {
		if let Some(leaf) = &mut self.leaf {
			leaf.remove_edge(graph, prefix, edge, suffix);
		}

		let Some(links) = self.links.get_mut(&(prefix, suffix)) else {
			warn!(
				prefix = graph.key(prefix),
				suffix = graph.key(suffix),
				"removed edge unknown to the evaluator"
			);
			return;
		};
		*links -= 1;
		let still_linked = *links > 0;

		let cached = self.reach[prefix.index()][0];
		let delta = cached - self.base(graph, prefix);
		if still_linked {
			self.propagate(prefix, delta, &[]);
		} else {
			self.links.remove(&(prefix, suffix));
			// Copied first: on a cycle the suffix may be one of the updated ancestors.
			let lost = self.reach[suffix.index()].clone();
			self.predecessors[suffix.index()].remove(&prefix);
			self.propagate(prefix, delta, &lost);
		}
	}
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;
	use crate::evaluator::DegreeEvaluator;

	fn prepared(graph: &Graph, depth: usize) -> LookaheadEvaluator {
		let mut evaluator = LookaheadEvaluator::new(depth).unwrap();
		evaluator.prepare(graph);
		evaluator
	}

	fn consume(graph: &mut Graph, evaluator: &mut dyn Evaluator, key: &str, word: &str) {
		let prefix = graph.find(key).unwrap();
		let edge = graph
			.active_edges(prefix)
			.find(|&edge| graph.edge(edge).label() == word)
			.unwrap();
		let suffix = graph.consume_edge(edge);
		evaluator.remove_edge(graph, prefix, edge, suffix);
	}

	/// Reachable edge count recomputed by plain recursion over the graph.
	fn naive_reach(graph: &Graph, node: NodeId, depth: usize) -> Score {
		if depth == 1 {
			return graph.out_degree(node) as Score;
		}
		graph
			.successors(node)
			.map(|successor| naive_reach(graph, successor, depth - 1))
			.sum()
	}

	fn assert_matches_fresh(graph: &Graph, evaluator: &mut LookaheadEvaluator) {
		let mut fresh = prepared(graph, evaluator.lookahead_depth());
		for node in graph.node_ids() {
			assert_eq!(evaluator.reach(node), fresh.reach(node), "node {}", graph.key(node));
			assert_eq!(evaluator.score(graph, node), fresh.score(graph, node));
		}
	}

	#[test]
	fn zero_depth_is_rejected() {
		assert!(matches!(
			LookaheadEvaluator::new(0),
			Err(Error::InvalidLookaheadDepth(0))
		));
		assert!(LookaheadEvaluator::composed(0, Box::new(DegreeEvaluator)).is_err());
	}

	#[test]
	fn counts() {
		let graph = Graph::new(["abc", "bcd", "bce"]);
		let mut evaluator = prepared(&graph, 3);
		let ab = graph.find("ab").unwrap();
		let bc = graph.find("bc").unwrap();
		let cd = graph.find("cd").unwrap();

		assert_eq!(evaluator.reach(ab), &[2.0, 3.0, 2.0]);
		assert_eq!(evaluator.reach(bc), &[3.0, 2.0, 0.0]);
		assert_eq!(evaluator.score(&graph, ab), 6.0);
		assert_eq!(evaluator.score(&graph, bc), 4.0);
		assert_eq!(evaluator.score(&graph, cd), 1.0);
		assert_eq!(evaluator.score(&graph, graph.end()), 0.0);

		for node in graph.node_ids() {
			for depth in 1..=3 {
				assert_eq!(evaluator.reach(node)[depth - 1], naive_reach(&graph, node, depth));
			}
		}
	}

	#[test]
	fn parallel_edges_count_successor_once() {
		let graph = Graph::new(["abxbc", "abybc"]);
		let mut evaluator = prepared(&graph, 2);
		let ab = graph.find("ab").unwrap();

		assert_eq!(evaluator.reach(ab), &[3.0, 1.0]);
		assert_eq!(evaluator.score(&graph, ab), 2.0);
	}

	#[test]
	fn removing_one_of_parallel_edges() {
		let mut graph = Graph::new(["abxbc", "abybc", "zab"]);
		let mut evaluator = prepared(&graph, 3);
		let ab = graph.find("ab").unwrap();
		let za = graph.find("za").unwrap();

		consume(&mut graph, &mut evaluator, "ab", "abxbc");
		assert_eq!(evaluator.reach(ab), &[2.0, 1.0, 0.0]);
		assert_eq!(evaluator.reach(za)[1], 2.0);
		assert_matches_fresh(&graph, &mut evaluator);

		consume(&mut graph, &mut evaluator, "ab", "abybc");
		assert_eq!(evaluator.reach(ab), &[1.0, 0.0, 0.0]);
		assert_eq!(evaluator.score(&graph, ab), 1.0);
		assert_matches_fresh(&graph, &mut evaluator);
	}

	#[test]
	fn removing_last_link_drops_subtree() {
		let mut graph = Graph::new(["abc", "bcd", "cde"]);
		let mut evaluator = prepared(&graph, 3);
		let ab = graph.find("ab").unwrap();

		assert_eq!(evaluator.reach(ab), &[2.0, 2.0, 2.0]);
		consume(&mut graph, &mut evaluator, "cd", "cde");
		assert_eq!(evaluator.reach(ab), &[2.0, 2.0, 1.0]);
		assert_matches_fresh(&graph, &mut evaluator);
	}

	#[test]
	fn removals_on_cycles() {
		let mut graph = Graph::new(["abc", "bca", "cab", "abab", "abxab"]);
		let mut evaluator = prepared(&graph, 3);

		consume(&mut graph, &mut evaluator, "ab", "abab");
		assert_matches_fresh(&graph, &mut evaluator);
		consume(&mut graph, &mut evaluator, "ca", "cab");
		assert_matches_fresh(&graph, &mut evaluator);
		consume(&mut graph, &mut evaluator, "ab", "abxab");
		assert_matches_fresh(&graph, &mut evaluator);
		consume(&mut graph, &mut evaluator, "bc", "bca");
		assert_matches_fresh(&graph, &mut evaluator);
	}

	#[test]
	fn composed_uses_leaf_as_first_depth() {
		let graph = Graph::new(["abc", "bcd", "bce"]);
		let mut leaf = prepared(&graph, 2);
		let mut composed =
			LookaheadEvaluator::composed(1, Box::new(LookaheadEvaluator::new(2).unwrap())).unwrap();
		composed.prepare(&graph);

		for node in graph.node_ids() {
			assert_eq!(composed.score(&graph, node), leaf.score(&graph, node));
		}
	}

	proptest! {
		#[test]
		fn incremental_matches_recompute(
			words in prop::collection::vec("[a-c]{2,4}", 0..30),
			picks in prop::collection::vec(any::<usize>(), 0..40),
			depth in 1usize..=3,
		) {
			let mut graph = Graph::new(&words);
			let mut evaluator = prepared(&graph, depth);

			for pick in picks {
				let active: Vec<EdgeId> = graph
					.node_ids()
					.flat_map(|node| graph.active_edges(node))
					.collect();
				if active.is_empty() {
					break;
				}
				let edge = active[pick % active.len()];
				let prefix = graph.edge(edge).from();
				let suffix = graph.consume_edge(edge);
				evaluator.remove_edge(&graph, prefix, edge, suffix);

				let mut fresh = prepared(&graph, depth);
				for node in graph.node_ids() {
					prop_assert_eq!(evaluator.reach(node), fresh.reach(node));
					prop_assert_eq!(evaluator.score(&graph, node), fresh.score(&graph, node));
				}
			}
		}

		#[test]
		fn composed_over_degree_matches_plain(
			words in prop::collection::vec("[a-c]{2,4}", 0..30),
			picks in prop::collection::vec(any::<usize>(), 0..40),
			depth in 1usize..=3,
		) {
			let mut graph = Graph::new(&words);
			let mut plain = prepared(&graph, depth);
			let mut composed = LookaheadEvaluator::composed(depth, Box::new(DegreeEvaluator)).unwrap();
			composed.prepare(&graph);

			for pick in picks {
				let active: Vec<EdgeId> = graph
					.node_ids()
					.flat_map(|node| graph.active_edges(node))
					.collect();
				if active.is_empty() {
					break;
				}
				let edge = active[pick % active.len()];
				let prefix = graph.edge(edge).from();
				let suffix = graph.consume_edge(edge);
				plain.remove_edge(&graph, prefix, edge, suffix);
				composed.remove_edge(&graph, prefix, edge, suffix);

				for node in graph.node_ids() {
					prop_assert_eq!(plain.reach(node), composed.reach(node));
				}
			}
		}
	}
}
