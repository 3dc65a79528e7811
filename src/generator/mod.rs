//! Step-by-step chain generation.
//!
//! A [`Walk`] starts at the start sentinel and repeatedly asks its [`Strategy`]
//! for one active outgoing edge, consuming it, until it reaches the end sentinel.
//! Consumed edges are gone from the graph, so no word can be picked twice.

mod best_score;
mod random;

pub use best_score::BestScore;
pub use random::{UniformRandom, WeightedRandom};

use tracing::{debug, trace};

use crate::chain::Chain;
use crate::error::Result;
use crate::graph::{EdgeId, Graph, NodeId};

pub trait Strategy {
	fn prepare(&mut self, _graph: &Graph) {}

	/// Picks an active edge leaving `node`, or `None` to stop the walk.
	fn pick(&mut self, graph: &Graph, node: NodeId) -> Option<EdgeId>;

	fn edge_consumed(&mut self, _graph: &Graph, _prefix: NodeId, _edge: EdgeId, _suffix: NodeId) {}
}

pub trait Generator {
	/// Builds a chain, consuming the graph's edges along the way.
	///
	/// A walk that gets stuck is not an error: it yields the chain built so far.
	fn generate(&mut self, graph: &mut Graph) -> Result<Chain>;
}

pub struct Walk<S> {
	strategy: S,
}

impl<S: Strategy> Walk<S> {
	pub fn new(strategy: S) -> Self {
		Self { strategy }
	}
}

impl<S: Strategy> Generator for Walk<S> {
	fn generate(&mut self, graph: &mut Graph) -> Result<Chain> {
		self.strategy.prepare(graph);

		let mut words: Vec<String> = Vec::new();
		let mut node = graph.start();

		while node != graph.end() {
			// Self-loops are taken as soon as they are reachable, bypassing the strategy.
			let Some(edge) = graph
				.self_loop(node)
				.or_else(|| self.strategy.pick(graph, node))
			else {
				debug!(node = graph.key(node), words = words.len(), "walk stuck before the end");
				break;
			};

			let next = graph.consume_edge(edge);
			trace!(word = graph.edge(edge).label(), "consumed");
			self.strategy.edge_consumed(graph, node, edge, next);

			let edge = graph.edge(edge);
			if edge.is_word() {
				words.push(edge.label().to_owned());
			}
			node = next;
		}

		Ok(Chain::new(words))
	}
}
