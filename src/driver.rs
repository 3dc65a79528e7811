use tracing::{debug, info};

use crate::chain::Chain;
use crate::error::{Error, Result};
use crate::generator::Generator;
use crate::graph::Graph;

/// Runs a generator several times from the same graph state and keeps the
/// longest chain. The first of equally long chains wins.
pub struct Repeater {
	inner: Box<dyn Generator>,
	repeats: usize,
}

impl Repeater {
	pub fn new(inner: Box<dyn Generator>, repeats: usize) -> Result<Self> {
		if repeats < 1 {
			return Err(Error::InvalidRepeats(repeats));
		}
		Ok(Self { inner, repeats })
	}
}

impl Generator for Repeater {
	fn generate(&mut self, graph: &mut Graph) -> Result<Chain> {
		let initial = graph.snapshot();
		let mut best = Chain::default();

		for trial in 1..=self.repeats {
			let chain = self.inner.generate(graph)?;
			debug!(trial, length = chain.len(), "trial finished");
			if chain.len() > best.len() {
				info!(trial, length = chain.len(), "longer chain found");
				best = chain;
			}
			graph.restore(&initial)?;
		}

		Ok(best)
	}
}
