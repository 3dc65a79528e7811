use std::fmt::{Display, Formatter};

use clap::ValueEnum;

use crate::driver::Repeater;
use crate::error::{Error, Result};
use crate::evaluator::{DegreeEvaluator, LookaheadEvaluator, SamplingEvaluator};
use crate::generator::{BestScore, Generator, UniformRandom, Walk, WeightedRandom};

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum StrategyKind {
	UniformRandom,
	WeightedRandom,
	GreedyDegree,
	GreedyLookahead,
	GreedyComposed,
	GreedySampling,
}

impl StrategyKind {
	pub const ALL: [StrategyKind; 6] = [
		Self::UniformRandom,
		Self::WeightedRandom,
		Self::GreedyDegree,
		Self::GreedyLookahead,
		Self::GreedyComposed,
		Self::GreedySampling,
	];

	/// Deterministic strategies give the same chain on every run.
	pub fn is_deterministic(&self) -> bool {
		matches!(
			self,
			Self::GreedyDegree | Self::GreedyLookahead | Self::GreedyComposed
		)
	}
}

impl Display for StrategyKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let name = match self {
			Self::UniformRandom => "uniform-random",
			Self::WeightedRandom => "weighted-random",
			Self::GreedyDegree => "greedy-degree",
			Self::GreedyLookahead => "greedy-lookahead",
			Self::GreedyComposed => "greedy-composed",
			Self::GreedySampling => "greedy-sampling",
		};
		write!(f, "{name}")
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
	pub strategy: StrategyKind,
	pub lookahead_depth: usize,
	/// Trials for the randomized strategies.
	pub repeats: usize,
	/// Random walks per score of the sampling evaluator.
	pub samples: usize,
	pub seed: Option<u64>,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			strategy: StrategyKind::GreedyLookahead,
			lookahead_depth: 3,
			repeats: 100,
			samples: 10,
			seed: None,
		}
	}
}

impl Config {
	pub fn validate(&self) -> Result<()> {
		if self.lookahead_depth < 1 {
			return Err(Error::InvalidLookaheadDepth(self.lookahead_depth));
		}
		if self.repeats < 1 {
			return Err(Error::InvalidRepeats(self.repeats));
		}
		if self.samples < 1 {
			return Err(Error::InvalidSamples(self.samples));
		}
		Ok(())
	}

	pub fn with_strategy(&self, strategy: StrategyKind) -> Self {
		Self {
			strategy,
			..self.clone()
		}
	}

	/// Builds the generator for the configured strategy.
	pub fn build(&self) -> Result<Box<dyn Generator>> {
		self.validate()?;
		let depth = self.lookahead_depth;

		let generator: Box<dyn Generator> = match self.strategy {
			StrategyKind::UniformRandom => {
				let walk = Walk::new(UniformRandom::new(self.seed));
				Box::new(Repeater::new(Box::new(walk), self.repeats)?)
			}
			StrategyKind::WeightedRandom => {
				let evaluator = LookaheadEvaluator::new(depth)?;
				let walk = Walk::new(WeightedRandom::new(Box::new(evaluator), self.seed));
				Box::new(Repeater::new(Box::new(walk), self.repeats)?)
			}
			StrategyKind::GreedyDegree => Box::new(Walk::new(BestScore::new(Box::new(DegreeEvaluator)))),
			StrategyKind::GreedyLookahead => {
				let evaluator = LookaheadEvaluator::new(depth)?;
				Box::new(Walk::new(BestScore::new(Box::new(evaluator))))
			}
			StrategyKind::GreedyComposed => {
				let leaf = LookaheadEvaluator::new(depth)?;
				let evaluator = LookaheadEvaluator::composed(depth, Box::new(leaf))?;
				Box::new(Walk::new(BestScore::new(Box::new(evaluator))))
			}
			StrategyKind::GreedySampling => {
				let evaluator = SamplingEvaluator::new(self.samples, self.seed)?;
				let walk = Walk::new(BestScore::new(Box::new(evaluator)));
				Box::new(Repeater::new(Box::new(walk), self.repeats)?)
			}
		};

		Ok(generator)
	}
}
