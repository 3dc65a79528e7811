use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
	#[error("lookahead depth needs to be > 0, got {0}")]
	InvalidLookaheadDepth(usize),

	#[error("repeats needs to be > 0, got {0}")]
	InvalidRepeats(usize),

	#[error("samples needs to be > 0, got {0}")]
	InvalidSamples(usize),

	/// The snapshot was taken from a graph with a different structure.
	#[error("stale snapshot for node {key:?}: {reason}")]
	StaleSnapshot { key: String, reason: String },

	#[error("snapshot has {found} nodes, graph has {expected}")]
	SnapshotSize { expected: usize, found: usize },

	#[error("word {word:?} is not an active edge of node {key:?}")]
	InactiveEdge { key: String, word: String },

	#[error("line {line}: {reason}")]
	Parse { line: usize, reason: String },

	#[error("{0:?} is not a valid path")]
	InvalidPath(std::path::PathBuf),

	#[error(transparent)]
	Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn messages() {
		assert_eq!(
			Error::InvalidLookaheadDepth(0).to_string(),
			"lookahead depth needs to be > 0, got 0"
		);
		let err = Error::Parse {
			line: 3,
			reason: "expected words of length >= 2, found 1".into(),
		};
		assert_eq!(err.to_string(), "line 3: expected words of length >= 2, found 1");
		assert_eq!(
			Error::SnapshotSize { expected: 6, found: 5 }.to_string(),
			"snapshot has 5 nodes, graph has 6"
		);
	}
}
