//! Longest word chains: every word starts with the last two characters of the
//! word before it, and no word is used twice.
//!
//! Words are edges of a graph whose nodes are two-character keys. A chain is a
//! walk from a synthetic start node to a synthetic end node that never reuses an
//! edge. Walks are built one edge at a time by a [`generator::Strategy`], most of
//! which rank the candidate successors with an [`evaluator::Evaluator`].
//!
//! ```
//! use wordchain::{Config, Graph, StrategyKind};
//!
//! let mut graph = Graph::new(["abc", "bca", "cab"]);
//! let config = Config {
//!     strategy: StrategyKind::GreedyDegree,
//!     ..Config::default()
//! };
//! let chain = config.build()?.generate(&mut graph)?;
//! assert_eq!(chain.len(), 3);
//! # Ok::<(), wordchain::Error>(())
//! ```

pub mod chain;
pub mod config;
pub mod driver;
pub mod error;
pub mod evaluator;
pub mod generator;
pub mod graph;
pub mod words;

pub use chain::Chain;
pub use config::{Config, StrategyKind};
pub use error::{Error, Result};
pub use generator::Generator;
pub use graph::Graph;
