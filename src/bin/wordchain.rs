use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use wordchain::words::read_words_file;
use wordchain::{Config, Graph, StrategyKind};

/// Builds a long chain of words where each word starts with the last two
/// characters of the previous one.
#[derive(Parser, Debug)]
#[command(name = "wordchain", version, about)]
struct Cli {
	/// File with one word per line
	#[arg(value_name = "WORDS_FILE")]
	words: PathBuf,

	#[arg(short, long, value_enum, default_value_t = StrategyKind::GreedyLookahead)]
	strategy: StrategyKind,

	/// Run every strategy on the same graph
	#[arg(long, conflicts_with = "strategy")]
	all: bool,

	/// Hops covered by the lookahead evaluators
	#[arg(short = 'd', long, default_value_t = 3)]
	lookahead_depth: usize,

	/// Trials kept for the randomized strategies
	#[arg(short, long, default_value_t = 100)]
	repeats: usize,

	/// Random walks per node score of the sampling evaluator
	#[arg(long, default_value_t = 10)]
	samples: usize,

	/// Seed for reproducible randomized runs
	#[arg(long)]
	seed: Option<u64>,

	/// Log filter used when RUST_LOG is not set
	#[arg(long, default_value = "warn")]
	log_level: String,
}

impl Cli {
	fn config(&self) -> Config {
		Config {
			strategy: self.strategy,
			lookahead_depth: self.lookahead_depth,
			repeats: self.repeats,
			samples: self.samples,
			seed: self.seed,
		}
	}
}

fn init_tracing(level: &str) {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.init();
}

fn run(graph: &mut Graph, config: &Config) -> Result<()> {
	let started = Instant::now();
	let chain = config
		.build()
		.with_context(|| format!("building {}", config.strategy))?
		.generate(graph)?;
	let elapsed = started.elapsed();

	if !chain.is_valid() {
		bail!("{} produced an invalid chain: {chain}", config.strategy);
	}

	println!("{}: {} word(s) in {:.3?}", config.strategy, chain.len(), elapsed);
	println!("{chain}");
	graph.restore_all();
	Ok(())
}

fn main() -> Result<()> {
	let cli = Cli::parse();
	init_tracing(&cli.log_level);

	let words = read_words_file(&cli.words)
		.with_context(|| format!("reading {}", cli.words.display()))?;
	let mut graph = Graph::new(&words);
	info!(
		words = graph.word_count(),
		nodes = graph.node_count() - 2,
		"graph built"
	);

	let config = cli.config();
	config.validate()?;

	if cli.all {
		for kind in StrategyKind::ALL {
			run(&mut graph, &config.with_strategy(kind))?;
		}
	} else {
		run(&mut graph, &config)?;
	}

	Ok(())
}
