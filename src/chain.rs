use std::collections::HashSet;
use std::fmt::{Display, Formatter};

use itertools::Itertools;

use crate::graph::split_key;

/// Words in chain order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chain {
	words: Vec<String>,
}

impl Chain {
	pub fn new(words: Vec<String>) -> Self {
		Self { words }
	}

	pub fn words(&self) -> &[String] {
		&self.words
	}

	pub fn len(&self) -> usize {
		self.words.len()
	}

	pub fn is_empty(&self) -> bool {
		self.words.is_empty()
	}

	/// Every word ends with the two characters the next one starts with, and no
	/// word appears twice.
	pub fn is_valid(&self) -> bool {
		let linked = self.words.iter().tuple_windows().all(|(current, next)| {
			match (split_key(current), split_key(next)) {
				(Some((_, suffix)), Some((prefix, _))) => suffix == prefix,
				_ => false,
			}
		});
		let distinct = self.words.iter().collect::<HashSet<_>>().len() == self.words.len();
		linked && distinct
	}
}

impl Display for Chain {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.words.iter().join(" "))
	}
}
