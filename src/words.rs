//! Word list input: one word per line, blank lines ignored.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Error, Result};

pub fn parse_words<R: BufRead>(reader: R) -> Result<Vec<String>> {
	let mut seen: HashSet<String> = HashSet::new();
	let mut words: Vec<String> = Vec::new();

	for (idx, line) in reader.lines().enumerate() {
		let line = line?;
		let line = line.trim();
		if line.is_empty() {
			continue;
		}

		let tokens = line.split_whitespace().count();
		if tokens > 1 {
			return Err(Error::Parse {
				line: idx + 1,
				reason: format!("expected a single word per line, found {tokens}"),
			});
		}

		let length = line.chars().count();
		if length < 2 {
			return Err(Error::Parse {
				line: idx + 1,
				reason: format!("expected words of length >= 2, found {length}"),
			});
		}

		if seen.insert(line.to_owned()) {
			words.push(line.to_owned());
		}
	}

	Ok(words)
}

pub fn read_words_file(path: impl AsRef<Path>) -> Result<Vec<String>> {
	let path = path.as_ref();
	if !path.is_file() {
		return Err(Error::InvalidPath(path.to_path_buf()));
	}

	parse_words(BufReader::new(File::open(path)?))
}
