//! Word graph: nodes are two-character keys, edges are words.
//!
//! Nodes and edges live in arenas and refer to each other by index. Consuming an
//! edge only flips its activity flag, so restoring the graph never relocates
//! anything and a [`Snapshot`] is a copy of the flags.

use std::collections::{HashMap, HashSet};

use itertools::Itertools;
use tracing::warn;

use crate::error::{Error, Result};

pub const START_KEY: &str = "<start>";
pub const END_KEY: &str = "<end>";

#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
	pub fn index(self) -> usize {
		self.0
	}
}

#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct EdgeId(usize);

impl EdgeId {
	pub fn index(self) -> usize {
		self.0
	}
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EdgeKind {
	/// Synthetic edge leaving the start sentinel.
	Start,
	Word,
	/// Synthetic edge entering the end sentinel.
	End,
}

#[derive(Clone, Debug)]
pub struct Edge {
	label: String,
	kind: EdgeKind,
	from: NodeId,
	to: NodeId,
}

impl Edge {
	pub fn label(&self) -> &str {
		&self.label
	}

	pub fn kind(&self) -> EdgeKind {
		self.kind
	}

	pub fn from(&self) -> NodeId {
		self.from
	}

	pub fn to(&self) -> NodeId {
		self.to
	}

	pub fn is_word(&self) -> bool {
		self.kind == EdgeKind::Word
	}

	pub fn is_self_loop(&self) -> bool {
		self.from == self.to
	}
}

#[derive(Clone, Debug)]
pub struct Node {
	key: String,
	/// Outgoing edges in discovery order, active or not.
	edges: Vec<EdgeId>,
}

impl Node {
	fn new(key: String) -> Self {
		Self { key, edges: Vec::new() }
	}

	pub fn key(&self) -> &str {
		&self.key
	}

	pub fn edges(&self) -> &[EdgeId] {
		&self.edges
	}
}

/// First and last two characters of a word, or `None` for words that are too short.
pub fn split_key(word: &str) -> Option<(&str, &str)> {
	let mut chars = word.char_indices();
	chars.next()?;
	let (second, chr) = chars.next()?;
	let prefix = &word[..second + chr.len_utf8()];
	let (suffix_start, _) = word.char_indices().rev().nth(1)?;
	Some((prefix, &word[suffix_start..]))
}

#[derive(Clone, Debug)]
pub struct Graph {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
	active: Vec<bool>,
	degree: Vec<usize>,
	index: HashMap<String, NodeId>,
	start: NodeId,
	end: NodeId,
	word_count: usize,
}

impl Graph {
	fn empty() -> Self {
		let mut graph = Self {
			nodes: Vec::new(),
			edges: Vec::new(),
			active: Vec::new(),
			degree: Vec::new(),
			index: HashMap::new(),
			start: NodeId(0),
			end: NodeId(0),
			word_count: 0,
		};
		graph.start = graph.push_node(START_KEY.to_owned());
		graph.end = graph.push_node(END_KEY.to_owned());
		graph
	}

	/// Builds the graph from a word list.
	///
	/// Words sharing a prefix or suffix share the node. Duplicate words and words
	/// shorter than two characters are skipped with a warning.
	pub fn new<I, S>(words: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut graph = Self::empty();
		let mut seen: HashSet<String> = HashSet::new();

		for word in words {
			let word = word.as_ref();
			let Some((prefix, suffix)) = split_key(word) else {
				warn!(word, "skipping word shorter than 2 characters");
				continue;
			};
			if !seen.insert(word.to_owned()) {
				warn!(word, "skipping duplicate word");
				continue;
			}

			let from = graph.find_or_make(prefix);
			let to = graph.find_or_make(suffix);
			graph.push_edge(word.to_owned(), EdgeKind::Word, from, to);
			graph.word_count += 1;
		}

		graph
	}

	fn push_node(&mut self, key: String) -> NodeId {
		let id = NodeId(self.nodes.len());
		self.nodes.push(Node::new(key));
		self.degree.push(0);
		id
	}

	fn push_edge(&mut self, label: String, kind: EdgeKind, from: NodeId, to: NodeId) -> EdgeId {
		let id = EdgeId(self.edges.len());
		self.edges.push(Edge { label, kind, from, to });
		self.active.push(true);
		self.nodes[from.0].edges.push(id);
		self.degree[from.0] += 1;
		id
	}

	fn find_or_make(&mut self, key: &str) -> NodeId {
		if let Some(&id) = self.index.get(key) {
			return id;
		}

		let id = self.push_node(key.to_owned());
		self.index.insert(key.to_owned(), id);
		self.push_edge(format!("<start:{key}>"), EdgeKind::Start, self.start, id);
		self.push_edge(format!("<end:{key}>"), EdgeKind::End, id, self.end);
		id
	}

	pub fn start(&self) -> NodeId {
		self.start
	}

	pub fn end(&self) -> NodeId {
		self.end
	}

	pub fn find(&self, key: &str) -> Option<NodeId> {
		self.index.get(key).copied()
	}

	pub fn node(&self, id: NodeId) -> &Node {
		&self.nodes[id.0]
	}

	pub fn key(&self, id: NodeId) -> &str {
		&self.nodes[id.0].key
	}

	pub fn edge(&self, id: EdgeId) -> &Edge {
		&self.edges[id.0]
	}

	pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
		(0..self.nodes.len()).map(NodeId)
	}

	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	/// Number of distinct words the graph was built from.
	pub fn word_count(&self) -> usize {
		self.word_count
	}

	pub fn is_active(&self, edge: EdgeId) -> bool {
		self.active[edge.0]
	}

	pub fn out_degree(&self, node: NodeId) -> usize {
		self.degree[node.0]
	}

	pub fn active_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
		self.nodes[node.0]
			.edges
			.iter()
			.copied()
			.filter(|&edge| self.active[edge.0])
	}

	/// Distinct successors over active edges, in edge order.
	pub fn successors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
		self.active_edges(node)
			.map(|edge| self.edges[edge.0].to)
			.unique()
	}

	pub fn active_words(&self, node: NodeId) -> Vec<&str> {
		self.active_edges(node)
			.map(|edge| self.edges[edge.0].label.as_str())
			.collect_vec()
	}

	pub fn self_loop(&self, node: NodeId) -> Option<EdgeId> {
		self.active_edges(node)
			.find(|&edge| self.edges[edge.0].is_self_loop())
	}

	/// Deactivates an edge and returns its successor.
	pub fn consume_edge(&mut self, edge: EdgeId) -> NodeId {
		let Edge { from, to, .. } = self.edges[edge.0];
		if self.active[edge.0] {
			self.active[edge.0] = false;
			self.degree[from.0] -= 1;
		} else {
			warn!(word = %self.edges[edge.0].label, "edge consumed twice");
		}
		to
	}

	/// Deactivates the active edge labelled `word` leaving `node`.
	pub fn consume(&mut self, node: NodeId, word: &str) -> Result<NodeId> {
		let edge = self
			.active_edges(node)
			.find(|&edge| self.edges[edge.0].label == word)
			.ok_or_else(|| Error::InactiveEdge {
				key: self.key(node).to_owned(),
				word: word.to_owned(),
			})?;
		Ok(self.consume_edge(edge))
	}

	/// Reactivates every consumed edge.
	pub fn restore_all(&mut self) {
		self.active.iter_mut().for_each(|active| *active = true);
		for (degree, node) in self.degree.iter_mut().zip(self.nodes.iter()) {
			*degree = node.edges.len();
		}
	}

	pub fn snapshot(&self) -> Snapshot {
		let nodes = self
			.nodes
			.iter()
			.map(|node| NodeSnapshot {
				key: node.key.clone(),
				words: node.edges.iter().map(|edge| self.edges[edge.0].label.clone()).collect(),
				active: node.edges.iter().map(|edge| self.active[edge.0]).collect(),
			})
			.collect();
		Snapshot { nodes }
	}

	/// Restores exactly the activity captured by `snapshot`.
	///
	/// Every node must hold the same words as when the snapshot was taken, in
	/// any order. Nothing is modified unless the whole snapshot matches.
	pub fn restore(&mut self, snapshot: &Snapshot) -> Result<()> {
		if snapshot.nodes.len() != self.nodes.len() {
			return Err(Error::SnapshotSize {
				expected: self.nodes.len(),
				found: snapshot.nodes.len(),
			});
		}

		for (node, saved) in self.nodes.iter().zip(snapshot.nodes.iter()) {
			if node.key != saved.key {
				return Err(Error::StaleSnapshot {
					key: node.key.clone(),
					reason: format!("snapshot holds node {:?} in its place", saved.key),
				});
			}
			let current = node
				.edges
				.iter()
				.map(|edge| self.edges[edge.0].label.as_str())
				.sorted()
				.collect_vec();
			let recorded = saved.words.iter().map(String::as_str).sorted().collect_vec();
			if current != recorded {
				return Err(Error::StaleSnapshot {
					key: node.key.clone(),
					reason: format!(
						"snapshot has words [{}], node has [{}]",
						recorded.join(", "),
						current.join(", ")
					),
				});
			}
		}

		for (idx, (node, saved)) in self.nodes.iter().zip(snapshot.nodes.iter()).enumerate() {
			let flags: HashMap<&str, bool> = saved
				.words
				.iter()
				.map(String::as_str)
				.zip(saved.active.iter().copied())
				.collect();
			for &edge in &node.edges {
				self.active[edge.0] = flags[self.edges[edge.0].label.as_str()];
			}
			self.degree[idx] = saved.active.iter().filter(|&&active| active).count();
		}
		Ok(())
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct NodeSnapshot {
	key: String,
	words: Vec<String>,
	active: Vec<bool>,
}

/// Which edges were active, per node, at the time of capture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
	nodes: Vec<NodeSnapshot>,
}
