//! Level placement: BFS depth from a root picks the row, input order picks the column.

use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, HashSet, VecDeque};
use std::hash::{Hash, Hasher};

use log::debug;

use super::config::GraphCanvasConfig;
use super::types::{GraphEdge, GraphNode, NodeKind, Position};

/// Output of one layout pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layout {
	/// Top-left corner of every node card, keyed by node key.
	pub positions: HashMap<String, Position>,
	/// BFS level of every node, keyed by node key.
	pub levels: HashMap<String, usize>,
	/// Width of the content box.
	pub content_width: f64,
	/// Height of the content box.
	pub content_height: f64,
}

impl Layout {
	/// Position of a node, if it was placed.
	pub fn position(&self, key: &str) -> Option<Position> {
		self.positions.get(key).copied()
	}
}

/// Lay out `nodes` in rows by BFS depth from the root.
///
/// The root is the first `Start` node, else the first node. Nodes the BFS
/// never reaches land on one extra row below the deepest reached one.
/// Edges naming unknown keys are ignored.
pub fn compute_layout(
	nodes: &[GraphNode],
	edges: &[GraphEdge],
	config: &GraphCanvasConfig,
) -> Layout {
	let levels = assign_levels(nodes, edges);

	let mut columns: HashMap<usize, usize> = HashMap::new();
	let mut positions = HashMap::with_capacity(nodes.len());
	let (mut max_x, mut max_y) = (0.0_f64, 0.0_f64);
	for node in nodes {
		let level = levels.get(node.key.as_str()).copied().unwrap_or_default();
		let column = columns.entry(level).or_insert(0);
		let x = config.padding_x + *column as f64 * config.column_width;
		let y = config.padding_y + level as f64 * config.row_height;
		*column += 1;

		max_x = max_x.max(x);
		max_y = max_y.max(y);
		positions.insert(node.key.clone(), Position::new(x, y));
	}

	Layout {
		positions,
		levels: levels
			.into_iter()
			.map(|(key, level)| (key.to_owned(), level))
			.collect(),
		content_width: (max_x + config.extent_margin_x).max(config.min_content_width),
		content_height: (max_y + config.extent_margin_y).max(config.min_content_height),
	}
}

/// BFS depth of every node. Unreached nodes get `max reached level + 1`.
pub fn assign_levels<'a>(nodes: &'a [GraphNode], edges: &'a [GraphEdge]) -> HashMap<&'a str, usize> {
	let known: HashSet<&str> = nodes.iter().map(|n| n.key.as_str()).collect();

	let mut adjacency: HashMap<&str, Vec<&str>> = HashMap::new();
	for edge in edges {
		let (from, to) = (edge.from_key.as_str(), edge.to_key.as_str());
		if known.contains(from) && known.contains(to) {
			adjacency.entry(from).or_default().push(to);
		}
	}

	let root = nodes
		.iter()
		.find(|n| n.kind == NodeKind::Start)
		.or_else(|| nodes.first());

	let mut levels: HashMap<&str, usize> = HashMap::with_capacity(nodes.len());
	if let Some(root) = root {
		let mut queue = VecDeque::new();
		levels.insert(root.key.as_str(), 0);
		queue.push_back(root.key.as_str());

		while let Some(current) = queue.pop_front() {
			let depth = levels[current];
			for &next in adjacency.get(current).into_iter().flatten() {
				if !levels.contains_key(next) {
					levels.insert(next, depth + 1);
					queue.push_back(next);
				}
			}
		}
	}

	let fallback = levels.values().max().map_or(0, |max| max + 1);
	for node in nodes {
		levels.entry(node.key.as_str()).or_insert(fallback);
	}
	levels
}

/// Memo for `compute_layout`, keyed by a fingerprint of the node and edge lists.
#[derive(Debug, Default)]
pub struct LayoutCache {
	entry: Option<(u64, GraphCanvasConfig, Layout)>,
}

impl LayoutCache {
	/// Empty cache.
	pub fn new() -> Self {
		Self::default()
	}

	/// Return the cached layout for this input, computing it on a miss.
	pub fn get_or_compute(
		&mut self,
		nodes: &[GraphNode],
		edges: &[GraphEdge],
		config: &GraphCanvasConfig,
	) -> &Layout {
		let key = fingerprint(nodes, edges);
		if !matches!(&self.entry, Some((k, c, _)) if *k == key && c == config) {
			self.entry = None;
		}
		let (_, _, layout) = self.entry.get_or_insert_with(|| {
			debug!(
				"layout: recomputing for {} nodes, {} edges",
				nodes.len(),
				edges.len()
			);
			(key, config.clone(), compute_layout(nodes, edges, config))
		});
		layout
	}

	/// Whether `get_or_compute` would hit for this input.
	pub fn is_cached(&self, nodes: &[GraphNode], edges: &[GraphEdge], config: &GraphCanvasConfig) -> bool {
		matches!(&self.entry, Some((k, c, _)) if *k == fingerprint(nodes, edges) && c == config)
	}

	/// Last computed layout, if any.
	pub fn current(&self) -> Option<&Layout> {
		self.entry.as_ref().map(|(_, _, layout)| layout)
	}
}

fn fingerprint(nodes: &[GraphNode], edges: &[GraphEdge]) -> u64 {
	let mut hasher = DefaultHasher::new();
	nodes.hash(&mut hasher);
	edges.hash(&mut hasher);
	hasher.finish()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn node(key: &str) -> GraphNode {
		GraphNode::new(key, key.to_uppercase())
	}

	#[test]
	fn places_siblings_in_the_same_row() {
		let nodes = vec![node("start").with_kind(NodeKind::Start), node("a"), node("b")];
		let edges = vec![GraphEdge::new("start", "a"), GraphEdge::new("start", "b")];
		let layout = compute_layout(&nodes, &edges, &GraphCanvasConfig::default());

		assert_eq!(layout.levels["start"], 0);
		assert_eq!(layout.levels["a"], 1);
		assert_eq!(layout.levels["b"], 1);
		assert_eq!(layout.position("start"), Some(Position::new(80.0, 80.0)));
		assert_eq!(layout.position("a"), Some(Position::new(80.0, 220.0)));
		assert_eq!(layout.position("b"), Some(Position::new(300.0, 220.0)));
	}

	#[test]
	fn start_kind_wins_over_input_order() {
		let nodes = vec![node("a"), node("b").with_kind(NodeKind::Start)];
		let edges = vec![GraphEdge::new("b", "a")];
		let levels = assign_levels(&nodes, &edges);
		assert_eq!(levels["b"], 0);
		assert_eq!(levels["a"], 1);
	}

	#[test]
	fn first_node_is_root_without_start_kind() {
		let nodes = vec![node("x"), node("y")];
		let edges = vec![GraphEdge::new("x", "y")];
		let levels = assign_levels(&nodes, &edges);
		assert_eq!(levels["x"], 0);
		assert_eq!(levels["y"], 1);
	}

	#[test]
	fn unreached_nodes_sink_below_the_deepest_level() {
		let nodes = vec![node("a"), node("b"), node("c"), node("island")];
		let edges = vec![GraphEdge::new("a", "b"), GraphEdge::new("b", "c")];
		let levels = assign_levels(&nodes, &edges);
		assert_eq!(levels["c"], 2);
		assert_eq!(levels["island"], 3);
	}

	#[test]
	fn edgeless_graph_puts_everything_but_root_on_row_one() {
		let nodes = vec![node("a"), node("b"), node("c")];
		let layout = compute_layout(&nodes, &[], &GraphCanvasConfig::default());
		assert_eq!(layout.levels["a"], 0);
		assert_eq!(layout.position("b"), Some(Position::new(80.0, 220.0)));
		assert_eq!(layout.position("c"), Some(Position::new(300.0, 220.0)));
	}

	#[test]
	fn cycles_terminate_with_first_visit_depth() {
		let nodes = vec![node("a"), node("b"), node("c")];
		let edges = vec![
			GraphEdge::new("a", "b"),
			GraphEdge::new("b", "c"),
			GraphEdge::new("c", "a"),
		];
		let levels = assign_levels(&nodes, &edges);
		assert_eq!((levels["a"], levels["b"], levels["c"]), (0, 1, 2));
	}

	#[test]
	fn dangling_edges_do_not_create_levels() {
		let nodes = vec![node("a"), node("b")];
		let edges = vec![GraphEdge::new("a", "ghost"), GraphEdge::new("ghost", "b")];
		let layout = compute_layout(&nodes, &edges, &GraphCanvasConfig::default());
		assert_eq!(layout.positions.len(), 2);
		assert!(!layout.levels.contains_key("ghost"));
		assert_eq!(layout.levels["b"], 1);
	}

	#[test]
	fn empty_graph_gets_minimum_box() {
		let layout = compute_layout(&[], &[], &GraphCanvasConfig::default());
		assert!(layout.positions.is_empty());
		assert_eq!((layout.content_width, layout.content_height), (800.0, 600.0));
	}

	#[test]
	fn content_box_grows_with_wide_rows() {
		let nodes: Vec<_> = (0..6).map(|i| node(&format!("n{i}"))).collect();
		let edges: Vec<_> = (1..6).map(|i| GraphEdge::new("n0", format!("n{i}"))).collect();
		let layout = compute_layout(&nodes, &edges, &GraphCanvasConfig::default());
		// Five children: last column x = 80 + 4 * 220 = 960.
		assert_eq!(layout.content_width, 960.0 + 200.0);
		assert_eq!(layout.content_height, 600.0);
	}

	#[test]
	fn cache_hits_on_equal_input_and_misses_on_change() {
		let config = GraphCanvasConfig::default();
		let nodes = vec![node("a"), node("b")];
		let mut edges = vec![GraphEdge::new("a", "b")];
		let mut cache = LayoutCache::new();

		assert!(!cache.is_cached(&nodes, &edges, &config));
		let first = cache.get_or_compute(&nodes, &edges, &config).clone();
		assert!(cache.is_cached(&nodes, &edges, &config));
		assert_eq!(cache.get_or_compute(&nodes, &edges, &config), &first);

		edges.push(GraphEdge::new("b", "a").with_label("back"));
		assert!(!cache.is_cached(&nodes, &edges, &config));
		cache.get_or_compute(&nodes, &edges, &config);
		assert!(cache.is_cached(&nodes, &edges, &config));
	}
}
