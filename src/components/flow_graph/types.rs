use serde::{Deserialize, Serialize};

/// Role of a node within a flow; picks the accent color and the layout root.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
	/// Entry point. The first `Start` node becomes the layout root.
	Start,
	/// Any intermediate node.
	#[default]
	Normal,
	/// Terminal node.
	End,
}

impl NodeKind {
	/// Lowercase name shown on the node card.
	pub fn as_str(self) -> &'static str {
		match self {
			NodeKind::Start => "start",
			NodeKind::Normal => "normal",
			NodeKind::End => "end",
		}
	}
}

/// A node supplied by the host application. Identity is `key`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphNode {
	/// Unique key; duplicates are undefined input and the last one wins in lookups.
	pub key: String,
	/// Display title.
	#[serde(default)]
	pub title: String,
	/// Node role.
	#[serde(default)]
	pub kind: NodeKind,
}

impl GraphNode {
	/// Build a `Normal` node.
	pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
		Self {
			key: key.into(),
			title: title.into(),
			kind: NodeKind::Normal,
		}
	}

	/// Replace the node kind.
	pub fn with_kind(mut self, kind: NodeKind) -> Self {
		self.kind = kind;
		self
	}
}

/// A directed, optionally labeled edge between two node keys.
///
/// Edges naming a key that is not in the node set are not an error, they are
/// simply never laid out or drawn.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
	/// Source node key.
	pub from_key: String,
	/// Target node key.
	pub to_key: String,
	/// Optional label drawn above the edge midpoint.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
}

impl GraphEdge {
	/// Build an unlabeled edge.
	pub fn new(from_key: impl Into<String>, to_key: impl Into<String>) -> Self {
		Self {
			from_key: from_key.into(),
			to_key: to_key.into(),
			label: None,
		}
	}

	/// Attach a label.
	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}
}

/// The full input of a canvas, as loaded by the host page.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
	/// Nodes in input order.
	#[serde(default)]
	pub nodes: Vec<GraphNode>,
	/// Edges in input order.
	#[serde(default)]
	pub edges: Vec<GraphEdge>,
}

/// A content-space point.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
	/// Horizontal offset in content pixels.
	pub x: f64,
	/// Vertical offset in content pixels.
	pub y: f64,
}

impl Position {
	/// Shorthand constructor.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// Axis-aligned rectangle; the coordinate space depends on the producer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
	/// Left edge.
	pub x: f64,
	/// Top edge.
	pub y: f64,
	/// Horizontal extent.
	pub width: f64,
	/// Vertical extent.
	pub height: f64,
}

impl Rect {
	/// Shorthand constructor.
	pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
		Self {
			x,
			y,
			width,
			height,
		}
	}

	/// Whether the point lies inside or on the border.
	pub fn contains(&self, x: f64, y: f64) -> bool {
		x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn kind_defaults_to_normal_when_missing() {
		let node: GraphNode = serde_json::from_str(r#"{"key":"a","title":"A"}"#).unwrap();
		assert_eq!(node.kind, NodeKind::Normal);
	}

	#[test]
	fn graph_data_reads_camel_case_edges() {
		let data: GraphData = serde_json::from_str(
			r#"{
				"nodes": [{"key":"home","title":"Home","kind":"start"},{"key":"cart","title":"Cart","kind":"end"}],
				"edges": [{"fromKey":"home","toKey":"cart","label":"buy"}]
			}"#,
		)
		.unwrap();
		assert_eq!(data.nodes[0].kind, NodeKind::Start);
		assert_eq!(data.nodes[1].kind, NodeKind::End);
		assert_eq!(data.edges[0], GraphEdge::new("home", "cart").with_label("buy"));
	}

	#[test]
	fn unlabeled_edge_omits_label_field() {
		let json = serde_json::to_string(&GraphEdge::new("a", "b")).unwrap();
		assert_eq!(json, r#"{"fromKey":"a","toKey":"b"}"#);
	}
}
