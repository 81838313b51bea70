//! Content-space geometry for one draw pass, derived from layout and interaction state.

use super::config::GraphCanvasConfig;
use super::interaction::InteractionState;
use super::layout::Layout;
use super::types::{GraphEdge, GraphNode, NodeKind, Rect};
use super::viewport::{ViewportState, measured};

/// An edge routed as a vertical-horizontal-vertical elbow.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgePath {
	/// Source node key.
	pub from: String,
	/// Target node key.
	pub to: String,
	/// Source anchor, two bends, target anchor.
	pub points: [(f64, f64); 4],
	/// Label text, if the edge has one.
	pub label: Option<String>,
	/// Where the label baseline is centered.
	pub label_at: (f64, f64),
}

/// A node card ready to paint.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeBox {
	/// Node key.
	pub key: String,
	/// Node title.
	pub title: String,
	/// Node kind.
	pub kind: NodeKind,
	/// Card bounds.
	pub rect: Rect,
	/// Accent bar color.
	pub accent: String,
	/// A click here would advance connect mode.
	pub highlighted: bool,
	/// This node is the chosen edge source.
	pub selected: bool,
}

/// Everything the main canvas draws, in content space.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
	/// Edges with both endpoints placed.
	pub edges: Vec<EdgePath>,
	/// Node cards in input order; later cards paint on top.
	pub nodes: Vec<NodeBox>,
}

impl Scene {
	/// Key of the topmost card containing a content-space point.
	pub fn node_at(&self, x: f64, y: f64) -> Option<&str> {
		self.nodes
			.iter()
			.rev()
			.find(|node| node.rect.contains(x, y))
			.map(|node| node.key.as_str())
	}
}

/// Build the main canvas geometry. Edges with an unplaced endpoint are skipped.
pub fn build_scene(
	layout: &Layout,
	nodes: &[GraphNode],
	edges: &[GraphEdge],
	interaction: &InteractionState,
	config: &GraphCanvasConfig,
) -> Scene {
	let (w, h) = (config.node_width, config.node_height);

	let edges = edges
		.iter()
		.filter_map(|edge| {
			let from = layout.position(&edge.from_key)?;
			let to = layout.position(&edge.to_key)?;

			// Leave from the right edge of the source card, enter the target card top-center.
			let (sx, sy) = (from.x + w, from.y + h / 2.0);
			let (tx, ty) = (to.x + w / 2.0, to.y);
			let mid_y = (sy + ty) / 2.0;

			Some(EdgePath {
				from: edge.from_key.clone(),
				to: edge.to_key.clone(),
				points: [(sx, sy), (sx, mid_y), (tx, mid_y), (tx, ty)],
				label: edge.label.clone(),
				label_at: ((sx + tx) / 2.0, mid_y - 6.0),
			})
		})
		.collect();

	let source = interaction.source();
	let nodes = nodes
		.iter()
		.filter_map(|node| {
			let at = layout.position(&node.key)?;
			Some(NodeBox {
				key: node.key.clone(),
				title: node.title.clone(),
				kind: node.kind,
				rect: Rect::new(at.x, at.y, w, h),
				accent: config.kind_color(node.kind).to_owned(),
				highlighted: interaction.is_click_target(&node.key),
				selected: source == Some(node.key.as_str()),
			})
		})
		.collect();

	Scene { edges, nodes }
}

/// Minimap overview in minimap pixels.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Minimap {
	/// Minimap canvas width.
	pub width: f64,
	/// Minimap canvas height.
	pub height: f64,
	/// One rectangle per placed node, with its accent color.
	pub nodes: Vec<(Rect, String)>,
	/// The part of the content currently visible on the main canvas.
	pub window: Rect,
}

/// Project every node and the visible window onto the minimap.
pub fn build_minimap(
	layout: &Layout,
	nodes: &[GraphNode],
	viewport: &ViewportState,
	viewport_width: f64,
	viewport_height: f64,
	config: &GraphCanvasConfig,
) -> Minimap {
	let (mini_w, mini_h) = (config.minimap_width, config.minimap_height);
	let (cw, ch) = (measured(layout.content_width), measured(layout.content_height));
	let project = |r: Rect| {
		Rect::new(
			r.x / cw * mini_w,
			r.y / ch * mini_h,
			r.width / cw * mini_w,
			r.height / ch * mini_h,
		)
	};

	let nodes = nodes
		.iter()
		.filter_map(|node| {
			let at = layout.position(&node.key)?;
			let rect = Rect::new(
				at.x,
				at.y,
				config.minimap_node_width,
				config.minimap_node_height,
			);
			Some((project(rect), config.kind_color(node.kind).to_owned()))
		})
		.collect();

	Minimap {
		width: mini_w,
		height: mini_h,
		nodes,
		window: project(viewport.visible_rect(viewport_width, viewport_height)),
	}
}
