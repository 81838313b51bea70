use super::types::NodeKind;

/// Tunables for layout, viewport limits, drawing and the minimap.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphCanvasConfig {
	/// Horizontal distance between nodes sharing a level.
	pub column_width: f64,
	/// Vertical distance between levels.
	pub row_height: f64,
	/// Offset of the first column and row.
	pub padding_x: f64,
	/// See `padding_x`.
	pub padding_y: f64,
	/// Added to the furthest node x when sizing the content box.
	pub extent_margin_x: f64,
	/// Added to the furthest node y when sizing the content box.
	pub extent_margin_y: f64,
	/// Smallest content box, used for empty or tiny graphs.
	pub min_content_width: f64,
	/// See `min_content_width`.
	pub min_content_height: f64,
	/// Node card size on the main canvas.
	pub node_width: f64,
	/// See `node_width`.
	pub node_height: f64,
	/// Node rectangle size projected onto the minimap. Wider than `node_width`
	/// so each node stays visible at minimap scale; a node at `(x, y)` maps to
	/// `x / content_width * minimap_width` with this width scaled the same way.
	pub minimap_node_width: f64,
	/// See `minimap_node_width`.
	pub minimap_node_height: f64,
	/// Minimap canvas size in screen pixels.
	pub minimap_width: f64,
	/// See `minimap_width`.
	pub minimap_height: f64,
	/// Breathing room added around the content box by fit-to-view.
	pub fit_padding: f64,
	/// Scale bounds applied by fit-to-view.
	pub fit_min_scale: f64,
	/// See `fit_min_scale`.
	pub fit_max_scale: f64,
	/// Scale bounds applied by zoom gestures.
	pub min_scale: f64,
	/// See `min_scale`.
	pub max_scale: f64,
	/// Multiplier per zoom-in tick; zoom-out divides by it.
	pub zoom_step: f64,
	/// Accent bar color for `NodeKind::Start`.
	pub start_color: String,
	/// Accent bar color for `NodeKind::Normal`.
	pub normal_color: String,
	/// Accent bar color for `NodeKind::End`.
	pub end_color: String,
}

impl Default for GraphCanvasConfig {
	fn default() -> Self {
		Self {
			column_width: 220.0,
			row_height: 140.0,
			padding_x: 80.0,
			padding_y: 80.0,
			extent_margin_x: 200.0,
			extent_margin_y: 160.0,
			min_content_width: 800.0,
			min_content_height: 600.0,
			node_width: 180.0,
			node_height: 80.0,
			minimap_node_width: 240.0,
			minimap_node_height: 80.0,
			minimap_width: 200.0,
			minimap_height: 140.0,
			fit_padding: 80.0,
			fit_min_scale: 0.2,
			fit_max_scale: 1.5,
			min_scale: 0.2,
			max_scale: 2.0,
			zoom_step: 1.1,
			start_color: "#22c55e".into(),
			normal_color: "#3b82f6".into(),
			end_color: "#ef4444".into(),
		}
	}
}

impl GraphCanvasConfig {
	/// Accent color for a node kind.
	pub fn kind_color(&self, kind: NodeKind) -> &str {
		match kind {
			NodeKind::Start => &self.start_color,
			NodeKind::Normal => &self.normal_color,
			NodeKind::End => &self.end_color,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn kinds_map_to_distinct_colors() {
		let config = GraphCanvasConfig::default();
		let colors = [
			config.kind_color(NodeKind::Start),
			config.kind_color(NodeKind::Normal),
			config.kind_color(NodeKind::End),
		];
		assert_ne!(colors[0], colors[1]);
		assert_ne!(colors[1], colors[2]);
		assert_ne!(colors[0], colors[2]);
	}

	#[test]
	fn minimap_nodes_are_wider_than_canvas_cards() {
		let config = GraphCanvasConfig::default();
		assert_eq!((config.node_width, config.node_height), (180.0, 80.0));
		assert_eq!(
			(config.minimap_node_width, config.minimap_node_height),
			(240.0, 80.0)
		);
		// Cards still fit their column; only the overview widens them.
		assert!(config.node_width < config.column_width);
	}

	#[test]
	fn zoom_range_contains_fit_range_floor() {
		let config = GraphCanvasConfig::default();
		assert!(config.min_scale <= config.fit_min_scale);
		assert!(config.fit_max_scale <= config.max_scale);
	}
}
