//! Per-canvas mutable state shared by the event handlers of one component instance.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::debug;

use super::config::GraphCanvasConfig;
use super::interaction::{GraphEvent, InteractionState, InteractionStateMachine};
use super::layout::{Layout, LayoutCache};
use super::scene::{Minimap, Scene, build_minimap, build_scene};
use super::types::{GraphEdge, GraphNode};
use super::viewport::{ViewportController, ZoomDirection};

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub last_x: f64,
	pub last_y: f64,
}

/// Layout memo, viewport, interaction and drag tracking for one canvas.
pub struct CanvasState {
	pub config: GraphCanvasConfig,
	pub viewport: ViewportController,
	pub interaction: InteractionStateMachine,
	pub pan: PanState,
	pub width: f64,
	pub height: f64,
	nodes: Vec<GraphNode>,
	edges: Vec<GraphEdge>,
	cache: LayoutCache,
	scene: Scene,
	fitted_counts: Option<(usize, usize)>,
}

impl CanvasState {
	pub fn new(config: GraphCanvasConfig, width: f64, height: f64) -> Self {
		Self {
			viewport: ViewportController::new(&config),
			interaction: InteractionStateMachine::new(),
			pan: PanState::default(),
			width,
			height,
			nodes: Vec::new(),
			edges: Vec::new(),
			cache: LayoutCache::new(),
			scene: Scene::default(),
			fitted_counts: None,
			config,
		}
	}

	/// Take a new node/edge list. Layout is reused when the lists are unchanged;
	/// fit-to-view reruns when either count changed since the last fit.
	pub fn set_graph(&mut self, nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) {
		self.nodes = nodes;
		self.edges = edges;
		self.cache
			.get_or_compute(&self.nodes, &self.edges, &self.config);

		let counts = (self.nodes.len(), self.edges.len());
		if self.fitted_counts != Some(counts) && self.is_measured() {
			self.fit_to_view();
		}
		self.rebuild_scene();
	}

	pub fn layout(&self) -> Option<&Layout> {
		self.cache.current()
	}

	pub fn scene(&self) -> &Scene {
		&self.scene
	}

	pub fn minimap(&self) -> Minimap {
		match self.cache.current() {
			Some(layout) => build_minimap(
				layout,
				&self.nodes,
				&self.viewport.state(),
				self.width,
				self.height,
				&self.config,
			),
			None => Minimap {
				width: self.config.minimap_width,
				height: self.config.minimap_height,
				..Minimap::default()
			},
		}
	}

	pub fn interaction_state(&self) -> &InteractionState {
		self.interaction.state()
	}

	/// Record the measured canvas size. The first valid measurement runs the
	/// fit-to-view deferred by `set_graph`.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		let counts = (self.nodes.len(), self.edges.len());
		if self.fitted_counts != Some(counts) && self.is_measured() {
			self.fit_to_view();
		}
	}

	pub fn fit_to_view(&mut self) {
		if let Some(layout) = self.cache.current() {
			self.viewport.fit_to_view(layout, self.width, self.height);
			self.fitted_counts = Some((self.nodes.len(), self.edges.len()));
		}
	}

	pub fn reset_view(&mut self) {
		self.viewport.reset();
	}

	pub fn zoom(&mut self, direction: ZoomDirection) {
		self.viewport.zoom(direction);
	}

	pub fn toggle_connect(&mut self) {
		self.interaction.toggle_connect();
		self.pan.active = false;
		self.rebuild_scene();
	}

	/// Start a pan drag. Ignored in connect mode so node clicks are never eaten.
	pub fn pointer_down(&mut self, x: f64, y: f64) {
		if self.interaction.state().is_connecting() {
			return;
		}
		self.pan = PanState {
			active: true,
			last_x: x,
			last_y: y,
		};
	}

	/// Returns true when the view moved.
	pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
		if !self.pan.active || self.interaction.state().is_connecting() {
			return false;
		}
		self.viewport
			.pan(x - self.pan.last_x, y - self.pan.last_y);
		self.pan.last_x = x;
		self.pan.last_y = y;
		true
	}

	pub fn pointer_up(&mut self) {
		self.pan.active = false;
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<&str> {
		let at = self.viewport.state().to_content(sx, sy);
		self.scene.node_at(at.x, at.y)
	}

	pub fn click(&mut self, sx: f64, sy: f64) -> Option<GraphEvent> {
		let key = self.node_at_position(sx, sy)?.to_owned();
		let event = self.interaction.click_node(&key);
		self.rebuild_scene();
		event
	}

	pub fn double_click(&self, sx: f64, sy: f64) -> Option<GraphEvent> {
		let key = self.node_at_position(sx, sy)?;
		Some(self.interaction.double_click_node(key))
	}

	pub fn cursor(&self) -> &'static str {
		if self.interaction.state().is_connecting() {
			"crosshair"
		} else if self.pan.active {
			"grabbing"
		} else {
			"grab"
		}
	}

	fn is_measured(&self) -> bool {
		self.width.is_finite() && self.width > 0.0 && self.height.is_finite() && self.height > 0.0
	}

	fn rebuild_scene(&mut self) {
		self.scene = match self.cache.current() {
			Some(layout) => build_scene(
				layout,
				&self.nodes,
				&self.edges,
				self.interaction.state(),
				&self.config,
			),
			None => Scene::default(),
		};
		debug!(
			"scene: {} nodes, {} edges drawn",
			self.scene.nodes.len(),
			self.scene.edges.len()
		);
	}
}

/// Resize through a weak handle so window listeners never keep an unmounted
/// canvas alive. Returns the state while it still exists.
pub fn resize_if_alive(
	state: &Weak<RefCell<CanvasState>>,
	width: f64,
	height: f64,
) -> Option<Rc<RefCell<CanvasState>>> {
	let state = state.upgrade()?;
	state.borrow_mut().resize(width, height);
	Some(state)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::flow_graph::types::NodeKind;

	fn graph() -> (Vec<GraphNode>, Vec<GraphEdge>) {
		(
			vec![
				GraphNode::new("start", "Start").with_kind(NodeKind::Start),
				GraphNode::new("a", "A"),
				GraphNode::new("b", "B"),
			],
			vec![GraphEdge::new("start", "a"), GraphEdge::new("start", "b")],
		)
	}

	fn state() -> CanvasState {
		let mut state = CanvasState::new(GraphCanvasConfig::default(), 800.0, 560.0);
		let (nodes, edges) = graph();
		state.set_graph(nodes, edges);
		state.reset_view();
		state
	}

	#[test]
	fn drag_pans_while_idle() {
		let mut s = state();
		s.pointer_down(10.0, 10.0);
		assert!(s.pointer_move(25.0, 30.0));
		assert!(s.pointer_move(30.0, 30.0));
		s.pointer_up();
		assert!(!s.pointer_move(90.0, 90.0));
		let vp = s.viewport.state();
		assert_eq!((vp.translate_x, vp.translate_y), (20.0, 20.0));
	}

	#[test]
	fn drag_is_disabled_in_connect_mode() {
		let mut s = state();
		s.toggle_connect();
		s.pointer_down(10.0, 10.0);
		assert!(!s.pointer_move(50.0, 50.0));
		assert_eq!(s.viewport.state().translate_x, 0.0);
		assert_eq!(s.cursor(), "crosshair");
	}

	#[test]
	fn entering_connect_mode_cancels_a_drag() {
		let mut s = state();
		s.pointer_down(0.0, 0.0);
		s.toggle_connect();
		assert!(!s.pan.active);
	}

	#[test]
	fn clicks_hit_nodes_through_the_transform() {
		let mut s = state();
		s.viewport.pan(100.0, 0.0);
		// Card "a" spans content x 80..260, y 220..300; screen x is shifted by 100.
		assert_eq!(s.node_at_position(200.0, 250.0), Some("a"));
		assert_eq!(s.node_at_position(90.0, 250.0), None);
	}

	#[test]
	fn two_clicks_create_an_edge() {
		let mut s = state();
		s.toggle_connect();
		assert_eq!(s.click(100.0, 100.0), None);
		assert_eq!(s.interaction_state().source(), Some("start"));
		assert!(!s.scene().nodes[0].highlighted);
		assert_eq!(
			s.click(310.0, 230.0),
			Some(GraphEvent::CreateEdge {
				from: "start".into(),
				to: "b".into(),
			})
		);
		assert_eq!(s.interaction_state(), &InteractionState::Idle);
	}

	#[test]
	fn empty_space_clicks_are_ignored() {
		let mut s = state();
		s.toggle_connect();
		assert_eq!(s.click(5.0, 5.0), None);
		assert_eq!(s.interaction_state(), &InteractionState::Connecting(None));
	}

	#[test]
	fn double_click_activates_in_any_mode() {
		let s = state();
		assert_eq!(
			s.double_click(100.0, 100.0),
			Some(GraphEvent::NodeActivated("start".into()))
		);
	}

	#[test]
	fn fit_runs_only_when_counts_change() {
		let mut s = CanvasState::new(GraphCanvasConfig::default(), 800.0, 560.0);
		let (nodes, edges) = graph();
		s.set_graph(nodes.clone(), edges.clone());
		let fitted = s.viewport.state();
		assert!(fitted.scale < 1.0);

		s.viewport.pan(40.0, 0.0);
		let mut renamed = nodes.clone();
		renamed[1].title = "Renamed".into();
		s.set_graph(renamed, edges.clone());
		assert_eq!(s.viewport.state().translate_x, fitted.translate_x + 40.0);

		let mut more = edges;
		more.push(GraphEdge::new("a", "b"));
		s.set_graph(nodes, more);
		assert_ne!(s.viewport.state().translate_x, fitted.translate_x + 40.0);
	}

	#[test]
	fn fit_waits_for_a_measured_canvas() {
		let mut s = CanvasState::new(GraphCanvasConfig::default(), 0.0, 560.0);
		let (nodes, edges) = graph();
		s.set_graph(nodes, edges);
		assert_eq!(s.viewport.state().scale, 1.0);

		s.resize(800.0, 560.0);
		assert!(s.viewport.state().scale < 1.0);
	}

	#[test]
	fn resize_reaches_a_live_canvas() {
		let shared = Rc::new(RefCell::new(CanvasState::new(
			GraphCanvasConfig::default(),
			0.0,
			560.0,
		)));
		let weak = Rc::downgrade(&shared);
		let alive = resize_if_alive(&weak, 1024.0, 560.0);
		assert!(alive.is_some());
		assert_eq!(shared.borrow().width, 1024.0);
	}

	#[test]
	fn resize_after_unmount_is_a_no_op() {
		let shared = Rc::new(RefCell::new(CanvasState::new(
			GraphCanvasConfig::default(),
			800.0,
			560.0,
		)));
		let weak = Rc::downgrade(&shared);
		drop(shared);
		assert!(resize_if_alive(&weak, 1024.0, 560.0).is_none());
		assert_eq!(weak.strong_count(), 0);
	}

	#[test]
	fn minimap_without_graph_is_an_empty_frame() {
		let s = CanvasState::new(GraphCanvasConfig::default(), 800.0, 560.0);
		let minimap = s.minimap();
		assert!(minimap.nodes.is_empty());
		assert_eq!((minimap.width, minimap.height), (200.0, 140.0));
	}
}
