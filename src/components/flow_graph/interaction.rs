//! Connect mode and the two-click edge authoring sequence.

use log::debug;

/// Interaction mode of a canvas.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum InteractionState {
	/// Clicks do nothing; drags pan.
	#[default]
	Idle,
	/// Clicks pick an edge source, then a target.
	Connecting(Option<String>),
}

impl InteractionState {
	/// Whether connect mode is on.
	pub fn is_connecting(&self) -> bool {
		matches!(self, InteractionState::Connecting(_))
	}

	/// The chosen edge source, if any.
	pub fn source(&self) -> Option<&str> {
		match self {
			InteractionState::Connecting(Some(key)) => Some(key.as_str()),
			_ => None,
		}
	}

	/// Whether a click on `key` would do something in this state.
	pub fn is_click_target(&self, key: &str) -> bool {
		match self {
			InteractionState::Idle => false,
			InteractionState::Connecting(None) => true,
			InteractionState::Connecting(Some(source)) => source != key,
		}
	}
}

/// Message sent from the canvas to the host application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GraphEvent {
	/// The operator completed a connection.
	CreateEdge {
		/// Source node key.
		from: String,
		/// Target node key.
		to: String,
	},
	/// The operator double-clicked a node.
	NodeActivated(String),
}

/// Owns the `InteractionState` of one canvas.
#[derive(Clone, Debug, Default)]
pub struct InteractionStateMachine {
	state: InteractionState,
}

impl InteractionStateMachine {
	/// Starts `Idle`.
	pub fn new() -> Self {
		Self::default()
	}

	/// Current state.
	pub fn state(&self) -> &InteractionState {
		&self.state
	}

	/// Flip connect mode. Leaving it drops any chosen source.
	pub fn toggle_connect(&mut self) {
		self.state = match self.state {
			InteractionState::Idle => InteractionState::Connecting(None),
			InteractionState::Connecting(_) => InteractionState::Idle,
		};
		debug!("interaction: {:?}", self.state);
	}

	/// Single click on a node. Returns the edge to create once both ends are picked.
	pub fn click_node(&mut self, key: &str) -> Option<GraphEvent> {
		let next = match &self.state {
			InteractionState::Idle => return None,
			InteractionState::Connecting(None) => InteractionState::Connecting(Some(key.to_owned())),
			InteractionState::Connecting(Some(source)) if source == key => {
				InteractionState::Connecting(None)
			}
			InteractionState::Connecting(Some(source)) => {
				let event = GraphEvent::CreateEdge {
					from: source.clone(),
					to: key.to_owned(),
				};
				debug!("interaction: emit {:?}", event);
				self.state = InteractionState::Idle;
				return Some(event);
			}
		};
		debug!("interaction: {:?}", next);
		self.state = next;
		None
	}

	/// Double click on a node; available in every mode and never changes state.
	pub fn double_click_node(&self, key: &str) -> GraphEvent {
		GraphEvent::NodeActivated(key.to_owned())
	}
}
