//! Layered flow graph canvas: layout, viewport, interaction and drawing.

mod component;
pub mod config;
pub mod error;
pub mod interaction;
pub mod layout;
mod render;
pub mod scene;
mod state;
pub mod types;
pub mod viewport;

pub use component::FlowGraphCanvas;
pub use config::GraphCanvasConfig;
pub use error::CanvasError;
pub use interaction::{GraphEvent, InteractionState, InteractionStateMachine};
pub use layout::{Layout, LayoutCache, assign_levels, compute_layout};
pub use scene::{EdgePath, Minimap, NodeBox, Scene, build_minimap, build_scene};
pub use types::{GraphData, GraphEdge, GraphNode, NodeKind, Position, Rect};
pub use viewport::{ViewportController, ViewportState, ZoomDirection};
