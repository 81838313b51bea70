use leptos::prelude::*;
use log::info;

use crate::components::flow_graph::{FlowGraphCanvas, GraphData, GraphEdge, GraphNode, NodeKind};

/// A small checkout navigation flow used when the page ships no graph data.
fn sample_flow() -> GraphData {
	let nodes = vec![
		GraphNode::new("home", "Home").with_kind(NodeKind::Start),
		GraphNode::new("search", "Search results"),
		GraphNode::new("catalog", "Catalog"),
		GraphNode::new("product", "Product detail"),
		GraphNode::new("cart", "Cart"),
		GraphNode::new("checkout", "Checkout"),
		GraphNode::new("confirmation", "Order confirmed").with_kind(NodeKind::End),
		GraphNode::new("help", "Help center"),
	];
	let edges = vec![
		GraphEdge::new("home", "search").with_label("query"),
		GraphEdge::new("home", "catalog"),
		GraphEdge::new("search", "product"),
		GraphEdge::new("catalog", "product"),
		GraphEdge::new("product", "cart").with_label("add"),
		GraphEdge::new("cart", "checkout"),
		GraphEdge::new("checkout", "confirmation").with_label("pay"),
		GraphEdge::new("checkout", "payments"),
	];
	GraphData { nodes, edges }
}

/// Default Home Page
#[component]
pub fn Home(
	/// Graph loaded by the host page, if any.
	initial: Option<GraphData>,
) -> impl IntoView {
	let GraphData { nodes, edges } = initial.unwrap_or_else(sample_flow);
	let nodes = RwSignal::new(nodes);
	let edges = RwSignal::new(edges);
	let activated = RwSignal::new(Option::<String>::None);

	let on_create_edge = Callback::new(move |(from, to): (String, String)| {
		info!("home: persisting edge {} -> {}", from, to);
		edges.update(|edges| edges.push(GraphEdge::new(from, to)));
	});
	let on_node_activated = Callback::new(move |key: String| {
		info!("home: opening node {}", key);
		activated.set(Some(key));
	});

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="flow-page">
				<div class="flow-header">
					<h1>"Navigation Flow"</h1>
					<p class="subtitle">
						"Drag to pan. Scroll to zoom. Use Connect, then click two nodes to add an edge."
					</p>
					<p class="flow-stats">
						{move || format!("{} nodes, {} edges", nodes.with(Vec::len), edges.with(Vec::len))}
					</p>
					<p class="flow-activated">
						{move || match activated.get() {
							Some(key) => format!("Opened: {}", key),
							None => "Double-click a node to open it.".to_string(),
						}}
					</p>
				</div>
				<FlowGraphCanvas
					nodes=nodes
					edges=edges
					on_create_edge=on_create_edge
					on_node_activated=on_node_activated
				/>
			</div>
		</ErrorBoundary>
	}
}
