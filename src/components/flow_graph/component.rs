use std::cell::RefCell;
use std::rc::Rc;

use leptos::html::Canvas;
use leptos::prelude::*;
use log::{debug, warn};
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::config::GraphCanvasConfig;
use super::error::CanvasError;
use super::interaction::{GraphEvent, InteractionState};
use super::render;
use super::state::{CanvasState, resize_if_alive};
use super::types::{GraphEdge, GraphNode};
use super::viewport::ZoomDirection;

/// Pannable, zoomable flow graph with a minimap and two-click edge authoring.
#[component]
pub fn FlowGraphCanvas(
	/// Nodes to lay out. Layout reruns when the list changes.
	#[prop(into)]
	nodes: Signal<Vec<GraphNode>>,
	/// Edges between node keys. Edges naming unknown keys are not drawn.
	#[prop(into)]
	edges: Signal<Vec<GraphEdge>>,
	/// Canvas height in pixels; width follows the parent element.
	#[prop(default = 560.0)]
	height: f64,
	/// Called with the node key on double-click.
	#[prop(optional, into)]
	on_node_activated: Option<Callback<String>>,
	/// Called with `(from, to)` when connect mode completes an edge.
	#[prop(optional, into)]
	on_create_edge: Option<Callback<(String, String)>>,
	/// Layout, viewport and color tunables.
	#[prop(optional)]
	config: Option<GraphCanvasConfig>,
) -> impl IntoView {
	let config = config.unwrap_or_default();
	let (mini_w, mini_h) = (config.minimap_width, config.minimap_height);

	let canvas_ref = NodeRef::<Canvas>::new();
	let minimap_ref = NodeRef::<Canvas>::new();
	let state = Rc::new(RefCell::new(CanvasState::new(config, 0.0, height)));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let mode = RwSignal::new(InteractionState::Idle);
	let cursor = RwSignal::new("grab");

	let redraw = move |s: &CanvasState| {
		report(paint(
			s,
			canvas_ref.try_get_untracked().flatten(),
			minimap_ref.try_get_untracked().flatten(),
		));
	};

	let dispatch = move |event: GraphEvent| match event {
		GraphEvent::CreateEdge { from, to } => {
			debug!("flow graph: create edge {} -> {}", from, to);
			if let Some(cb) = on_create_edge {
				cb.run((from, to));
			}
		}
		GraphEvent::NodeActivated(key) => {
			debug!("flow graph: activate {}", key);
			if let Some(cb) = on_node_activated {
				cb.run(key);
			}
		}
	};

	// The window outlives this component; drop the listener with it.
	let resize_cleanup = SendWrapper::new(resize_cb.clone());
	on_cleanup(move || {
		if let (Some(cb), Ok(window)) = (resize_cleanup.borrow_mut().take(), browser_window()) {
			let _ =
				window.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			debug!("flow graph: resize listener removed");
		}
	});

	let (state_init, resize_cb_init) = (state.clone(), resize_cb.clone());
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (nodes, edges) = (nodes.get(), edges.get());

		if let Some(minimap) = minimap_ref.get() {
			minimap.set_width(mini_w as u32);
			minimap.set_height(mini_h as u32);
		}
		let width = measure_width(&canvas);
		canvas.set_width(width as u32);
		canvas.set_height(height as u32);

		{
			let mut s = state_init.borrow_mut();
			s.resize(width, height);
			s.set_graph(nodes, edges);
			redraw(&s);
		}

		if resize_cb_init.borrow().is_none() {
			let state_resize = Rc::downgrade(&state_init);
			let (canvas_resize, minimap_resize) = (canvas.clone(), minimap_ref.get_untracked());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let width = measure_width(&canvas_resize);
				let Some(state) = resize_if_alive(&state_resize, width, height) else {
					return;
				};
				canvas_resize.set_width(width as u32);
				report(paint(
					&state.borrow(),
					Some(canvas_resize.clone()),
					minimap_resize.clone(),
				));
			}));
			if let (Some(cb), Ok(window)) = (resize_cb_init.borrow().as_ref(), browser_window()) {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		let mut s = state_md.borrow_mut();
		s.pointer_down(x, y);
		cursor.set(s.cursor());
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		let mut s = state_mm.borrow_mut();
		if s.pointer_move(x, y) {
			redraw(&s);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		let mut s = state_mu.borrow_mut();
		s.pointer_up();
		cursor.set(s.cursor());
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		let mut s = state_ml.borrow_mut();
		s.pointer_up();
		cursor.set(s.cursor());
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		let Some(direction) = ZoomDirection::from_wheel_delta(ev.delta_y()) else {
			return;
		};
		ev.prevent_default();
		let mut s = state_wh.borrow_mut();
		s.zoom(direction);
		redraw(&s);
	};

	let state_click = state.clone();
	let on_click = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		let event = {
			let mut s = state_click.borrow_mut();
			let event = s.click(x, y);
			redraw(&s);
			mode.set(s.interaction_state().clone());
			cursor.set(s.cursor());
			event
		};
		if let Some(event) = event {
			dispatch(event);
		}
	};

	let state_dbl = state.clone();
	let on_dblclick = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		let event = state_dbl.borrow().double_click(x, y);
		if let Some(event) = event {
			dispatch(event);
		}
	};

	let state_toggle = state.clone();
	let on_toggle = move |_: MouseEvent| {
		let mut s = state_toggle.borrow_mut();
		s.toggle_connect();
		redraw(&s);
		mode.set(s.interaction_state().clone());
		cursor.set(s.cursor());
	};

	let state_fit = state.clone();
	let on_fit = move |_: MouseEvent| {
		let mut s = state_fit.borrow_mut();
		s.fit_to_view();
		redraw(&s);
	};

	let state_reset = state.clone();
	let on_reset = move |_: MouseEvent| {
		let mut s = state_reset.borrow_mut();
		s.reset_view();
		redraw(&s);
	};

	let state_zin = state.clone();
	let on_zoom_in = move |_: MouseEvent| {
		let mut s = state_zin.borrow_mut();
		s.zoom(ZoomDirection::In);
		redraw(&s);
	};

	let state_zout = state;
	let on_zoom_out = move |_: MouseEvent| {
		let mut s = state_zout.borrow_mut();
		s.zoom(ZoomDirection::Out);
		redraw(&s);
	};

	view! {
		<div class="flow-graph">
			<div class="flow-graph-toolbar">
				<button
					class=move || if mode.get().is_connecting() { "active" } else { "" }
					on:click=on_toggle
				>
					{move || if mode.get().is_connecting() { "Cancel connect" } else { "Connect" }}
				</button>
				<button on:click=on_fit>"Fit"</button>
				<button on:click=on_reset>"Reset"</button>
				<button on:click=on_zoom_in>"+"</button>
				<button on:click=on_zoom_out>"-"</button>
				<span class="flow-graph-hint">{move || hint(&mode.get())}</span>
			</div>
			<div
				class="flow-graph-surface"
				style=format!("position: relative; height: {}px;", height)
			>
				<canvas
					node_ref=canvas_ref
					class="flow-graph-canvas"
					on:mousedown=on_mousedown
					on:mousemove=on_mousemove
					on:mouseup=on_mouseup
					on:mouseleave=on_mouseleave
					on:wheel=on_wheel
					on:click=on_click
					on:dblclick=on_dblclick
					style=move || format!("display: block; cursor: {};", cursor.get())
				/>
				<canvas
					node_ref=minimap_ref
					class="flow-graph-minimap"
					style="position: absolute; right: 12px; bottom: 12px; pointer-events: none;"
				/>
			</div>
		</div>
	}
}

fn hint(state: &InteractionState) -> String {
	match state {
		InteractionState::Idle => {
			"Drag to pan. Scroll to zoom. Double-click a node to open it.".into()
		}
		InteractionState::Connecting(None) => "Click the source node.".into(),
		InteractionState::Connecting(Some(source)) => format!(
			"Source: {}. Click the target node, or {} again to deselect.",
			source, source
		),
	}
}

fn report(result: Result<(), CanvasError>) {
	if let Err(err) = result {
		warn!("flow graph: {}", err);
	}
}

fn paint(
	state: &CanvasState,
	canvas: Option<HtmlCanvasElement>,
	minimap: Option<HtmlCanvasElement>,
) -> Result<(), CanvasError> {
	let ctx = context_2d(canvas, "main")?;
	render::paint_scene(
		state.scene(),
		&state.viewport.state(),
		state.width,
		state.height,
		&ctx,
	);
	let mini = context_2d(minimap, "minimap")?;
	render::paint_minimap(&state.minimap(), &mini);
	Ok(())
}

fn context_2d(
	canvas: Option<HtmlCanvasElement>,
	name: &'static str,
) -> Result<CanvasRenderingContext2d, CanvasError> {
	canvas
		.ok_or(CanvasError::NotMounted(name))?
		.get_context("2d")
		.map_err(|_| CanvasError::NoContext(name))?
		.ok_or(CanvasError::NoContext(name))?
		.dyn_into::<CanvasRenderingContext2d>()
		.map_err(|_| CanvasError::ContextType(name))
}

fn browser_window() -> Result<Window, CanvasError> {
	web_sys::window().ok_or(CanvasError::NoWindow)
}

fn measure_width(canvas: &HtmlCanvasElement) -> f64 {
	canvas
		.parent_element()
		.map(|p| p.client_width() as f64)
		.unwrap_or(0.0)
}

fn local_point(canvas_ref: NodeRef<Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas = canvas_ref.try_get_untracked().flatten()?;
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}
