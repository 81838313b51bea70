use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::scene::{EdgePath, Minimap, NodeBox, Scene};
use super::types::Rect;
use super::viewport::ViewportState;

const BACKGROUND: &str = "#f8fafc";
const CARD_FILL: &str = "#ffffff";
const CARD_BORDER: &str = "#cbd5e1";
const TARGET_FILL: &str = "#eff6ff";
const TARGET_BORDER: &str = "#3b82f6";
const SOURCE_BORDER: &str = "#f59e0b";
const EDGE_COLOR: &str = "#64748b";
const TEXT_MUTED: &str = "#64748b";
const TEXT_STRONG: &str = "#0f172a";
const CORNER_RADIUS: f64 = 8.0;
const ACCENT_WIDTH: f64 = 6.0;
const ARROW_SIZE: f64 = 7.0;

pub fn paint_scene(
	scene: &Scene,
	viewport: &ViewportState,
	width: f64,
	height: f64,
	ctx: &CanvasRenderingContext2d,
) {
	let _ = ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, width, height);
	ctx.save();
	let _ = ctx.translate(viewport.translate_x, viewport.translate_y);
	let _ = ctx.scale(viewport.scale, viewport.scale);
	for edge in &scene.edges {
		draw_edge(edge, ctx);
	}
	for node in &scene.nodes {
		draw_node(node, ctx);
	}
	ctx.restore();
}

fn draw_edge(edge: &EdgePath, ctx: &CanvasRenderingContext2d) {
	let [start, bend_a, bend_b, end] = edge.points;
	ctx.set_stroke_style_str(EDGE_COLOR);
	ctx.set_line_width(1.5);
	ctx.begin_path();
	ctx.move_to(start.0, start.1);
	ctx.line_to(bend_a.0, bend_a.1);
	ctx.line_to(bend_b.0, bend_b.1);
	ctx.line_to(end.0, end.1 - ARROW_SIZE);
	ctx.stroke();

	// Arrowhead pointing down into the target card.
	ctx.set_fill_style_str(EDGE_COLOR);
	ctx.begin_path();
	ctx.move_to(end.0, end.1);
	ctx.line_to(end.0 - ARROW_SIZE * 0.6, end.1 - ARROW_SIZE);
	ctx.line_to(end.0 + ARROW_SIZE * 0.6, end.1 - ARROW_SIZE);
	ctx.close_path();
	ctx.fill();

	if let Some(label) = &edge.label {
		ctx.set_fill_style_str(TEXT_MUTED);
		ctx.set_font("11px sans-serif");
		ctx.set_text_align("center");
		let _ = ctx.fill_text(label, edge.label_at.0, edge.label_at.1);
	}
}

fn draw_node(node: &NodeBox, ctx: &CanvasRenderingContext2d) {
	let r = node.rect;
	let (fill, border, line_width) = if node.selected {
		(CARD_FILL, SOURCE_BORDER, 2.5)
	} else if node.highlighted {
		(TARGET_FILL, TARGET_BORDER, 2.0)
	} else {
		(CARD_FILL, CARD_BORDER, 1.0)
	};

	rounded_rect(ctx, r, CORNER_RADIUS);
	ctx.set_fill_style_str(fill);
	ctx.fill();
	if node.highlighted {
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(6.0),
			&JsValue::from_f64(4.0),
		));
	}
	ctx.set_stroke_style_str(border);
	ctx.set_line_width(line_width);
	ctx.stroke();
	let _ = ctx.set_line_dash(&js_sys::Array::new());

	// Accent bar, clipped to the card's rounded corners.
	ctx.save();
	rounded_rect(ctx, r, CORNER_RADIUS);
	ctx.clip();
	ctx.set_fill_style_str(&node.accent);
	ctx.fill_rect(r.x, r.y, ACCENT_WIDTH, r.height);
	ctx.restore();

	let text_x = r.x + ACCENT_WIDTH + 10.0;
	ctx.set_text_align("left");
	ctx.set_fill_style_str(TEXT_MUTED);
	ctx.set_font("11px monospace");
	let _ = ctx.fill_text(&node.key, text_x, r.y + 20.0);
	ctx.set_fill_style_str(TEXT_STRONG);
	ctx.set_font("bold 14px sans-serif");
	let _ = ctx.fill_text_with_max_width(&node.title, text_x, r.y + 42.0, r.width - ACCENT_WIDTH - 20.0);
	ctx.set_fill_style_str(&node.accent);
	ctx.set_font("11px sans-serif");
	let _ = ctx.fill_text(node.kind.as_str(), text_x, r.y + 64.0);
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, r: Rect, radius: f64) {
	let radius = radius.min(r.width / 2.0).min(r.height / 2.0);
	let (right, bottom) = (r.x + r.width, r.y + r.height);
	ctx.begin_path();
	ctx.move_to(r.x + radius, r.y);
	let _ = ctx.arc_to(right, r.y, right, bottom, radius);
	let _ = ctx.arc_to(right, bottom, r.x, bottom, radius);
	let _ = ctx.arc_to(r.x, bottom, r.x, r.y, radius);
	let _ = ctx.arc_to(r.x, r.y, right, r.y, radius);
	ctx.close_path();
}

pub fn paint_minimap(minimap: &Minimap, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#ffffff");
	ctx.fill_rect(0.0, 0.0, minimap.width, minimap.height);
	ctx.set_stroke_style_str(CARD_BORDER);
	ctx.set_line_width(1.0);
	ctx.stroke_rect(0.5, 0.5, minimap.width - 1.0, minimap.height - 1.0);

	for (rect, color) in &minimap.nodes {
		ctx.set_fill_style_str(color);
		ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);
	}

	let w = minimap.window;
	ctx.set_fill_style_str("rgba(59, 130, 246, 0.08)");
	ctx.fill_rect(w.x, w.y, w.width, w.height);
	ctx.set_stroke_style_str(TARGET_BORDER);
	ctx.set_line_width(1.5);
	ctx.stroke_rect(w.x, w.y, w.width, w.height);
}
