use log::debug;

use super::config::GraphCanvasConfig;
use super::layout::Layout;
use super::types::{Position, Rect};

/// Scale and translation mapping content space onto the canvas:
/// `screen = content * scale + translate`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportState {
	/// Zoom factor.
	pub scale: f64,
	/// Horizontal screen offset of the content origin.
	pub translate_x: f64,
	/// Vertical screen offset of the content origin.
	pub translate_y: f64,
}

impl Default for ViewportState {
	fn default() -> Self {
		Self {
			scale: 1.0,
			translate_x: 0.0,
			translate_y: 0.0,
		}
	}
}

impl ViewportState {
	/// Content point to screen point.
	pub fn to_screen(&self, x: f64, y: f64) -> (f64, f64) {
		(
			x * self.scale + self.translate_x,
			y * self.scale + self.translate_y,
		)
	}

	/// Screen point to content point.
	pub fn to_content(&self, sx: f64, sy: f64) -> Position {
		Position::new(
			(sx - self.translate_x) / self.scale,
			(sy - self.translate_y) / self.scale,
		)
	}

	/// The part of content space visible through a `width` x `height` canvas.
	pub fn visible_rect(&self, width: f64, height: f64) -> Rect {
		let origin = self.to_content(0.0, 0.0);
		Rect::new(
			origin.x,
			origin.y,
			measured(width) / self.scale,
			measured(height) / self.scale,
		)
	}
}

/// Wheel or button zoom step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomDirection {
	/// Multiply scale by the zoom step.
	In,
	/// Divide scale by the zoom step.
	Out,
}

impl ZoomDirection {
	/// Direction for a wheel event's vertical delta; scrolling down zooms out.
	/// A zero or non-finite delta (e.g. a purely horizontal scroll) is no zoom.
	pub fn from_wheel_delta(delta_y: f64) -> Option<Self> {
		if !delta_y.is_finite() || delta_y == 0.0 {
			None
		} else if delta_y > 0.0 {
			Some(ZoomDirection::Out)
		} else {
			Some(ZoomDirection::In)
		}
	}
}

/// Owns the `ViewportState` of one canvas and applies pan, zoom and fit.
#[derive(Clone, Debug)]
pub struct ViewportController {
	state: ViewportState,
	min_scale: f64,
	max_scale: f64,
	zoom_step: f64,
	fit_padding: f64,
	fit_min_scale: f64,
	fit_max_scale: f64,
}

impl ViewportController {
	/// Identity transform with limits taken from `config`.
	pub fn new(config: &GraphCanvasConfig) -> Self {
		Self {
			state: ViewportState::default(),
			min_scale: config.min_scale,
			max_scale: config.max_scale,
			zoom_step: config.zoom_step,
			fit_padding: config.fit_padding,
			fit_min_scale: config.fit_min_scale,
			fit_max_scale: config.fit_max_scale,
		}
	}

	/// Current transform.
	pub fn state(&self) -> ViewportState {
		self.state
	}

	/// Shift by a screen-space delta.
	pub fn pan(&mut self, dx: f64, dy: f64) {
		self.state.translate_x += dx;
		self.state.translate_y += dy;
	}

	/// One zoom step anchored at the content origin; translation is left alone.
	pub fn zoom(&mut self, direction: ZoomDirection) {
		let factor = match direction {
			ZoomDirection::In => self.zoom_step,
			ZoomDirection::Out => 1.0 / self.zoom_step,
		};
		self.state.scale = (self.state.scale * factor).clamp(self.min_scale, self.max_scale);
	}

	/// Scale the content box to fit the viewport with padding and center it.
	pub fn fit_to_view(&mut self, layout: &Layout, viewport_width: f64, viewport_height: f64) {
		let (vw, vh) = (measured(viewport_width), measured(viewport_height));
		let (cw, ch) = (measured(layout.content_width), measured(layout.content_height));

		let scale = (vw / (cw + self.fit_padding))
			.min(vh / (ch + self.fit_padding))
			.clamp(self.fit_min_scale, self.fit_max_scale);

		self.state = ViewportState {
			scale,
			translate_x: (vw - cw * scale) / 2.0,
			translate_y: (vh - ch * scale) / 2.0,
		};
		debug!(
			"viewport: fit {}x{} content into {}x{} at scale {:.3}",
			cw, ch, vw, vh, scale
		);
	}

	/// Back to scale 1 at the origin.
	pub fn reset(&mut self) {
		self.state = ViewportState::default();
	}
}

/// Measurements that are missing, zero or not finite count as 1.
pub(crate) fn measured(value: f64) -> f64 {
	if value.is_finite() && value > 0.0 {
		value
	} else {
		1.0
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn controller() -> ViewportController {
		ViewportController::new(&GraphCanvasConfig::default())
	}

	fn layout(width: f64, height: f64) -> Layout {
		Layout {
			content_width: width,
			content_height: height,
			..Layout::default()
		}
	}

	#[test]
	fn zoom_in_never_exceeds_max() {
		let mut vp = controller();
		for _ in 0..100 {
			vp.zoom(ZoomDirection::In);
			assert!(vp.state().scale <= 2.0);
		}
		assert_eq!(vp.state().scale, 2.0);
	}

	#[test]
	fn zoom_out_never_drops_below_min() {
		let mut vp = controller();
		for _ in 0..100 {
			vp.zoom(ZoomDirection::Out);
			assert!(vp.state().scale >= 0.2);
		}
		assert_eq!(vp.state().scale, 0.2);
	}

	#[test]
	fn zoom_is_anchored_at_origin() {
		let mut vp = controller();
		vp.pan(30.0, -12.0);
		vp.zoom(ZoomDirection::In);
		let state = vp.state();
		assert!((state.scale - 1.1).abs() < 1e-12);
		assert_eq!((state.translate_x, state.translate_y), (30.0, -12.0));
	}

	#[test]
	fn pan_adds_screen_deltas() {
		let mut vp = controller();
		vp.zoom(ZoomDirection::In);
		vp.pan(10.0, 5.0);
		vp.pan(-4.0, 1.0);
		assert_eq!((vp.state().translate_x, vp.state().translate_y), (6.0, 6.0));
	}

	#[test]
	fn fit_centers_content() {
		let mut vp = controller();
		let content = layout(1200.0, 700.0);
		vp.fit_to_view(&content, 900.0, 560.0);
		let state = vp.state();

		let expected = (900.0_f64 / 1280.0).min(560.0 / 780.0);
		assert!((state.scale - expected).abs() < 1e-12);

		let (left, top) = state.to_screen(0.0, 0.0);
		let (right, bottom) = state.to_screen(1200.0, 700.0);
		assert!(((left + right) / 2.0 - 450.0).abs() <= 1.0);
		assert!(((top + bottom) / 2.0 - 280.0).abs() <= 1.0);
	}

	#[test]
	fn fit_caps_scale_for_small_content() {
		let mut vp = controller();
		vp.fit_to_view(&layout(800.0, 600.0), 4000.0, 3000.0);
		assert_eq!(vp.state().scale, 1.5);
	}

	#[test]
	fn fit_survives_unmeasured_viewport() {
		let mut vp = controller();
		vp.fit_to_view(&layout(800.0, 600.0), f64::NAN, 0.0);
		let state = vp.state();
		assert_eq!(state.scale, 0.2);
		assert!(state.translate_x.is_finite() && state.translate_y.is_finite());
	}

	#[test]
	fn reset_restores_identity() {
		let mut vp = controller();
		vp.pan(50.0, 50.0);
		vp.zoom(ZoomDirection::Out);
		vp.reset();
		assert_eq!(vp.state(), ViewportState::default());
	}

	#[test]
	fn to_content_inverts_to_screen() {
		let state = ViewportState {
			scale: 0.5,
			translate_x: 40.0,
			translate_y: -20.0,
		};
		let (sx, sy) = state.to_screen(300.0, 220.0);
		assert_eq!(state.to_content(sx, sy), Position::new(300.0, 220.0));
	}

	#[test]
	fn wheel_down_zooms_out() {
		assert_eq!(ZoomDirection::from_wheel_delta(120.0), Some(ZoomDirection::Out));
		assert_eq!(ZoomDirection::from_wheel_delta(-3.0), Some(ZoomDirection::In));
	}

	#[test]
	fn horizontal_scroll_does_not_zoom() {
		assert_eq!(ZoomDirection::from_wheel_delta(0.0), None);
		assert_eq!(ZoomDirection::from_wheel_delta(-0.0), None);
		assert_eq!(ZoomDirection::from_wheel_delta(f64::NAN), None);
	}
}
