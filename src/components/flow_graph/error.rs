use thiserror::Error;

/// DOM plumbing failures. None of them are fatal: the canvas logs and skips the frame.
#[derive(Debug, Error)]
pub enum CanvasError {
	/// The `<canvas>` element is not mounted yet.
	#[error("{0} canvas is not mounted")]
	NotMounted(&'static str),
	/// `getContext("2d")` threw or returned null.
	#[error("2d context unavailable on {0} canvas")]
	NoContext(&'static str),
	/// The returned context was not a `CanvasRenderingContext2d`.
	#[error("2d context on {0} canvas has an unexpected type")]
	ContextType(&'static str),
	/// `window` is not available.
	#[error("no global window")]
	NoWindow,
}
