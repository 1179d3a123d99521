//! Canvas plumbing shared by every visualization component.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::ev;
use leptos::prelude::{on_cleanup, request_animation_frame, window_event_listener};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use crate::error::{Result, VizError};

pub fn window() -> Result<Window> {
	web_sys::window().ok_or_else(|| VizError::MissingElement("window".into()))
}

pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d> {
	canvas
		.get_context("2d")
		.map_err(|e| VizError::Canvas(format!("{:?}", e)))?
		.ok_or_else(|| VizError::Canvas("2d context unavailable".into()))?
		.dyn_into()
		.map_err(|_| VizError::Canvas("context is not 2d".into()))
}

/// Width of the element wrapping the canvas, or `fallback` when detached.
pub fn parent_width(canvas: &HtmlCanvasElement, fallback: f64) -> f64 {
	canvas
		.parent_element()
		.map(|p| p.client_width() as f64)
		.filter(|w| *w > 0.0)
		.unwrap_or(fallback)
}

/// Pointer position relative to the canvas' top-left corner.
pub fn pointer(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// Runs `frame` on every animation frame until the owning component is
/// cleaned up. Each frame is a one-shot callback, so nothing outlives the
/// component once the chain stops.
pub fn start_animation(frame: impl FnMut() + 'static) {
	let alive = Arc::new(AtomicBool::new(true));
	schedule_frame(alive.clone(), frame);
	on_cleanup(move || alive.store(false, Ordering::Relaxed));
}

fn schedule_frame<F: FnMut() + 'static>(alive: Arc<AtomicBool>, mut frame: F) {
	request_animation_frame(move || {
		if !alive.load(Ordering::Relaxed) {
			return;
		}
		frame();
		schedule_frame(alive, frame);
	});
}

/// Calls `callback` on window resizes while the owning component is mounted.
pub fn on_resize(callback: impl Fn() + 'static) {
	let handle = window_event_listener(ev::resize, move |_| callback());
	on_cleanup(move || handle.remove());
}
