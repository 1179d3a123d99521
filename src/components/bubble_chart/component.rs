use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{error, info};
use web_sys::{HtmlCanvasElement, MouseEvent};

use super::render;
use super::state::BubbleState;
use crate::components::canvas;
use crate::config::BubbleConfig;
use crate::payload::BubblePayload;

const FALLBACK_WIDTH: f64 = 960.0;

/// Circle-packed bubbles sized to the width of `container_id`.
#[component]
pub fn BubbleChartCanvas(
	#[prop(into)] data: Signal<BubblePayload>,
	config: BubbleConfig,
	#[prop(into)] container_id: String,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<BubbleState>>> = Rc::new(RefCell::new(None));
	let state_init = state.clone();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let ctx = match canvas::context_2d(&canvas) {
			Ok(ctx) => ctx,
			Err(e) => {
				error!("Bubble chart not drawn: {}", e);
				return;
			}
		};
		let payload = data.get();
		let width = canvas::parent_width(&canvas, FALLBACK_WIDTH);
		canvas.set_width(width as u32);
		canvas.set_height(config.height as u32);
		*state_init.borrow_mut() = Some(BubbleState::new(&payload, width, &config));

		let state_anim = state_init.clone();
		canvas::start_animation(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick();
				render::render(s, &ctx);
			}
		});

		let (state_resize, canvas_resize, config_resize) =
			(state_init.clone(), canvas.clone(), config.clone());
		canvas::on_resize(move || {
			let width = canvas::parent_width(&canvas_resize, FALLBACK_WIDTH);
			canvas_resize.set_width(width as u32);
			*state_resize.borrow_mut() = Some(BubbleState::new(&payload, width, &config_resize));
		});
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = canvas::pointer(&canvas, &ev);
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.press(x, y);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = canvas::pointer(&canvas, &ev);
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.drag_to(x, y);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		let link = match *state_mu.borrow_mut() {
			Some(ref mut s) => s.release(),
			None => None,
		};
		if let Some(link) = link {
			info!("Following {}", link);
			if let Ok(window) = canvas::window() {
				let _ = window.location().set_href(&link);
			}
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.cancel();
		}
	};

	view! {
		<div id=container_id class="bubble-container">
			<canvas
				node_ref=canvas_ref
				class="bubble-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				style="display: block; cursor: pointer;"
			/>
		</div>
	}
}
