use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, error};
use web_sys::{HtmlCanvasElement, MouseEvent};

use super::render;
use super::state::ForceGraphState;
use crate::components::canvas;
use crate::config::NetworkConfig;
use crate::payload::GraphPayload;

/// Fixed-size force-directed network, drawn into a canvas inside
/// `container_id`.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<GraphPayload>,
	config: NetworkConfig,
	#[prop(into)] container_id: String,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<ForceGraphState>>> = Rc::new(RefCell::new(None));
	let state_init = state.clone();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let ctx = match canvas::context_2d(&canvas) {
			Ok(ctx) => ctx,
			Err(e) => {
				error!("Force graph not drawn: {}", e);
				return;
			}
		};
		canvas.set_width(config.width as u32);
		canvas.set_height(config.height as u32);
		let graph = ForceGraphState::new(&data.get(), &config);
		debug!(
			"Force graph built with {} nodes and {} edges",
			graph.node_count(),
			graph.edge_count()
		);
		*state_init.borrow_mut() = Some(graph);

		let state_anim = state_init.clone();
		canvas::start_animation(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(0.016);
				render::render(s, &ctx);
			}
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
			if let Some(idx) = s.node_at_position(x, y) {
				s.start_drag(idx);
			}
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
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			s.end_drag();
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.end_drag();
		}
	};

	view! {
		<div id=container_id class="svg-container">
			<canvas
				node_ref=canvas_ref
				class="force-graph-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				style="display: block; cursor: grab;"
			/>
		</div>
	}
}
