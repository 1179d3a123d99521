use leptos::prelude::*;
use log::{debug, error};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::render;
use super::types::{ChartKind, ChartPayload};
use crate::components::canvas;
use crate::config::ChartConfig;

const DEFAULT_WIDTH: f64 = 400.0;

fn draw(
	canvas: &HtmlCanvasElement,
	ctx: &CanvasRenderingContext2d,
	payload: &ChartPayload,
	kind: ChartKind,
	config: &ChartConfig,
) {
	let width = if config.responsive {
		canvas::parent_width(canvas, DEFAULT_WIDTH)
	} else {
		DEFAULT_WIDTH
	};
	let height = (width / kind.aspect_ratio()).round();
	canvas.set_width(width as u32);
	canvas.set_height(height as u32);
	render::render(payload, kind, ctx, width, height, &config.font);
}

/// A doughnut or line chart drawn once into the canvas `element_id`.
#[component]
pub fn ChartCanvas(
	#[prop(into)] data: Signal<ChartPayload>,
	kind: ChartKind,
	config: ChartConfig,
	#[prop(into)] element_id: String,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let ctx = match canvas::context_2d(&canvas) {
			Ok(ctx) => ctx,
			Err(e) => {
				error!("{:?} chart not drawn: {}", kind, e);
				return;
			}
		};
		let payload = data.get();
		draw(&canvas, &ctx, &payload, kind, &config);
		debug!(
			"{:?} chart built with {} datasets over {} labels",
			kind,
			payload.datasets.len(),
			payload.labels.len()
		);

		if config.responsive {
			let config_resize = config.clone();
			canvas::on_resize(move || {
				draw(&canvas, &ctx, &payload, kind, &config_resize);
			});
		}
	});

	view! {
		<div class="chart-container" style="position: relative; width: 100%;">
			<canvas node_ref=canvas_ref id=element_id style="display: block;" />
		</div>
	}
}
