use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::geometry::{
	self, AXIS_GUTTER, LEGEND_ROW, LegendEntry, Rect, TICK_COUNT, doughnut_rings, legend,
	line_series, nice_scale, plot_area, run_controls,
};
use super::types::{ChartKind, ChartPayload, Dataset};

const AXIS_STROKE: &str = "rgba(0,0,0,0.1)";
const TEXT_FILL: &str = "#666";
const SWATCH: f64 = 12.0;

pub fn render(
	payload: &ChartPayload,
	kind: ChartKind,
	ctx: &CanvasRenderingContext2d,
	width: f64,
	height: f64,
	font: &str,
) {
	ctx.clear_rect(0.0, 0.0, width, height);
	ctx.set_font(font);
	let entries = legend(payload, kind);
	let rows = draw_legend(ctx, &entries, width);
	let plot = plot_area(width, height, rows, kind);
	match kind {
		ChartKind::Doughnut => draw_doughnut(ctx, payload, plot),
		ChartKind::Line => draw_line(ctx, payload, plot),
	}
}

/// Lays entries out in centred rows and returns how many rows were used.
fn draw_legend(ctx: &CanvasRenderingContext2d, entries: &[LegendEntry], width: f64) -> usize {
	if entries.is_empty() {
		return 0;
	}
	let widths: Vec<f64> = entries
		.iter()
		.map(|e| {
			let text = ctx.measure_text(&e.text).map(|m| m.width()).unwrap_or(0.0);
			SWATCH + 6.0 + text + 12.0
		})
		.collect();

	let mut rows: Vec<Vec<usize>> = vec![Vec::new()];
	let mut used = 0.0;
	for (i, w) in widths.iter().enumerate() {
		let row_full = rows.last().is_some_and(|r| !r.is_empty());
		if used + w > width && row_full {
			rows.push(Vec::new());
			used = 0.0;
		}
		if let Some(row) = rows.last_mut() {
			row.push(i);
		}
		used += w;
	}

	ctx.set_text_baseline("middle");
	ctx.set_text_align("left");
	for (r, row) in rows.iter().enumerate() {
		let row_width: f64 = row.iter().map(|&i| widths[i]).sum();
		let mut x = (width - row_width).max(0.0) / 2.0;
		let y = r as f64 * LEGEND_ROW + LEGEND_ROW / 2.0;
		for &i in row {
			ctx.set_fill_style_str(&entries[i].color);
			ctx.fill_rect(x, y - SWATCH / 2.0, SWATCH, SWATCH);
			ctx.set_fill_style_str(TEXT_FILL);
			let _ = ctx.fill_text(&entries[i].text, x + SWATCH + 6.0, y);
			x += widths[i];
		}
	}
	rows.len()
}

fn draw_doughnut(ctx: &CanvasRenderingContext2d, payload: &ChartPayload, plot: Rect) {
	let (cx, cy) = (plot.x + plot.w / 2.0, plot.y + plot.h / 2.0);
	let radius = (plot.w.min(plot.h) / 2.0 - 4.0).max(0.0);
	for ring in doughnut_rings(payload, radius) {
		for segment in &ring.segments {
			ctx.begin_path();
			let _ = ctx.arc(cx, cy, ring.outer, segment.start, segment.end);
			let _ = ctx.arc_with_anticlockwise(cx, cy, ring.inner, segment.end, segment.start, true);
			ctx.close_path();
			ctx.set_fill_style_str(&segment.color);
			ctx.fill();
			ctx.set_stroke_style_str("#fff");
			ctx.set_line_width(2.0);
			ctx.stroke();
		}
	}
}

fn draw_line(ctx: &CanvasRenderingContext2d, payload: &ChartPayload, plot: Rect) {
	let max = payload
		.datasets
		.iter()
		.flat_map(|d| d.data.iter().flatten())
		.copied()
		.fold(0.0, f64::max);
	let (step, top) = nice_scale(max, TICK_COUNT);
	draw_axes(ctx, payload, plot, step, top);

	for series in line_series(payload, plot, top) {
		let dataset = &payload.datasets[series.dataset];
		for run in &series.runs {
			if dataset.fill && run.len() > 1 {
				trace(ctx, run, dataset.line_tension);
				let (first, last) = (run[0], run[run.len() - 1]);
				ctx.line_to(last.x, plot.y + plot.h);
				ctx.line_to(first.x, plot.y + plot.h);
				ctx.close_path();
				ctx.set_fill_style_str(color(dataset, Paint::Background, 0).unwrap_or("rgba(0,0,0,0.1)"));
				ctx.fill();
			}
			trace(ctx, run, dataset.line_tension);
			ctx.set_stroke_style_str(color(dataset, Paint::Border, 0).unwrap_or(TEXT_FILL));
			ctx.set_line_width(dataset.border_width);
			let dash = js_sys::Array::new();
			for d in &dataset.border_dash {
				dash.push(&JsValue::from_f64(*d));
			}
			let _ = ctx.set_line_dash(&dash);
			ctx.stroke();
			let _ = ctx.set_line_dash(&js_sys::Array::new());
		}

		if dataset.point_radius > 0.0 {
			for (i, point) in series.points.iter().enumerate() {
				let Some(p) = point else { continue };
				ctx.begin_path();
				let _ = ctx.arc(p.x, p.y, dataset.point_radius, 0.0, 2.0 * PI);
				ctx.set_fill_style_str(color(dataset, Paint::PointFill, i).unwrap_or("#fff"));
				ctx.fill();
				ctx.set_stroke_style_str(color(dataset, Paint::PointBorder, i).unwrap_or(TEXT_FILL));
				ctx.set_line_width(dataset.point_border_width);
				ctx.stroke();
			}
		}
	}
}

/// Starts a new path along a run, curved when `tension` is positive.
fn trace(ctx: &CanvasRenderingContext2d, run: &[geometry::Point], tension: f64) {
	ctx.begin_path();
	ctx.move_to(run[0].x, run[0].y);
	if tension <= 0.0 {
		for p in &run[1..] {
			ctx.line_to(p.x, p.y);
		}
		return;
	}
	let controls = run_controls(run, tension);
	for i in 1..run.len() {
		let (a, b) = (controls[i - 1].after, controls[i].before);
		ctx.bezier_curve_to(a.x, a.y, b.x, b.y, run[i].x, run[i].y);
	}
}

fn draw_axes(ctx: &CanvasRenderingContext2d, payload: &ChartPayload, plot: Rect, step: f64, top: f64) {
	ctx.set_stroke_style_str(AXIS_STROKE);
	ctx.set_line_width(1.0);
	ctx.set_fill_style_str(TEXT_FILL);

	ctx.set_text_align("right");
	ctx.set_text_baseline("middle");
	for tick in geometry::axis_ticks(step, top) {
		let y = geometry::value_y(plot, top, tick);
		ctx.begin_path();
		ctx.move_to(plot.x, y);
		ctx.line_to(plot.x + plot.w, y);
		ctx.stroke();
		let _ = ctx.fill_text(&format!("{}", tick), plot.x - 6.0, y);
	}

	ctx.set_text_align("center");
	ctx.set_text_baseline("top");
	let slots = payload.slots();
	let every = (slots as f64 / (plot.w / 50.0).max(1.0)).ceil().max(1.0) as usize;
	for i in (0..payload.labels.len()).step_by(every) {
		let x = geometry::slot_x(plot, slots, i);
		let _ = ctx.fill_text(&payload.label(i), x, plot.y + plot.h + AXIS_GUTTER / 8.0);
	}
}

enum Paint {
	Background,
	Border,
	PointFill,
	PointBorder,
}

fn color(dataset: &Dataset, paint: Paint, i: usize) -> Option<&str> {
	let spec = match paint {
		Paint::Background => dataset.background_color.as_ref(),
		Paint::Border => dataset.border_color.as_ref(),
		Paint::PointFill => dataset.point_background_color.as_ref(),
		Paint::PointBorder => dataset.point_border_color.as_ref(),
	};
	spec.and_then(|c| c.at(i))
}
