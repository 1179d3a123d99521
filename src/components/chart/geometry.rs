//! Pure layout math for the doughnut and line charts.

use std::f64::consts::PI;

use super::types::{ChartKind, ChartPayload};
use crate::components::color::CATEGORY10;

pub const LEGEND_ROW: f64 = 24.0;
pub const AXIS_GUTTER: f64 = 40.0;
pub const CUTOUT: f64 = 0.5;
pub const TICK_COUNT: usize = 5;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
	pub x: f64,
	pub y: f64,
	pub w: f64,
	pub h: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
	pub text: String,
	pub color: String,
}

fn fallback_color(i: usize) -> String {
	CATEGORY10[i % CATEGORY10.len()].to_string()
}

/// Doughnuts list one entry per label, line charts one per dataset.
pub fn legend(payload: &ChartPayload, kind: ChartKind) -> Vec<LegendEntry> {
	match kind {
		ChartKind::Doughnut => {
			let colors = payload.datasets.first().and_then(|d| d.background_color.as_ref());
			(0..payload.labels.len())
				.map(|i| LegendEntry {
					text: payload.label(i),
					color: colors
						.and_then(|c| c.at(i))
						.map(str::to_string)
						.unwrap_or_else(|| fallback_color(i)),
				})
				.collect()
		}
		ChartKind::Line => payload
			.datasets
			.iter()
			.enumerate()
			.map(|(i, d)| LegendEntry {
				text: d.label.clone().unwrap_or_else(|| format!("Dataset {}", i + 1)),
				color: d
					.border_color
					.as_ref()
					.or(d.background_color.as_ref())
					.and_then(|c| c.at(0))
					.map(str::to_string)
					.unwrap_or_else(|| fallback_color(i)),
			})
			.collect(),
	}
}

/// Area left for the chart body under a legend of `rows` rows.
pub fn plot_area(width: f64, height: f64, rows: usize, kind: ChartKind) -> Rect {
	let top = rows as f64 * LEGEND_ROW;
	match kind {
		ChartKind::Doughnut => Rect {
			x: 0.0,
			y: top,
			w: width,
			h: (height - top).max(0.0),
		},
		ChartKind::Line => Rect {
			x: AXIS_GUTTER,
			y: top + 8.0,
			w: (width - AXIS_GUTTER - 12.0).max(0.0),
			h: (height - top - 8.0 - AXIS_GUTTER / 2.0).max(0.0),
		},
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
	pub start: f64,
	pub end: f64,
	pub color: String,
	pub index: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Ring {
	pub inner: f64,
	pub outer: f64,
	pub segments: Vec<Segment>,
}

/// Concentric rings, first dataset outermost. Each ring starts at 12 o'clock
/// and sweeps clockwise in proportion to the values.
pub fn doughnut_rings(payload: &ChartPayload, radius: f64) -> Vec<Ring> {
	let n = payload.datasets.len();
	if n == 0 || radius <= 0.0 {
		return Vec::new();
	}
	let hole = radius * CUTOUT;
	let band = (radius - hole) / n as f64;

	payload
		.datasets
		.iter()
		.enumerate()
		.map(|(d, dataset)| {
			let outer = radius - band * d as f64;
			let total: f64 = dataset.data.iter().flatten().filter(|v| **v > 0.0).sum();
			let mut segments = Vec::new();
			if total > 0.0 {
				let mut angle = -PI / 2.0;
				for (i, value) in dataset.data.iter().enumerate() {
					let value = value.unwrap_or(0.0).max(0.0);
					if value == 0.0 {
						continue;
					}
					let sweep = value / total * 2.0 * PI;
					segments.push(Segment {
						start: angle,
						end: angle + sweep,
						color: dataset
							.background_color
							.as_ref()
							.and_then(|c| c.at(i))
							.map(str::to_string)
							.unwrap_or_else(|| fallback_color(i)),
						index: i,
					});
					angle += sweep;
				}
			}
			Ring {
				inner: outer - band,
				outer,
				segments,
			}
		})
		.collect()
}

/// Step and upper bound of a zero-based axis covering `max`.
pub fn nice_scale(max: f64, ticks: usize) -> (f64, f64) {
	if !(max > 0.0) {
		return (1.0, ticks as f64);
	}
	let raw = max / ticks.max(1) as f64;
	let magnitude = 10f64.powf(raw.log10().floor());
	let residual = raw / magnitude;
	let nice = if residual <= 1.0 {
		1.0
	} else if residual <= 2.0 {
		2.0
	} else if residual <= 5.0 {
		5.0
	} else {
		10.0
	};
	let step = nice * magnitude;
	let top = (max / step).ceil() * step;
	if !top.is_finite() {
		// rounding up overflowed near f64::MAX
		return (raw, max);
	}
	(step, top)
}

/// Gridline values from zero to `top`.
pub fn axis_ticks(step: f64, top: f64) -> Vec<f64> {
	if !(step > 0.0) || !top.is_finite() {
		return vec![0.0];
	}
	let count = (top / step).round().min(2.0 * TICK_COUNT as f64) as usize;
	(0..=count).map(|n| n as f64 * step).collect()
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

/// Bezier control points for a point, Chart.js style.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Controls {
	pub before: Point,
	pub after: Point,
}

/// Screen-space points of a dataset, split into runs at gaps.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
	pub dataset: usize,
	pub points: Vec<Option<Point>>,
	pub runs: Vec<Vec<Point>>,
}

pub fn slot_x(plot: Rect, slots: usize, i: usize) -> f64 {
	if slots <= 1 {
		return plot.x + plot.w / 2.0;
	}
	plot.x + plot.w * i as f64 / (slots - 1) as f64
}

pub fn value_y(plot: Rect, top: f64, value: f64) -> f64 {
	plot.y + plot.h - plot.h * (value / top)
}

pub fn line_series(payload: &ChartPayload, plot: Rect, top: f64) -> Vec<Series> {
	let slots = payload.slots();
	payload
		.datasets
		.iter()
		.enumerate()
		.map(|(d, dataset)| {
			let points: Vec<Option<Point>> = dataset
				.data
				.iter()
				.enumerate()
				.map(|(i, v)| {
					v.map(|v| Point {
						x: slot_x(plot, slots, i),
						y: value_y(plot, top, v),
					})
				})
				.collect();

			let mut runs: Vec<Vec<Point>> = Vec::new();
			let mut current = Vec::new();
			for point in &points {
				match point {
					Some(p) => current.push(*p),
					None if dataset.span_gaps => {}
					None => {
						if !current.is_empty() {
							runs.push(std::mem::take(&mut current));
						}
					}
				}
			}
			if !current.is_empty() {
				runs.push(current);
			}
			Series {
				dataset: d,
				points,
				runs,
			}
		})
		.collect()
}

/// Control points around `cur`; `tension` 0 collapses them onto the point.
pub fn spline_controls(prev: Point, cur: Point, next: Point, tension: f64) -> Controls {
	let d01 = ((cur.x - prev.x).powi(2) + (cur.y - prev.y).powi(2)).sqrt();
	let d12 = ((next.x - cur.x).powi(2) + (next.y - cur.y).powi(2)).sqrt();
	let sum = d01 + d12;
	let (s01, s12) = if sum > 0.0 {
		(d01 / sum, d12 / sum)
	} else {
		(0.0, 0.0)
	};
	let (fa, fb) = (tension * s01, tension * s12);
	Controls {
		before: Point {
			x: cur.x - fa * (next.x - prev.x),
			y: cur.y - fa * (next.y - prev.y),
		},
		after: Point {
			x: cur.x + fb * (next.x - prev.x),
			y: cur.y + fb * (next.y - prev.y),
		},
	}
}

/// One control pair per point of a run; end points reuse themselves as
/// their missing neighbour.
pub fn run_controls(run: &[Point], tension: f64) -> Vec<Controls> {
	(0..run.len())
		.map(|i| {
			let prev = if i > 0 { run[i - 1] } else { run[i] };
			let next = run.get(i + 1).copied().unwrap_or(run[i]);
			spline_controls(prev, run[i], next, tension)
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	fn payload(value: serde_json::Value) -> ChartPayload {
		serde_json::from_value(value).unwrap()
	}

	#[test]
	fn doughnut_segments_cover_the_full_turn() {
		let p = payload(json!({
			"labels": ["Drake", "Rihanna", "Jay-Z"],
			"datasets": [{"data": [1, 2, 1], "backgroundColor": ["red", "green", "blue"]}]
		}));
		let rings = doughnut_rings(&p, 100.0);
		assert_eq!(rings.len(), 1);
		let segs = &rings[0].segments;
		assert_eq!(segs.len(), 3);
		assert!((segs[0].start + PI / 2.0).abs() < 1e-12);
		assert!((segs[1].end - segs[1].start - PI).abs() < 1e-12);
		assert!((segs[2].end - (3.0 * PI / 2.0)).abs() < 1e-12);
		assert_eq!(segs[1].color, "green");
		assert_eq!((rings[0].inner, rings[0].outer), (50.0, 100.0));
	}

	#[test]
	fn zero_datasets_draw_nothing() {
		let p = payload(json!({"labels": ["a"], "datasets": []}));
		assert!(doughnut_rings(&p, 100.0).is_empty());
		let plot = plot_area(400.0, 200.0, 0, ChartKind::Line);
		assert!(line_series(&p, plot, 5.0).is_empty());
		assert!(legend(&p, ChartKind::Line).is_empty());
	}

	#[test]
	fn all_zero_values_leave_an_empty_ring() {
		let p = payload(json!({"labels": ["a", "b"], "datasets": [{"data": [0, 0]}]}));
		let rings = doughnut_rings(&p, 80.0);
		assert!(rings[0].segments.is_empty());
	}

	#[test]
	fn rings_split_the_band_between_datasets() {
		let p = payload(json!({"datasets": [{"data": [1]}, {"data": [1]}]}));
		let rings = doughnut_rings(&p, 100.0);
		assert_eq!((rings[0].inner, rings[0].outer), (75.0, 100.0));
		assert_eq!((rings[1].inner, rings[1].outer), (50.0, 75.0));
	}

	#[test]
	fn nice_scale_rounds_up() {
		assert_eq!(nice_scale(7.0, 5), (2.0, 8.0));
		assert_eq!(nice_scale(43.0, 5), (10.0, 50.0));
		assert_eq!(nice_scale(0.0, 5), (1.0, 5.0));
	}

	#[test]
	fn huge_maximum_keeps_a_finite_axis() {
		let (step, top) = nice_scale(1.7e308, TICK_COUNT);
		assert!(step.is_finite() && top.is_finite());
		let ticks = axis_ticks(step, top);
		assert!(ticks.len() <= 2 * TICK_COUNT + 1);
		assert!(ticks.iter().all(|t| t.is_finite()));
	}

	#[test]
	fn ticks_run_from_zero_to_top() {
		assert_eq!(axis_ticks(2.0, 8.0), vec![0.0, 2.0, 4.0, 6.0, 8.0]);
		assert_eq!(axis_ticks(0.0, 8.0), vec![0.0]);
	}

	#[test]
	fn gaps_split_runs_unless_spanned() {
		let plot = Rect { x: 0.0, y: 0.0, w: 300.0, h: 100.0 };
		let p = payload(json!({
			"labels": ["a", "b", "c", "d"],
			"datasets": [
				{"data": [1, null, 3, 4]},
				{"data": [1, null, 3, 4], "spanGaps": true}
			]
		}));
		let series = line_series(&p, plot, 4.0);
		assert_eq!(series[0].runs.len(), 2);
		assert_eq!(series[0].runs[1].len(), 2);
		assert_eq!(series[1].runs.len(), 1);
		assert_eq!(series[1].runs[0].len(), 3);

		let last = series[0].runs[1][1];
		assert_eq!(last, Point { x: 300.0, y: 0.0 });
		assert_eq!(series[0].points[0], Some(Point { x: 0.0, y: 75.0 }));
	}

	#[test]
	fn zero_tension_controls_sit_on_the_point() {
		let (a, b, c) = (
			Point { x: 0.0, y: 0.0 },
			Point { x: 1.0, y: 1.0 },
			Point { x: 2.0, y: 0.0 },
		);
		let flat = spline_controls(a, b, c, 0.0);
		assert_eq!(flat.before, b);
		assert_eq!(flat.after, b);

		let curved = spline_controls(a, b, c, 0.5);
		assert!((curved.before.x - 0.5).abs() < 1e-12);
		assert!((curved.after.x - 1.5).abs() < 1e-12);
		assert_eq!(curved.before.y, 1.0);
	}

	#[test]
	fn doughnut_legend_uses_slice_colors() {
		let p = payload(json!({
			"labels": ["Metro Boomin", 2010],
			"datasets": [{"data": [3, 4], "backgroundColor": ["rgba(1,2,3,1)"]}]
		}));
		let entries = legend(&p, ChartKind::Doughnut);
		assert_eq!(entries[0].text, "Metro Boomin");
		assert_eq!(entries[1].text, "2010");
		assert_eq!(entries[1].color, "rgba(1,2,3,1)");
	}

	#[test]
	fn unlabelled_line_datasets_still_get_a_legend_entry() {
		let p = payload(json!({
			"labels": ["2019", "2020"],
			"datasets": [
				{"label": "Songs", "data": [1, 2]},
				{"data": [3, 4]}
			]
		}));
		let entries = legend(&p, ChartKind::Line);
		assert_eq!(entries.len(), 2);
		assert_eq!(entries[0].text, "Songs");
		assert_eq!(entries[1].text, "Dataset 2");
	}
}
