//! Chart payloads in the `{labels, datasets}` shape the server emits.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, VizError};
use crate::payload::Validate;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartKind {
	Doughnut,
	Line,
}

impl ChartKind {
	/// Width over height when sized responsively.
	pub fn aspect_ratio(self) -> f64 {
		match self {
			ChartKind::Doughnut => 1.0,
			ChartKind::Line => 2.0,
		}
	}
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChartPayload {
	pub labels: Vec<Value>,
	pub datasets: Vec<Dataset>,
}

/// One color for the whole series or one per point.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ColorSpec {
	One(String),
	Many(Vec<String>),
}

impl ColorSpec {
	pub fn at(&self, i: usize) -> Option<&str> {
		match self {
			ColorSpec::One(c) => Some(c.as_str()),
			ColorSpec::Many(cs) if cs.is_empty() => None,
			ColorSpec::Many(cs) => Some(cs[i % cs.len()].as_str()),
		}
	}
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Dataset {
	pub label: Option<String>,
	pub data: Vec<Option<f64>>,
	pub background_color: Option<ColorSpec>,
	pub border_color: Option<ColorSpec>,
	pub border_width: f64,
	pub border_dash: Vec<f64>,
	pub fill: bool,
	pub line_tension: f64,
	pub point_radius: f64,
	pub point_background_color: Option<ColorSpec>,
	pub point_border_color: Option<ColorSpec>,
	pub point_border_width: f64,
	pub span_gaps: bool,
}

impl Default for Dataset {
	fn default() -> Self {
		Self {
			label: None,
			data: Vec::new(),
			background_color: None,
			border_color: None,
			border_width: 3.0,
			border_dash: Vec::new(),
			fill: true,
			line_tension: 0.4,
			point_radius: 3.0,
			point_background_color: None,
			point_border_color: None,
			point_border_width: 1.0,
			span_gaps: false,
		}
	}
}

impl ChartPayload {
	/// Text of the i-th label; numeric labels print as numbers.
	pub fn label(&self, i: usize) -> String {
		match self.labels.get(i) {
			Some(Value::String(s)) => s.clone(),
			Some(Value::Null) | None => String::new(),
			Some(other) => other.to_string(),
		}
	}

	/// Number of category slots on the x axis.
	pub fn slots(&self) -> usize {
		self.datasets
			.iter()
			.map(|d| d.data.len())
			.chain(std::iter::once(self.labels.len()))
			.max()
			.unwrap_or(0)
	}

	/// Rejects payloads a doughnut cannot draw.
	pub fn validate_for(&self, kind: ChartKind) -> Result<()> {
		if kind != ChartKind::Doughnut {
			return Ok(());
		}
		for (d, dataset) in self.datasets.iter().enumerate() {
			if let Some(v) = dataset.data.iter().flatten().find(|v| **v < 0.0) {
				return Err(VizError::InvalidPayload(format!(
					"dataset {} has negative slice {}",
					d, v
				)));
			}
		}
		Ok(())
	}
}

impl Validate for ChartPayload {
	/// Points past the last label would have no slot to sit in.
	fn validate(&self) -> Result<()> {
		if self.labels.is_empty() {
			return Ok(());
		}
		for (d, dataset) in self.datasets.iter().enumerate() {
			if dataset.data.len() > self.labels.len() {
				return Err(VizError::InvalidPayload(format!(
					"dataset {} has {} points for {} labels",
					d,
					dataset.data.len(),
					self.labels.len()
				)));
			}
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn parses_producer_productivity_shape() {
		let payload: ChartPayload = serde_json::from_value(json!({
			"labels": ["1998", "1999", 2001],
			"datasets": [{
				"label": "Number of Songs Produced",
				"fill": true,
				"lineTension": 0.5,
				"backgroundColor": "rgba(0,255,0,0.1)",
				"borderColor": "rgba(220,220,220,1)",
				"borderCapStyle": "butt",
				"borderDash": [],
				"pointBackgroundColor": "green",
				"pointRadius": 3,
				"data": [4, null, 7],
				"spanGaps": false
			}]
		}))
		.unwrap();
		let dataset = &payload.datasets[0];
		assert_eq!(dataset.line_tension, 0.5);
		assert_eq!(dataset.data, vec![Some(4.0), None, Some(7.0)]);
		assert_eq!(dataset.point_background_color.as_ref().and_then(|c| c.at(5)), Some("green"));
		assert_eq!(payload.label(2), "2001");
		assert_eq!(payload.slots(), 3);
	}

	#[test]
	fn per_slice_colors_cycle() {
		let spec = ColorSpec::Many(vec!["red".into(), "blue".into()]);
		assert_eq!(spec.at(0), Some("red"));
		assert_eq!(spec.at(3), Some("blue"));
		assert_eq!(ColorSpec::Many(vec![]).at(0), None);
	}

	#[test]
	fn empty_payload_is_valid() {
		let payload: ChartPayload = serde_json::from_value(json!({})).unwrap();
		assert!(payload.datasets.is_empty());
		assert!(payload.validate_for(ChartKind::Doughnut).is_ok());
		assert_eq!(payload.slots(), 0);
	}

	#[test]
	fn more_points_than_labels_is_rejected() {
		let payload: ChartPayload = serde_json::from_value(json!({
			"labels": ["a"],
			"datasets": [{"data": [1, 2]}]
		}))
		.unwrap();
		assert!(matches!(payload.validate(), Err(VizError::InvalidPayload(_))));
	}

	#[test]
	fn negative_slices_are_rejected_for_doughnuts_only() {
		let payload: ChartPayload = serde_json::from_value(json!({
			"labels": ["a", "b"],
			"datasets": [{"data": [3, -1]}]
		}))
		.unwrap();
		assert!(payload.validate_for(ChartKind::Doughnut).is_err());
		assert!(payload.validate_for(ChartKind::Line).is_ok());
	}
}
