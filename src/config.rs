//! Static configuration for the visualizations.
//!
//! Every page reads a [`VizConfig`] from Leptos context and passes the pieces
//! it needs down to its component as props.

use serde::Deserialize;

/// Top-level configuration, provided once by the app.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct VizConfig {
	pub endpoints: Endpoints,
	pub network: NetworkConfig,
	pub bubbles: BubbleConfig,
	pub charts: ChartConfig,
}

/// Server endpoints, one per visualization.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Endpoints {
	/// Origin prepended to every path. `None` means the page's own origin.
	pub api_base: Option<String>,
	pub network: String,
	pub producer_bubbles: String,
	pub performer_frequency: String,
	pub producer_frequency: String,
	pub producer_productivity: String,
}

impl Default for Endpoints {
	fn default() -> Self {
		Self {
			api_base: None,
			network: "/data.json".into(),
			producer_bubbles: "/producer_bubbles.json".into(),
			performer_frequency: "/performer-frequency.json".into(),
			producer_frequency: "/producer-frequency.json".into(),
			producer_productivity: "/producer-productivity.json".into(),
		}
	}
}

/// Fixed-size force graph layout.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct NetworkConfig {
	pub width: f64,
	pub height: f64,
	pub node_radius: f64,
	/// Repulsion between every pair of nodes.
	pub charge_strength: f32,
	/// Attraction along each path.
	pub spring_strength: f32,
	/// Radius of the ring nodes are seeded on.
	pub seed_radius: f64,
}

impl Default for NetworkConfig {
	fn default() -> Self {
		Self {
			width: 1318.0,
			height: 779.0,
			node_radius: 15.0,
			charge_strength: 70.0,
			spring_strength: 0.05,
			seed_radius: 100.0,
		}
	}
}

/// Circle-packing layout. Width always comes from the container.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct BubbleConfig {
	pub height: f64,
	pub padding: f64,
	/// Offset of the drawing from the top-left corner; also trimmed from the
	/// packing height.
	pub margin: f64,
	pub opacity: f64,
	pub container_fill: String,
}

impl Default for BubbleConfig {
	fn default() -> Self {
		Self {
			height: 600.0,
			padding: 10.0,
			margin: 50.0,
			opacity: 0.6,
			container_fill: "#fff".into(),
		}
	}
}

/// Options shared by every chart.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChartConfig {
	/// Follow the parent element's width and redraw on resize.
	pub responsive: bool,
	pub font: String,
}

impl Default for ChartConfig {
	fn default() -> Self {
		Self {
			responsive: true,
			font: "12px sans-serif".into(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_match_the_fixed_layout() {
		let config = VizConfig::default();
		assert_eq!(config.endpoints.network, "/data.json");
		assert_eq!(config.endpoints.producer_bubbles, "/producer_bubbles.json");
		assert_eq!((config.network.width, config.network.height), (1318.0, 779.0));
		assert_eq!(config.bubbles.height, 600.0);
		assert!(config.charts.responsive);
	}

	#[test]
	fn partial_json_keeps_remaining_defaults() {
		let config: VizConfig = serde_json::from_value(serde_json::json!({
			"endpoints": { "api_base": "http://localhost:5000" },
			"bubbles": { "height": 420.0 }
		}))
		.unwrap();
		assert_eq!(config.endpoints.api_base.as_deref(), Some("http://localhost:5000"));
		assert_eq!(config.endpoints.performer_frequency, "/performer-frequency.json");
		assert_eq!(config.bubbles.height, 420.0);
		assert_eq!(config.bubbles.padding, 10.0);
	}
}
