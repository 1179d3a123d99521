//! Graph payloads served by `/data.json` and `/producer_bubbles.json`.

use std::collections::HashSet;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, VizError};

/// Checked once a payload is decoded, before anything is drawn.
pub trait Validate {
	/// Rejects payloads that would draw a broken visual.
	fn validate(&self) -> Result<()>;
}

/// `{nodes, paths}` as produced by the server.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct GraphPayload {
	pub nodes: Vec<GraphNode>,
	#[serde(default)]
	pub paths: Vec<GraphPath>,
}

/// A node of either graph; bubble nodes may nest through `children`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct GraphNode {
	pub name: String,
	#[serde(default)]
	pub value: Option<f64>,
	/// Category used by the bubble chart.
	#[serde(default)]
	pub domain: Option<Value>,
	/// Category used by the network graph.
	#[serde(default)]
	pub parent: Option<Value>,
	#[serde(default)]
	pub link: Option<String>,
	#[serde(default)]
	pub children: Option<Vec<GraphNode>>,
}

/// An undirected link between two nodes.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct GraphPath {
	pub source: NodeRef,
	pub target: NodeRef,
}

/// An edge endpoint: position in `nodes` or a node name.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum NodeRef {
	Index(usize),
	Name(String),
}

/// Which node field keys the categorical color scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorKey {
	Domain,
	Parent,
}

/// `"<name> (<value>)"`, the label drawn on leaf nodes.
pub fn leaf_label(name: &str, value: f64) -> String {
	format!("{} ({})", name, value)
}

impl GraphNode {
	/// Empty `children` arrays count as a leaf.
	pub fn has_children(&self) -> bool {
		self.children.as_ref().is_some_and(|c| !c.is_empty())
	}

	pub fn children(&self) -> &[GraphNode] {
		self.children.as_deref().unwrap_or_default()
	}

	/// Category text for the color scale; absent keys share one category.
	pub fn category(&self, key: ColorKey) -> String {
		let field = match key {
			ColorKey::Domain => &self.domain,
			ColorKey::Parent => &self.parent,
		};
		match field {
			Some(Value::String(s)) => s.clone(),
			Some(Value::Null) | None => String::new(),
			Some(other) => other.to_string(),
		}
	}

	/// Label with the value when present, otherwise the bare name.
	pub fn label(&self) -> Option<String> {
		if self.has_children() {
			return None;
		}
		Some(match self.value {
			Some(v) => leaf_label(&self.name, v),
			None => self.name.clone(),
		})
	}

	/// Leaves weigh their own value, parents the sum of their subtree.
	pub fn weight(&self) -> f64 {
		if self.has_children() {
			self.children().iter().map(GraphNode::weight).sum()
		} else {
			self.value.unwrap_or(0.0)
		}
	}

	fn check_leaf_values(&self) -> Result<()> {
		if self.has_children() {
			return self.children().iter().try_for_each(GraphNode::check_leaf_values);
		}
		match self.value {
			Some(v) if v.is_finite() && v >= 0.0 => Ok(()),
			Some(v) => Err(VizError::InvalidPayload(format!(
				"node {:?} has unusable value {}",
				self.name, v
			))),
			None => Err(VizError::InvalidPayload(format!(
				"leaf node {:?} has no value",
				self.name
			))),
		}
	}
}

impl GraphPayload {
	/// Position of the node an endpoint refers to.
	pub fn resolve(&self, node: &NodeRef) -> Option<usize> {
		match node {
			NodeRef::Index(i) => (*i < self.nodes.len()).then_some(*i),
			NodeRef::Name(name) => self.nodes.iter().position(|n| &n.name == name),
		}
	}
}

impl Validate for GraphPayload {
	fn validate(&self) -> Result<()> {
		let names: HashSet<&str> = self.nodes.iter().map(|n| n.name.as_str()).collect();
		for (i, path) in self.paths.iter().enumerate() {
			for end in [&path.source, &path.target] {
				let found = match end {
					NodeRef::Index(idx) => *idx < self.nodes.len(),
					NodeRef::Name(name) => names.contains(name.as_str()),
				};
				if !found {
					return Err(VizError::InvalidPayload(format!(
						"path {} references unknown node {:?}",
						i, end
					)));
				}
			}
		}
		Ok(())
	}
}

/// The bubble endpoint serves either a `{nodes, paths}` graph or a single
/// root node with nested children.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum BubblePayload {
	Graph(GraphPayload),
	Tree(GraphNode),
}

impl BubblePayload {
	/// Root of the packing hierarchy. For the graph shape the root is
	/// synthetic and is not drawn.
	pub fn root(&self) -> (GraphNode, bool) {
		match self {
			BubblePayload::Graph(graph) => (
				GraphNode {
					children: Some(graph.nodes.clone()),
					..GraphNode::default()
				},
				false,
			),
			BubblePayload::Tree(node) => (node.clone(), true),
		}
	}
}

impl Validate for BubblePayload {
	fn validate(&self) -> Result<()> {
		match self {
			BubblePayload::Graph(graph) => {
				graph.validate()?;
				graph.nodes.iter().try_for_each(GraphNode::check_leaf_values)
			}
			BubblePayload::Tree(root) => root.check_leaf_values(),
		}
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	fn scenario() -> GraphPayload {
		serde_json::from_value(json!({
			"nodes": [
				{"name": "A", "value": 5, "domain": "x"},
				{"name": "B", "value": 5, "domain": "y", "children": [
					{"name": "C", "value": 2, "domain": "y"}
				]}
			],
			"paths": [{"source": 0, "target": 1}]
		}))
		.unwrap()
	}

	#[test]
	fn leaf_label_formats_integers_without_fraction() {
		assert_eq!(leaf_label("Song A", 3.0), "Song A (3)");
		assert_eq!(leaf_label("Song B", 2.5), "Song B (2.5)");
	}

	#[test]
	fn only_leaves_are_labelled() {
		let payload = scenario();
		assert_eq!(payload.nodes[0].label().as_deref(), Some("A (5)"));
		assert_eq!(payload.nodes[1].label(), None);
		assert_eq!(payload.nodes[1].children()[0].label().as_deref(), Some("C (2)"));
	}

	#[test]
	fn empty_children_is_a_leaf() {
		let node: GraphNode =
			serde_json::from_value(json!({"name": "solo", "value": 1, "children": []})).unwrap();
		assert!(!node.has_children());
		assert_eq!(node.label().as_deref(), Some("solo (1)"));
	}

	#[test]
	fn leaf_without_value_falls_back_to_name() {
		let node: GraphNode = serde_json::from_value(json!({"name": "Dr. Dre"})).unwrap();
		assert_eq!(node.label().as_deref(), Some("Dr. Dre"));
	}

	#[test]
	fn paths_resolve_by_index_or_name() {
		let payload: GraphPayload = serde_json::from_value(json!({
			"nodes": [{"name": "A"}, {"name": "B"}],
			"paths": [{"source": "A", "target": 1}]
		}))
		.unwrap();
		assert!(payload.validate().is_ok());
		assert_eq!(payload.resolve(&payload.paths[0].source), Some(0));
		assert_eq!(payload.resolve(&payload.paths[0].target), Some(1));
	}

	#[test]
	fn dangling_path_is_rejected() {
		let payload: GraphPayload = serde_json::from_value(json!({
			"nodes": [{"name": "A"}],
			"paths": [{"source": 0, "target": 3}]
		}))
		.unwrap();
		let err = payload.validate().unwrap_err();
		assert!(matches!(err, VizError::InvalidPayload(msg) if msg.contains("path 0")));
	}

	#[test]
	fn missing_paths_defaults_to_empty() {
		let payload: GraphPayload =
			serde_json::from_value(json!({"nodes": [{"name": "A"}]})).unwrap();
		assert!(payload.paths.is_empty());
	}

	#[test]
	fn category_reads_strings_and_numbers() {
		let node: GraphNode =
			serde_json::from_value(json!({"name": "n", "domain": "pop", "parent": 7})).unwrap();
		assert_eq!(node.category(ColorKey::Domain), "pop");
		assert_eq!(node.category(ColorKey::Parent), "7");
	}

	#[test]
	fn bubble_payload_accepts_both_shapes() {
		let graph: BubblePayload = serde_json::from_value(json!({
			"nodes": [{"name": "A", "value": 1}]
		}))
		.unwrap();
		let (root, drawn) = graph.root();
		assert!(!drawn);
		assert_eq!(root.children().len(), 1);

		let tree: BubblePayload = serde_json::from_value(json!({
			"name": "producers",
			"children": [{"name": "A", "value": 1}]
		}))
		.unwrap();
		let (root, drawn) = tree.root();
		assert!(drawn);
		assert_eq!(root.name, "producers");
	}

	#[test]
	fn bubble_leaves_need_values() {
		let payload: BubblePayload = serde_json::from_value(json!({
			"name": "root",
			"children": [{"name": "A"}]
		}))
		.unwrap();
		assert!(matches!(payload.validate(), Err(VizError::InvalidPayload(_))));
	}

	#[test]
	fn negative_bubble_values_are_rejected() {
		let tree: BubblePayload = serde_json::from_value(json!({
			"name": "root",
			"children": [{"name": "A", "value": 2}, {"name": "B", "value": -1}]
		}))
		.unwrap();
		assert!(matches!(tree.validate(), Err(VizError::InvalidPayload(_))));

		let graph: BubblePayload = serde_json::from_value(json!({
			"nodes": [{"name": "P", "children": [{"name": "C", "value": -3}]}]
		}))
		.unwrap();
		assert!(matches!(graph, BubblePayload::Graph(_)));
		assert!(matches!(graph.validate(), Err(VizError::InvalidPayload(_))));
	}

	#[test]
	fn graph_shaped_bubbles_need_leaf_values() {
		let missing: BubblePayload = serde_json::from_value(json!({
			"nodes": [{"name": "A", "value": 1}, {"name": "B"}]
		}))
		.unwrap();
		assert!(matches!(missing.validate(), Err(VizError::InvalidPayload(_))));

		let complete: BubblePayload = serde_json::from_value(json!({
			"nodes": [
				{"name": "A", "value": 1},
				{"name": "B", "children": [{"name": "C", "value": 0}]}
			]
		}))
		.unwrap();
		assert!(complete.validate().is_ok());
	}

	#[test]
	fn weight_sums_subtrees() {
		let payload = scenario();
		assert_eq!(payload.nodes[1].weight(), 2.0);
		assert_eq!(payload.nodes[0].weight(), 5.0);
	}
}
