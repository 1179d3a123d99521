use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::debug;

use crate::components::color::OrdinalScale;
use crate::components::drag::{Energy, Pin};
use crate::config::NetworkConfig;
use crate::payload::{ColorKey, GraphPayload};

pub const HIT_SLOP: f64 = 2.0;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub label: Option<String>,
	pub color: String,
	pub pin: Pin,
}

/// What the renderer draws for one node group.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeView {
	pub x: f64,
	pub y: f64,
	pub radius: f64,
	pub color: String,
	pub label: Option<String>,
}

/// One edge line between the current endpoint positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeLine {
	pub x1: f64,
	pub y1: f64,
	pub x2: f64,
	pub y2: f64,
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub energy: Energy,
	pub dragged: Option<DefaultNodeIdx>,
	pub width: f64,
	pub height: f64,
	pub node_radius: f64,
	order: Vec<DefaultNodeIdx>,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
}

impl ForceGraphState {
	pub fn new(data: &GraphPayload, config: &NetworkConfig) -> Self {
		let (width, height) = (config.width, config.height);
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: config.charge_strength,
			force_spring: config.spring_strength,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});
		let mut colors = OrdinalScale::default();
		let mut order = Vec::with_capacity(data.nodes.len());
		let mut by_position = HashMap::new();
		let mut edges = Vec::new();

		for (i, node) in data.nodes.iter().enumerate() {
			let angle = (i as f64) * 2.0 * PI / data.nodes.len() as f64;
			let (x, y) = (
				(width / 2.0 + config.seed_radius * angle.cos()) as f32,
				(height / 2.0 + config.seed_radius * angle.sin()) as f32,
			);

			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					label: node.label(),
					color: colors.color(&node.category(ColorKey::Parent)).into(),
					pin: Pin::Free,
				},
			});
			by_position.insert(i, idx);
			order.push(idx);
		}

		for path in &data.paths {
			let src = data.resolve(&path.source).and_then(|i| by_position.get(&i));
			let tgt = data.resolve(&path.target).and_then(|i| by_position.get(&i));
			if let (Some(&src), Some(&tgt)) = (src, tgt) {
				graph.add_edge(src, tgt, EdgeData::default());
				edges.push((src, tgt));
			}
		}
		Self {
			graph,
			energy: Energy::default(),
			dragged: None,
			width,
			height,
			node_radius: config.node_radius,
			order,
			edges,
		}
	}

	pub fn node_count(&self) -> usize {
		self.order.len()
	}

	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	/// Topmost node under the point, i.e. the last one drawn.
	pub fn node_at_position(&self, x: f64, y: f64) -> Option<DefaultNodeIdx> {
		let reach = self.node_radius + HIT_SLOP;
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - x, node.y() as f64 - y);
			if (dx * dx + dy * dy).sqrt() < reach {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn position(&self, idx: DefaultNodeIdx) -> Option<(f64, f64)> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some((node.x() as f64, node.y() as f64));
			}
		});
		found
	}

	#[cfg(test)]
	pub fn pin(&self, idx: DefaultNodeIdx) -> Pin {
		let mut pin = Pin::Free;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				pin = node.data.user_data.pin;
			}
		});
		pin
	}

	/// Drag start: pins the node where it is and reheats the simulation.
	pub fn start_drag(&mut self, idx: DefaultNodeIdx) -> bool {
		let Some((x, y)) = self.position(idx) else {
			return false;
		};
		let mut grabbed = false;
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				grabbed = node.data.user_data.pin.grab(x, y);
				node.data.is_anchor = grabbed;
			}
		});
		if grabbed {
			self.energy.reheat();
			self.dragged = Some(idx);
			debug!("Drag started at ({:.1}, {:.1})", x, y);
		}
		grabbed
	}

	/// Drag move: the dragged node follows the pointer.
	pub fn drag_to(&mut self, x: f64, y: f64) {
		let Some(idx) = self.dragged else {
			return;
		};
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx && node.data.user_data.pin.drag_to(x, y) {
				node.data.x = x as f32;
				node.data.y = y as f32;
			}
		});
	}

	/// Drag end: releases the pin and lets the simulation cool down.
	pub fn end_drag(&mut self) {
		let Some(idx) = self.dragged.take() else {
			return;
		};
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx && node.data.user_data.pin.release() {
				node.data.is_anchor = false;
			}
		});
		self.energy.settle();
		debug!("Drag ended");
	}

	pub fn tick(&mut self, dt: f32) {
		let Some(alpha) = self.energy.step() else {
			return;
		};
		self.graph.update(dt * alpha as f32);
		self.center();
	}

	/// Shifts every node so their mean sits at the canvas centre, then puts
	/// pinned nodes back under the pointer.
	fn center(&mut self) {
		let n = self.order.len();
		if n == 0 {
			return;
		}
		let (mut sx, mut sy) = (0.0, 0.0);
		self.graph.visit_nodes(|node| {
			sx += node.x() as f64;
			sy += node.y() as f64;
		});
		let (dx, dy) = (
			(sx / n as f64 - self.width / 2.0) as f32,
			(sy / n as f64 - self.height / 2.0) as f32,
		);
		self.graph.visit_nodes_mut(|node| match node.data.user_data.pin.position() {
			Some((px, py)) => {
				node.data.x = px as f32;
				node.data.y = py as f32;
			}
			None => {
				node.data.x -= dx;
				node.data.y -= dy;
			}
		});
	}

	pub fn node_views(&self) -> Vec<NodeView> {
		let mut views = Vec::with_capacity(self.order.len());
		self.graph.visit_nodes(|node| {
			let info = &node.data.user_data;
			views.push(NodeView {
				x: node.x() as f64,
				y: node.y() as f64,
				radius: self.node_radius,
				color: info.color.clone(),
				label: info.label.clone(),
			});
		});
		views
	}

	pub fn edge_lines(&self) -> Vec<EdgeLine> {
		let positions: HashMap<DefaultNodeIdx, (f64, f64)> = {
			let mut map = HashMap::with_capacity(self.order.len());
			self.graph.visit_nodes(|node| {
				map.insert(node.index(), (node.x() as f64, node.y() as f64));
			});
			map
		};
		self.edges
			.iter()
			.filter_map(|(src, tgt)| {
				let (x1, y1) = *positions.get(src)?;
				let (x2, y2) = *positions.get(tgt)?;
				Some(EdgeLine { x1, y1, x2, y2 })
			})
			.collect()
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
	fn one_group_per_node_and_one_line_per_path() {
		let state = ForceGraphState::new(&scenario(), &NetworkConfig::default());
		assert_eq!(state.node_count(), 2);
		assert_eq!(state.node_views().len(), 2);
		assert_eq!(state.edge_lines().len(), 1);
	}

	#[test]
	fn labels_follow_the_children_rule() {
		let state = ForceGraphState::new(&scenario(), &NetworkConfig::default());
		let labels: Vec<Option<String>> =
			state.node_views().into_iter().map(|v| v.label).collect();
		assert!(labels.contains(&Some("A (5)".to_string())));
		assert!(labels.contains(&None));
		assert_eq!(labels.iter().filter(|l| l.is_some()).count(), 1);
	}

	#[test]
	fn larger_graph_counts_match() {
		let nodes: Vec<_> = (0..12).map(|i| json!({"name": format!("n{}", i)})).collect();
		let paths: Vec<_> = (1..12).map(|i| json!({"source": i, "target": i / 2})).collect();
		let payload: GraphPayload =
			serde_json::from_value(json!({"nodes": nodes, "paths": paths})).unwrap();
		let mut state = ForceGraphState::new(&payload, &NetworkConfig::default());
		for _ in 0..10 {
			state.tick(0.016);
		}
		assert_eq!(state.node_views().len(), 12);
		assert_eq!(state.edge_lines().len(), 11);
	}

	#[test]
	fn drag_pins_node_to_pointer_and_release_frees_it() {
		let mut state = ForceGraphState::new(&scenario(), &NetworkConfig::default());
		let views = state.node_views();
		let idx = state.node_at_position(views[0].x, views[0].y).unwrap();

		assert!(state.start_drag(idx));
		assert!(state.energy.is_dragging());
		state.drag_to(400.0, 300.0);
		for _ in 0..5 {
			state.tick(0.016);
		}
		assert_eq!(state.pin(idx), Pin::Dragging { x: 400.0, y: 300.0 });
		assert_eq!(state.position(idx), Some((400.0, 300.0)));

		state.end_drag();
		assert_eq!(state.pin(idx), Pin::Free);
		assert_eq!(state.energy.alpha_target, 0.0);
		assert!(state.dragged.is_none());
	}

	#[test]
	fn empty_space_hits_nothing() {
		let state = ForceGraphState::new(&scenario(), &NetworkConfig::default());
		assert_eq!(state.node_at_position(-500.0, -500.0), None);
	}
}
