use log::debug;

use super::pack::{PackedNode, pack};
use crate::components::color::OrdinalScale;
use crate::components::drag::{Energy, Pin};
use crate::config::BubbleConfig;
use crate::payload::{BubblePayload, leaf_label};

/// Pointer travel below which a press and release count as a click.
pub const CLICK_SLOP: f64 = 3.0;

#[derive(Clone, Debug)]
pub struct Bubble {
	pub layout: PackedNode,
	pub x: f64,
	pub y: f64,
	pub fill: String,
	pub label: Option<String>,
	pub pin: Pin,
}

/// What the renderer draws for one node group.
#[derive(Clone, Debug, PartialEq)]
pub struct BubbleView {
	pub x: f64,
	pub y: f64,
	pub r: f64,
	pub fill: String,
	pub label: Option<String>,
}

pub struct BubbleState {
	pub bubbles: Vec<Bubble>,
	pub energy: Energy,
	pub dragged: Option<usize>,
	pub width: f64,
	pub height: f64,
	pub margin: f64,
	pub opacity: f64,
	press: Option<(usize, f64, f64)>,
}

impl BubbleState {
	pub fn new(payload: &BubblePayload, width: f64, config: &BubbleConfig) -> Self {
		let (root, draw_root) = payload.root();
		let packed = pack(
			&root,
			width,
			config.height - config.margin,
			config.padding,
		);
		let mut colors = OrdinalScale::default();
		let bubbles: Vec<Bubble> = packed
			.into_iter()
			.skip(if draw_root { 0 } else { 1 })
			.map(|layout| {
				let (fill, label) = if layout.has_children {
					(config.container_fill.clone(), None)
				} else {
					(
						colors.color(&layout.category).to_string(),
						Some(leaf_label(&layout.name, layout.value)),
					)
				};
				Bubble {
					x: layout.x,
					y: layout.y,
					fill,
					label,
					pin: Pin::Free,
					layout,
				}
			})
			.collect();
		debug!("Packed {} bubbles into {}px", bubbles.len(), width);

		Self {
			bubbles,
			energy: Energy::default(),
			dragged: None,
			width,
			height: config.height,
			margin: config.margin,
			opacity: config.opacity,
			press: None,
		}
	}

	/// Canvas coordinates to layout coordinates.
	pub fn to_layout(&self, sx: f64, sy: f64) -> (f64, f64) {
		(sx - self.margin, sy - self.margin)
	}

	/// Topmost bubble under a canvas point.
	pub fn bubble_at(&self, sx: f64, sy: f64) -> Option<usize> {
		let (x, y) = self.to_layout(sx, sy);
		self.bubbles
			.iter()
			.rposition(|b| ((b.x - x).powi(2) + (b.y - y).powi(2)).sqrt() <= b.layout.r)
	}

	pub fn press(&mut self, sx: f64, sy: f64) {
		let Some(idx) = self.bubble_at(sx, sy) else {
			return;
		};
		let (x, y) = self.to_layout(sx, sy);
		let bubble = &mut self.bubbles[idx];
		if bubble.pin.grab(bubble.x, bubble.y) {
			self.energy.reheat();
			self.dragged = Some(idx);
			self.press = Some((idx, x, y));
			debug!("Bubble {:?} grabbed", bubble.layout.name);
		}
	}

	pub fn drag_to(&mut self, sx: f64, sy: f64) {
		let Some(idx) = self.dragged else {
			return;
		};
		let (x, y) = self.to_layout(sx, sy);
		if let Some((_, px, py)) = self.press {
			if ((x - px).powi(2) + (y - py).powi(2)).sqrt() < CLICK_SLOP {
				return;
			}
			self.press = None;
		}
		let bubble = &mut self.bubbles[idx];
		if bubble.pin.drag_to(x, y) {
			bubble.x = x;
			bubble.y = y;
		}
	}

	/// Ends the gesture. A press that never moved is a click and yields the
	/// link of the bubble, if it is a leaf that has one.
	pub fn release(&mut self) -> Option<String> {
		let idx = self.dragged.take()?;
		let clicked = self.press.take().is_some();
		let bubble = &mut self.bubbles[idx];
		bubble.pin.release();
		self.energy.settle();
		if clicked && !bubble.layout.has_children {
			return bubble.layout.link.clone();
		}
		None
	}

	/// Ends the gesture without treating it as a click.
	pub fn cancel(&mut self) {
		self.press = None;
		self.release();
	}

	/// Eases free bubbles back to their packed position while the simulation
	/// is warm; they snap home once it rests.
	pub fn tick(&mut self) {
		let alpha = self.energy.step();
		for bubble in self.bubbles.iter_mut() {
			if let Some((x, y)) = bubble.pin.position() {
				bubble.x = x;
				bubble.y = y;
				continue;
			}
			let ease = alpha.map_or(1.0, |a| (a * 0.5).min(1.0));
			bubble.x += (bubble.layout.x - bubble.x) * ease;
			bubble.y += (bubble.layout.y - bubble.y) * ease;
		}
	}

	pub fn views(&self) -> Vec<BubbleView> {
		self.bubbles
			.iter()
			.map(|b| BubbleView {
				x: b.x,
				y: b.y,
				r: b.layout.r,
				fill: b.fill.clone(),
				label: b.label.clone(),
			})
			.collect()
	}
}
