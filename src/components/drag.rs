//! Drag pinning and simulation heat, shared by the graph and bubble views.

/// Per-node drag state. A pinned node ignores the simulation and sits at the
/// pointer until released.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Pin {
	#[default]
	Free,
	Dragging { x: f64, y: f64 },
}

impl Pin {
	/// `Free -> Dragging` at the grab point.
	pub fn grab(&mut self, x: f64, y: f64) -> bool {
		match self {
			Pin::Free => {
				*self = Pin::Dragging { x, y };
				true
			}
			Pin::Dragging { .. } => false,
		}
	}

	/// Moves the pin; ignored unless dragging.
	pub fn drag_to(&mut self, x: f64, y: f64) -> bool {
		match self {
			Pin::Dragging { .. } => {
				*self = Pin::Dragging { x, y };
				true
			}
			Pin::Free => false,
		}
	}

	/// `Dragging -> Free`.
	pub fn release(&mut self) -> bool {
		match self {
			Pin::Dragging { .. } => {
				*self = Pin::Free;
				true
			}
			Pin::Free => false,
		}
	}

	pub fn position(&self) -> Option<(f64, f64)> {
		match *self {
			Pin::Dragging { x, y } => Some((x, y)),
			Pin::Free => None,
		}
	}
}

pub const ALPHA_MIN: f64 = 0.001;
pub const DRAG_ALPHA_TARGET: f64 = 0.3;

/// Cooling schedule of the simulation. Alpha eases toward its target every
/// tick and the simulation rests once both are near zero.
#[derive(Clone, Debug)]
pub struct Energy {
	pub alpha: f64,
	pub alpha_target: f64,
	pub alpha_decay: f64,
	active_drags: usize,
}

impl Default for Energy {
	fn default() -> Self {
		Self {
			alpha: 1.0,
			alpha_target: 0.0,
			// reaches ALPHA_MIN after ~300 ticks
			alpha_decay: 1.0 - ALPHA_MIN.powf(1.0 / 300.0),
			active_drags: 0,
		}
	}
}

impl Energy {
	/// Called on drag start. Only the first concurrent gesture raises the target.
	pub fn reheat(&mut self) {
		if self.active_drags == 0 {
			self.alpha_target = DRAG_ALPHA_TARGET;
		}
		self.active_drags += 1;
	}

	/// Called on drag end. The target drops back once no gesture is active.
	pub fn settle(&mut self) {
		self.active_drags = self.active_drags.saturating_sub(1);
		if self.active_drags == 0 {
			self.alpha_target = 0.0;
		}
	}

	#[cfg(test)]
	pub fn is_dragging(&self) -> bool {
		self.active_drags > 0
	}

	pub fn is_running(&self) -> bool {
		self.alpha >= ALPHA_MIN || self.alpha_target >= ALPHA_MIN
	}

	/// Advances one tick and returns the new alpha, or `None` at rest.
	pub fn step(&mut self) -> Option<f64> {
		if !self.is_running() {
			return None;
		}
		self.alpha += (self.alpha_target - self.alpha) * self.alpha_decay;
		Some(self.alpha)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn pin_follows_free_dragging_free() {
		let mut pin = Pin::default();
		assert!(!pin.drag_to(1.0, 1.0));
		assert_eq!(pin.position(), None);

		assert!(pin.grab(10.0, 20.0));
		assert_eq!(pin.position(), Some((10.0, 20.0)));
		assert!(!pin.grab(0.0, 0.0));

		assert!(pin.drag_to(30.0, 40.0));
		assert_eq!(pin.position(), Some((30.0, 40.0)));

		assert!(pin.release());
		assert_eq!(pin, Pin::Free);
		assert!(!pin.release());
	}

	#[test]
	fn energy_cools_to_rest() {
		let mut energy = Energy::default();
		let mut ticks = 0;
		while energy.step().is_some() {
			ticks += 1;
			assert!(ticks < 1000);
		}
		assert!((290..=310).contains(&ticks));
		assert!(!energy.is_running());
	}

	#[test]
	fn drag_reheats_until_last_gesture_ends() {
		let mut energy = Energy::default();
		while energy.step().is_some() {}

		energy.reheat();
		energy.reheat();
		assert_eq!(energy.alpha_target, DRAG_ALPHA_TARGET);
		assert!(energy.is_running());
		for _ in 0..500 {
			energy.step();
		}
		assert!((energy.alpha - DRAG_ALPHA_TARGET).abs() < 0.01);

		energy.settle();
		assert_eq!(energy.alpha_target, DRAG_ALPHA_TARGET);
		energy.settle();
		assert_eq!(energy.alpha_target, 0.0);
		assert!(!energy.is_dragging());
	}
}
