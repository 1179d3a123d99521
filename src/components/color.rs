use std::collections::HashMap;

/// The ten-color categorical palette.
pub const CATEGORY10: &[&str] = &[
	"#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
	"#bcbd22", "#17becf",
];

/// Ordinal scale: categories get palette entries in the order first seen.
#[derive(Clone, Debug, Default)]
pub struct OrdinalScale {
	assigned: HashMap<String, usize>,
}

impl OrdinalScale {
	pub fn color(&mut self, category: &str) -> &'static str {
		let next = self.assigned.len();
		let slot = *self.assigned.entry(category.to_string()).or_insert(next);
		CATEGORY10[slot % CATEGORY10.len()]
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn categories_keep_their_first_color() {
		let mut scale = OrdinalScale::default();
		assert_eq!(scale.color("pop"), "#1f77b4");
		assert_eq!(scale.color("rap"), "#ff7f0e");
		assert_eq!(scale.color("pop"), "#1f77b4");
	}

	#[test]
	fn palette_wraps_after_ten() {
		let mut scale = OrdinalScale::default();
		for i in 0..10 {
			scale.color(&i.to_string());
		}
		assert_eq!(scale.color("eleventh"), CATEGORY10[0]);
	}
}
