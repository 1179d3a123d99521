//! Hierarchical circle packing.
//!
//! Leaves get a radius of `sqrt(value)`. Siblings are packed around the
//! origin with a front-chain, each parent is the smallest circle enclosing its
//! children plus padding, and the whole tree is finally scaled to fit the
//! requested size.

use crate::payload::{ColorKey, GraphNode};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Circle {
	pub x: f64,
	pub y: f64,
	pub r: f64,
}

/// One laid-out node, in pre-order.
#[derive(Clone, Debug, PartialEq)]
pub struct PackedNode {
	pub x: f64,
	pub y: f64,
	pub r: f64,
	pub depth: usize,
	/// Index of the enclosing node in the packed list.
	pub parent: Option<usize>,
	pub has_children: bool,
	pub name: String,
	pub value: f64,
	pub category: String,
	pub link: Option<String>,
}

/// Arena node used while packing; children are indices.
struct Slot<'a> {
	node: &'a GraphNode,
	circle: Circle,
	children: Vec<usize>,
	depth: usize,
	parent: Option<usize>,
}

/// Packs `root` into a `width` x `height` box with `padding` between siblings
/// and between a parent and its children.
pub fn pack(root: &GraphNode, width: f64, height: f64, padding: f64) -> Vec<PackedNode> {
	let mut slots: Vec<Slot> = Vec::new();
	flatten(root, None, 0, &mut slots);

	for slot in slots.iter_mut() {
		if slot.children.is_empty() {
			slot.circle.r = slot.node.weight().max(0.0).sqrt();
		}
	}

	// Post-order is reverse pre-order for an arena filled depth-first.
	let post_order: Vec<usize> = (0..slots.len()).rev().collect();
	for &i in &post_order {
		pack_children(&mut slots, i, 0.0);
	}
	let root_r = slots[0].circle.r;
	let side = width.min(height);
	if root_r > 0.0 {
		let k = root_r / side;
		for &i in &post_order {
			pack_children(&mut slots, i, padding * k);
		}
	}

	let root_r = slots[0].circle.r;
	let scale = if root_r > 0.0 { side / (2.0 * root_r) } else { 0.0 };
	slots[0].circle.x = width / 2.0;
	slots[0].circle.y = height / 2.0;
	slots[0].circle.r *= scale;
	for i in 1..slots.len() {
		let Some(p) = slots[i].parent else { continue };
		let parent = slots[p].circle;
		let c = &mut slots[i].circle;
		c.r *= scale;
		c.x = parent.x + scale * c.x;
		c.y = parent.y + scale * c.y;
	}

	slots
		.iter()
		.map(|slot| PackedNode {
			x: slot.circle.x,
			y: slot.circle.y,
			r: slot.circle.r,
			depth: slot.depth,
			parent: slot.parent,
			has_children: !slot.children.is_empty(),
			name: slot.node.name.clone(),
			value: slot.node.weight(),
			category: slot.node.category(ColorKey::Domain),
			link: slot.node.link.clone(),
		})
		.collect()
}

fn flatten<'a>(node: &'a GraphNode, parent: Option<usize>, depth: usize, slots: &mut Vec<Slot<'a>>) {
	let idx = slots.len();
	slots.push(Slot {
		node,
		circle: Circle::default(),
		children: Vec::new(),
		depth,
		parent,
	});
	if let Some(p) = parent {
		slots[p].children.push(idx);
	}
	for child in node.children() {
		flatten(child, Some(idx), depth + 1, slots);
	}
}

/// Packs the children of `i` relative to its centre and sets its radius.
fn pack_children(slots: &mut [Slot], i: usize, pad: f64) {
	if slots[i].children.is_empty() {
		return;
	}
	let kids = slots[i].children.clone();
	let mut circles: Vec<Circle> = kids
		.iter()
		.map(|&c| {
			let mut circle = slots[c].circle;
			circle.r += pad;
			circle
		})
		.collect();
	let e = pack_siblings(&mut circles);
	for (&c, circle) in kids.iter().zip(&circles) {
		slots[c].circle = Circle {
			x: circle.x,
			y: circle.y,
			r: circle.r - pad,
		};
	}
	slots[i].circle.r = e + pad;
}

/// Places `c` tangent to both `a` and `b`.
fn place(b: Circle, a: Circle, c: &mut Circle) {
	let (dx, dy) = (b.x - a.x, b.y - a.y);
	let d2 = dx * dx + dy * dy;
	if d2 > 0.0 {
		let a2 = (a.r + c.r).powi(2);
		let b2 = (b.r + c.r).powi(2);
		if a2 > b2 {
			let x = (d2 + b2 - a2) / (2.0 * d2);
			let y = (b2 / d2 - x * x).max(0.0).sqrt();
			c.x = b.x - x * dx - y * dy;
			c.y = b.y - x * dy + y * dx;
		} else {
			let x = (d2 + a2 - b2) / (2.0 * d2);
			let y = (a2 / d2 - x * x).max(0.0).sqrt();
			c.x = a.x + x * dx - y * dy;
			c.y = a.y + x * dy + y * dx;
		}
	} else {
		c.x = a.x + c.r;
		c.y = a.y;
	}
}

fn intersects(a: Circle, b: Circle) -> bool {
	let dr = a.r + b.r - 1e-6;
	let (dx, dy) = (b.x - a.x, b.y - a.y);
	dr > 0.0 && dr * dr > dx * dx + dy * dy
}

/// Squared distance from the origin to the weighted midpoint of a and b.
fn score(a: Circle, b: Circle) -> f64 {
	let ab = a.r + b.r;
	if ab <= 0.0 {
		return a.x * a.x + a.y * a.y;
	}
	let dx = (a.x * b.r + b.x * a.r) / ab;
	let dy = (a.y * b.r + b.y * a.r) / ab;
	dx * dx + dy * dy
}

/// Packs circles tightly around the origin and returns the radius of the
/// enclosing circle. Positions are written back into `circles`.
pub fn pack_siblings(circles: &mut [Circle]) -> f64 {
	let n = circles.len();
	if n == 0 {
		return 0.0;
	}
	circles[0].x = 0.0;
	circles[0].y = 0.0;
	if n == 1 {
		return circles[0].r;
	}
	circles[0].x = -circles[1].r;
	circles[1].x = circles[0].r;
	circles[1].y = 0.0;
	if n == 2 {
		return circles[0].r + circles[1].r;
	}
	let (a0, b0) = (circles[0], circles[1]);
	place(b0, a0, &mut circles[2]);

	// Front-chain as a circular doubly linked list over circle indices.
	let mut next = vec![0usize; n];
	let mut prev = vec![0usize; n];
	let (mut a, mut b) = (0usize, 1usize);
	next[0] = 1;
	prev[1] = 0;
	next[1] = 2;
	prev[2] = 1;
	next[2] = 0;
	prev[0] = 2;

	let mut i = 3;
	'pack: while i < n {
		let (ca, cb) = (circles[a], circles[b]);
		place(ca, cb, &mut circles[i]);
		let c = circles[i];

		let (mut j, mut k) = (next[b], prev[a]);
		let (mut sj, mut sk) = (circles[b].r, circles[a].r);
		loop {
			if sj <= sk {
				if intersects(circles[j], c) {
					b = j;
					next[a] = b;
					prev[b] = a;
					continue 'pack;
				}
				sj += circles[j].r;
				j = next[j];
			} else {
				if intersects(circles[k], c) {
					a = k;
					next[a] = b;
					prev[b] = a;
					continue 'pack;
				}
				sk += circles[k].r;
				k = prev[k];
			}
			if j == next[k] {
				break;
			}
		}

		prev[i] = a;
		next[i] = b;
		next[a] = i;
		prev[b] = i;
		b = i;

		// Restart the chain at the pair closest to the centroid.
		let mut best = score(circles[a], circles[next[a]]);
		let mut cur = next[i];
		while cur != b {
			let s = score(circles[cur], circles[next[cur]]);
			if s < best {
				a = cur;
				best = s;
			}
			cur = next[cur];
		}
		b = next[a];
		i += 1;
	}

	let mut chain = vec![circles[b]];
	let mut cur = next[b];
	while cur != b {
		chain.push(circles[cur]);
		cur = next[cur];
	}
	let e = enclose(&chain);
	for circle in circles.iter_mut() {
		circle.x -= e.x;
		circle.y -= e.y;
	}
	e.r
}

/// Smallest circle enclosing every circle in `circles`.
pub fn enclose(circles: &[Circle]) -> Circle {
	let mut basis: Vec<Circle> = Vec::new();
	let mut e: Option<Circle> = None;
	let mut i = 0;
	while i < circles.len() {
		let p = circles[i];
		if e.is_some_and(|e| encloses_weak(e, p)) {
			i += 1;
			continue;
		}
		match extend_basis(&basis, p) {
			Some(next) => {
				basis = next;
				e = Some(enclose_basis(&basis));
				i = 0;
			}
			None => return bounding(circles),
		}
	}
	e.unwrap_or_default()
}

fn extend_basis(basis: &[Circle], p: Circle) -> Option<Vec<Circle>> {
	if encloses_weak_all(p, basis) {
		return Some(vec![p]);
	}
	for &b in basis {
		if encloses_not(p, b) && encloses_weak_all(enclose2(b, p), basis) {
			return Some(vec![b, p]);
		}
	}
	for i in 0..basis.len().saturating_sub(1) {
		for j in i + 1..basis.len() {
			let (bi, bj) = (basis[i], basis[j]);
			if encloses_not(enclose2(bi, bj), p)
				&& encloses_not(enclose2(bi, p), bj)
				&& encloses_not(enclose2(bj, p), bi)
				&& encloses_weak_all(enclose3(bi, bj, p), basis)
			{
				return Some(vec![bi, bj, p]);
			}
		}
	}
	None
}

fn encloses_not(a: Circle, b: Circle) -> bool {
	let dr = a.r - b.r;
	let (dx, dy) = (b.x - a.x, b.y - a.y);
	dr < 0.0 || dr * dr < dx * dx + dy * dy
}

fn encloses_weak(a: Circle, b: Circle) -> bool {
	let dr = a.r - b.r + a.r.max(b.r).max(1.0) * 1e-9;
	let (dx, dy) = (b.x - a.x, b.y - a.y);
	dr > 0.0 && dr * dr > dx * dx + dy * dy
}

fn encloses_weak_all(a: Circle, basis: &[Circle]) -> bool {
	basis.iter().all(|&b| encloses_weak(a, b))
}

fn enclose_basis(basis: &[Circle]) -> Circle {
	match basis {
		[a] => *a,
		[a, b] => enclose2(*a, *b),
		[a, b, c] => enclose3(*a, *b, *c),
		_ => Circle::default(),
	}
}

fn enclose2(a: Circle, b: Circle) -> Circle {
	let (x21, y21, r21) = (b.x - a.x, b.y - a.y, b.r - a.r);
	let l = (x21 * x21 + y21 * y21).sqrt();
	if l == 0.0 {
		return if a.r >= b.r { a } else { b };
	}
	Circle {
		x: (a.x + b.x + x21 / l * r21) / 2.0,
		y: (a.y + b.y + y21 / l * r21) / 2.0,
		r: (l + a.r + b.r) / 2.0,
	}
}

fn enclose3(a: Circle, b: Circle, c: Circle) -> Circle {
	let (x1, y1, r1) = (a.x, a.y, a.r);
	let (x2, y2, r2) = (b.x, b.y, b.r);
	let (x3, y3, r3) = (c.x, c.y, c.r);
	let (a2, a3) = (x1 - x2, x1 - x3);
	let (b2, b3) = (y1 - y2, y1 - y3);
	let (c2, c3) = (r2 - r1, r3 - r1);
	let d1 = x1 * x1 + y1 * y1 - r1 * r1;
	let d2 = d1 - x2 * x2 - y2 * y2 + r2 * r2;
	let d3 = d1 - x3 * x3 - y3 * y3 + r3 * r3;
	let ab = a3 * b2 - a2 * b3;
	let xa = (b2 * d3 - b3 * d2) / (ab * 2.0) - x1;
	let xb = (b3 * c2 - b2 * c3) / ab;
	let ya = (a3 * d2 - a2 * d3) / (ab * 2.0) - y1;
	let yb = (a2 * c3 - a3 * c2) / ab;
	let qa = xb * xb + yb * yb - 1.0;
	let qb = 2.0 * (r1 + xa * xb + ya * yb);
	let qc = xa * xa + ya * ya - r1 * r1;
	let r = -(if qa.abs() > 1e-6 {
		(qb + (qb * qb - 4.0 * qa * qc).sqrt()) / (2.0 * qa)
	} else {
		qc / qb
	});
	Circle {
		x: x1 + xa + xb * r,
		y: y1 + ya + yb * r,
		r,
	}
}

/// Loose fallback when the exact basis search fails on degenerate input.
fn bounding(circles: &[Circle]) -> Circle {
	let n = circles.len().max(1) as f64;
	let cx = circles.iter().map(|c| c.x).sum::<f64>() / n;
	let cy = circles.iter().map(|c| c.y).sum::<f64>() / n;
	let r = circles
		.iter()
		.map(|c| ((c.x - cx).powi(2) + (c.y - cy).powi(2)).sqrt() + c.r)
		.fold(0.0, f64::max);
	Circle { x: cx, y: cy, r }
}
