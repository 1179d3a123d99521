use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::BubbleState;

pub fn render(state: &BubbleState, ctx: &CanvasRenderingContext2d) {
	ctx.clear_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.margin, state.margin);

	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	ctx.set_font("11px sans-serif");
	for view in state.views() {
		ctx.set_global_alpha(state.opacity);
		ctx.begin_path();
		let _ = ctx.arc(view.x, view.y, view.r.max(0.0), 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&view.fill);
		ctx.fill();
		ctx.set_global_alpha(1.0);

		if let Some(label) = &view.label {
			ctx.set_fill_style_str("#000");
			let _ = ctx.fill_text(label, view.x, view.y);
		}
	}
	ctx.restore();
}
