use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::ForceGraphState;

const BACKGROUND: &str = "#ffffff";
const LINK_STROKE: &str = "#999";
const LABEL_FILL: &str = "#333";

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
}

fn draw_edges(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_stroke_style_str(LINK_STROKE);
	ctx.set_global_alpha(0.6);
	ctx.set_line_width(1.5);
	for line in state.edge_lines() {
		ctx.begin_path();
		ctx.move_to(line.x1, line.y1);
		ctx.line_to(line.x2, line.y2);
		ctx.stroke();
	}
	ctx.set_global_alpha(1.0);
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_font("12px sans-serif");
	for view in state.node_views() {
		ctx.begin_path();
		let _ = ctx.arc(view.x, view.y, view.radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&view.color);
		ctx.fill();
		ctx.set_stroke_style_str(BACKGROUND);
		ctx.set_line_width(1.5);
		ctx.stroke();

		if let Some(label) = &view.label {
			ctx.set_fill_style_str(LABEL_FILL);
			let _ = ctx.fill_text(label, view.x + view.radius + 3.0, view.y + 4.0);
		}
	}
}
