mod component;
mod pack;
mod render;
mod state;

pub use component::BubbleChartCanvas;
