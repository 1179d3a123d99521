mod component;
mod geometry;
mod render;
mod types;

pub use component::ChartCanvas;
pub use types::{ChartKind, ChartPayload};
