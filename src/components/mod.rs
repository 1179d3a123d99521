pub mod bubble_chart;
pub mod canvas;
pub mod chart;
pub mod color;
pub mod drag;
pub mod force_graph;
