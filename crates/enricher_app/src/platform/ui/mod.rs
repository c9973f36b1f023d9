pub mod chart;
pub mod constants;
pub mod render;
