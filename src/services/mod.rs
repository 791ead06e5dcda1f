pub mod filtering;
pub mod heatmap;
pub mod preparation;
