pub mod geometry;
pub mod graph;
