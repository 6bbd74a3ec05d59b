//! Interactive graph construction and pathfinding visualization.
//!
//! Users place nodes and weighted undirected edges on a canvas, then watch
//! breadth-first search, depth-first search or a nearest-neighbour tour
//! unfold step by step.

pub mod error;
pub mod graph_utils;
pub mod gui;
pub mod lab;
pub mod persistence;
