// lib.rs - Lattice graph for the labyrinth cube
// Owns the N×N×N adjacency storage, randomized maze carving and shortest-path search.
// Knows nothing about geometry; the renderer crate consumes `LayerTopology` slices.

pub mod cell;
pub mod error;
pub mod generation;
pub mod graph;
pub mod search;

// Re-export commonly used types
pub use cell::{Cell, Direction};
pub use error::{GraphError, Result};
pub use generation::{GenerationOptions, GenerationStats};
pub use graph::{Graph, LayerTopology};
