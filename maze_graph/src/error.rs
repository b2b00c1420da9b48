// error.rs - Graph error types

use thiserror::Error;

use crate::cell::Cell;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Lattice size must be at least 1")]
    EmptyLattice,

    #[error("Lattice of size {size} has more cells than fit in memory")]
    LatticeTooLarge { size: usize },

    #[error("Invalid adjacency storage: {0}")]
    InvalidStorage(String),

    #[error("Cell {cell} is outside the {size}x{size}x{size} lattice")]
    CellOutOfBounds { cell: Cell, size: usize },

    #[error("No path from {start} to {goal}")]
    NoPath { start: Cell, goal: Cell },
}

pub type Result<T> = std::result::Result<T, GraphError>;
