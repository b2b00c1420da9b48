// error_handling.rs - Geometry and export error types

use maze_graph::{Direction, GraphError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeometryError {
    #[error("Casing thickness must be positive, got {0}")]
    InvalidCasingThickness(f64),

    #[error("Unknown direction '{0}', expected one of xp, xn, yp, yn")]
    UnknownDirection(String),

    #[error("Direction {0} has no horizontal connector")]
    UnsupportedConnector(Direction),

    #[error("Room ({i}, {j}, {k}) is outside the cube")]
    RoomOutOfRange { i: usize, j: usize, k: usize },

    #[error("Expected {expected} level options, got {actual}")]
    LevelCountMismatch { expected: usize, actual: usize },

    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("Cube has no levels")]
    EmptyCube,

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Image processing failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("External renderer '{program}' failed with {status}")]
    RendererFailed { program: String, status: String },
}

pub type Result<T> = std::result::Result<T, GeometryError>;

impl GeometryError {
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        GeometryError::InvalidConfig { reason: reason.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_graph::Cell;

    #[test]
    fn test_messages() {
        assert_eq!(
            GeometryError::InvalidCasingThickness(-1.0).to_string(),
            "Casing thickness must be positive, got -1"
        );
        assert_eq!(
            GeometryError::UnsupportedConnector(Direction::ZNegative).to_string(),
            "Direction z- has no horizontal connector"
        );
    }

    #[test]
    fn test_graph_error_converts() {
        let err: GeometryError = GraphError::NoPath {
            start: Cell::new(0, 0, 0),
            goal: Cell::new(1, 1, 1),
        }
        .into();
        assert!(matches!(err, GeometryError::Graph(GraphError::NoPath { .. })));
    }
}
