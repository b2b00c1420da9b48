// lib.rs - Geometry layer for the labyrinth cube
// Turns maze_graph topology into backend-independent CSG trees for levels,
// the stacked cube, its casing and a flattened map.

pub mod casing;
pub mod config;
pub mod csg;
pub mod cube;
pub mod error_handling;
pub mod export;
pub mod level;
pub mod map;
pub mod scad;
pub mod types;
pub mod window;

// Re-export commonly used types
pub use casing::{CasingGeometry, CasingOptions};
pub use config::LabyrinthConfig;
pub use csg::Csg;
pub use cube::CubeAssembly;
pub use error_handling::{GeometryError, Result};
pub use export::Exporter;
pub use level::{LevelGeometry, LevelOptions};
pub use map::MapLayout;
pub use types::{Color, Vec2, Vec3};
pub use window::WindowDirection;

// Level connection records carry exactly one bit per stored direction
static_assertions::const_assert_eq!(maze_graph::Direction::ALL.len(), 3);
static_assertions::assert_impl_all!(Csg: Send, Sync, Clone);
static_assertions::assert_impl_all!(CubeAssembly: Send, Sync);
