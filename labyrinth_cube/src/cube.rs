// cube.rs - Level stack and solution path ribbon

use log::{debug, info, warn};
use maze_graph::{Cell, Graph};

use crate::csg::Csg;
use crate::error_handling::{GeometryError, Result};
use crate::level::{LevelGeometry, LevelOptions};
use crate::types::{Color, Vec3};

/// Default cross-section of the path visualization ribbon
pub const DEFAULT_RIBBON_THICKNESS: f64 = 2.0;

/// Levels stacked bottom-up, level `k` raised by `k * spacing`.
#[derive(Debug, Clone, PartialEq)]
pub struct CubeAssembly {
    levels: Vec<LevelGeometry>,
    spacing: f64,
    ribbon_thickness: f64,
}

impl CubeAssembly {
    pub fn new(levels: Vec<LevelGeometry>, spacing: f64) -> Result<Self> {
        if levels.is_empty() {
            return Err(GeometryError::EmptyCube);
        }
        Ok(Self {
            levels,
            spacing,
            ribbon_thickness: DEFAULT_RIBBON_THICKNESS,
        })
    }

    /// One level per z-slice of `graph`.
    pub fn from_graph(graph: &Graph, wall_thickness: f64, path_thickness: f64, spacing: f64) -> Result<Self> {
        let levels = (0..graph.size())
            .map(|k| {
                graph
                    .layer(k)
                    .map(|topology| LevelGeometry::new(wall_thickness, path_thickness, topology))
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        info!(
            "Assembled {} levels ({} rooms total)",
            levels.len(),
            levels.iter().map(|l| l.topology().room_count()).sum::<usize>()
        );
        Self::new(levels, spacing)
    }

    pub fn with_ribbon_thickness(mut self, thickness: f64) -> Self {
        self.ribbon_thickness = thickness;
        self
    }

    #[inline]
    pub fn levels(&self) -> &[LevelGeometry] {
        &self.levels
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.levels.len()
    }

    #[inline]
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Bottom level; every level shares its dimensions.
    #[inline]
    pub fn base_level(&self) -> &LevelGeometry {
        &self.levels[0]
    }

    #[inline]
    fn level_offset(&self, k: usize) -> Vec3 {
        Vec3::new(0.0, 0.0, k as f64 * self.spacing)
    }

    pub fn room_center(&self, i: usize, j: usize, k: usize) -> Option<Vec3> {
        let center = self.levels.get(k)?.room_center_3d(i, j)?;
        Some(center + self.level_offset(k))
    }

    /// The stack with the same options on every level.
    pub fn solid(&self, options: LevelOptions) -> Csg {
        Csg::union(
            self.levels
                .iter()
                .enumerate()
                .map(|(k, level)| level.solid(options).translate(self.level_offset(k))),
        )
    }

    /// The stack with per-level options, bottom level first.
    pub fn solid_per_level(&self, options: &[LevelOptions]) -> Result<Csg> {
        if options.len() != self.levels.len() {
            return Err(GeometryError::LevelCountMismatch {
                expected: self.levels.len(),
                actual: options.len(),
            });
        }
        Ok(Csg::union(
            self.levels
                .iter()
                .zip(options)
                .enumerate()
                .map(|(k, (level, opts))| level.solid(*opts).translate(self.level_offset(k))),
        ))
    }

    /// Highlighted ribbon through the room centers of `path`.
    ///
    /// Each hop becomes a box along its dominant axis, long enough to
    /// overlap the next hop at the shared center.
    pub fn path_solid(&self, path: &[Cell]) -> Result<Csg> {
        if path.len() < 2 {
            warn!("Path has {} waypoints, nothing to draw", path.len());
        }

        let centers = path
            .iter()
            .map(|c| {
                self.room_center(c.i, c.j, c.k)
                    .ok_or(GeometryError::RoomOutOfRange { i: c.i, j: c.j, k: c.k })
            })
            .collect::<Result<Vec<_>>>()?;

        let segments = centers.windows(2).map(|pair| {
            let (from, to) = (pair[0], pair[1]);
            let delta = to - from;
            let axis = delta.dominant_axis();
            let length = delta.component(axis).abs() + self.ribbon_thickness;
            debug!("Ribbon segment {:?} -> {:?} along axis {}", from, to, axis);

            Csg::centered_cuboid(Vec3::splat(self.ribbon_thickness).with_component(axis, length))
                .translate(from.midpoint(to))
        });

        Ok(Csg::union(segments).color(Color::PATH_HIGHLIGHT))
    }
}
