// level.rs - One z-slice of the lattice as a printable slab
// Slab minus room cavities, corridor connectors, floor shafts and optional windows.

use maze_graph::{Direction, LayerTopology};
use serde::{Deserialize, Serialize};

use crate::csg::Csg;
use crate::error_handling::{GeometryError, Result};
use crate::types::{Vec2, Vec3};
use crate::window::WindowDirection;

/// Widening applied to connectors across a wall so their faces never
/// coincide with the room cavity faces.
pub const CONNECTOR_EPSILON: f64 = 0.00001;

/// Per-level build switches, supplied when the solid is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelOptions {
    /// Cut beveled sightline slots from perimeter rooms to the outer faces
    pub windows: bool,
}

/// What a plan-view footprint carves out of the slab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureKind {
    Room,
    Connector,
    Shaft,
}

/// Axis-aligned rectangle in slab coordinates (outer wall included).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    pub kind: FeatureKind,
    pub min: Vec2,
    pub size: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelGeometry {
    wall_thickness: f64,
    path_thickness: f64,
    topology: LayerTopology,
}

impl LevelGeometry {
    pub fn new(wall_thickness: f64, path_thickness: f64, topology: LayerTopology) -> Self {
        Self {
            wall_thickness,
            path_thickness,
            topology,
        }
    }

    #[inline]
    pub fn topology(&self) -> &LayerTopology {
        &self.topology
    }

    #[inline]
    pub fn grid_size(&self) -> usize {
        self.topology.grid_size
    }

    #[inline]
    pub fn wall_thickness(&self) -> f64 {
        self.wall_thickness
    }

    #[inline]
    pub fn path_thickness(&self) -> f64 {
        self.path_thickness
    }

    /// Pitch between neighbouring rooms
    #[inline]
    pub fn room_size(&self) -> f64 {
        self.wall_thickness + self.path_thickness
    }

    /// All rooms in a row plus the closing outer wall
    #[inline]
    pub fn level_size_xy(&self) -> f64 {
        self.grid_size() as f64 * self.room_size() + self.wall_thickness
    }

    #[inline]
    pub fn floor_thickness(&self) -> f64 {
        self.wall_thickness
    }

    #[inline]
    pub fn level_size_z(&self) -> f64 {
        self.floor_thickness() + self.path_thickness
    }

    pub fn connection_size_x(&self) -> Vec2 {
        Vec2::new(self.wall_thickness + 2.0 * CONNECTOR_EPSILON, self.path_thickness)
    }

    pub fn connection_size_y(&self) -> Vec2 {
        Vec2::new(self.path_thickness, self.wall_thickness + 2.0 * CONNECTOR_EPSILON)
    }

    #[inline]
    fn in_grid(&self, i: usize, j: usize) -> bool {
        i < self.grid_size() && j < self.grid_size()
    }

    /// Planar corner of room `(i, j)` without the outer wall offset.
    pub fn room_corner(&self, i: usize, j: usize) -> Option<Vec2> {
        self.in_grid(i, j)
            .then(|| Vec2::new(i as f64, j as f64) * self.room_size())
    }

    /// Lower corner of the room cavity inside the slab.
    pub fn room_corner_3d(&self, i: usize, j: usize) -> Option<Vec3> {
        let corner = self.room_corner(i, j)?;
        Some(corner.extend(0.0) + Vec3::new(self.wall_thickness, self.wall_thickness, self.floor_thickness()))
    }

    pub fn room_center_3d(&self, i: usize, j: usize) -> Option<Vec3> {
        Some(self.room_corner_3d(i, j)? + Vec3::splat(self.path_thickness / 2.0))
    }

    /// Shift from grid-relative plan coordinates to slab coordinates
    #[inline]
    fn wall_offset(&self) -> Vec2 {
        Vec2::splat(self.wall_thickness)
    }

    /// The full slab before anything is carved.
    pub fn base(&self) -> Csg {
        Csg::rect(Vec2::splat(self.level_size_xy())).extrude(self.level_size_z())
    }

    /// Corridor footprint from `(i, j)` to its positive neighbour along `dir`.
    ///
    /// `Ok(None)` when the neighbour falls outside the grid. Vertical
    /// connections are shafts, not corridors, and are rejected.
    pub fn connector_footprint(&self, i: usize, j: usize, dir: Direction) -> Result<Option<Footprint>> {
        let (neighbor, offset, size) = match dir {
            Direction::XPositive => (
                self.room_corner(i + 1, j),
                Vec2::new(self.wall_thickness + CONNECTOR_EPSILON, 0.0),
                self.connection_size_x(),
            ),
            Direction::YPositive => (
                self.room_corner(i, j + 1),
                Vec2::new(0.0, self.wall_thickness + CONNECTOR_EPSILON),
                self.connection_size_y(),
            ),
            Direction::ZNegative => return Err(GeometryError::UnsupportedConnector(dir)),
        };

        Ok(neighbor.map(|corner| Footprint {
            kind: FeatureKind::Connector,
            min: corner - offset + self.wall_offset(),
            size,
        }))
    }

    /// Corridor solid between room `(i, j)` and its neighbour along `dir`.
    pub fn xy_connector(&self, i: usize, j: usize, dir: Direction) -> Result<Option<Csg>> {
        Ok(self
            .connector_footprint(i, j, dir)?
            .map(|fp| self.carve(&fp)))
    }

    /// Every carved feature of this level in plan view.
    pub fn footprints(&self) -> Vec<Footprint> {
        let n = self.grid_size();
        let room = Vec2::splat(self.path_thickness);
        let mut rooms = Vec::new();
        let mut connectors = Vec::new();
        let mut shafts = Vec::new();

        for i in 0..n {
            for j in 0..n {
                let Some(corner) = self.room_corner(i, j) else {
                    continue;
                };
                let min = corner + self.wall_offset();

                if self.topology.is_room(i, j) {
                    rooms.push(Footprint { kind: FeatureKind::Room, min, size: room });
                }
                for dir in [Direction::XPositive, Direction::YPositive] {
                    if !self.topology.is_connected(i, j, dir) {
                        continue;
                    }
                    // X/Y never hit the unsupported branch
                    if let Ok(Some(fp)) = self.connector_footprint(i, j, dir) {
                        connectors.push(fp);
                    }
                }
                if self.topology.is_connected(i, j, Direction::ZNegative) {
                    shafts.push(Footprint { kind: FeatureKind::Shaft, min, size: room });
                }
            }
        }

        rooms.extend(connectors);
        rooms.extend(shafts);
        rooms
    }

    /// Turn a footprint into the volume it removes.
    fn carve(&self, fp: &Footprint) -> Csg {
        match fp.kind {
            // Rooms and corridors sit on the floor and are path-high
            FeatureKind::Room | FeatureKind::Connector => Csg::rect(fp.size)
                .extrude(self.path_thickness)
                .translate(fp.min.extend(self.floor_thickness())),
            // Shafts perforate the floor into the level below
            FeatureKind::Shaft => Csg::rect(fp.size)
                .extrude(self.floor_thickness())
                .translate(fp.min.extend(0.0)),
        }
    }

    fn carve_kind(&self, kind: FeatureKind) -> Vec<Csg> {
        self.footprints()
            .iter()
            .filter(|fp| fp.kind == kind)
            .map(|fp| self.carve(fp))
            .collect()
    }

    pub fn room_cavities(&self) -> Vec<Csg> {
        self.carve_kind(FeatureKind::Room)
    }

    pub fn connectors(&self) -> Vec<Csg> {
        self.carve_kind(FeatureKind::Connector)
    }

    pub fn shafts(&self) -> Vec<Csg> {
        self.carve_kind(FeatureKind::Shaft)
    }

    /// Beveled slot from the center of room `(i, j)` to the outer face.
    pub fn window_solid(&self, i: usize, j: usize, dir: WindowDirection) -> Option<Csg> {
        let center = self.room_center_3d(i, j)?;
        Some(dir.slot(center, self.level_size_xy(), self.path_thickness / 3.0, true))
    }

    /// Windows for every perimeter room, one per outer face it touches.
    pub fn windows(&self) -> Vec<Csg> {
        let n = self.grid_size();
        let mut windows = Vec::new();
        for i in 0..n {
            for j in 0..n {
                for dir in WindowDirection::ALL {
                    let on_face = match dir {
                        WindowDirection::Xn => i == 0,
                        WindowDirection::Yn => j == 0,
                        WindowDirection::Xp => i == n - 1,
                        WindowDirection::Yp => j == n - 1,
                    };
                    if on_face {
                        windows.extend(self.window_solid(i, j, dir));
                    }
                }
            }
        }
        windows
    }

    /// Everything removed from the slab.
    pub fn cavities(&self, options: LevelOptions) -> Csg {
        let mut carved = self.room_cavities();
        carved.extend(self.connectors());
        carved.extend(self.shafts());
        if options.windows {
            carved.extend(self.windows());
        }
        Csg::union(carved)
    }

    /// Final level solid: base minus all cavities.
    pub fn solid(&self, options: LevelOptions) -> Csg {
        self.base().difference([self.cavities(options)])
    }
}
