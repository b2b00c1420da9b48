// casing.rs - Open-top sleeve sized around the assembled cube
// Outer box minus a tolerance-fit cavity, with optional weight-reduction
// cutouts and sightline windows.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::csg::Csg;
use crate::cube::CubeAssembly;
use crate::error_handling::{GeometryError, Result};
use crate::level::LevelOptions;
use crate::types::Vec3;
use crate::window::WindowDirection;

/// Extra height on outer box and cavity so the cavity leaves through the top
pub const DEFAULT_BONUS_HEIGHT: f64 = 3.0;

/// Which optional features the casing carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CasingOptions {
    pub cutouts: bool,
    pub windows: bool,
}

#[derive(Debug, Clone)]
pub struct CasingGeometry<'a> {
    cube: &'a CubeAssembly,
    thickness: f64,
    tolerance: f64,
    bonus_height: f64,
}

impl<'a> CasingGeometry<'a> {
    pub fn new(cube: &'a CubeAssembly, thickness: f64, tolerance: f64) -> Self {
        Self {
            cube,
            thickness,
            tolerance,
            bonus_height: DEFAULT_BONUS_HEIGHT,
        }
    }

    pub fn with_bonus_height(mut self, bonus_height: f64) -> Self {
        self.bonus_height = bonus_height;
        self
    }

    #[inline]
    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    #[inline]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    #[inline]
    pub fn bonus_height(&self) -> f64 {
        self.bonus_height
    }

    fn check_thickness(&self) -> Result<()> {
        // Also rejects NaN
        if !(self.thickness > 0.0) {
            return Err(GeometryError::InvalidCasingThickness(self.thickness));
        }
        Ok(())
    }

    /// Where the cube's origin sits inside the casing.
    pub fn cube_offset(&self) -> Vec3 {
        Vec3::splat(self.thickness + self.tolerance)
    }

    /// Bounding box of the stacked levels.
    pub fn labyrinth_cube_size(&self) -> Vec3 {
        let xy = self.cube.base_level().level_size_xy();
        Vec3::new(xy, xy, self.cube.spacing() * self.cube.size() as f64)
    }

    /// Outer box without the open-top allowance: double margin in XY, single in Z.
    pub fn casing_size(&self) -> Vec3 {
        let off = self.cube_offset();
        self.labyrinth_cube_size() + Vec3::new(2.0 * off.x, 2.0 * off.y, off.z)
    }

    pub fn casing_center(&self) -> Vec3 {
        self.casing_size() / 2.0
    }

    /// Fit cavity: cube plus tolerance on both sides of every axis.
    pub fn cavity_size(&self) -> Vec3 {
        self.labyrinth_cube_size() + Vec3::splat(2.0 * self.tolerance)
    }

    #[inline]
    fn bonus(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, self.bonus_height)
    }

    /// Uniform shell with the tolerance-fit cavity.
    pub fn casing_solid(&self) -> Result<Csg> {
        self.check_thickness()?;

        let outer = Csg::cuboid(self.casing_size() + self.bonus());
        let cavity = Csg::cuboid(self.cavity_size() + self.bonus()).translate(Vec3::splat(self.thickness));
        debug!(
            "Casing outer {:?}, cavity {:?}",
            self.casing_size(),
            self.cavity_size()
        );
        Ok(outer.difference([cavity]))
    }

    /// Slots removed from the walls for weight: two full-height vertical
    /// slots at 1/8 width and two 45° slots at 1/2 width.
    pub fn cutouts(&self) -> Vec<Csg> {
        let size = self.casing_size();
        let width = size.x;
        let center = self.casing_center();
        let vertical_lift = Vec3::new(0.0, 0.0, self.thickness + self.bonus_height / 2.0);
        let rotated_lift = Vec3::new(0.0, 0.0, self.thickness);
        let height = size.z + self.bonus_height;

        vec![
            Csg::centered_cuboid(Vec3::new(width / 8.0, width, height)).translate(center + vertical_lift),
            Csg::centered_cuboid(Vec3::new(width, width / 8.0, height)).translate(center + vertical_lift),
            Csg::centered_cuboid(Vec3::new(width / 2.0, width, width / 2.0))
                .rotate(Vec3::new(0.0, 45.0, 0.0))
                .translate(center + rotated_lift),
            Csg::centered_cuboid(Vec3::new(width, width / 2.0, width / 2.0))
                .rotate(Vec3::new(45.0, 0.0, 0.0))
                .translate(center + rotated_lift),
        ]
    }

    pub fn reduced_casing_solid(&self) -> Result<Csg> {
        Ok(self.casing_solid()?.difference(self.cutouts()))
    }

    /// Cube room center in casing coordinates.
    pub fn room_center(&self, i: usize, j: usize, k: usize) -> Option<Vec3> {
        Some(self.cube.room_center(i, j, k)? + self.cube_offset())
    }

    /// Straight slot from a room center through the casing wall facing `dir`.
    pub fn window_solid(&self, i: usize, j: usize, k: usize, dir: WindowDirection) -> Result<Csg> {
        let center = self
            .room_center(i, j, k)
            .ok_or(GeometryError::RoomOutOfRange { i, j, k })?;
        let extent = self.casing_size().component(dir.axis());
        let cross_section = self.cube.base_level().path_thickness() / 3.0;
        Ok(dir.slot(center, extent, cross_section, false))
    }

    /// One window per perimeter room and outer face, on every level.
    pub fn windows(&self) -> Vec<Csg> {
        let n = self.cube.base_level().grid_size();
        let mut windows = Vec::new();
        for k in 0..self.cube.size() {
            for m in 0..n {
                let faces = [
                    (0, m, WindowDirection::Xn),
                    (m, 0, WindowDirection::Yn),
                    (n - 1, m, WindowDirection::Xp),
                    (m, n - 1, WindowDirection::Yp),
                ];
                for (i, j, dir) in faces {
                    if let Ok(window) = self.window_solid(i, j, k, dir) {
                        windows.push(window);
                    }
                }
            }
        }
        windows
    }

    /// Casing with the requested optional features.
    pub fn solid(&self, options: CasingOptions) -> Result<Csg> {
        let mut removed = Vec::new();
        if options.cutouts {
            removed.extend(self.cutouts());
        }
        if options.windows {
            removed.extend(self.windows());
        }

        let shell = self.casing_solid()?;
        Ok(if removed.is_empty() {
            shell
        } else {
            shell.difference(removed)
        })
    }

    /// Casing built with `casing` and the cube, built with `level`, seated
    /// in its cavity.
    pub fn cube_in_casing_solid(&self, level: LevelOptions, casing: CasingOptions) -> Result<Csg> {
        Ok(Csg::union([
            self.solid(casing)?,
            self.cube.solid(level).translate(self.cube_offset()),
        ]))
    }
}
