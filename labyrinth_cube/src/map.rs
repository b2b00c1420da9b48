// map.rs - Flattened level map for documentation
// Levels are tiled top level first, left to right, then downward.

use image::{Rgba, RgbaImage};
use log::debug;

use crate::csg::Csg;
use crate::cube::CubeAssembly;
use crate::error_handling::{GeometryError, Result};
use crate::level::{FeatureKind, LevelOptions};
use crate::types::{Color, Vec2};

/// Gap between neighbouring tiles
pub const DEFAULT_MAP_SPACING: f64 = 10.0;

const BACKGROUND: Color = Color::rgb(1.0, 1.0, 1.0);
const WALL: Color = Color::rgb(0.18, 0.2, 0.24);
const ROOM: Color = Color::rgb(0.93, 0.92, 0.88);
const SHAFT: Color = Color::rgb(0.25, 0.5, 0.9);

pub struct MapLayout<'a> {
    cube: &'a CubeAssembly,
    spacing: f64,
}

impl<'a> MapLayout<'a> {
    pub fn new(cube: &'a CubeAssembly) -> Self {
        Self {
            cube,
            spacing: DEFAULT_MAP_SPACING,
        }
    }

    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    /// Tiles per row and column
    pub fn dim(&self) -> usize {
        let count = self.cube.size();
        let mut d = (count as f64).sqrt() as usize;
        while d * d < count {
            d += 1;
        }
        d
    }

    pub fn step(&self) -> f64 {
        self.cube.base_level().level_size_xy() + self.spacing
    }

    pub fn overall_width(&self) -> f64 {
        self.dim() as f64 * self.step() - self.spacing
    }

    /// Lower-left corner of every tile, paired with the level index it shows.
    pub fn tiles(&self) -> Vec<(usize, Vec2)> {
        let d = self.dim();
        let step = self.step();
        let top = self.cube.size() - 1;

        (0..self.cube.size())
            .map(|t| {
                let (col, row) = (t % d, t / d);
                let origin = Vec2::new(col as f64 * step, (d - 1 - row) as f64 * step);
                (top - t, origin)
            })
            .collect()
    }

    pub fn solid_layout(&self, options: LevelOptions) -> Csg {
        let levels = self.cube.levels();
        Csg::union(
            self.tiles()
                .into_iter()
                .map(|(k, origin)| levels[k].solid(options).translate(origin)),
        )
    }

    /// Top-down raster of the same tiling, `scale` pixels per unit.
    pub fn render_preview(&self, scale: f64) -> Result<RgbaImage> {
        if !(scale > 0.0) {
            return Err(GeometryError::invalid_config(format!(
                "map preview scale must be positive, got {scale}"
            )));
        }

        let side = (self.overall_width() * scale).ceil().max(1.0) as u32;
        debug!("Rendering {side}x{side} map preview");
        let mut img = RgbaImage::from_pixel(side, side, Rgba(BACKGROUND.to_rgba8()));
        let levels = self.cube.levels();
        let slab = Vec2::splat(self.cube.base_level().level_size_xy());

        for (k, origin) in self.tiles() {
            fill_rect(&mut img, scale, origin, slab, WALL);
            for fp in levels[k].footprints() {
                let color = match fp.kind {
                    FeatureKind::Room | FeatureKind::Connector => ROOM,
                    FeatureKind::Shaft => SHAFT,
                };
                fill_rect(&mut img, scale, origin + fp.min, fp.size, color);
            }
        }
        Ok(img)
    }
}

/// Paint a world-space rectangle; image rows grow downward, world y upward.
fn fill_rect(img: &mut RgbaImage, scale: f64, min: Vec2, size: Vec2, color: Color) {
    let (w, h) = (img.width() as i64, img.height() as i64);
    let clamp = |v: f64, hi: i64| (v as i64).clamp(0, hi) as u32;

    let x0 = clamp((min.x * scale).floor(), w);
    let x1 = clamp(((min.x + size.x) * scale).ceil(), w);
    let y0 = clamp(h as f64 - ((min.y + size.y) * scale).ceil(), h);
    let y1 = clamp(h as f64 - (min.y * scale).floor(), h);

    let pixel = Rgba(color.to_rgba8());
    for y in y0..y1 {
        for x in x0..x1 {
            img.put_pixel(x, y, pixel);
        }
    }
}
