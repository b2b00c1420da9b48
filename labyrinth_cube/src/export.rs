// export.rs - Writes generated parts to disk
// OpenSCAD sources, JSON trees, PNG previews and optional STL meshes via an
// external `openscad` binary.

use image::{ImageFormat, RgbaImage};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::csg::Csg;
use crate::error_handling::{GeometryError, Result};
use crate::scad::to_scad;

pub const DEFAULT_RENDERER: &str = "openscad";

#[derive(Debug, Clone)]
pub struct Exporter {
    output_dir: PathBuf,
    stl: bool,
    json: bool,
    renderer: String,
}

impl Exporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            stl: false,
            json: false,
            renderer: DEFAULT_RENDERER.to_string(),
        }
    }

    /// Also mesh every written part through the renderer.
    pub fn with_stl(mut self, stl: bool) -> Self {
        self.stl = stl;
        self
    }

    /// Also dump every written part as a JSON CSG tree.
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn with_renderer(mut self, program: impl Into<String>) -> Self {
        self.renderer = program.into();
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn prepare(&self, file_name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;
        Ok(self.output_dir.join(file_name))
    }

    /// Write `<name>.scad` and, if enabled, `<name>.json` and `<name>.stl`.
    /// Returns the paths written.
    pub fn write_part(&self, name: &str, csg: &Csg) -> Result<Vec<PathBuf>> {
        if csg.is_empty() {
            warn!("Part '{name}' has no geometry");
        }

        let mut written = Vec::new();
        let scad_path = self.write_scad(name, csg)?;
        written.push(scad_path.clone());

        if self.json {
            written.push(self.write_json(name, csg)?);
        }
        if self.stl {
            written.push(self.render_stl(&scad_path)?);
        }
        Ok(written)
    }

    pub fn write_scad(&self, name: &str, csg: &Csg) -> Result<PathBuf> {
        let path = self.prepare(&format!("{name}.scad"))?;
        fs::write(&path, to_scad(csg))?;
        info!("Wrote {}", path.display());
        Ok(path)
    }

    pub fn write_json(&self, name: &str, csg: &Csg) -> Result<PathBuf> {
        let path = self.prepare(&format!("{name}.json"))?;
        fs::write(&path, serde_json::to_string_pretty(csg)?)?;
        info!("Wrote {}", path.display());
        Ok(path)
    }

    pub fn write_png(&self, name: &str, img: &RgbaImage) -> Result<PathBuf> {
        let path = self.prepare(&format!("{name}.png"))?;
        img.save_with_format(&path, ImageFormat::Png)?;
        info!("Wrote {} ({}x{})", path.display(), img.width(), img.height());
        Ok(path)
    }

    /// Run `<renderer> -o <name>.stl <name>.scad` next to the source file.
    pub fn render_stl(&self, scad_path: &Path) -> Result<PathBuf> {
        let stl_path = scad_path.with_extension("stl");
        info!("Rendering {} with {}", stl_path.display(), self.renderer);

        let status = Command::new(&self.renderer)
            .arg("-o")
            .arg(&stl_path)
            .arg(scad_path)
            .status()?;

        if !status.success() {
            return Err(GeometryError::RendererFailed {
                program: self.renderer.clone(),
                status: status.to_string(),
            });
        }
        Ok(stl_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Vec3;

    fn part() -> Csg {
        Csg::cuboid(Vec3::splat(1.0)).translate(Vec3::new(1.0, 0.0, 0.0))
    }

    #[test]
    fn test_write_scad_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = Exporter::new(dir.path().join("out"));

        let written = exporter.write_part("level0", &part()).unwrap();
        assert_eq!(written.len(), 1);
        let text = fs::read_to_string(&written[0]).unwrap();
        assert!(text.contains("translate([1, 0, 0])"));
        assert!(written[0].ends_with("out/level0.scad"));
    }

    #[test]
    fn test_json_dump_parses_back() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = Exporter::new(dir.path()).with_json(true);

        let written = exporter.write_part("cube", &part()).unwrap();
        assert_eq!(written.len(), 2);
        let back: Csg = serde_json::from_str(&fs::read_to_string(&written[1]).unwrap()).unwrap();
        assert_eq!(back, part());
    }

    #[test]
    fn test_png_written() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = Exporter::new(dir.path());
        let img = RgbaImage::new(4, 3);

        let path = exporter.write_png("map", &img).unwrap();
        let loaded = image::open(&path).unwrap();
        assert_eq!((loaded.width(), loaded.height()), (4, 3));
    }

    #[test]
    fn test_missing_renderer_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = Exporter::new(dir.path())
            .with_stl(true)
            .with_renderer("labyrinth-cube-no-such-renderer");

        let err = exporter.write_part("casing", &part()).unwrap_err();
        assert!(matches!(err, GeometryError::Io(_)));
        // The source is still on disk
        assert!(dir.path().join("casing.scad").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_renderer_reported() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = Exporter::new(dir.path()).with_renderer("false");
        let scad = exporter.write_scad("casing", &part()).unwrap();

        let err = exporter.render_stl(&scad).unwrap_err();
        assert!(matches!(err, GeometryError::RendererFailed { ref program, .. } if program == "false"));
    }
}
