// config.rs - Parameter bundles for a labyrinth cube build
// Named presets plus JSON files, both in the same camelCase layout.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error_handling::{GeometryError, Result};

/// Largest lattice edge accepted from presets, files or flags
pub const MAX_CUBE_SIZE: usize = 64;

pub const PRESET_NAMES: [&str; 7] = [
    "default", "config01", "config02", "config03", "config04", "config05", "config06",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LabyrinthConfig {
    /// Lattice edge length in cells
    pub cube_size: usize,
    pub seed: u64,
    pub level_wall_thickness: f64,
    pub level_path_thickness: f64,
    /// Vertical pitch of the printed stack
    pub level_spacing: f64,
    pub casing_wall_thickness: f64,
    pub casing_tolerance: f64,
    /// Vertical pitch of the exploded preview
    pub view_spacing: f64,
    pub add_windows: bool,
    pub casing_cutouts: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_branch: Option<usize>,
}

impl Default for LabyrinthConfig {
    fn default() -> Self {
        Self {
            cube_size: 4,
            seed: 6,
            level_wall_thickness: 2.0,
            level_path_thickness: 14.0,
            level_spacing: 17.0,
            casing_wall_thickness: 1.2,
            casing_tolerance: 0.6,
            view_spacing: 35.0,
            add_windows: false,
            casing_cutouts: true,
            max_branch: None,
        }
    }
}

impl LabyrinthConfig {
    pub fn preset(name: &str) -> Result<Self> {
        let base = Self::default();
        let config01 = Self {
            seed: 8,
            level_wall_thickness: 1.2,
            level_path_thickness: 15.0,
            ..base.clone()
        };

        let config = match name {
            "default" => base,
            "config01" => config01,
            "config02" => Self {
                seed: 17,
                level_wall_thickness: 1.6,
                level_path_thickness: 14.5,
                ..base
            },
            "config03" => Self {
                level_wall_thickness: 1.6,
                level_path_thickness: 14.5,
                level_spacing: 16.3,
                casing_tolerance: 0.3,
                ..config01
            },
            "config04" => Self {
                level_wall_thickness: 1.6,
                level_path_thickness: 14.5,
                cube_size: 9,
                ..base
            },
            "config05" => Self {
                seed: 8,
                cube_size: 10,
                level_wall_thickness: 1.2,
                level_path_thickness: 15.0,
                ..base
            },
            "config06" => Self {
                level_wall_thickness: 1.6,
                level_path_thickness: 14.5,
                cube_size: 4,
                level_spacing: 16.3,
                ..base
            },
            other => {
                return Err(GeometryError::invalid_config(format!(
                    "unknown preset '{other}', expected one of {}",
                    PRESET_NAMES.join(", ")
                )))
            }
        };
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Height of one level slab
    pub fn level_height(&self) -> f64 {
        self.level_wall_thickness + self.level_path_thickness
    }

    pub fn validate(&self) -> Result<()> {
        let fail = |reason: String| -> Result<()> { Err(GeometryError::invalid_config(reason)) };

        if self.cube_size == 0 || self.cube_size > MAX_CUBE_SIZE {
            return fail(format!(
                "cube size must be between 1 and {MAX_CUBE_SIZE}, got {}",
                self.cube_size
            ));
        }

        let lengths = [
            ("levelWallThickness", self.level_wall_thickness),
            ("levelPathThickness", self.level_path_thickness),
            ("levelSpacing", self.level_spacing),
            ("viewSpacing", self.view_spacing),
            ("casingWallThickness", self.casing_wall_thickness),
            ("casingTolerance", self.casing_tolerance),
        ];
        if let Some((name, value)) = lengths.iter().find(|(_, v)| !v.is_finite()) {
            return fail(format!("{name} must be a finite number, got {value}"));
        }
        if !(self.level_wall_thickness > 0.0) {
            return fail(format!("wall thickness must be positive, got {}", self.level_wall_thickness));
        }
        if !(self.level_path_thickness > 0.0) {
            return fail(format!("path thickness must be positive, got {}", self.level_path_thickness));
        }
        if self.level_spacing < self.level_height() {
            return fail(format!(
                "level spacing {} is smaller than the level height {}",
                self.level_spacing,
                self.level_height()
            ));
        }
        if self.view_spacing < self.level_height() {
            return fail(format!(
                "view spacing {} is smaller than the level height {}",
                self.view_spacing,
                self.level_height()
            ));
        }
        if !(self.casing_wall_thickness > 0.0) {
            return Err(GeometryError::InvalidCasingThickness(self.casing_wall_thickness));
        }
        if !(self.casing_tolerance >= 0.0) {
            return fail(format!("casing tolerance must not be negative, got {}", self.casing_tolerance));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        for name in PRESET_NAMES {
            let config = LabyrinthConfig::preset(name).unwrap();
            config.validate().unwrap_or_else(|e| panic!("{name}: {e}"));
        }
    }

    #[test]
    fn test_preset_inheritance() {
        let c3 = LabyrinthConfig::preset("config03").unwrap();
        // seed comes from config01
        assert_eq!(c3.seed, 8);
        assert_eq!(c3.level_wall_thickness, 1.6);
        assert_eq!(c3.casing_tolerance, 0.3);
        assert_eq!(c3.view_spacing, 35.0);

        let c5 = LabyrinthConfig::preset("config05").unwrap();
        assert_eq!(c5.cube_size, 10);
        assert_eq!(c5.level_spacing, 17.0);
    }

    #[test]
    fn test_unknown_preset() {
        let err = LabyrinthConfig::preset("config99").unwrap_err();
        assert!(err.to_string().contains("config99"));
    }

    #[test]
    fn test_validation_failures() {
        let base = LabyrinthConfig::default();

        let bad = LabyrinthConfig { cube_size: 0, ..base.clone() };
        assert!(matches!(bad.validate(), Err(GeometryError::InvalidConfig { .. })));

        let bad = LabyrinthConfig { level_spacing: 10.0, ..base.clone() };
        assert!(matches!(bad.validate(), Err(GeometryError::InvalidConfig { .. })));

        let bad = LabyrinthConfig { casing_wall_thickness: 0.0, ..base.clone() };
        assert!(matches!(bad.validate(), Err(GeometryError::InvalidCasingThickness(_))));

        let bad = LabyrinthConfig { casing_tolerance: -0.1, ..base };
        assert!(matches!(bad.validate(), Err(GeometryError::InvalidConfig { .. })));
    }

    #[test]
    fn test_validation_rejects_non_finite() {
        let base = LabyrinthConfig::default();
        let cases = [
            LabyrinthConfig { level_spacing: f64::NAN, ..base.clone() },
            LabyrinthConfig { level_spacing: f64::INFINITY, ..base.clone() },
            LabyrinthConfig { view_spacing: f64::INFINITY, ..base.clone() },
            LabyrinthConfig { level_wall_thickness: f64::INFINITY, ..base.clone() },
            LabyrinthConfig { level_path_thickness: f64::NAN, ..base.clone() },
            LabyrinthConfig { casing_wall_thickness: f64::INFINITY, ..base.clone() },
            LabyrinthConfig { casing_tolerance: f64::INFINITY, ..base.clone() },
            LabyrinthConfig { casing_tolerance: f64::NAN, ..base },
        ];
        for config in cases {
            let err = config.validate().unwrap_err();
            assert!(
                matches!(err, GeometryError::InvalidConfig { ref reason } if reason.contains("finite")),
                "{config:?} gave {err}"
            );
        }
    }

    #[test]
    fn test_validation_caps_cube_size() {
        let at_cap = LabyrinthConfig { cube_size: MAX_CUBE_SIZE, ..LabyrinthConfig::default() };
        assert!(at_cap.validate().is_ok());

        let huge = LabyrinthConfig { cube_size: 3_000_000, ..LabyrinthConfig::default() };
        assert!(matches!(huge.validate(), Err(GeometryError::InvalidConfig { .. })));
    }

    #[test]
    fn test_json_field_names() {
        let json = LabyrinthConfig::default().to_json_string().unwrap();
        assert!(json.contains("\"levelWallThickness\""));
        assert!(json.contains("\"casingCutouts\""));
        assert!(!json.contains("maxBranch"));

        let partial: LabyrinthConfig =
            serde_json::from_str(r#"{ "cubeSize": 3, "maxBranch": 2 }"#).unwrap();
        assert_eq!(partial.cube_size, 3);
        assert_eq!(partial.max_branch, Some(2));
        assert_eq!(partial.seed, 6);
    }

    #[test]
    fn test_json_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cube.json");
        let config = LabyrinthConfig::preset("config02").unwrap();
        std::fs::write(&path, config.to_json_string().unwrap()).unwrap();

        assert_eq!(LabyrinthConfig::from_json_file(&path).unwrap(), config);
        assert!(matches!(
            LabyrinthConfig::from_json_file(dir.path().join("missing.json")),
            Err(GeometryError::Io(_))
        ));
    }
}
