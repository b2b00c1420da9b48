// window.rs - Sightline slots from a room center to an outer face

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::csg::Csg;
use crate::error_handling::GeometryError;
use crate::types::Vec3;

/// Cardinal face a window slot opens onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowDirection {
    Xp,
    Xn,
    Yp,
    Yn,
}

impl WindowDirection {
    pub const ALL: [WindowDirection; 4] = [
        WindowDirection::Xn,
        WindowDirection::Yn,
        WindowDirection::Xp,
        WindowDirection::Yp,
    ];

    /// 0 for x slots, 1 for y slots
    #[inline]
    pub fn axis(self) -> usize {
        match self {
            WindowDirection::Xp | WindowDirection::Xn => 0,
            WindowDirection::Yp | WindowDirection::Yn => 1,
        }
    }

    /// Point on the outer face straight out from `center`, for a body spanning
    /// `[0, extent]` on the slot axis.
    pub fn outside_point(self, center: Vec3, extent: f64) -> Vec3 {
        let face = match self {
            WindowDirection::Xn | WindowDirection::Yn => 0.0,
            WindowDirection::Xp | WindowDirection::Yp => extent,
        };
        center.with_component(self.axis(), face)
    }

    /// Box running from `center` to the outer face with a square
    /// `cross_section`, optionally turned 45° about its own long axis.
    pub fn slot(self, center: Vec3, extent: f64, cross_section: f64, beveled: bool) -> Csg {
        let outside = self.outside_point(center, extent);
        let length = (outside - center).length();
        let size = Vec3::splat(cross_section).with_component(self.axis(), length);

        let mut slot = Csg::centered_cuboid(size);
        if beveled {
            slot = slot.rotate(Vec3::zero().with_component(self.axis(), 45.0));
        }
        slot.translate(center.midpoint(outside))
    }
}

impl FromStr for WindowDirection {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "xp" => Ok(WindowDirection::Xp),
            "xn" => Ok(WindowDirection::Xn),
            "yp" => Ok(WindowDirection::Yp),
            "yn" => Ok(WindowDirection::Yn),
            other => Err(GeometryError::UnknownDirection(other.to_string())),
        }
    }
}

impl fmt::Display for WindowDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WindowDirection::Xp => "xp",
            WindowDirection::Xn => "xn",
            WindowDirection::Yp => "yp",
            WindowDirection::Yn => "yn",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("yn".parse::<WindowDirection>().unwrap(), WindowDirection::Yn);
        let err = "zp".parse::<WindowDirection>().unwrap_err();
        assert!(matches!(err, GeometryError::UnknownDirection(ref s) if s == "zp"));
    }

    #[test]
    fn test_slot_spans_center_to_face() {
        let center = Vec3::new(7.0, 7.0, 6.0);
        let slot = WindowDirection::Xp.slot(center, 42.0, 3.0, false);
        match slot {
            Csg::Translate { offset, child } => {
                assert_eq!(offset, Vec3::new(24.5, 7.0, 6.0));
                assert_eq!(*child, Csg::centered_cuboid(Vec3::new(35.0, 3.0, 3.0)));
            }
            other => panic!("unexpected node {other:?}"),
        }
    }

    #[test]
    fn test_beveled_slot_rotates_about_long_axis() {
        let slot = WindowDirection::Yn.slot(Vec3::new(7.0, 7.0, 6.0), 42.0, 3.0, true);
        let mut rotations = Vec::new();
        slot.visit(&mut |n| {
            if let Csg::Rotate { degrees, .. } = n {
                rotations.push(*degrees);
            }
        });
        assert_eq!(rotations, vec![Vec3::new(0.0, 45.0, 0.0)]);
    }
}
