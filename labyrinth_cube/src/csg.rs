// csg.rs - Backend-independent constructive solid geometry expression tree
// The geometry layer only ever builds these nodes; `scad` and the JSON dump turn
// them into something an external renderer understands.

use serde::{Deserialize, Serialize};

use crate::types::{Color, Vec2, Vec3};

/// One node of the CSG tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Csg {
    /// 2D rectangle with its minimum corner at the origin
    Rect { size: Vec2 },
    /// 3D box, either corner-anchored or centered on the origin
    #[serde(rename = "box")]
    Cuboid { size: Vec3, center: bool },
    /// Extrude a 2D child along +z
    Extrude { height: f64, child: Box<Csg> },
    Translate { offset: Vec3, child: Box<Csg> },
    /// Rotation in degrees about x, then y, then z
    Rotate { degrees: Vec3, child: Box<Csg> },
    Union { children: Vec<Csg> },
    /// `base` minus every node in `subtract`
    Difference { base: Box<Csg>, subtract: Vec<Csg> },
    /// Highlight annotation; geometry of `child` is unchanged
    Color { color: Color, child: Box<Csg> },
}

impl Csg {
    pub fn rect(size: Vec2) -> Csg {
        Csg::Rect { size }
    }

    pub fn cuboid(size: Vec3) -> Csg {
        Csg::Cuboid { size, center: false }
    }

    pub fn centered_cuboid(size: Vec3) -> Csg {
        Csg::Cuboid { size, center: true }
    }

    pub fn union<I: IntoIterator<Item = Csg>>(children: I) -> Csg {
        Csg::Union {
            children: children.into_iter().collect(),
        }
    }

    pub fn extrude(self, height: f64) -> Csg {
        Csg::Extrude {
            height,
            child: Box::new(self),
        }
    }

    pub fn translate(self, offset: impl Into<Vec3>) -> Csg {
        Csg::Translate {
            offset: offset.into(),
            child: Box::new(self),
        }
    }

    pub fn rotate(self, degrees: Vec3) -> Csg {
        Csg::Rotate {
            degrees,
            child: Box::new(self),
        }
    }

    pub fn difference<I: IntoIterator<Item = Csg>>(self, subtract: I) -> Csg {
        Csg::Difference {
            base: Box::new(self),
            subtract: subtract.into_iter().collect(),
        }
    }

    pub fn color(self, color: Color) -> Csg {
        Csg::Color {
            color,
            child: Box::new(self),
        }
    }

    /// Direct children, in evaluation order.
    pub fn children(&self) -> Vec<&Csg> {
        match self {
            Csg::Rect { .. } | Csg::Cuboid { .. } => Vec::new(),
            Csg::Extrude { child, .. }
            | Csg::Translate { child, .. }
            | Csg::Rotate { child, .. }
            | Csg::Color { child, .. } => vec![child.as_ref()],
            Csg::Union { children } => children.iter().collect(),
            Csg::Difference { base, subtract } => {
                std::iter::once(base.as_ref()).chain(subtract.iter()).collect()
            }
        }
    }

    /// Depth-first pre-order walk.
    pub fn visit<F: FnMut(&Csg)>(&self, f: &mut F) {
        f(self);
        for child in self.children() {
            child.visit(f);
        }
    }

    /// Number of nodes in the tree matching `pred`.
    pub fn count_where(&self, pred: impl Fn(&Csg) -> bool) -> usize {
        let mut count = 0;
        self.visit(&mut |node| {
            if pred(node) {
                count += 1;
            }
        });
        count
    }

    /// Number of leaf shapes (rectangles and boxes).
    pub fn primitive_count(&self) -> usize {
        self.count_where(|n| matches!(n, Csg::Rect { .. } | Csg::Cuboid { .. }))
    }

    /// Empty unions render to nothing.
    pub fn is_empty(&self) -> bool {
        match self {
            Csg::Union { children } => children.iter().all(Csg::is_empty),
            Csg::Translate { child, .. } | Csg::Rotate { child, .. } | Csg::Color { child, .. } => {
                child.is_empty()
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_nesting() {
        let solid = Csg::rect(Vec2::new(2.0, 3.0))
            .extrude(4.0)
            .translate(Vec3::new(1.0, 0.0, 0.0));

        match &solid {
            Csg::Translate { offset, child } => {
                assert_eq!(*offset, Vec3::new(1.0, 0.0, 0.0));
                assert!(matches!(child.as_ref(), Csg::Extrude { height, .. } if *height == 4.0));
            }
            other => panic!("unexpected node {other:?}"),
        }
        assert_eq!(solid.primitive_count(), 1);
    }

    #[test]
    fn test_difference_children_order() {
        let base = Csg::cuboid(Vec3::splat(10.0));
        let hole = Csg::centered_cuboid(Vec3::splat(1.0));
        let diff = base.clone().difference([hole.clone(), hole]);
        let children = diff.children();
        assert_eq!(children.len(), 3);
        assert_eq!(children[0], &base);
        assert_eq!(diff.primitive_count(), 3);
    }

    #[test]
    fn test_empty_detection() {
        assert!(Csg::union([]).is_empty());
        assert!(Csg::union([Csg::union([])]).translate(Vec3::splat(1.0)).is_empty());
        assert!(!Csg::union([Csg::cuboid(Vec3::splat(1.0))]).is_empty());
    }

    #[test]
    fn test_json_tags() {
        let node = Csg::centered_cuboid(Vec3::new(1.0, 2.0, 3.0));
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["op"], "box");
        assert_eq!(json["center"], true);

        let back: Csg = serde_json::from_value(json).unwrap();
        assert_eq!(back, node);
    }
}
