// scad.rs - OpenSCAD source emission for CSG trees

use std::fmt::{self, Write};

use crate::csg::Csg;
use crate::types::{Vec2, Vec3};

const INDENT: &str = "  ";

/// OpenSCAD view of a CSG tree; usable directly in `write!`/`format!`.
#[derive(Debug, Clone, Copy)]
pub struct Scad<'a>(pub &'a Csg);

impl fmt::Display for Scad<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "// generated by labyrinth-cube")?;
        emit(f, self.0, 0)
    }
}

/// Render `csg` as a standalone OpenSCAD program.
pub fn to_scad(csg: &Csg) -> String {
    Scad(csg).to_string()
}

fn v2(v: Vec2) -> String {
    format!("[{}, {}]", v.x, v.y)
}

fn v3(v: Vec3) -> String {
    format!("[{}, {}, {}]", v.x, v.y, v.z)
}

fn emit<W: Write>(out: &mut W, csg: &Csg, depth: usize) -> fmt::Result {
    let pad = INDENT.repeat(depth);
    match csg {
        Csg::Rect { size } => writeln!(out, "{pad}square({});", v2(*size)),
        Csg::Cuboid { size, center } => writeln!(out, "{pad}cube({}, center = {center});", v3(*size)),
        Csg::Extrude { height, child } => {
            writeln!(out, "{pad}linear_extrude(height = {height})")?;
            emit(out, child, depth + 1)
        }
        Csg::Translate { offset, child } => {
            writeln!(out, "{pad}translate({})", v3(*offset))?;
            emit(out, child, depth + 1)
        }
        Csg::Rotate { degrees, child } => {
            writeln!(out, "{pad}rotate({})", v3(*degrees))?;
            emit(out, child, depth + 1)
        }
        Csg::Color { color, child } => {
            writeln!(
                out,
                "{pad}color([{}, {}, {}, {}])",
                color.r, color.g, color.b, color.a
            )?;
            emit(out, child, depth + 1)
        }
        Csg::Union { children } => block(out, "union()", children.iter(), depth),
        Csg::Difference { base, subtract } => block(
            out,
            "difference()",
            std::iter::once(base.as_ref()).chain(subtract.iter()),
            depth,
        ),
    }
}

fn block<'a, W: Write>(
    out: &mut W,
    head: &str,
    children: impl Iterator<Item = &'a Csg>,
    depth: usize,
) -> fmt::Result {
    let pad = INDENT.repeat(depth);
    let mut children = children.peekable();
    if children.peek().is_none() {
        return writeln!(out, "{pad}{head};");
    }
    writeln!(out, "{pad}{head} {{")?;
    for child in children {
        emit(out, child, depth + 1)?;
    }
    writeln!(out, "{pad}}}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    #[test]
    fn test_nested_output() {
        let csg = Csg::rect(Vec2::new(42.0, 42.0))
            .extrude(10.0)
            .difference([Csg::centered_cuboid(Vec3::new(1.5, 2.0, 3.0))
                .rotate(Vec3::new(45.0, 0.0, 0.0))
                .translate(Vec3::new(1.0, 2.0, 0.25))]);

        let expected = "\
// generated by labyrinth-cube
difference() {
  linear_extrude(height = 10)
    square([42, 42]);
  translate([1, 2, 0.25])
    rotate([45, 0, 0])
      cube([1.5, 2, 3], center = true);
}
";
        assert_eq!(to_scad(&csg), expected);
    }

    #[test]
    fn test_empty_union_and_color() {
        let csg = Csg::union([]).color(Color::rgb(1.0, 0.5, 0.0));
        assert_eq!(
            to_scad(&csg),
            "// generated by labyrinth-cube\ncolor([1, 0.5, 0, 1])\n  union();\n"
        );
    }

    #[test]
    fn test_display_streams_into_any_writer() {
        let csg = Csg::union([Csg::rect(Vec2::splat(1.0)), Csg::cuboid(Vec3::splat(2.0))]);
        let mut buf = String::from("// part\n");
        write!(buf, "{}", Scad(&csg)).unwrap();
        assert_eq!(buf, format!("// part\n{}", to_scad(&csg)));
        assert!(buf.contains("union() {\n  square([1, 1]);\n  cube([2, 2, 2], center = false);\n}\n"));
    }

    #[test]
    fn test_corner_anchored_box() {
        let out = to_scad(&Csg::cuboid(Vec3::splat(2.0)));
        assert!(out.ends_with("cube([2, 2, 2], center = false);\n"));
    }
}
