// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! OBJ mesh serialization
//!
//! One quadrilateral face per exported quad: a material selection, four
//! vertex positions, four texture coordinates, four (identical) normals,
//! and a face record over the four most recent indices. Quads whose view
//! synthesis failed are excluded entirely so no zero-area or normal-less
//! face reaches downstream tooling.

use std::io::{self, Write};

use rad_lite_core::Polygon;
use rad_lite_geometry::{quad_normal, slices_approx_eq, ViewSet};

use crate::config::ExportConfig;

/// Texture coordinates when the view's up vector matches the scene up
const UV_SCENE_UP: [[u8; 2]; 4] = [[0, 0], [1, 0], [1, 1], [0, 1]];
/// Rotated texture coordinates for views whose up vector fell back
const UV_FALLBACK: [[u8; 2]; 4] = [[1, 0], [1, 1], [0, 1], [0, 0]];

/// Write the OBJ mesh for every quad that has a view
pub fn write_obj<W: Write>(
    out: &mut W,
    quads: &[Polygon],
    views: &ViewSet,
    config: &ExportConfig,
) -> io::Result<()> {
    writeln!(out, "# Parallel projection OBJ file")?;
    writeln!(out, "# Generated by rad2views")?;
    writeln!(out)?;
    writeln!(out, "mtllib {}.mtl", config.base_name)?;
    writeln!(out)?;

    let mut face_index: u32 = 1;
    for quad in quads {
        let view = match views.get(&quad.identifier) {
            Some(view) => view,
            None => continue, // skipped quads get no face record
        };
        let normal = match quad_normal(quad) {
            Some(normal) => normal,
            None => continue,
        };

        writeln!(out, "usemtl {}", config.texture_name(&quad.identifier))?;

        for vertex in quad.vertices.iter().take(4) {
            writeln!(out, "v {:.3} {:.3} {:.3}", vertex[0], vertex[1], vertex[2])?;
        }

        let up_matches = slices_approx_eq(
            view.up.as_slice(),
            config.view.scene_up.as_slice(),
            config.view.epsilon,
        );
        let uvs = if up_matches { &UV_SCENE_UP } else { &UV_FALLBACK };
        for uv in uvs {
            writeln!(out, "vt {} {}", uv[0], uv[1])?;
        }

        for _ in 0..4 {
            writeln!(out, "vn {:.3} {:.3} {:.3}", normal.x, normal.y, normal.z)?;
        }

        writeln!(
            out,
            "f {0}/{0}/{0} {1}/{1}/{1} {2}/{2}/{2} {3}/{3}/{3}",
            face_index,
            face_index + 1,
            face_index + 2,
            face_index + 3,
        )?;
        writeln!(out)?;
        face_index += 4;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rad_lite_geometry::{synthesize_views, ViewConfig};

    fn quad(identifier: &str, vertices: &[[f64; 3]; 4]) -> Polygon {
        Polygon {
            identifier: identifier.to_string(),
            vertices: vertices.to_vec(),
            modifier: None,
        }
    }

    fn render(quads: &[Polygon]) -> String {
        let config = ExportConfig::default();
        let views = synthesize_views(quads, &ViewConfig::default());
        let mut out = Vec::new();
        write_obj(&mut out, quads, &views, &config).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_single_quad_record_counts() {
        let quads = vec![quad(
            "wall.1",
            &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 3.0], [0.0, 0.0, 3.0]],
        )];
        let obj = render(&quads);
        assert_eq!(obj.matches("\nv ").count(), 4);
        assert_eq!(obj.matches("vt ").count(), 4);
        assert_eq!(obj.matches("vn ").count(), 4);
        assert_eq!(obj.matches("\nf ").count(), 1);
        assert!(obj.contains("mtllib scene.mtl"));
        assert!(obj.contains("usemtl scene_wall.1_texture"));
        assert!(obj.contains("f 1/1/1 2/2/2 3/3/3 4/4/4"));
    }

    #[test]
    fn test_face_indices_advance_by_four() {
        let quads = vec![
            quad(
                "wall.1",
                &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 3.0], [0.0, 0.0, 3.0]],
            ),
            quad(
                "wall.2",
                &[[0.0, 1.0, 0.0], [1.0, 1.0, 0.0], [1.0, 1.0, 3.0], [0.0, 1.0, 3.0]],
            ),
        ];
        let obj = render(&quads);
        assert!(obj.contains("f 1/1/1 2/2/2 3/3/3 4/4/4"));
        assert!(obj.contains("f 5/5/5 6/6/6 7/7/7 8/8/8"));
    }

    #[test]
    fn test_up_match_selects_uv_pattern() {
        // Wall view keeps scene up: first pattern starts at (0,0)
        let wall = vec![quad(
            "wall",
            &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 3.0], [0.0, 0.0, 3.0]],
        )];
        assert!(render(&wall).contains("vt 0 0\nvt 1 0\nvt 1 1\nvt 0 1"));

        // Floor view falls back to +Y: rotated pattern
        let floor = vec![quad(
            "floor",
            &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
        )];
        assert!(render(&floor).contains("vt 1 0\nvt 1 1\nvt 0 1\nvt 0 0"));
    }

    #[test]
    fn test_degenerate_quad_gets_no_face() {
        let quads = vec![
            quad(
                "line",
                &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0], [3.0, 0.0, 0.0]],
            ),
            quad(
                "wall",
                &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 3.0], [0.0, 0.0, 3.0]],
            ),
        ];
        let obj = render(&quads);
        assert_eq!(obj.matches("\nf ").count(), 1);
        assert!(!obj.contains("line"));
        // The surviving quad still starts its face numbering at 1
        assert!(obj.contains("f 1/1/1 2/2/2 3/3/3 4/4/4"));
    }
}
