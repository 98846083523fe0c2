// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! MTL material serialization
//!
//! One named material per exported quad: full white ambient/diffuse
//! reflectance, full opacity, flat illumination, and a diffuse texture
//! map pointing at the externally rendered picture for that quad.

use std::io::{self, Write};

use rad_lite_core::Polygon;
use rad_lite_geometry::ViewSet;

use crate::config::ExportConfig;

/// Write the MTL block for every quad that has a view
pub fn write_mtl<W: Write>(
    out: &mut W,
    quads: &[Polygon],
    views: &ViewSet,
    config: &ExportConfig,
) -> io::Result<()> {
    writeln!(out, "# Parallel projection texture MTL file")?;
    writeln!(out, "# Generated by rad2views")?;
    writeln!(out)?;

    for quad in quads {
        if views.get(&quad.identifier).is_none() {
            continue;
        }
        writeln!(out, "newmtl {}", config.texture_name(&quad.identifier))?;
        writeln!(out, "Ka 1.000 1.000 1.000")?;
        writeln!(out, "Kd 1.000 1.000 1.000")?;
        writeln!(out, "d 1.0")?;
        writeln!(out, "illum 1")?;
        writeln!(out, "map_Kd {}", config.picture_file(&quad.identifier))?;
        writeln!(out)?;
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

    #[test]
    fn test_single_quad_block() {
        let quads = vec![quad(
            "wall.1",
            &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 3.0], [0.0, 0.0, 3.0]],
        )];
        let views = synthesize_views(&quads, &ViewConfig::default());
        let mut out = Vec::new();
        write_mtl(&mut out, &quads, &views, &ExportConfig::default()).unwrap();
        let mtl = String::from_utf8(out).unwrap();

        assert_eq!(mtl.matches("newmtl ").count(), 1);
        assert!(mtl.contains("newmtl scene_wall.1_texture"));
        assert!(mtl.contains("map_Kd scene_wall.1.hdr"));
        assert!(mtl.contains("Ka 1.000 1.000 1.000"));
        assert!(mtl.contains("d 1.0"));
        assert!(mtl.contains("illum 1"));
    }

    #[test]
    fn test_skipped_quad_gets_no_block() {
        let quads = vec![quad(
            "line",
            &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0], [3.0, 0.0, 0.0]],
        )];
        let views = synthesize_views(&quads, &ViewConfig::default());
        let mut out = Vec::new();
        write_mtl(&mut out, &quads, &views, &ExportConfig::default()).unwrap();
        let mtl = String::from_utf8(out).unwrap();
        assert_eq!(mtl.matches("newmtl").count(), 0);
    }
}
