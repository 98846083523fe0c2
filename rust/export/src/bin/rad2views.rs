// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI tool: Convert a Radiance scene into parallel-projection views
//! plus a textured OBJ/MTL mesh for texture baking.
//!
//! Usage:
//!   rad2views <scene.rad> [options]

use std::process;

use rad_lite_export::{parse_args, run, Command};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let (input, config) = match parse_args(&args) {
        Ok(Command::Run { input, config }) => (input, config),
        Ok(Command::Help) => {
            print_usage();
            return;
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            process::exit(1);
        }
    };

    let up = config.view.scene_up;
    println!("Scene up direction: [{}, {}, {}]", up.x, up.y, up.z);

    let summary = run(&input, &config).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    for record in &summary.skipped_records {
        println!(
            "Warning: skipped '{}': {}. If this is a material, it is not one of the recognized kinds.",
            record.description, record.reason
        );
    }
    for identifier in &summary.invalid_polygons {
        println!(
            "Warning: polygon '{}' is neither a triangle nor a quad",
            identifier
        );
    }

    if !summary.unmatched.is_empty() {
        println!(
            "The following {} triangle(s) couldn't be formed into quads: {}",
            summary.unmatched.len(),
            summary.unmatched.join(" ")
        );
    }
    for (identifier, reason) in &summary.views.skipped {
        println!("Error: {}: {}", identifier, reason);
    }

    println!();
    println!("-----Radiance Parallel Views-----");
    for view in summary.views.iter() {
        println!("view={} {}", view.identifier, view.to_radiance());
    }
    println!("----------");
    println!();
    println!(
        "Total view count: {}, Total quad count: {}, Materials: {}",
        summary.views.len(),
        summary.quads.len(),
        summary.material_count
    );
    println!("Created {}", summary.obj_path.display());
    println!("Created {}", summary.mtl_path.display());
}

fn print_usage() {
    println!(
        r#"Radiance to Parallel Projection Views
=====================================

Reconstructs quads from a Radiance scene, derives one parallel
projection view per quad, and writes a textured OBJ/MTL mesh whose
materials reference the views' rendered pictures.

USAGE:
  rad2views <scene.rad> [OPTIONS]

ARGUMENTS:
  <scene.rad>        Radiance scene description (must end in .rad)

OPTIONS:
  --output <base>    Base name for the OBJ/MTL files (default: scene)
  --prefix <name>    Prefix of the rendered pictures, i.e. the final
                     non-directory portion of a RIF PICTURE entry
                     (default: scene)
  --offset <f>       Eye offset off the quad plane (default: 0.1)
  --up <axis>        Scene up: an axis name (x, y, z, -x, -y, -z) or
                     an x,y,z component triple (default: z)
  --epsilon <f>      Geometric tolerance for vertex matching and
                     degenerate-extent tests (default: 0.0001)
  -h, --help         Show this help message

OUTPUT:
  <base>.obj         One textured quadrilateral face per quad
  <base>.mtl         One material per quad, mapping <prefix>_<id>.hdr
  stdout             One Radiance view line per quad, plus a report of
                     everything that could not be converted
"#
    );
}
