// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end pipeline tests over real `.rad` input files

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use rad_lite_export::{run, ExportConfig};

/// Unit square in the XY plane split along the diagonal, plus a material
const SPLIT_SQUARE: &str = "\
void plastic red
0
0
5 0.7 0.05 0.05 0.05 0.02

red polygon floor.1
0
0
9 0 0 0  1 0 0  1 1 0

red polygon floor.2
0
0
9 0 0 0  1 1 0  0 1 0
";

fn setup(source: &str) -> (TempDir, PathBuf, ExportConfig) {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("scene.rad");
    fs::write(&input, source).unwrap();
    let config = ExportConfig {
        base_name: dir.path().join("scene").to_string_lossy().into_owned(),
        ..ExportConfig::default()
    };
    (dir, input, config)
}

#[test]
fn test_split_square_round_trip() {
    let (_dir, input, config) = setup(SPLIT_SQUARE);
    let summary = run(&input, &config).unwrap();

    assert_eq!(summary.quads.len(), 1);
    assert!(summary.unmatched.is_empty());
    assert_eq!(summary.material_count, 1);

    let view = summary.views.get("floor.1").unwrap();
    assert!((view.h_size - 1.0).abs() < 1e-9);
    assert!((view.v_size - 1.0).abs() < 1e-9);
    assert!((view.position.x - 0.5).abs() < 1e-9);
    assert!((view.position.y - 0.5).abs() < 1e-9);
    // In-plane quad: the eye sits off the surface along the normal
    assert!((view.position.z.abs() - 0.1).abs() < 1e-9);
    assert!((view.direction.z.abs() - 1.0).abs() < 1e-9);
}

#[test]
fn test_split_square_output_files() {
    let (_dir, input, config) = setup(SPLIT_SQUARE);
    let summary = run(&input, &config).unwrap();

    let obj = fs::read_to_string(&summary.obj_path).unwrap();
    assert_eq!(obj.matches("\nv ").count(), 4);
    assert_eq!(obj.matches("vt ").count(), 4);
    assert_eq!(obj.matches("vn ").count(), 4);
    assert_eq!(obj.matches("\nf ").count(), 1);
    assert!(obj.contains("usemtl scene_floor.1_texture"));

    let mtl = fs::read_to_string(&summary.mtl_path).unwrap();
    assert_eq!(mtl.matches("newmtl ").count(), 1);
    assert!(mtl.contains("newmtl scene_floor.1_texture"));
    assert!(mtl.contains("map_Kd scene_floor.1.hdr"));
}

#[test]
fn test_lone_triangle_reported() {
    let source = "\
void plastic red
0
0
5 0.7 0.05 0.05 0.05 0.02

red polygon lonely
0
0
9 0 0 0  1 0 0  1 1 0
";
    let (_dir, input, config) = setup(source);
    let summary = run(&input, &config).unwrap();

    assert!(summary.quads.is_empty());
    assert!(summary.views.is_empty());
    assert_eq!(summary.unmatched, vec!["lonely".to_string()]);

    // No faces, no materials in the outputs
    let obj = fs::read_to_string(&summary.obj_path).unwrap();
    assert_eq!(obj.matches("\nf ").count(), 0);
    let mtl = fs::read_to_string(&summary.mtl_path).unwrap();
    assert_eq!(mtl.matches("newmtl").count(), 0);
}

#[test]
fn test_direct_quad_and_unrecognized_record() {
    let source = "\
void light lamp
0
0
3 100 100 100

void metal steel
0
0
5 0.8 0.8 0.8 0.9 0.01

steel polygon panel
0
0
12 0 0 0  2 0 0  2 0 1  0 0 1
";
    let (_dir, input, config) = setup(source);
    let summary = run(&input, &config).unwrap();

    assert_eq!(summary.quads.len(), 1);
    assert_eq!(summary.views.len(), 1);
    assert_eq!(summary.skipped_records.len(), 1);
    assert!(summary.skipped_records[0].description.contains("lamp"));

    let view = summary.views.get("panel").unwrap();
    assert!((view.h_size - 2.0).abs() < 1e-9);
    assert!((view.v_size - 1.0).abs() < 1e-9);
}

#[test]
fn test_determinism_across_runs() {
    let (_dir, input, config) = setup(SPLIT_SQUARE);
    let first = run(&input, &config).unwrap();
    let obj_a = fs::read_to_string(&first.obj_path).unwrap();
    let mtl_a = fs::read_to_string(&first.mtl_path).unwrap();
    let second = run(&input, &config).unwrap();
    let obj_b = fs::read_to_string(&second.obj_path).unwrap();
    let mtl_b = fs::read_to_string(&second.mtl_path).unwrap();

    assert_eq!(obj_a, obj_b);
    assert_eq!(mtl_a, mtl_b);
    let lines_a: Vec<String> = first
        .views
        .iter()
        .map(|v| format!("view={} {}", v.identifier, v.to_radiance()))
        .collect();
    let lines_b: Vec<String> = second
        .views
        .iter()
        .map(|v| format!("view={} {}", v.identifier, v.to_radiance()))
        .collect();
    assert_eq!(lines_a, lines_b);
}

#[test]
fn test_missing_input_is_fatal() {
    let dir = TempDir::new().unwrap();
    let config = ExportConfig {
        base_name: dir.path().join("scene").to_string_lossy().into_owned(),
        ..ExportConfig::default()
    };
    let missing = dir.path().join("nope.rad");
    assert!(run(&missing, &config).is_err());
}
