// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end pipeline
//!
//! Sequencing only, no geometry of its own: parse the scene, classify
//! polygons by vertex count, reconstruct quads from split triangles,
//! synthesize one parallel-projection view per quad, and serialize the
//! OBJ/MTL pair. Everything that goes wrong below the run level is
//! collected into the summary for reporting.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use rad_lite_core::{Polygon, Scene, SkippedRecord};
use rad_lite_geometry::{reconstruct, synthesize_views, ViewSet};

use crate::config::ExportConfig;
use crate::error::{Error, Result};
use crate::{mtl, obj};

/// Everything a caller needs to report on a finished run
#[derive(Debug)]
pub struct RunSummary {
    /// Direct and reconstructed quads, in export order
    pub quads: Vec<Polygon>,
    /// Synthesized views and the per-quad skip report
    pub views: ViewSet,
    /// Identifiers of triangles that found no merge partner
    pub unmatched: Vec<String>,
    /// Identifiers of polygons with an invalid vertex count
    pub invalid_polygons: Vec<String>,
    /// Records the parser reported and skipped
    pub skipped_records: Vec<SkippedRecord>,
    /// Number of materials read from the scene
    pub material_count: usize,
    /// Written output files
    pub obj_path: PathBuf,
    pub mtl_path: PathBuf,
}

/// Split polygons into quads and triangles by vertex count
///
/// Any other count is invalid input; those identifiers are returned for
/// reporting and the polygons dropped.
fn classify(polygons: Vec<Polygon>) -> (Vec<Polygon>, Vec<Polygon>, Vec<String>) {
    let mut quads = Vec::new();
    let mut triangles = Vec::new();
    let mut invalid = Vec::new();

    for polygon in polygons {
        match polygon.vertex_count() {
            3 => triangles.push(polygon),
            4 => quads.push(polygon),
            _ => invalid.push(polygon.identifier),
        }
    }

    (quads, triangles, invalid)
}

/// Run the whole pipeline over one input file
pub fn run(input_path: &Path, config: &ExportConfig) -> Result<RunSummary> {
    let source = std::fs::read_to_string(input_path).map_err(|source| Error::Read {
        path: input_path.to_path_buf(),
        source,
    })?;

    let scene = Scene::from_source(&source);
    let material_count = scene.materials.len();
    let skipped_records = scene.skipped;

    let (mut quads, triangles, invalid_polygons) = classify(scene.polygons);
    let reconstruction = reconstruct(triangles, config.view.epsilon)?;
    let unmatched = reconstruction
        .unmatched
        .iter()
        .map(|t| t.identifier.clone())
        .collect();
    quads.extend(reconstruction.quads);

    let views = synthesize_views(&quads, &config.view);

    let obj_path = config.obj_path();
    let file = File::create(&obj_path).map_err(|source| Error::Write {
        path: obj_path.clone(),
        source,
    })?;
    obj::write_obj(&mut BufWriter::new(file), &quads, &views, config).map_err(|source| {
        Error::Write {
            path: obj_path.clone(),
            source,
        }
    })?;

    let mtl_path = config.mtl_path();
    let file = File::create(&mtl_path).map_err(|source| Error::Write {
        path: mtl_path.clone(),
        source,
    })?;
    mtl::write_mtl(&mut BufWriter::new(file), &quads, &views, config).map_err(|source| {
        Error::Write {
            path: mtl_path.clone(),
            source,
        }
    })?;

    Ok(RunSummary {
        quads,
        views,
        unmatched,
        invalid_polygons,
        skipped_records,
        material_count,
        obj_path,
        mtl_path,
    })
}
