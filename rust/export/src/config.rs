// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Export configuration
//!
//! All run-wide settings live here and get passed into the pipeline
//! entry point; there is no process-wide mutable state.

use std::path::PathBuf;

use rad_lite_geometry::ViewConfig;

/// Configuration for one export run
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Base name (without extension) for the OBJ and MTL output files
    pub base_name: String,
    /// Prefix of the externally rendered pictures the materials reference.
    /// With a RIF script this is the final non-directory portion of the
    /// `PICTURE=` entry. May be empty.
    pub picture_prefix: String,
    /// View synthesis settings (scene up, tolerance, eye offset)
    pub view: ViewConfig,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            base_name: "scene".to_string(),
            picture_prefix: "scene".to_string(),
            view: ViewConfig::default(),
        }
    }
}

impl ExportConfig {
    /// Generated material name for a quad
    pub fn texture_name(&self, identifier: &str) -> String {
        if self.picture_prefix.is_empty() {
            format!("{}_texture", identifier)
        } else {
            format!("{}_{}_texture", self.picture_prefix, identifier)
        }
    }

    /// Rendered picture filename a quad's material maps to
    pub fn picture_file(&self, identifier: &str) -> String {
        if self.picture_prefix.is_empty() {
            format!("{}.hdr", identifier)
        } else {
            format!("{}_{}.hdr", self.picture_prefix, identifier)
        }
    }

    /// Path of the OBJ output file
    pub fn obj_path(&self) -> PathBuf {
        PathBuf::from(format!("{}.obj", self.base_name))
    }

    /// Path of the MTL output file
    pub fn mtl_path(&self) -> PathBuf {
        PathBuf::from(format!("{}.mtl", self.base_name))
    }
}
