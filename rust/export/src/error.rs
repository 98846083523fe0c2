// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for pipeline and export operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that terminate a run
///
/// Everything else (malformed records, unmatched triangles, degenerate
/// quads) is collected into the run summary instead.
#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Geometry error: {0}")]
    Geometry(#[from] rad_lite_geometry::Error),
}
