// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rad-Lite Export
//!
//! Pipeline orchestration and serialization: turns a parsed Radiance
//! scene into a textured OBJ/MTL pair plus one parallel-projection view
//! per quad, for image-based texture baking.

pub mod cli;
pub mod config;
pub mod error;
pub mod mtl;
pub mod obj;
pub mod pipeline;

pub use cli::{parse_args, CliError, Command};
pub use config::ExportConfig;
pub use error::{Error, Result};
pub use mtl::write_mtl;
pub use obj::write_obj;
pub use pipeline::{run, RunSummary};
