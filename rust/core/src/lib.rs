// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Rad-Lite Core Parser
//!
//! Radiance scene description (`.rad`) parser built with [nom](https://docs.rs/nom).
//! Provides zero-copy record scanning and an owned scene model for the
//! parallel-projection view pipeline.
//!
//! ## Overview
//!
//! - **Record Scanning**: zero-copy parsing of the uniform Radiance
//!   primitive grammar (`modifier type identifier` + argument blocks)
//! - **Scene Model**: polygons, the three recognized material kinds
//!   (plastic, metal, glass), and modifier inheritance
//! - **Best-Effort Parsing**: malformed or unrecognized records are
//!   reported and skipped, never fatal
//!
//! ## Quick Start
//!
//! ```rust
//! use rad_lite_core::Scene;
//!
//! let source = "\
//! void plastic red
//! 0
//! 0
//! 5 0.7 0.05 0.05 0.05 0.02
//!
//! red polygon wall.1
//! 0
//! 0
//! 12 0 0 0  1 0 0  1 0 3  0 0 3
//! ";
//!
//! let scene = Scene::from_source(source);
//! assert_eq!(scene.polygons.len(), 1);
//! assert_eq!(scene.polygons[0].modifier.as_deref(), Some("red"));
//! ```

pub mod error;
pub mod parser;
pub mod scene;

pub use error::{Error, Result};
pub use parser::{Primitive, Record, RecordScanner};
pub use scene::{Material, MaterialKind, Polygon, Scene, SkippedRecord, Vertex, RECOGNIZED_MATERIALS};
