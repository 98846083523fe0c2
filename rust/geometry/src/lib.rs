// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rad-Lite Geometry
//!
//! Quad reconstruction and parallel-projection view synthesis using
//! nalgebra for the vector arithmetic. Triangles emitted by the
//! geometry exporter are merged back into quads, and each quad gets a
//! parallel-projection camera that frames it exactly.

pub mod error;
pub mod quad;
pub mod vector;
pub mod view;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

pub use error::{Error, Result};
pub use quad::{merge, reconstruct, share_two_vertices, Reconstruction, WindingRepair};
pub use vector::{
    axis_extent, quad_normal, slices_approx_eq, triangle_normal, vertices_approx_eq,
    DEFAULT_EPSILON,
};
pub use view::{synthesize_view, synthesize_views, SkipReason, View, ViewConfig, ViewSet};
