// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parallel-projection view synthesis
//!
//! Derives one parallel-projection camera per quad, framed so that an
//! orthographic render of the view captures exactly that quad at true
//! scale (for texture baking). Synthesis is a pure function of the quad
//! geometry and the view configuration.

use nalgebra::{Point3, Vector3};
use rustc_hash::FxHashMap;
use thiserror::Error;

use rad_lite_core::Polygon;

use crate::vector::{axis_extent, quad_normal, DEFAULT_EPSILON};

/// Configuration for view synthesis
#[derive(Debug, Clone)]
pub struct ViewConfig {
    /// World up axis of the scene
    pub scene_up: Vector3<f64>,
    /// Absolute tolerance for degenerate-extent and parallel-axis tests
    pub epsilon: f64,
    /// Distance the eye is pulled off the quad's plane along its normal,
    /// avoiding coincident-plane clipping
    pub view_offset: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            scene_up: Vector3::z(),
            epsilon: DEFAULT_EPSILON,
            view_offset: 0.1,
        }
    }
}

/// A parallel-projection camera framing one quad
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    /// Identifier of the quad this view frames
    pub identifier: String,
    /// Eye position
    pub position: Point3<f64>,
    /// Unit direction from the eye toward the quad (negated quad normal)
    pub direction: Vector3<f64>,
    /// Up axis, never parallel to the direction
    pub up: Vector3<f64>,
    /// Horizontal extent in scene units
    pub h_size: f64,
    /// Vertical extent in scene units
    pub v_size: f64,
}

// Negating an axis-aligned normal produces -0.0 components, which
// Display renders as "-0"; fold them to plain zero for the view lines
#[inline]
fn unsigned_zero(v: f64) -> f64 {
    if v == 0.0 {
        0.0
    } else {
        v
    }
}

impl View {
    /// Render the Radiance view-argument string (`-vtl` = parallel)
    pub fn to_radiance(&self) -> String {
        format!(
            "-vtl -vp {} {} {} -vd {} {} {} -vu {} {} {} -vh {} -vv {}",
            unsigned_zero(self.position.x),
            unsigned_zero(self.position.y),
            unsigned_zero(self.position.z),
            unsigned_zero(self.direction.x),
            unsigned_zero(self.direction.y),
            unsigned_zero(self.direction.z),
            unsigned_zero(self.up.x),
            unsigned_zero(self.up.y),
            unsigned_zero(self.up.z),
            self.h_size,
            self.v_size,
        )
    }
}

/// Why a quad produced no view. Data-quality conditions, never fatal.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    #[error("horizontal and/or vertical size not set")]
    MissingExtents,
    #[error("degenerate normal")]
    DegenerateNormal,
    #[error("duplicate quad identifier")]
    DuplicateIdentifier,
}

#[inline]
fn axes_approx_eq(a: &Vector3<f64>, b: &Vector3<f64>, eps: f64) -> bool {
    (a.x - b.x).abs() < eps && (a.y - b.y).abs() < eps && (a.z - b.z).abs() < eps
}

/// Pick the up vector for a view
///
/// The configured scene up, unless it coincides with the view direction
/// or the quad normal; then the first of [+Z, +Y, +X] that differs from
/// the scene up. Fixed fallback policy, reproduced exactly for output
/// compatibility.
///
/// The comparisons are componentwise equality, not parallelism tests: a
/// negative axis-aligned scene up such as (0, 0, -1) never matches the
/// +Z fallback, so a downward-facing view can end up with an up vector
/// antiparallel to its direction. Callers wanting a flipped world axis
/// should pass the positive axis and flip the rendered pictures.
fn up_vector(
    direction: &Vector3<f64>,
    normal: &Vector3<f64>,
    config: &ViewConfig,
) -> Vector3<f64> {
    let up = config.scene_up;
    if !axes_approx_eq(&up, direction, config.epsilon)
        && !axes_approx_eq(&up, normal, config.epsilon)
    {
        return up;
    }
    for fallback in [Vector3::z(), Vector3::y()] {
        if !axes_approx_eq(&up, &fallback, config.epsilon) {
            return fallback;
        }
    }
    Vector3::x()
}

/// Synthesize the parallel-projection view framing one quad
///
/// A planar quad has exactly two non-degenerate axis extents; the first
/// (in X, Y, Z order) becomes the horizontal size, the second the
/// vertical size. Degenerate quads are skipped, not errors.
pub fn synthesize_view(quad: &Polygon, config: &ViewConfig) -> Result<View, SkipReason> {
    let extents = [
        axis_extent(quad, 0),
        axis_extent(quad, 1),
        axis_extent(quad, 2),
    ];

    let mut sizes = extents.iter().filter(|&&e| e > config.epsilon);
    let h_size = *sizes.next().ok_or(SkipReason::MissingExtents)?;
    let v_size = *sizes.next().ok_or(SkipReason::MissingExtents)?;

    let normal = quad_normal(quad).ok_or(SkipReason::DegenerateNormal)?;
    let direction = -normal;

    // Geometric center on the in-plane axes; offset off the surface on
    // the degenerate axis
    let mut position = Point3::origin();
    for axis in 0..3 {
        position[axis] = if extents[axis] > config.epsilon {
            let min = quad
                .vertices
                .iter()
                .map(|v| v[axis])
                .fold(f64::INFINITY, f64::min);
            min + extents[axis] / 2.0
        } else {
            // All vertices share this coordinate; any of them works
            quad.vertices[0][axis] + config.view_offset * normal[axis]
        };
    }

    let up = up_vector(&direction, &normal, config);

    Ok(View {
        identifier: quad.identifier.clone(),
        position,
        direction,
        up,
        h_size,
        v_size,
    })
}

/// The views of a scene, keyed by quad identifier, in synthesis order
#[derive(Debug, Clone, Default)]
pub struct ViewSet {
    views: FxHashMap<String, View>,
    order: Vec<String>,
    /// Quads that produced no view, with the reason, in input order
    pub skipped: Vec<(String, SkipReason)>,
}

impl ViewSet {
    /// Look a view up by quad identifier
    pub fn get(&self, identifier: &str) -> Option<&View> {
        self.views.get(identifier)
    }

    /// Iterate views in synthesis order
    pub fn iter(&self) -> impl Iterator<Item = &View> {
        self.order.iter().filter_map(|id| self.views.get(id))
    }

    /// Number of views
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True when no quad produced a view
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Synthesize views for every quad in the list
///
/// At most one view per identifier: later duplicates are reported and
/// the first view kept. Deterministic for identical input.
pub fn synthesize_views(quads: &[Polygon], config: &ViewConfig) -> ViewSet {
    let mut set = ViewSet::default();

    for quad in quads {
        if set.views.contains_key(&quad.identifier) {
            set.skipped
                .push((quad.identifier.clone(), SkipReason::DuplicateIdentifier));
            continue;
        }
        match synthesize_view(quad, config) {
            Ok(view) => {
                set.order.push(view.identifier.clone());
                set.views.insert(view.identifier.clone(), view);
            }
            Err(reason) => set.skipped.push((quad.identifier.clone(), reason)),
        }
    }

    set
}
