// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Vector and polygon primitives
//!
//! Tolerance-based comparison, bounding extents, and normals. A single
//! tolerance constant and a single normal convention keep reconstruction
//! and view synthesis consistent: the exporter emits vertices
//! counter-clockwise, which fixes the sign of every derived normal and
//! therefore of every view direction.

use nalgebra::Vector3;
use rad_lite_core::{Polygon, Vertex};

/// Default absolute tolerance for treating exported coordinates as equal
pub const DEFAULT_EPSILON: f64 = 1e-4;

/// Componentwise approximate equality of two coordinate triples
#[inline]
pub fn vertices_approx_eq(a: &Vertex, b: &Vertex, eps: f64) -> bool {
    slices_approx_eq(a, b, eps)
}

/// Elementwise approximate equality; slices of different length are never equal
#[inline]
pub fn slices_approx_eq(a: &[f64], b: &[f64], eps: f64) -> bool {
    a.len() == b.len()
        && a.iter()
            .zip(b.iter())
            .all(|(x, y)| (x - y).abs() < eps)
}

/// Signed length of the polygon's bounding interval along one axis
///
/// Computed by explicit min/max tracking so intervals straddling zero
/// don't pick up cancellation errors. Returns 0.0 for an empty polygon.
#[inline]
pub fn axis_extent(polygon: &Polygon, axis: usize) -> f64 {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for vertex in &polygon.vertices {
        let v = vertex[axis];
        if v < min {
            min = v;
        }
        if v > max {
            max = v;
        }
    }
    if min > max {
        return 0.0;
    }
    max - min
}

#[inline]
fn edge(from: &Vertex, to: &Vertex) -> Vector3<f64> {
    Vector3::new(to[0] - from[0], to[1] - from[1], to[2] - from[2])
}

#[inline]
fn unit_cross(a: Vector3<f64>, b: Vector3<f64>) -> Option<Vector3<f64>> {
    let normal = a.cross(&b);
    let norm = normal.norm();
    // Zero magnitude is the degenerate signal, not an error
    if norm == 0.0 {
        return None;
    }
    Some(normal / norm)
}

/// Unit normal of a 4-vertex planar polygon
///
/// Cross product of (v1 - v0) and (v3 - v0). `None` when the vertices
/// are collinear or coincident; callers must check.
#[inline]
pub fn quad_normal(quad: &Polygon) -> Option<Vector3<f64>> {
    if quad.vertices.len() < 4 {
        return None;
    }
    let v = &quad.vertices;
    unit_cross(edge(&v[0], &v[1]), edge(&v[0], &v[3]))
}

/// Unit normal of a triangle
///
/// Cross product of (v0 - v1) and (v2 - v1). `None` when degenerate.
#[inline]
pub fn triangle_normal(triangle: &Polygon) -> Option<Vector3<f64>> {
    if triangle.vertices.len() < 3 {
        return None;
    }
    let v = &triangle.vertices;
    unit_cross(edge(&v[1], &v[0]), edge(&v[1], &v[2]))
}
