// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Quad reconstruction from triangle pairs
//!
//! Geometry exporters split every quad into two triangles along a
//! diagonal. This module detects such pairs (exactly two shared
//! vertices) and merges them back into ordered quads.
//!
//! Pairing runs over a quantized adjacency index instead of assuming the
//! two halves of a quad are emitted consecutively: each triangle is
//! bucketed under its three tolerance-quantized vertex keys, and a
//! triangle pairs with the lowest-index later candidate from those
//! buckets that passes the exact shared-vertex test. Lookups probe the
//! neighboring buckets too, since two vertices within tolerance can
//! quantize one bucket apart. For consecutively emitted pairs this
//! reproduces the classic scan-and-pair output exactly; shuffled input
//! still pairs correctly instead of being misreported as unmatched.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use rad_lite_core::{Polygon, Vertex};

use crate::error::{Error, Result};
use crate::vector::vertices_approx_eq;

/// Strategy for fixing the cyclic vertex order of a merged quad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindingRepair {
    /// Keep the tentative (a0, a1, unique-of-b, a2) order as built
    Keep,
    /// Swap the two vertices preceding the first "diagonal jump"
    ///
    /// A jump is a consecutive vertex pair differing in more than one
    /// coordinate component, which on an axis-aligned quad can only be a
    /// diagonal. Heuristic: corrects the common case where the unique
    /// vertex of the second triangle lands out of cyclic order, but is
    /// not proven for all triangle orientations.
    #[default]
    SwapBeforeJump,
}

/// True iff exactly two vertices of `a` approximately equal two distinct
/// vertices of `b`, the signature of a quad split along a diagonal
pub fn share_two_vertices(a: &Polygon, b: &Polygon, eps: f64) -> bool {
    let shared = a
        .vertices
        .iter()
        .filter(|va| b.vertices.iter().any(|vb| vertices_approx_eq(va, vb, eps)))
        .count();
    shared == 2
}

/// Merge two complementary triangles into one quad
///
/// The quad keeps `a`'s identifier and modifier. Callers must have
/// established [`share_two_vertices`] first; the tentative order is
/// (a0, a1, unique-of-b, a2), then the winding repair policy runs.
pub fn merge(a: &Polygon, b: &Polygon, eps: f64, repair: WindingRepair) -> Polygon {
    // The vertex of b not shared with a completes the quad
    let unique = b
        .vertices
        .iter()
        .find(|vb| !a.vertices.iter().any(|va| vertices_approx_eq(vb, va, eps)))
        .copied()
        .unwrap_or(b.vertices[2]);

    let mut vertices = vec![a.vertices[0], a.vertices[1], unique, a.vertices[2]];

    if repair == WindingRepair::SwapBeforeJump {
        for i in 0..3 {
            let differing = (0..3)
                .filter(|&c| (vertices[i][c] - vertices[i + 1][c]).abs() > eps)
                .count();
            if differing > 1 {
                // Wraps to the last vertex when the jump is at the front
                vertices.swap((i + 3) % 4, i);
                break;
            }
        }
    }

    Polygon {
        identifier: a.identifier.clone(),
        vertices,
        modifier: a.modifier.clone(),
    }
}

/// Outcome of reconstructing quads over a whole triangle list
#[derive(Debug, Clone, Default)]
pub struct Reconstruction {
    /// Merged quads, ordered by the input position of their first triangle
    pub quads: Vec<Polygon>,
    /// Triangles with no merge partner, in input order
    pub unmatched: Vec<Polygon>,
}

type VertexKey = [i64; 3];

#[inline]
fn quantize(v: &Vertex, eps: f64) -> VertexKey {
    [
        (v[0] / eps).round() as i64,
        (v[1] / eps).round() as i64,
        (v[2] / eps).round() as i64,
    ]
}

/// The 27 buckets a vertex within tolerance of `key` could quantize into
///
/// Coordinates closer than eps differ by at most one quantization step
/// per component, so probing this neighborhood finds every approximate
/// match the index holds.
fn neighborhood(key: VertexKey) -> impl Iterator<Item = VertexKey> {
    (-1i64..=1).flat_map(move |dx| {
        (-1i64..=1).flat_map(move |dy| {
            (-1i64..=1).map(move |dz| [key[0] + dx, key[1] + dy, key[2] + dz])
        })
    })
}

/// Bucket triangle indices by their quantized vertices
fn vertex_index(triangles: &[Polygon], eps: f64) -> FxHashMap<VertexKey, SmallVec<[usize; 4]>> {
    let mut index: FxHashMap<VertexKey, SmallVec<[usize; 4]>> =
        FxHashMap::with_capacity_and_hasher(triangles.len() * 3, Default::default());
    for (i, triangle) in triangles.iter().enumerate() {
        for vertex in &triangle.vertices {
            let bucket = index.entry(quantize(vertex, eps)).or_default();
            if bucket.last() != Some(&i) {
                bucket.push(i);
            }
        }
    }
    index
}

/// Pair up split-quad triangles and merge them
///
/// Every input polygon must be a triangle. Triangles that find no
/// partner are returned for reporting, never silently dropped; they are
/// excluded from the quad set and therefore never receive a view.
pub fn reconstruct(triangles: Vec<Polygon>, eps: f64) -> Result<Reconstruction> {
    if let Some(bad) = triangles.iter().find(|t| t.vertices.len() != 3) {
        return Err(Error::InvalidPolygon {
            identifier: bad.identifier.clone(),
            expected: 3,
            found: bad.vertices.len(),
        });
    }

    let index = vertex_index(&triangles, eps);

    let mut matched = vec![false; triangles.len()];
    let mut result = Reconstruction::default();

    for i in 0..triangles.len() {
        if matched[i] {
            continue;
        }

        // Lowest-index later candidate near a shared vertex bucket. A
        // partner earlier in the list cannot exist: it would have claimed
        // this triangle when it was scanned.
        let mut partner: Option<usize> = None;
        for vertex in &triangles[i].vertices {
            for key in neighborhood(quantize(vertex, eps)) {
                if let Some(candidates) = index.get(&key) {
                    for &j in candidates {
                        if j > i
                            && !matched[j]
                            && partner.map_or(true, |p| j < p)
                            && share_two_vertices(&triangles[i], &triangles[j], eps)
                        {
                            partner = Some(j);
                        }
                    }
                }
            }
        }

        match partner {
            Some(j) => {
                matched[i] = true;
                matched[j] = true;
                result.quads.push(merge(
                    &triangles[i],
                    &triangles[j],
                    eps,
                    WindingRepair::SwapBeforeJump,
                ));
            }
            None => result.unmatched.push(triangles[i].clone()),
        }
    }

    Ok(result)
}
