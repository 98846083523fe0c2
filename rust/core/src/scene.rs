// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scene data model
//!
//! Owned representation of a parsed `.rad` scene: polygons, the three
//! recognized material kinds, and a report of everything that was skipped.
//! Materials act as modifiers: a material definition applies to every
//! polygon parsed after it, until the next material supersedes it.

use crate::error::{Error, Result};
use crate::parser::{Primitive, Record, RecordScanner};

/// A vertex as an (x, y, z) coordinate triple
pub type Vertex = [f64; 3];

/// Material kinds recognized by the pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum MaterialKind {
    /// Opaque diffuse/specular surface (5 reals)
    Plastic {
        red: f64,
        green: f64,
        blue: f64,
        specularity: f64,
        roughness: f64,
    },
    /// Metallic surface, same attribute set as plastic (5 reals)
    Metal {
        red: f64,
        green: f64,
        blue: f64,
        specularity: f64,
        roughness: f64,
    },
    /// Transmissive surface (3 reals, optional index of refraction)
    Glass {
        red: f64,
        green: f64,
        blue: f64,
        refraction: Option<f64>,
    },
}

impl MaterialKind {
    /// Radiance type name for this kind
    pub fn name(&self) -> &'static str {
        match self {
            MaterialKind::Plastic { .. } => "plastic",
            MaterialKind::Metal { .. } => "metal",
            MaterialKind::Glass { .. } => "glass",
        }
    }
}

/// A named, immutable material definition
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub identifier: String,
    pub kind: MaterialKind,
}

/// Type names accepted as materials
pub const RECOGNIZED_MATERIALS: [&str; 3] = ["plastic", "metal", "glass"];

impl Material {
    /// Build a material from a parsed primitive, validating argument counts
    pub fn from_primitive(prim: &Primitive<'_>) -> Result<Self> {
        let malformed = |message: &str| Error::MalformedPrimitive {
            kind: prim.kind.to_string(),
            identifier: prim.identifier.to_string(),
            message: message.to_string(),
        };

        let kind = match prim.kind {
            "plastic" | "metal" => {
                let r = &prim.reals;
                if r.len() != 5 {
                    return Err(malformed("expected 5 real arguments"));
                }
                if prim.kind == "plastic" {
                    MaterialKind::Plastic {
                        red: r[0],
                        green: r[1],
                        blue: r[2],
                        specularity: r[3],
                        roughness: r[4],
                    }
                } else {
                    MaterialKind::Metal {
                        red: r[0],
                        green: r[1],
                        blue: r[2],
                        specularity: r[3],
                        roughness: r[4],
                    }
                }
            }
            "glass" => {
                let r = &prim.reals;
                if r.len() != 3 && r.len() != 4 {
                    return Err(malformed("expected 3 or 4 real arguments"));
                }
                MaterialKind::Glass {
                    red: r[0],
                    green: r[1],
                    blue: r[2],
                    refraction: r.get(3).copied(),
                }
            }
            other => {
                return Err(Error::MalformedPrimitive {
                    kind: other.to_string(),
                    identifier: prim.identifier.to_string(),
                    message: "not a recognized material type".to_string(),
                })
            }
        };

        Ok(Material {
            identifier: prim.identifier.to_string(),
            kind,
        })
    }
}

/// A polygon primitive with its inherited material reference
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    /// Identifier, unique within the scene
    pub identifier: String,
    /// Ordered vertices, counter-clockwise as emitted by the exporter
    pub vertices: Vec<Vertex>,
    /// Identifier of the material in effect when this polygon was parsed
    pub modifier: Option<String>,
}

impl Polygon {
    /// Build a polygon from a parsed primitive, validating the coordinate count
    pub fn from_primitive(prim: &Primitive<'_>, modifier: Option<&str>) -> Result<Self> {
        if prim.reals.is_empty() || prim.reals.len() % 3 != 0 {
            return Err(Error::MalformedPrimitive {
                kind: prim.kind.to_string(),
                identifier: prim.identifier.to_string(),
                message: format!(
                    "coordinate count {} is not a positive multiple of 3",
                    prim.reals.len()
                ),
            });
        }

        let vertices = prim
            .reals
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect();

        Ok(Polygon {
            identifier: prim.identifier.to_string(),
            vertices,
            modifier: modifier.map(str::to_string),
        })
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
}

/// A record that could not be used, with the reason it was skipped
#[derive(Debug, Clone)]
pub struct SkippedRecord {
    /// Best-effort description of the offending record
    pub description: String,
    /// Why it was skipped
    pub reason: String,
}

/// Top-level scene container
///
/// Ordered polygons and materials as read from the file, plus the
/// skipped-record report. Built once per run and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub polygons: Vec<Polygon>,
    pub materials: Vec<Material>,
    pub skipped: Vec<SkippedRecord>,
}

impl Scene {
    /// Parse a scene from `.rad` source text
    ///
    /// Best-effort: unrecognized or malformed records land in
    /// [`Scene::skipped`] and never abort the scan.
    pub fn from_source(source: &str) -> Self {
        let mut scene = Scene::default();
        let mut current_modifier: Option<String> = None;

        for record in RecordScanner::new(source) {
            match record {
                Ok(Record::Primitive(prim)) => scene.classify(prim, &mut current_modifier),
                Ok(Record::Command(line)) => scene.skipped.push(SkippedRecord {
                    description: format!("!{}", line),
                    reason: "command lines are not expanded".to_string(),
                }),
                Err(e) => scene.skipped.push(SkippedRecord {
                    description: "<unparsable>".to_string(),
                    reason: e.to_string(),
                }),
            }
        }

        scene
    }

    fn classify(&mut self, prim: Primitive<'_>, current_modifier: &mut Option<String>) {
        if prim.kind == "polygon" {
            match Polygon::from_primitive(&prim, current_modifier.as_deref()) {
                Ok(polygon) => self.polygons.push(polygon),
                Err(e) => self.skipped.push(SkippedRecord {
                    description: format!("polygon {}", prim.identifier),
                    reason: e.to_string(),
                }),
            }
        } else if RECOGNIZED_MATERIALS.contains(&prim.kind) {
            match Material::from_primitive(&prim) {
                Ok(material) => {
                    *current_modifier = Some(material.identifier.clone());
                    self.materials.push(material);
                }
                Err(e) => self.skipped.push(SkippedRecord {
                    description: format!("{} {}", prim.kind, prim.identifier),
                    reason: e.to_string(),
                }),
            }
        } else {
            self.skipped.push(SkippedRecord {
                description: format!("{} {}", prim.kind, prim.identifier),
                reason: "unrecognized primitive type".to_string(),
            });
        }
    }

    /// Look a material up by identifier
    pub fn material(&self, identifier: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.identifier == identifier)
    }
}
