// ─────────────────────────────────────────────────────────────────────
// SCPN Detector Core — Geometry
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Placement tree builder.
//!
//! Placements are created parents-first: every `place` call consumes a
//! handle returned by an earlier call, so a forward reference cannot be
//! expressed. `finalize` freezes the tree; the result is immutable and
//! safe to share with a multi-threaded transport engine.
//!
//! The builder does not verify that a child solid geometrically fits inside
//! its parent at the given transform — dimensionally consistent input is
//! the caller's responsibility. [`GeometryTree::containment_violations`] is
//! an advisory audit for callers who want the check.

use std::collections::HashMap;
use std::sync::Arc;

use detector_types::error::{DetectorError, DetectorResult};
use log::debug;
use nalgebra::{Rotation3, Vector3};

use crate::materials::Material;
use crate::solids::Solid;

/// Handle to a placement, issued and consumed by one builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlacementId(pub(crate) usize);

impl PlacementId {
    /// Index into the tree's node storage.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Logical volume: one solid, one material, one sensitivity flag.
#[derive(Debug, Clone)]
pub struct Volume {
    pub name: String,
    pub solid: Solid,
    pub material: Arc<Material>,
    pub sensitive: bool,
}

/// Physical placement of a volume in its parent's frame.
#[derive(Debug, Clone)]
pub struct Placement {
    pub volume: Volume,
    /// Translation in the parent frame [cm].
    pub translation: Vector3<f64>,
    /// Rotation in the parent frame; `None` means identity.
    pub rotation: Option<Rotation3<f64>>,
    /// `None` only for the world.
    pub parent: Option<PlacementId>,
    children: Vec<PlacementId>,
}

impl Placement {
    pub fn children(&self) -> &[PlacementId] {
        &self.children
    }
}

/// Builds one placement tree, then closes.
#[derive(Debug, Default)]
pub struct GeometryBuilder {
    nodes: Vec<Placement>,
    names: HashMap<String, PlacementId>,
    closed: bool,
}

impl GeometryBuilder {
    pub fn new() -> Self {
        GeometryBuilder::default()
    }

    /// Create the unique root placement. The world volume takes the solid's
    /// name and occupies the origin of the global frame.
    pub fn create_world(
        &mut self,
        solid: Solid,
        material: Arc<Material>,
    ) -> DetectorResult<PlacementId> {
        if self.closed {
            return Err(DetectorError::BuilderClosed);
        }
        if !self.nodes.is_empty() {
            return Err(DetectorError::DuplicateRoot);
        }
        let name = solid.name.clone();
        let id = PlacementId(0);
        self.names.insert(name.clone(), id);
        self.nodes.push(Placement {
            volume: Volume {
                name: name.clone(),
                solid,
                material,
                sensitive: false,
            },
            translation: Vector3::zeros(),
            rotation: None,
            parent: None,
            children: Vec::new(),
        });
        debug!("geometry: created world {name}");
        Ok(id)
    }

    /// Create a volume and place it under `parent`.
    ///
    /// Volume names are globally unique; they are the keys the scorer
    /// registry binds against later.
    #[allow(clippy::too_many_arguments)]
    pub fn place(
        &mut self,
        volume_name: &str,
        solid: Solid,
        material: Arc<Material>,
        sensitive: bool,
        translation: Vector3<f64>,
        rotation: Option<Rotation3<f64>>,
        parent: PlacementId,
    ) -> DetectorResult<PlacementId> {
        if self.closed {
            return Err(DetectorError::BuilderClosed);
        }
        if parent.0 >= self.nodes.len() {
            return Err(DetectorError::UnknownParent(format!(
                "handle #{}",
                parent.0
            )));
        }
        if self.names.contains_key(volume_name) {
            return Err(DetectorError::DuplicateVolumeName(volume_name.to_string()));
        }
        let id = PlacementId(self.nodes.len());
        self.names.insert(volume_name.to_string(), id);
        self.nodes.push(Placement {
            volume: Volume {
                name: volume_name.to_string(),
                solid,
                material,
                sensitive,
            },
            translation,
            rotation,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        debug!(
            "geometry: placed {volume_name} under {}",
            self.nodes[parent.0].volume.name
        );
        Ok(id)
    }

    /// Freeze the tree. Every later builder call fails with `BuilderClosed`.
    pub fn finalize(&mut self) -> DetectorResult<GeometryTree> {
        if self.closed {
            return Err(DetectorError::BuilderClosed);
        }
        if self.nodes.is_empty() {
            return Err(DetectorError::MissingRoot);
        }
        self.closed = true;
        Ok(GeometryTree {
            nodes: std::mem::take(&mut self.nodes),
            names: std::mem::take(&mut self.names),
        })
    }
}

/// The finished, immutable placement tree. Node 0 is the world.
#[derive(Debug)]
pub struct GeometryTree {
    nodes: Vec<Placement>,
    names: HashMap<String, PlacementId>,
}

impl GeometryTree {
    /// The unique root placement.
    pub fn root(&self) -> PlacementId {
        PlacementId(0)
    }

    pub fn get(&self, id: PlacementId) -> Option<&Placement> {
        self.nodes.get(id.0)
    }

    /// Look a placement up by volume name.
    pub fn find(&self, volume_name: &str) -> Option<PlacementId> {
        self.names.get(volume_name).copied()
    }

    pub fn contains(&self, volume_name: &str) -> bool {
        self.names.contains_key(volume_name)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlacementId, &Placement)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (PlacementId(i), node))
    }

    pub fn children(&self, id: PlacementId) -> &[PlacementId] {
        self.nodes
            .get(id.0)
            .map(|node| node.children())
            .unwrap_or(&[])
    }

    /// Transform from the placement's local frame to the global frame,
    /// composed along the parent chain.
    pub fn global_transform(&self, id: PlacementId) -> Option<(Rotation3<f64>, Vector3<f64>)> {
        self.nodes.get(id.0)?;
        let mut chain = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            chain.push(current);
            cursor = self.nodes[current.0].parent;
        }
        let mut rotation = Rotation3::identity();
        let mut translation = Vector3::zeros();
        for step in chain.into_iter().rev() {
            let node = &self.nodes[step.0];
            let local_rot = node.rotation.unwrap_or_else(Rotation3::identity);
            translation += rotation * node.translation;
            rotation *= local_rot;
        }
        Some((rotation, translation))
    }

    /// Advisory containment audit (not part of the build contract).
    ///
    /// Compares each child's conservative bounding box, offset by its
    /// translation, against its parent's bounding box; rotated children are
    /// bounded by their circumscribing sphere. Over-approximation may flag
    /// tight fits that are geometrically fine.
    pub fn containment_violations(&self) -> Vec<String> {
        const EPS: f64 = 1e-9;
        let mut violations = Vec::new();
        for node in &self.nodes {
            let Some(parent) = node.parent else { continue };
            let parent_half = self.nodes[parent.0].volume.solid.shape.half_extents();
            let child_half = match node.rotation {
                None => node.volume.solid.shape.half_extents(),
                Some(_) => {
                    let r = node.volume.solid.shape.bounding_radius();
                    [r, r, r]
                }
            };
            let outside = (0..3).any(|axis| {
                node.translation[axis].abs() + child_half[axis] > parent_half[axis] + EPS
            });
            if outside {
                violations.push(format!(
                    "{} extends beyond {}",
                    node.volume.name, self.nodes[parent.0].volume.name
                ));
            }
        }
        violations
    }
}
