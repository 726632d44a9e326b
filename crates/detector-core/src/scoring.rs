// ─────────────────────────────────────────────────────────────────────
// SCPN Detector Core — Scoring
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Sensitive-detector registry.
//!
//! Binds volume names to scorer kinds after the tree is finalized. The
//! transport engine queries [`SensitiveDetectorRegistry::bindings_for`] per
//! volume and attributes energy deposits only where the binding set is
//! non-empty. Populated sequentially during initialization; handed to the
//! engine by shared reference, which makes it read-only from there on.

use std::collections::{BTreeSet, HashMap};

use detector_types::error::{DetectorError, DetectorResult};
use log::debug;

use crate::geometry::GeometryTree;

/// Identifier of a scorer kind, issued by [`SensitiveDetectorRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScorerId(usize);

impl ScorerId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Volume-name → scorer-kind bindings.
#[derive(Debug, Default)]
pub struct SensitiveDetectorRegistry {
    scorer_names: Vec<String>,
    scorer_ids: HashMap<String, ScorerId>,
    bindings: HashMap<String, BTreeSet<ScorerId>>,
}

impl SensitiveDetectorRegistry {
    pub fn new() -> Self {
        SensitiveDetectorRegistry::default()
    }

    /// Declare a scorer kind. Re-registering a name returns the existing id.
    pub fn register_scorer(&mut self, scorer_name: &str) -> ScorerId {
        if let Some(&id) = self.scorer_ids.get(scorer_name) {
            return id;
        }
        let id = ScorerId(self.scorer_names.len());
        self.scorer_names.push(scorer_name.to_string());
        self.scorer_ids.insert(scorer_name.to_string(), id);
        debug!("scoring: registered scorer {scorer_name}");
        id
    }

    /// Bind a volume (by name, validated against the finalized tree) to a
    /// scorer kind. Duplicate (volume, scorer) pairs are rejected.
    pub fn bind(
        &mut self,
        volume_name: &str,
        scorer: ScorerId,
        tree: &GeometryTree,
    ) -> DetectorResult<()> {
        if scorer.0 >= self.scorer_names.len() {
            return Err(DetectorError::UnknownScorer(scorer.0));
        }
        if !tree.contains(volume_name) {
            return Err(DetectorError::UnknownVolume(volume_name.to_string()));
        }
        let slot = self.bindings.entry(volume_name.to_string()).or_default();
        if !slot.insert(scorer) {
            return Err(DetectorError::DuplicateBinding {
                volume: volume_name.to_string(),
                scorer: self.scorer_names[scorer.0].clone(),
            });
        }
        debug!(
            "scoring: bound {volume_name} to {}",
            self.scorer_names[scorer.0]
        );
        Ok(())
    }

    /// Scorer set for a volume; `None` when the volume carries no binding.
    pub fn bindings_for(&self, volume_name: &str) -> Option<&BTreeSet<ScorerId>> {
        self.bindings.get(volume_name)
    }

    /// Whether any scorer reads this volume out.
    pub fn is_sensitive(&self, volume_name: &str) -> bool {
        self.bindings
            .get(volume_name)
            .is_some_and(|set| !set.is_empty())
    }

    pub fn scorer_name(&self, id: ScorerId) -> Option<&str> {
        self.scorer_names.get(id.0).map(String::as_str)
    }

    /// All registered scorer kinds.
    pub fn scorers(&self) -> impl Iterator<Item = (ScorerId, &str)> {
        self.scorer_names
            .iter()
            .enumerate()
            .map(|(i, name)| (ScorerId(i), name.as_str()))
    }

    /// All volumes with at least one binding.
    pub fn bound_volumes(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::GeometryBuilder;
    use crate::materials::MaterialCatalog;
    use crate::solids::Solid;
    use nalgebra::Vector3;
    use std::sync::Arc;

    fn tiny_tree() -> GeometryTree {
        let mut catalog = MaterialCatalog::new();
        let air = catalog.resolve_predefined("G4_AIR").unwrap();
        let ge = catalog.resolve_predefined("G4_Ge").unwrap();

        let mut builder = GeometryBuilder::new();
        let world = builder
            .create_world(Solid::make_box("World", 50.0, 50.0, 50.0).unwrap(), air)
            .unwrap();
        builder
            .place(
                "GeCrystal",
                Solid::make_tube("GeCrystal", 0.0, 2.525, 1.0, 0.0, 360.0).unwrap(),
                ge,
                true,
                Vector3::new(0.0, 0.0, 4.8),
                None,
                world,
            )
            .unwrap();
        builder.finalize().unwrap()
    }

    #[test]
    fn test_register_scorer_idempotent() {
        let mut registry = SensitiveDetectorRegistry::new();
        let a = registry.register_scorer("EDep");
        let b = registry.register_scorer("EDep");
        assert_eq!(a, b, "Same scorer name must map to the same id");
        assert_eq!(registry.scorer_name(a), Some("EDep"));
    }

    #[test]
    fn test_bind_and_read_back() {
        let tree = tiny_tree();
        let mut registry = SensitiveDetectorRegistry::new();
        let edep = registry.register_scorer("EDep");
        let dose = registry.register_scorer("DoseDep");

        registry.bind("GeCrystal", edep, &tree).unwrap();
        registry.bind("GeCrystal", dose, &tree).unwrap();

        let set = registry.bindings_for("GeCrystal").unwrap();
        assert_eq!(set.len(), 2, "Crystal carries both scorer kinds");
        assert!(set.contains(&edep) && set.contains(&dose));
        assert!(registry.is_sensitive("GeCrystal"));
        assert!(!registry.is_sensitive("World"));
        assert_eq!(registry.bindings_for("World"), None);
    }

    #[test]
    fn test_bind_unknown_volume() {
        let tree = tiny_tree();
        let mut registry = SensitiveDetectorRegistry::new();
        let edep = registry.register_scorer("EDep");
        let err = registry.bind("NoSuchVolume", edep, &tree).unwrap_err();
        assert!(
            matches!(err, DetectorError::UnknownVolume(ref n) if n == "NoSuchVolume"),
            "Expected UnknownVolume, got {err:?}"
        );
    }

    #[test]
    fn test_bind_duplicate_pair() {
        let tree = tiny_tree();
        let mut registry = SensitiveDetectorRegistry::new();
        let edep = registry.register_scorer("EDep");
        registry.bind("GeCrystal", edep, &tree).unwrap();
        let err = registry.bind("GeCrystal", edep, &tree).unwrap_err();
        assert!(matches!(err, DetectorError::DuplicateBinding { .. }));
        // The original binding survives untouched.
        assert_eq!(registry.bindings_for("GeCrystal").unwrap().len(), 1);
    }

    #[test]
    fn test_bind_foreign_scorer_id() {
        let tree = tiny_tree();
        let mut other = SensitiveDetectorRegistry::new();
        other.register_scorer("EDep");
        let foreign = other.register_scorer("DoseDep");

        let mut registry = SensitiveDetectorRegistry::new();
        registry.register_scorer("EDep");
        // Id 1 was never issued by `registry`.
        let err = registry.bind("GeCrystal", foreign, &tree).unwrap_err();
        assert!(matches!(err, DetectorError::UnknownScorer(1)));
    }

    #[test]
    fn test_bound_volumes_listing() {
        let tree = tiny_tree();
        let mut registry = SensitiveDetectorRegistry::new();
        let edep = registry.register_scorer("EDep");
        registry.bind("GeCrystal", edep, &tree).unwrap();
        let volumes: Vec<&str> = registry.bound_volumes().collect();
        assert_eq!(volumes, vec!["GeCrystal"]);
    }
}
