// ─────────────────────────────────────────────────────────────────────
// SCPN Detector Core — Property-Based Tests (proptest) for detector-core
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for detector-core using proptest.
//!
//! Covers: composition sum invariants, solid dimension validation,
//! placement tree construction invariants, name uniqueness.

use detector_core::geometry::GeometryBuilder;
use detector_core::materials::{Isotope, MaterialCatalog};
use detector_core::solids::Solid;
use nalgebra::Vector3;
use proptest::prelude::*;

fn isotope(i: usize) -> Isotope {
    Isotope::new(&format!("X{i}"), 10 + i as u32, 20 + i as u32, 20.0 + i as f64)
}

// ── Composition Invariants ───────────────────────────────────────────

proptest! {
    /// Normalized abundance sets always build.
    #[test]
    fn element_accepts_normalized_abundances(
        weights in prop::collection::vec(0.05f64..1.0, 1..6),
    ) {
        let total: f64 = weights.iter().sum();
        let abundances: Vec<(Isotope, f64)> = weights
            .iter()
            .enumerate()
            .map(|(i, w)| (isotope(i), w / total))
            .collect();

        let mut catalog = MaterialCatalog::new();
        prop_assert!(catalog.build_element("E", "E", &abundances).is_ok());
    }

    /// Abundance sums off by more than the tolerance are rejected.
    #[test]
    fn element_rejects_deficient_sum(
        weights in prop::collection::vec(0.05f64..1.0, 1..6),
        deficit in 0.01f64..0.5,
    ) {
        let total: f64 = weights.iter().sum();
        let scale = (1.0 - deficit) / total;
        let abundances: Vec<(Isotope, f64)> = weights
            .iter()
            .enumerate()
            .map(|(i, w)| (isotope(i), w * scale))
            .collect();

        let mut catalog = MaterialCatalog::new();
        prop_assert!(
            catalog.build_element("E", "E", &abundances).is_err(),
            "Sum {} must be rejected", 1.0 - deficit
        );
    }

    /// Compound mass fractions obey the same unit-sum invariant.
    #[test]
    fn compound_rejects_excess_sum(excess in 0.01f64..0.5) {
        let mut catalog = MaterialCatalog::new();
        let el = catalog
            .build_element("E", "E", &[(isotope(0), 1.0)])
            .unwrap();
        prop_assert!(
            catalog.build_compound("C", 1.0, &[(el, 1.0 + excess)]).is_err()
        );
    }
}

// ── Solid Dimension Validation ───────────────────────────────────────

proptest! {
    /// Non-negative half-extents always make a valid box.
    #[test]
    fn box_accepts_non_negative(
        hx in 0.0f64..100.0,
        hy in 0.0f64..100.0,
        hz in 0.0f64..100.0,
    ) {
        prop_assert!(Solid::make_box("B", hx, hy, hz).is_ok());
    }

    /// Any negative half-extent is rejected.
    #[test]
    fn box_rejects_negative(
        hx in -100.0f64..-1e-9,
        hy in 0.0f64..100.0,
        hz in 0.0f64..100.0,
    ) {
        prop_assert!(Solid::make_box("B", hx, hy, hz).is_err());
        prop_assert!(Solid::make_box("B", hy, hx, hz).is_err());
        prop_assert!(Solid::make_box("B", hy, hz, hx).is_err());
    }

    /// Tubes require inner < outer and a sweep in (0, 360].
    #[test]
    fn tube_radius_and_sweep_invariants(
        inner in 0.0f64..10.0,
        gap in 1e-6f64..10.0,
        half_height in 0.0f64..50.0,
        sweep in 1e-3f64..360.0,
    ) {
        let outer = inner + gap;
        prop_assert!(
            Solid::make_tube("T", inner, outer, half_height, 0.0, sweep).is_ok()
        );
        // Degenerate or inverted radii never build.
        prop_assert!(
            Solid::make_tube("T", outer, inner, half_height, 0.0, sweep).is_err()
        );
        prop_assert!(
            Solid::make_tube("T", inner, inner, half_height, 0.0, sweep).is_err()
        );
        // Sweep beyond a full turn never builds.
        prop_assert!(
            Solid::make_tube("T", inner, outer, half_height, 0.0, sweep + 360.0).is_err()
        );
    }
}

// ── Placement Tree Invariants ────────────────────────────────────────

proptest! {
    /// A chain of nested placements keeps the parents-before-children
    /// discipline: every non-root parent handle indexes an earlier node.
    #[test]
    fn chain_respects_dependency_order(depth in 1usize..20) {
        let mut catalog = MaterialCatalog::new();
        let air = catalog.resolve_predefined("G4_AIR").unwrap();

        let mut builder = GeometryBuilder::new();
        let side = 1000.0;
        let world = builder
            .create_world(
                Solid::make_box("World", side, side, side).unwrap(),
                air.clone(),
            )
            .unwrap();

        let mut parent = world;
        for level in 0..depth {
            let half = side / (level + 2) as f64;
            let solid = Solid::make_box(&format!("Level{level}"), half, half, half).unwrap();
            parent = builder
                .place(
                    &format!("Level{level}"),
                    solid,
                    air.clone(),
                    false,
                    Vector3::zeros(),
                    None,
                    parent,
                )
                .unwrap();
        }

        let tree = builder.finalize().unwrap();
        prop_assert_eq!(tree.len(), depth + 1);
        for (id, node) in tree.iter() {
            match node.parent {
                None => prop_assert_eq!(id.index(), 0, "Only the world has no parent"),
                Some(p) => prop_assert!(
                    p.index() < id.index(),
                    "Parent {} must precede child {}", p.index(), id.index()
                ),
            }
        }
        // Every level is findable by name.
        for level in 0..depth {
            let level_name = format!("Level{}", level);
            prop_assert!(tree.contains(&level_name));
        }
    }

    /// Reusing a volume name fails no matter what the name is.
    #[test]
    fn duplicate_names_always_rejected(name in "[A-Za-z][A-Za-z0-9_]{0,12}") {
        let mut catalog = MaterialCatalog::new();
        let air = catalog.resolve_predefined("G4_AIR").unwrap();

        let mut builder = GeometryBuilder::new();
        let world = builder
            .create_world(Solid::make_box("World", 50.0, 50.0, 50.0).unwrap(), air.clone())
            .unwrap();
        let solid = Solid::make_box(&name, 1.0, 1.0, 1.0).unwrap();
        builder
            .place(&name, solid.clone(), air.clone(), false, Vector3::zeros(), None, world)
            .unwrap();
        prop_assert!(
            builder
                .place(&name, solid, air, false, Vector3::zeros(), None, world)
                .is_err()
        );
    }

    /// A fan of siblings all hang off the root and are all indexed.
    #[test]
    fn sibling_fan_shape(count in 1usize..30) {
        let mut catalog = MaterialCatalog::new();
        let air = catalog.resolve_predefined("G4_AIR").unwrap();

        let mut builder = GeometryBuilder::new();
        let world = builder
            .create_world(Solid::make_box("World", 50.0, 50.0, 50.0).unwrap(), air.clone())
            .unwrap();
        for i in 0..count {
            let solid = Solid::make_box(&format!("Part{i}"), 0.5, 0.5, 0.5).unwrap();
            builder
                .place(
                    &format!("Part{i}"),
                    solid,
                    air.clone(),
                    false,
                    Vector3::new(i as f64, 0.0, 0.0),
                    None,
                    world,
                )
                .unwrap();
        }

        let tree = builder.finalize().unwrap();
        prop_assert_eq!(tree.len(), count + 1);
        prop_assert_eq!(tree.children(tree.root()).len(), count);
    }
}
