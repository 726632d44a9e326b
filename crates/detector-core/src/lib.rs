// ─────────────────────────────────────────────────────────────────────
// SCPN Detector Core — Detector Core
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Geometry and material composition builder.
//!
//! Builds the static physical model of a radiation-detection apparatus:
//! materials synthesized from isotopic abundances, a tree of nested solid
//! volumes with parent-relative transforms, and a registry binding named
//! volumes to energy-deposit scorers. The finished [`GeometryTree`] and
//! [`SensitiveDetectorRegistry`] are immutable, read-only inputs to an
//! external particle-transport engine; nothing here tracks, steps, or
//! scores particles.

pub mod apparatus;
pub mod geometry;
pub mod materials;
pub mod scoring;
pub mod solids;

pub use apparatus::{build_apparatus, hpge_spectrometer, Apparatus};
pub use geometry::{GeometryBuilder, GeometryTree, Placement, PlacementId, Volume};
pub use materials::{Composition, Element, Isotope, Material, MaterialCatalog};
pub use scoring::{ScorerId, SensitiveDetectorRegistry};
pub use solids::{Shape, Solid};
