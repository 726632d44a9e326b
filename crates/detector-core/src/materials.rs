// ─────────────────────────────────────────────────────────────────────
// SCPN Detector Core — Materials
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Material catalog.
//!
//! Resolves predefined substances by name and synthesizes compounds from
//! isotopic/elemental composition. Isotope abundances feed the transport
//! engine's cross-section lookup downstream, so fraction sums are validated
//! here at build time instead of surfacing later as a silent physics error.
//! Elements and materials are cached by name and shared via `Arc`; the
//! catalog never rebuilds an existing name.

use std::collections::HashMap;
use std::sync::Arc;

use detector_types::constants::COMPOSITION_TOLERANCE;
use detector_types::error::{DetectorError, DetectorResult};
use log::debug;

/// Embedded predefined material table: (name, density [g/cm³], formula).
///
/// The subset of the NIST database this apparatus family draws from.
const PREDEFINED: &[(&str, f64, &str)] = &[
    ("G4_AIR", 1.205e-3, "N0.755O0.232Ar0.013"),
    ("G4_WATER", 1.0, "H2O"),
    ("G4_Al", 2.699, "Al"),
    ("G4_Si", 2.33, "Si"),
    ("G4_Ge", 5.323, "Ge"),
    ("G4_Li", 0.534, "Li"),
    ("G4_Cu", 8.96, "Cu"),
    ("G4_Pb", 11.35, "Pb"),
    ("G4_POLYETHYLENE", 0.94, "C2H4"),
    ("G4_Galactic", 1e-25, "H"),
];

/// A single nuclide.
#[derive(Debug, Clone, PartialEq)]
pub struct Isotope {
    /// Label, e.g. "U235".
    pub name: String,
    /// Atomic number Z.
    pub z: u32,
    /// Nucleon number A.
    pub a: u32,
    /// Molar mass [g/mol].
    pub molar_mass: f64,
}

impl Isotope {
    pub fn new(name: &str, z: u32, a: u32, molar_mass: f64) -> Self {
        Isotope {
            name: name.to_string(),
            z,
            a,
            molar_mass,
        }
    }
}

/// An element as an abundance-weighted set of isotopes.
#[derive(Debug)]
pub struct Element {
    pub name: String,
    pub symbol: String,
    /// (isotope, abundance) pairs; abundances sum to 1 within tolerance.
    pub isotopes: Vec<(Arc<Isotope>, f64)>,
}

impl Element {
    /// Abundance-weighted molar mass [g/mol].
    pub fn mean_molar_mass(&self) -> f64 {
        self.isotopes
            .iter()
            .map(|(iso, frac)| iso.molar_mass * frac)
            .sum()
    }
}

/// How a material is composed.
#[derive(Debug)]
pub enum Composition {
    /// Resolved from the predefined table; formula is informational.
    Predefined { formula: &'static str },
    /// Compound by element mass fractions summing to 1.
    MassFractions(Vec<(Arc<Element>, f64)>),
    /// Compound by integer atoms per molecule.
    AtomCounts(Vec<(Arc<Element>, u32)>),
}

/// An immutable material, shared by every volume that uses it.
#[derive(Debug)]
pub struct Material {
    pub name: String,
    /// Bulk density [g/cm³].
    pub density: f64,
    pub composition: Composition,
}

impl Material {
    /// Mean molar mass per atom [g/mol].
    ///
    /// `None` for predefined entries, whose composition is a formula
    /// reference rather than element data. Mass fractions combine
    /// harmonically, atom counts as a weighted mean over the molecule.
    pub fn mean_molar_mass(&self) -> Option<f64> {
        match &self.composition {
            Composition::Predefined { .. } => None,
            Composition::MassFractions(parts) => {
                let inverse: f64 = parts
                    .iter()
                    .map(|(el, frac)| frac / el.mean_molar_mass())
                    .sum();
                Some(1.0 / inverse)
            }
            Composition::AtomCounts(parts) => {
                let atoms: u32 = parts.iter().map(|(_, n)| *n).sum();
                let mass: f64 = parts
                    .iter()
                    .map(|(el, n)| el.mean_molar_mass() * f64::from(*n))
                    .sum();
                Some(mass / f64::from(atoms))
            }
        }
    }

    /// Atom number density [1/cm³], when molar data is available. This is
    /// the quantity the transport engine folds with microscopic
    /// cross-sections.
    pub fn atom_density(&self) -> Option<f64> {
        self.mean_molar_mass()
            .map(|molar| self.density * detector_types::constants::AVOGADRO / molar)
    }
}

/// Build-time catalog of elements and materials, cached by name.
#[derive(Debug, Default)]
pub struct MaterialCatalog {
    elements: HashMap<String, Arc<Element>>,
    materials: HashMap<String, Arc<Material>>,
}

impl MaterialCatalog {
    pub fn new() -> Self {
        MaterialCatalog::default()
    }

    /// Look up a predefined substance. The first resolution caches the
    /// material; later calls return the same shared instance.
    pub fn resolve_predefined(&mut self, name: &str) -> DetectorResult<Arc<Material>> {
        if let Some(existing) = self.materials.get(name) {
            return Ok(Arc::clone(existing));
        }
        let (_, density, formula) = PREDEFINED
            .iter()
            .find(|(entry, _, _)| *entry == name)
            .ok_or_else(|| DetectorError::UnknownMaterial(name.to_string()))?;
        let material = Arc::new(Material {
            name: name.to_string(),
            density: *density,
            composition: Composition::Predefined { formula },
        });
        debug!("material catalog: resolved predefined {name}");
        self.materials.insert(name.to_string(), Arc::clone(&material));
        Ok(material)
    }

    /// Build an element from isotope abundances.
    ///
    /// Fails with `InvalidComposition` when the set is empty, a fraction is
    /// negative, or the abundance sum deviates from 1 beyond tolerance.
    /// Re-requesting an existing name returns the cached instance.
    pub fn build_element(
        &mut self,
        name: &str,
        symbol: &str,
        abundances: &[(Isotope, f64)],
    ) -> DetectorResult<Arc<Element>> {
        if let Some(existing) = self.elements.get(name) {
            return Ok(Arc::clone(existing));
        }
        check_unit_sum(name, abundances.iter().map(|(_, f)| *f))?;
        let element = Arc::new(Element {
            name: name.to_string(),
            symbol: symbol.to_string(),
            isotopes: abundances
                .iter()
                .map(|(iso, frac)| (Arc::new(iso.clone()), *frac))
                .collect(),
        });
        debug!(
            "material catalog: built element {name} from {} isotope(s)",
            element.isotopes.len()
        );
        self.elements.insert(name.to_string(), Arc::clone(&element));
        Ok(element)
    }

    /// Build a compound from element mass fractions and a bulk density.
    pub fn build_compound(
        &mut self,
        name: &str,
        density: f64,
        contributions: &[(Arc<Element>, f64)],
    ) -> DetectorResult<Arc<Material>> {
        if let Some(existing) = self.materials.get(name) {
            return Ok(Arc::clone(existing));
        }
        check_density(name, density)?;
        check_unit_sum(name, contributions.iter().map(|(_, f)| *f))?;
        let material = Arc::new(Material {
            name: name.to_string(),
            density,
            composition: Composition::MassFractions(
                contributions
                    .iter()
                    .map(|(el, frac)| (Arc::clone(el), *frac))
                    .collect(),
            ),
        });
        debug!("material catalog: built compound {name} at {density} g/cm3");
        self.materials.insert(name.to_string(), Arc::clone(&material));
        Ok(material)
    }

    /// Build a compound from atoms-per-molecule counts and a bulk density.
    pub fn build_molecule(
        &mut self,
        name: &str,
        density: f64,
        atoms: &[(Arc<Element>, u32)],
    ) -> DetectorResult<Arc<Material>> {
        if let Some(existing) = self.materials.get(name) {
            return Ok(Arc::clone(existing));
        }
        check_density(name, density)?;
        if atoms.is_empty() {
            return Err(DetectorError::InvalidComposition {
                name: name.to_string(),
                reason: "no element contributions".to_string(),
            });
        }
        if let Some((el, _)) = atoms.iter().find(|(_, n)| *n == 0) {
            return Err(DetectorError::InvalidComposition {
                name: name.to_string(),
                reason: format!("element {} has zero atoms", el.name),
            });
        }
        let material = Arc::new(Material {
            name: name.to_string(),
            density,
            composition: Composition::AtomCounts(
                atoms.iter().map(|(el, n)| (Arc::clone(el), *n)).collect(),
            ),
        });
        debug!("material catalog: built molecule {name} at {density} g/cm3");
        self.materials.insert(name.to_string(), Arc::clone(&material));
        Ok(material)
    }

    /// Cached element by name.
    pub fn element(&self, name: &str) -> Option<Arc<Element>> {
        self.elements.get(name).map(Arc::clone)
    }

    /// Cached material by name.
    pub fn material(&self, name: &str) -> Option<Arc<Material>> {
        self.materials.get(name).map(Arc::clone)
    }
}

/// Fractions must be non-negative, non-empty, and sum to 1 within tolerance.
fn check_unit_sum(name: &str, fractions: impl Iterator<Item = f64>) -> DetectorResult<()> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for f in fractions {
        if !f.is_finite() || f < 0.0 {
            return Err(DetectorError::InvalidComposition {
                name: name.to_string(),
                reason: format!("negative or non-finite fraction {f}"),
            });
        }
        sum += f;
        count += 1;
    }
    if count == 0 {
        return Err(DetectorError::InvalidComposition {
            name: name.to_string(),
            reason: "no contributions".to_string(),
        });
    }
    if (sum - 1.0).abs() > COMPOSITION_TOLERANCE {
        return Err(DetectorError::InvalidComposition {
            name: name.to_string(),
            reason: format!("fractions sum to {sum}, expected 1"),
        });
    }
    Ok(())
}

fn check_density(name: &str, density: f64) -> DetectorResult<()> {
    if !density.is_finite() || density <= 0.0 {
        return Err(DetectorError::InvalidComposition {
            name: name.to_string(),
            reason: format!("non-positive density {density}"),
        });
    }
    Ok(())
}
