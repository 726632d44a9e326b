// ─────────────────────────────────────────────────────────────────────
// SCPN Detector Core — Apparatus Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Apparatus description schema.
//!
//! One JSON document describes a complete apparatus: elements (with isotope
//! abundances), materials, the world volume, every placed volume, and the
//! scorer bindings. Volumes reference parents by name and must be listed
//! parents-first; the assembly layer turns the document into builder calls.

use serde::{Deserialize, Serialize};

/// Top-level apparatus description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApparatusConfig {
    pub apparatus_name: String,
    pub world: WorldConfig,
    /// Custom elements built from isotope abundances.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub elements: Vec<ElementConfig>,
    /// Materials used by the volumes below.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub materials: Vec<MaterialConfig>,
    /// Placed volumes, parents before children.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<VolumeConfig>,
    /// Scorer kinds and the volumes they read out.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scorers: Vec<ScorerConfig>,
}

/// The unique root volume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    pub name: String,
    pub material: String,
    pub shape: ShapeConfig,
}

/// Parametric shape, tagged by kind. Lengths in cm, angles in degrees.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeConfig {
    Box {
        half_x_cm: f64,
        half_y_cm: f64,
        half_z_cm: f64,
    },
    Tube {
        inner_r_cm: f64,
        outer_r_cm: f64,
        half_height_cm: f64,
        #[serde(default)]
        start_angle_deg: f64,
        #[serde(default = "default_sweep_deg")]
        sweep_deg: f64,
    },
}

fn default_sweep_deg() -> f64 {
    360.0
}

/// One isotope contribution to an element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IsotopeConfig {
    /// Isotope label, e.g. "U235".
    pub isotope: String,
    /// Atomic number Z.
    pub z: u32,
    /// Nucleon number A.
    pub a: u32,
    /// Molar mass [g/mol].
    pub molar_mass: f64,
    /// Abundance fraction; fractions of one element sum to 1.
    pub abundance: f64,
}

/// An element assembled from isotope abundances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementConfig {
    pub name: String,
    pub symbol: String,
    pub isotopes: Vec<IsotopeConfig>,
}

/// A material entry.
///
/// With `elements` non-empty this is a compound (requires `density_g_cm3`);
/// otherwise `source` (defaulting to `name`) is looked up in the predefined
/// material table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density_g_cm3: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub elements: Vec<ElementFractionConfig>,
}

/// One element contribution to a compound, by mass fraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementFractionConfig {
    pub element: String,
    pub mass_fraction: f64,
}

/// One placed volume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeConfig {
    pub name: String,
    pub shape: ShapeConfig,
    pub material: String,
    #[serde(default)]
    pub sensitive: bool,
    /// Translation in the parent frame [cm].
    pub position_cm: [f64; 3],
    /// Optional extrinsic x-y-z Euler rotation [deg].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation_deg: Option<[f64; 3]>,
    /// Parent volume name; the world when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

/// A scorer kind and the volumes it is bound to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScorerConfig {
    pub scorer: String,
    pub volumes: Vec<String>,
}

impl ApparatusConfig {
    /// Load from a JSON file.
    pub fn from_file(path: &str) -> crate::error::DetectorResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Parse from a JSON string.
    pub fn from_json(contents: &str) -> crate::error::DetectorResult<Self> {
        Ok(serde_json::from_str(contents)?)
    }
}
