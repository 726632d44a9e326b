// ─────────────────────────────────────────────────────────────────────
// SCPN Detector Core — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Unit and physical constants.
//!
//! Lengths are carried in centimeters, densities in g/cm³ and angles in
//! degrees — the units the apparatus data is specified in. Multiply a
//! literal by the unit constant to express intent, e.g. `1.0 * M`.

/// Base length unit [cm].
pub const CM: f64 = 1.0;

/// Millimeter [cm].
pub const MM: f64 = 0.1;

/// Meter [cm].
pub const M: f64 = 100.0;

/// Base angle unit [deg].
pub const DEG: f64 = 1.0;

/// Full revolution [deg].
pub const FULL_TURN_DEG: f64 = 360.0;

/// Avogadro's number (1/mol).
pub const AVOGADRO: f64 = 6.02214076e23;

/// Relative tolerance for abundance / mass-fraction sums.
pub const COMPOSITION_TOLERANCE: f64 = 1e-6;
