// ─────────────────────────────────────────────────────────────────────
// SCPN Detector Core — Solids
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Parametric solids.
//!
//! Pure geometric descriptions: no material, no placement. Two solids with
//! identical parameters are interchangeable; nothing deduplicates them.

use detector_types::constants::FULL_TURN_DEG;
use detector_types::error::{DetectorError, DetectorResult};

/// Shape parameters. Lengths in cm, angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Rectangular box by half-extents.
    Box {
        half_x: f64,
        half_y: f64,
        half_z: f64,
    },
    /// Cylindrical tube segment (annulus when `inner_r > 0`).
    Tube {
        inner_r: f64,
        outer_r: f64,
        half_height: f64,
        start_angle_deg: f64,
        sweep_deg: f64,
    },
}

impl Shape {
    /// Conservative axis-aligned half-extents enclosing the shape.
    ///
    /// Partial-sweep tubes are bounded by the full annulus box.
    pub fn half_extents(&self) -> [f64; 3] {
        match *self {
            Shape::Box {
                half_x,
                half_y,
                half_z,
            } => [half_x, half_y, half_z],
            Shape::Tube {
                outer_r,
                half_height,
                ..
            } => [outer_r, outer_r, half_height],
        }
    }

    /// Radius of the sphere circumscribing the shape.
    pub fn bounding_radius(&self) -> f64 {
        let [hx, hy, hz] = self.half_extents();
        (hx * hx + hy * hy + hz * hz).sqrt()
    }
}

/// A named parametric shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Solid {
    pub name: String,
    pub shape: Shape,
}

impl Solid {
    /// Box by half-extents [cm].
    pub fn make_box(name: &str, half_x: f64, half_y: f64, half_z: f64) -> DetectorResult<Solid> {
        for (label, value) in [("half_x", half_x), ("half_y", half_y), ("half_z", half_z)] {
            check_extent(name, label, value)?;
        }
        Ok(Solid {
            name: name.to_string(),
            shape: Shape::Box {
                half_x,
                half_y,
                half_z,
            },
        })
    }

    /// Tube segment: radii and half-height [cm], angles [deg].
    ///
    /// Requires `inner_r < outer_r` and a sweep in (0°, 360°].
    pub fn make_tube(
        name: &str,
        inner_r: f64,
        outer_r: f64,
        half_height: f64,
        start_angle_deg: f64,
        sweep_deg: f64,
    ) -> DetectorResult<Solid> {
        for (label, value) in [
            ("inner_r", inner_r),
            ("outer_r", outer_r),
            ("half_height", half_height),
        ] {
            check_extent(name, label, value)?;
        }
        if inner_r >= outer_r {
            return Err(DetectorError::InvalidDimension {
                name: name.to_string(),
                reason: format!("inner radius {inner_r} must be below outer radius {outer_r}"),
            });
        }
        if !start_angle_deg.is_finite() {
            return Err(DetectorError::InvalidDimension {
                name: name.to_string(),
                reason: format!("non-finite start angle {start_angle_deg}"),
            });
        }
        if !sweep_deg.is_finite() || sweep_deg <= 0.0 || sweep_deg > FULL_TURN_DEG {
            return Err(DetectorError::InvalidDimension {
                name: name.to_string(),
                reason: format!("sweep {sweep_deg} deg outside (0, 360]"),
            });
        }
        Ok(Solid {
            name: name.to_string(),
            shape: Shape::Tube {
                inner_r,
                outer_r,
                half_height,
                start_angle_deg,
                sweep_deg,
            },
        })
    }
}

fn check_extent(name: &str, label: &str, value: f64) -> DetectorResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(DetectorError::InvalidDimension {
            name: name.to_string(),
            reason: format!("{label} = {value} must be finite and non-negative"),
        });
    }
    Ok(())
}
