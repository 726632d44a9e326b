// ─────────────────────────────────────────────────────────────────────
// SCPN Detector Core — Errors
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use thiserror::Error;

/// Construction-time failures. Every variant aborts the build; a partially
/// assembled apparatus is never handed to the transport engine.
#[derive(Error, Debug)]
pub enum DetectorError {
    #[error("Unknown material: {0}")]
    UnknownMaterial(String),

    #[error("Invalid composition for {name}: {reason}")]
    InvalidComposition { name: String, reason: String },

    #[error("Invalid dimension for solid {name}: {reason}")]
    InvalidDimension { name: String, reason: String },

    #[error("World placement already exists")]
    DuplicateRoot,

    #[error("Cannot finalize: no world placement was created")]
    MissingRoot,

    #[error("Unknown parent placement: {0}")]
    UnknownParent(String),

    #[error("Duplicate volume name: {0}")]
    DuplicateVolumeName(String),

    #[error("Geometry builder is closed")]
    BuilderClosed,

    #[error("Unknown volume: {0}")]
    UnknownVolume(String),

    #[error("Unknown scorer id: {0}")]
    UnknownScorer(usize),

    #[error("Volume {volume} is already bound to scorer {scorer}")]
    DuplicateBinding { volume: String, scorer: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type DetectorResult<T> = Result<T, DetectorError>;
