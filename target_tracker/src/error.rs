//! Error types for probes, render backends and configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Why an occlusion probe could not answer a ray query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    /// There is no observer (or no loaded world) to cast from. Aborts the
    /// whole classification cycle.
    #[error("observer unavailable")]
    ObserverUnavailable,
    /// This particular ray could not be evaluated; only its sample is affected.
    #[error("ray could not be evaluated: {0}")]
    Unevaluable(String),
}

/// A render backend refused a frame of primitives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("backend queue is full")]
    Full,
    #[error("backend receiver disconnected")]
    Disconnected,
    #[error("backend rejected frame: {0}")]
    Rejected(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Outcome of an update cycle that published nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CycleError {
    /// No observer or no world this cycle; the previous snapshot stays authoritative.
    #[error("no observer this cycle")]
    TransientAbsence,
}
