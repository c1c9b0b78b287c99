//! Error types shared across the culling subsystem.

use crate::core::BlockCoordinate;
use crate::utils::settings::SettingsError;

/// Errors surfaced to callers of the profile manager and benchmark.
#[derive(Debug, thiserror::Error)]
pub enum CullError {
    #[error("Unknown profile: {name}")]
    UnknownProfile { name: String },

    #[error("Benchmark aborted: {reason}")]
    BenchmarkAborted { reason: String },

    #[error("A benchmark is already running")]
    BenchmarkBusy,

    #[error("Settings storage failed: {0}")]
    Settings(#[from] SettingsError),
}

/// The world could not answer a block query (e.g. the chunk is not generated yet).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("World oracle unavailable at {}, {}, {}", .at.x, .at.y, .at.z)]
pub struct OracleUnavailable {
    pub at: BlockCoordinate,
}

pub type Result<T> = std::result::Result<T, CullError>;
