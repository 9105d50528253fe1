/// Error types for the voxcube core
use thiserror::Error;

/// Top-level error type for the voxcube core.
#[derive(Debug, Error)]
pub enum VoxcubeError {
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Structural misconfiguration, detected before any frame is rendered.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid configuration for {parameter}: {reason}")]
    InvalidConfiguration {
        parameter: &'static str,
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(parameter: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            parameter,
            reason: reason.into(),
        }
    }
}

/// Convenience type alias for results using [`VoxcubeError`].
pub type Result<T> = std::result::Result<T, VoxcubeError>;
