//! CLI error types

use pricer_pricing::PricingError;
use thiserror::Error;

use crate::config::ConfigError;

/// Exit code for rejected pricing inputs.
pub const EXIT_INVALID_PARAMETER: u8 = 2;
/// Exit code for every other failure.
pub const EXIT_FAILURE: u8 = 1;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialisation error: {0}")]
    Serialisation(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Pricing(PricingError::InvalidParameter { .. }) => EXIT_INVALID_PARAMETER,
            _ => EXIT_FAILURE,
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
