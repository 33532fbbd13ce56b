//! Error types for the pricing engine.
//!
//! This module provides:
//! - `PricingError`: input validation and runtime failures of a pricing run

use thiserror::Error;

/// Pricing engine errors.
///
/// All parameter checks run before any path is simulated, so a returned
/// error always means no partial computation took place.
///
/// # Variants
/// - `InvalidParameter`: an input is outside its valid domain
/// - `ThreadPool`: the worker pool for parallel evaluation could not be built
///
/// # Examples
/// ```
/// use pricer_pricing::PricingError;
///
/// let err = PricingError::invalid("num_sims", 0, "must be positive");
/// assert_eq!(
///     format!("{}", err),
///     "Invalid parameter 'num_sims' = 0: must be positive"
/// );
/// ```
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PricingError {
    /// An input parameter is outside its valid domain.
    #[error("Invalid parameter '{name}' = {value}: {reason}")]
    InvalidParameter {
        /// Parameter name as exposed to the user.
        name: &'static str,
        /// The rejected value, formatted for display.
        value: String,
        /// Why the value was rejected.
        reason: &'static str,
    },

    /// Building the worker thread pool failed.
    #[error("Thread pool error: {0}")]
    ThreadPool(String),
}

impl PricingError {
    /// Creates an `InvalidParameter` error.
    pub fn invalid(name: &'static str, value: impl ToString, reason: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }

    /// Returns the offending parameter name for `InvalidParameter` errors.
    pub fn parameter(&self) -> Option<&'static str> {
        match self {
            Self::InvalidParameter { name, .. } => Some(name),
            Self::ThreadPool(_) => None,
        }
    }
}
