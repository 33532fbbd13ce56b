//! Monte Carlo simulation configuration.
//!
//! This module provides configuration types and builders for Monte Carlo
//! pricing runs.

use crate::error::PricingError;

/// Default number of simulated paths (matches the reference run).
pub const DEFAULT_PATHS: usize = 10_000_000;

/// Default number of paths evaluated per independent random stream when
/// the parallel driver is enabled.
pub const DEFAULT_BATCH_SIZE: usize = 65_536;

/// Monte Carlo simulation configuration.
///
/// Immutable configuration specifying simulation parameters.
/// Use [`MonteCarloConfigBuilder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::MonteCarloConfig;
///
/// let config = MonteCarloConfig::builder()
///     .n_paths(10_000)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_paths(), 10_000);
/// assert_eq!(config.seed(), Some(42));
/// assert!(!config.is_parallel());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonteCarloConfig {
    /// Number of simulation paths.
    n_paths: usize,
    /// Optional seed for reproducibility.
    seed: Option<u64>,
    /// Worker threads; `None` selects the sequential reference loop.
    n_threads: Option<usize>,
    /// Paths per independent stream in parallel mode.
    batch_size: usize,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            n_paths: DEFAULT_PATHS,
            seed: None,
            n_threads: None,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl MonteCarloConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> MonteCarloConfigBuilder {
        MonteCarloConfigBuilder::default()
    }

    /// Returns the number of simulation paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Returns the optional seed for reproducibility.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns the configured worker thread count, if parallel.
    #[inline]
    pub fn n_threads(&self) -> Option<usize> {
        self.n_threads
    }

    /// Returns the number of paths per random stream in parallel mode.
    #[inline]
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// True when pricing runs through the parallel batch driver.
    #[inline]
    pub fn is_parallel(&self) -> bool {
        self.n_threads.is_some()
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidParameter` if:
    /// - `n_paths` is 0 (reported as `num_sims`)
    /// - `n_threads` is `Some(0)`
    /// - `batch_size` is 0
    pub fn validate(&self) -> Result<(), PricingError> {
        if self.n_paths == 0 {
            return Err(PricingError::invalid(
                "num_sims",
                self.n_paths,
                "must be a positive integer",
            ));
        }
        if self.n_threads == Some(0) {
            return Err(PricingError::invalid(
                "threads",
                0,
                "must be at least 1 when set",
            ));
        }
        if self.batch_size == 0 {
            return Err(PricingError::invalid(
                "batch_size",
                0,
                "must be a positive integer",
            ));
        }
        Ok(())
    }
}

/// Builder for [`MonteCarloConfig`].
///
/// Provides a fluent API with validation at build time.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::MonteCarloConfig;
///
/// let config = MonteCarloConfig::builder()
///     .n_paths(1_000_000)
///     .seed(12345)
///     .n_threads(4)
///     .batch_size(50_000)
///     .build()
///     .expect("valid config");
///
/// assert!(config.is_parallel());
/// ```
#[derive(Clone, Debug, Default)]
pub struct MonteCarloConfigBuilder {
    n_paths: Option<usize>,
    seed: Option<u64>,
    n_threads: Option<usize>,
    batch_size: Option<usize>,
}

impl MonteCarloConfigBuilder {
    /// Sets the number of simulation paths.
    #[inline]
    pub fn n_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = Some(n_paths);
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets an optional seed, leaving the builder unseeded for `None`.
    #[inline]
    pub fn maybe_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Enables the parallel driver with the given worker count.
    #[inline]
    pub fn n_threads(mut self, n_threads: usize) -> Self {
        self.n_threads = Some(n_threads);
        self
    }

    /// Sets an optional worker count; `None` keeps the sequential loop.
    #[inline]
    pub fn maybe_threads(mut self, n_threads: Option<usize>) -> Self {
        self.n_threads = n_threads;
        self
    }

    /// Sets the number of paths per independent random stream.
    #[inline]
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    /// Builds the configuration.
    ///
    /// Unset fields take their defaults ([`DEFAULT_PATHS`],
    /// [`DEFAULT_BATCH_SIZE`], unseeded, sequential).
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidParameter` if validation fails.
    pub fn build(self) -> Result<MonteCarloConfig, PricingError> {
        let config = MonteCarloConfig {
            n_paths: self.n_paths.unwrap_or(DEFAULT_PATHS),
            seed: self.seed,
            n_threads: self.n_threads,
            batch_size: self.batch_size.unwrap_or(DEFAULT_BATCH_SIZE),
        };

        config.validate()?;
        Ok(config)
    }
}

/// Converts a signed path count into `usize`, rejecting zero and negatives.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::validate_num_sims;
///
/// assert_eq!(validate_num_sims(10).unwrap(), 10);
/// assert!(validate_num_sims(0).is_err());
/// assert!(validate_num_sims(-1).is_err());
/// ```
pub fn validate_num_sims(num_sims: i64) -> Result<usize, PricingError> {
    if num_sims <= 0 {
        return Err(PricingError::invalid(
            "num_sims",
            num_sims,
            "must be a positive integer",
        ));
    }
    usize::try_from(num_sims)
        .map_err(|_| PricingError::invalid("num_sims", num_sims, "exceeds platform limits"))
}
