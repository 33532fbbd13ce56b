//! Terminal-value path simulation.
//!
//! Each path is a single closed-form draw of the terminal price; there is
//! no time stepping. The deterministic part of the lognormal exponent is
//! hoisted out of the loop:
//!
//! ```text
//! S_adjust = S · exp(T(r - σ²/2))
//! S_T      = S_adjust · exp(sqrt(σ²T) · Z)
//! ```

use super::params::VanillaParams;
use super::payoff::Payoff;
use super::pricer::PricingResult;
use crate::rng::{gaussian_polar, UniformSource};

/// Running payoff sums of a batch of simulated paths.
///
/// Batches merge by addition, so results from independent streams can be
/// combined before discounting.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PathStatistics {
    /// Sum of undiscounted payoffs.
    pub sum: f64,
    /// Sum of squared undiscounted payoffs.
    pub sum_sq: f64,
    /// Number of paths accumulated.
    pub n_paths: usize,
}

impl PathStatistics {
    /// Combines the statistics of two disjoint batches.
    #[inline]
    pub fn merge(self, other: Self) -> Self {
        Self {
            sum: self.sum + other.sum,
            sum_sq: self.sum_sq + other.sum_sq,
            n_paths: self.n_paths + other.n_paths,
        }
    }

    /// Sample mean of the undiscounted payoff.
    #[inline]
    pub fn mean(&self) -> f64 {
        self.sum / self.n_paths as f64
    }

    /// Unbiased sample variance of the undiscounted payoff.
    ///
    /// Zero for fewer than two paths.
    pub fn variance(&self) -> f64 {
        if self.n_paths < 2 {
            return 0.0;
        }
        let n = self.n_paths as f64;
        let mean = self.sum / n;
        ((self.sum_sq - n * mean * mean) / (n - 1.0)).max(0.0)
    }

    /// Discounts the mean payoff and its standard error.
    pub fn into_result(self, discount_factor: f64) -> PricingResult {
        let std_error = (self.variance() / self.n_paths as f64).sqrt();

        PricingResult {
            price: self.mean() * discount_factor,
            std_error: std_error * discount_factor,
            n_paths: self.n_paths,
        }
    }
}

/// Simulates `n_paths` terminal prices and accumulates their payoffs.
///
/// Parameters must already be validated; this loop performs no checks.
///
/// # Algorithm
///
/// 1. Precompute `S_adjust` and `sqrt(σ²T)`
/// 2. For each path draw `Z` with the polar method and set
///    `S_T = S_adjust · exp(sqrt(σ²T) · Z)`
/// 3. Accumulate `payoff(S_T)` and its square
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{simulate_terminal, PayoffParams, VanillaParams};
/// use pricer_pricing::rng::PricerRng;
///
/// let params = VanillaParams::default();
/// let mut rng = PricerRng::from_seed(1);
/// let stats = simulate_terminal(1_000, &params, &PayoffParams::call(100.0), &mut rng);
///
/// assert_eq!(stats.n_paths, 1_000);
/// assert!(stats.sum >= 0.0);
/// ```
pub fn simulate_terminal<P, U>(
    n_paths: usize,
    params: &VanillaParams,
    payoff: &P,
    source: &mut U,
) -> PathStatistics
where
    P: Payoff + ?Sized,
    U: UniformSource + ?Sized,
{
    let s_adjust = params.drift_adjusted_spot();
    let vol_sqrt_t = params.vol_sqrt_t();

    let mut sum = 0.0;
    let mut sum_sq = 0.0;

    for _ in 0..n_paths {
        let z = gaussian_polar(source);
        let terminal = s_adjust * (vol_sqrt_t * z).exp();
        let value = payoff.payoff(terminal);
        sum += value;
        sum_sq += value * value;
    }

    PathStatistics {
        sum,
        sum_sq,
        n_paths,
    }
}
