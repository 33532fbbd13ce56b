//! Monte Carlo pricing engine.
//!
//! This module provides the orchestration layer for European vanilla
//! pricing.
//!
//! # Overview
//!
//! The [`MonteCarloPricer`] coordinates:
//! 1. Input validation (via [`VanillaParams::validate`])
//! 2. Random number generation (via [`PricerRng`])
//! 3. Terminal-value simulation (via [`simulate_terminal`] or the
//!    [`parallel`](super::parallel) driver)
//! 4. Discounting and aggregation

use tracing::debug;

use super::config::{validate_num_sims, MonteCarloConfig};
use super::parallel::simulate_parallel;
use super::params::VanillaParams;
use super::paths::simulate_terminal;
use super::payoff::{Payoff, PayoffParams};
use crate::error::PricingError;
use crate::rng::{PricerRng, UniformSource};

/// Monte Carlo estimate of a single option price.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::PricingResult;
///
/// let result = PricingResult {
///     price: 10.5,
///     std_error: 0.05,
///     n_paths: 100_000,
/// };
///
/// println!("Price: {} +/- {}", result.price, result.confidence_95());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingResult {
    /// Discounted mean payoff.
    pub price: f64,
    /// Standard error of the price estimate.
    pub std_error: f64,
    /// Number of simulated paths.
    pub n_paths: usize,
}

impl PricingResult {
    /// Returns the 95% confidence interval half-width.
    #[inline]
    pub fn confidence_95(&self) -> f64 {
        1.96 * self.std_error
    }

    /// Returns the 99% confidence interval half-width.
    #[inline]
    pub fn confidence_99(&self) -> f64 {
        2.576 * self.std_error
    }
}

/// Monte Carlo pricing engine.
///
/// Owns a validated configuration and the random stream. Successive
/// pricing calls continue the stream; [`reset`](Self::reset) rewinds it.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{MonteCarloConfig, MonteCarloPricer, VanillaParams};
///
/// let config = MonteCarloConfig::builder()
///     .n_paths(10_000)
///     .seed(42)
///     .build()
///     .unwrap();
///
/// let mut pricer = MonteCarloPricer::new(config).unwrap();
/// let (call, put) = pricer.price_call_put(&VanillaParams::default()).unwrap();
///
/// assert!(call.price > 0.0);
/// assert!(put.price > 0.0);
/// ```
pub struct MonteCarloPricer {
    config: MonteCarloConfig,
    rng: PricerRng,
}

impl MonteCarloPricer {
    /// Creates a new pricer with the given configuration.
    ///
    /// An unseeded configuration draws its seed from OS entropy; the
    /// chosen seed is available through [`seed`](Self::seed).
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidParameter` if configuration is invalid.
    pub fn new(config: MonteCarloConfig) -> Result<Self, PricingError> {
        config.validate()?;

        let rng = match config.seed() {
            Some(seed) => PricerRng::from_seed(seed),
            None => PricerRng::from_entropy(),
        };

        Ok(Self { config, rng })
    }

    /// Creates a new pricer with a specific seed, overriding the config.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidParameter` if configuration is invalid.
    pub fn with_seed(config: MonteCarloConfig, seed: u64) -> Result<Self, PricingError> {
        config.validate()?;

        Ok(Self {
            config,
            rng: PricerRng::from_seed(seed),
        })
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    /// Returns the seed of the current random stream.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Rewinds the random stream to its initial seed.
    pub fn reset(&mut self) {
        self.rng = PricerRng::from_seed(self.rng.seed());
    }

    /// Restarts the random stream from a new seed.
    pub fn reset_with_seed(&mut self, seed: u64) {
        self.rng = PricerRng::from_seed(seed);
    }

    /// Prices a European option with an arbitrary terminal payoff.
    ///
    /// # Errors
    ///
    /// - `PricingError::InvalidParameter` if `params` fails validation;
    ///   nothing is simulated in that case.
    /// - `PricingError::ThreadPool` if the parallel driver cannot start.
    pub fn price_european<P>(
        &mut self,
        params: &VanillaParams,
        payoff: &P,
    ) -> Result<PricingResult, PricingError>
    where
        P: Payoff + Sync + ?Sized,
    {
        params.validate()?;

        let n_paths = self.config.n_paths();

        let stats = match self.config.n_threads() {
            Some(n_threads) => {
                let base_seed = self.rng.gen_seed();
                let batch_size = self.config.batch_size();
                debug!(
                    n_paths,
                    n_threads,
                    batch_size,
                    n_batches = n_paths.div_ceil(batch_size),
                    seed = self.rng.seed(),
                    "starting parallel pricing run"
                );
                simulate_parallel(n_paths, params, payoff, base_seed, batch_size, n_threads)?
            }
            None => {
                debug!(n_paths, seed = self.rng.seed(), "starting pricing run");
                simulate_terminal(n_paths, params, payoff, &mut self.rng)
            }
        };

        let result = stats.into_result(params.discount_factor());
        debug!(
            price = result.price,
            std_error = result.std_error,
            "pricing run complete"
        );

        Ok(result)
    }

    /// Prices a European call struck at `params.strike`.
    ///
    /// # Errors
    ///
    /// See [`price_european`](Self::price_european).
    pub fn price_call(&mut self, params: &VanillaParams) -> Result<PricingResult, PricingError> {
        self.price_european(params, &PayoffParams::call(params.strike))
    }

    /// Prices a European put struck at `params.strike`.
    ///
    /// # Errors
    ///
    /// See [`price_european`](Self::price_european).
    pub fn price_put(&mut self, params: &VanillaParams) -> Result<PricingResult, PricingError> {
        self.price_european(params, &PayoffParams::put(params.strike))
    }

    /// Prices the call, then the put, on consecutive sections of the stream.
    ///
    /// # Errors
    ///
    /// See [`price_european`](Self::price_european).
    pub fn price_call_put(
        &mut self,
        params: &VanillaParams,
    ) -> Result<(PricingResult, PricingResult), PricingError> {
        let call = self.price_call(params)?;
        let put = self.price_put(params)?;
        Ok((call, put))
    }
}

/// Prices a European call by simulating `num_sims` terminal prices.
///
/// # Errors
///
/// Returns `PricingError::InvalidParameter` when `num_sims <= 0`, when
/// `spot`, `strike`, `volatility` or `maturity` is negative, or when any
/// real input is not finite.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::monte_carlo_call_price;
/// use pricer_pricing::rng::PricerRng;
///
/// let mut rng = PricerRng::from_seed(1);
/// let price = monte_carlo_call_price(100_000, 100.0, 100.0, 0.05, 0.2, 1.0, &mut rng).unwrap();
/// assert!((price - 10.4506).abs() < 0.5);
///
/// assert!(monte_carlo_call_price(0, 100.0, 100.0, 0.05, 0.2, 1.0, &mut rng).is_err());
/// ```
pub fn monte_carlo_call_price<U>(
    num_sims: i64,
    spot: f64,
    strike: f64,
    rate: f64,
    volatility: f64,
    maturity: f64,
    source: &mut U,
) -> Result<f64, PricingError>
where
    U: UniformSource + ?Sized,
{
    let params = VanillaParams::new(spot, strike, rate, volatility, maturity);
    price_with_source(num_sims, &params, &PayoffParams::call(strike), source)
}

/// Prices a European put by simulating `num_sims` terminal prices.
///
/// # Errors
///
/// Same conditions as [`monte_carlo_call_price`].
pub fn monte_carlo_put_price<U>(
    num_sims: i64,
    spot: f64,
    strike: f64,
    rate: f64,
    volatility: f64,
    maturity: f64,
    source: &mut U,
) -> Result<f64, PricingError>
where
    U: UniformSource + ?Sized,
{
    let params = VanillaParams::new(spot, strike, rate, volatility, maturity);
    price_with_source(num_sims, &params, &PayoffParams::put(strike), source)
}

fn price_with_source<U>(
    num_sims: i64,
    params: &VanillaParams,
    payoff: &PayoffParams,
    source: &mut U,
) -> Result<f64, PricingError>
where
    U: UniformSource + ?Sized,
{
    let n_paths = validate_num_sims(num_sims)?;
    params.validate()?;

    let stats = simulate_terminal(n_paths, params, payoff, source);
    Ok(stats.into_result(params.discount_factor()).price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn create_test_pricer(n_paths: usize) -> MonteCarloPricer {
        let config = MonteCarloConfig::builder()
            .n_paths(n_paths)
            .seed(42)
            .build()
            .unwrap();
        MonteCarloPricer::new(config).unwrap()
    }

    #[test]
    fn test_pricer_creation() {
        let pricer = create_test_pricer(1_000);
        assert_eq!(pricer.config().n_paths(), 1_000);
        assert_eq!(pricer.seed(), 42);
    }

    #[test]
    fn test_pricer_with_seed() {
        let config = MonteCarloConfig::builder().n_paths(100).build().unwrap();
        let pricer = MonteCarloPricer::with_seed(config, 7).unwrap();
        assert_eq!(pricer.seed(), 7);
    }

    #[test]
    fn test_unseeded_pricer_can_be_replayed() {
        let config = MonteCarloConfig::builder().n_paths(2_000).build().unwrap();
        let mut pricer = MonteCarloPricer::new(config.clone()).unwrap();
        let first = pricer.price_call(&VanillaParams::default()).unwrap();

        let mut replay = MonteCarloPricer::with_seed(config, pricer.seed()).unwrap();
        let second = replay.price_call(&VanillaParams::default()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_prices_non_negative() {
        let mut pricer = create_test_pricer(10_000);
        let deep_otm = VanillaParams::new(50.0, 200.0, 0.05, 0.1, 0.25);

        let (call, put) = pricer.price_call_put(&deep_otm).unwrap();
        assert!(call.price >= 0.0);
        assert!(put.price >= 0.0);
        assert_eq!(call.n_paths, 10_000);
    }

    #[test]
    fn test_call_put_parity_mc() {
        let mut pricer = create_test_pricer(200_000);
        let params = VanillaParams::default();

        let (call, put) = pricer.price_call_put(&params).unwrap();
        let parity = params.parity_forward();
        let tolerance = 5.0 * (call.std_error + put.std_error);

        assert!(
            (call.price - put.price - parity).abs() < tolerance,
            "C - P = {}, expected {} +/- {}",
            call.price - put.price,
            parity,
            tolerance
        );
    }

    #[test]
    fn test_call_monotone_in_spot_with_common_random_numbers() {
        let mut pricer = create_test_pricer(20_000);
        let mut previous = 0.0;

        for spot in [80.0, 90.0, 100.0, 110.0, 120.0] {
            pricer.reset();
            let params = VanillaParams {
                spot,
                ..Default::default()
            };
            let price = pricer.price_call(&params).unwrap().price;
            assert!(price >= previous, "call not monotone at spot {spot}");
            previous = price;
        }
    }

    #[test]
    fn test_put_non_increasing_in_spot_with_common_random_numbers() {
        let mut pricer = create_test_pricer(20_000);
        let mut previous = f64::INFINITY;

        for spot in [80.0, 90.0, 100.0, 110.0, 120.0] {
            pricer.reset();
            let params = VanillaParams {
                spot,
                ..Default::default()
            };
            let price = pricer.price_put(&params).unwrap().price;
            assert!(price <= previous, "put not monotone at spot {spot}");
            previous = price;
        }
    }

    #[test]
    fn test_zero_volatility_matches_discounted_forward() {
        let mut pricer = create_test_pricer(1_000);
        let params = VanillaParams::new(100.0, 95.0, 0.05, 0.0, 1.0);
        let df = (-0.05_f64).exp();
        let forward = 100.0 * 0.05_f64.exp();

        let (call, put) = pricer.price_call_put(&params).unwrap();
        assert_relative_eq!(call.price, (forward - 95.0) * df, epsilon = 1e-12);
        assert_relative_eq!(put.price, 0.0, epsilon = 1e-12);
        assert!(call.std_error < 1e-6);
    }

    #[test]
    fn test_invalid_params_rejected_before_simulation() {
        let mut pricer = create_test_pricer(1_000);
        let params = VanillaParams {
            volatility: -0.2,
            ..Default::default()
        };

        let err = pricer.price_call(&params).unwrap_err();
        assert_eq!(err.parameter(), Some("volatility"));

        // A rejected call must not consume the stream.
        let after_error = pricer.price_call(&VanillaParams::default()).unwrap();
        let mut fresh = create_test_pricer(1_000);
        assert_eq!(after_error, fresh.price_call(&VanillaParams::default()).unwrap());
    }

    #[test]
    fn test_pricer_reproducibility() {
        let mut pricer1 = create_test_pricer(5_000);
        let mut pricer2 = create_test_pricer(5_000);
        let params = VanillaParams::default();

        assert_eq!(
            pricer1.price_put(&params).unwrap(),
            pricer2.price_put(&params).unwrap()
        );
    }

    #[test]
    fn test_pricer_reset() {
        let mut pricer = create_test_pricer(5_000);
        let params = VanillaParams::default();

        let first = pricer.price_call(&params).unwrap();
        let second = pricer.price_call(&params).unwrap();
        assert_ne!(first.price, second.price);

        pricer.reset();
        assert_eq!(pricer.price_call(&params).unwrap(), first);

        pricer.reset_with_seed(9);
        assert_eq!(pricer.seed(), 9);
    }

    #[test]
    fn test_parallel_pricer_is_thread_count_independent() {
        let build = |threads| {
            let config = MonteCarloConfig::builder()
                .n_paths(40_000)
                .seed(11)
                .n_threads(threads)
                .batch_size(4_096)
                .build()
                .unwrap();
            MonteCarloPricer::new(config).unwrap()
        };
        let params = VanillaParams::default();

        let one = build(1).price_call(&params).unwrap();
        let four = build(4).price_call(&params).unwrap();
        assert_eq!(one, four);
    }

    #[test]
    fn test_closure_payoff_through_pricer() {
        let mut pricer = create_test_pricer(1_000);
        let params = VanillaParams::new(100.0, 100.0, 0.0, 0.0, 1.0);
        let digital = |s: f64| if s >= 100.0 { 1.0 } else { 0.0 };

        let result = pricer.price_european(&params, &digital).unwrap();
        assert_relative_eq!(result.price, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_free_functions_reject_bad_num_sims() {
        let mut rng = PricerRng::from_seed(1);

        for num_sims in [0, -1] {
            let err = monte_carlo_call_price(num_sims, 100.0, 100.0, 0.05, 0.2, 1.0, &mut rng)
                .unwrap_err();
            assert_eq!(err.parameter(), Some("num_sims"));

            let err = monte_carlo_put_price(num_sims, 100.0, 100.0, 0.05, 0.2, 1.0, &mut rng)
                .unwrap_err();
            assert_eq!(err.parameter(), Some("num_sims"));
        }
    }

    #[test]
    fn test_free_functions_reject_negative_inputs() {
        let mut rng = PricerRng::from_seed(1);

        let err = monte_carlo_call_price(10, -100.0, 100.0, 0.05, 0.2, 1.0, &mut rng).unwrap_err();
        assert_eq!(err.parameter(), Some("spot"));

        let err = monte_carlo_put_price(10, 100.0, -1.0, 0.05, 0.2, 1.0, &mut rng).unwrap_err();
        assert_eq!(err.parameter(), Some("strike"));

        let err = monte_carlo_put_price(10, 100.0, 100.0, 0.05, 0.2, -1.0, &mut rng).unwrap_err();
        assert_eq!(err.parameter(), Some("maturity"));
    }

    #[test]
    fn test_free_function_matches_pricer() {
        let mut rng = PricerRng::from_seed(42);
        let free = monte_carlo_call_price(5_000, 100.0, 100.0, 0.05, 0.2, 1.0, &mut rng).unwrap();

        let mut pricer = create_test_pricer(5_000);
        let via_pricer = pricer.price_call(&VanillaParams::default()).unwrap();

        assert_eq!(free, via_pricer.price);
    }

    #[test]
    fn test_pricing_result_confidence() {
        let result = PricingResult {
            price: 10.0,
            std_error: 0.1,
            n_paths: 100,
        };
        assert_relative_eq!(result.confidence_95(), 0.196, epsilon = 1e-12);
        assert_relative_eq!(result.confidence_99(), 0.2576, epsilon = 1e-12);
    }
}
