//! Monte Carlo pricing of European vanilla options.
//!
//! Each simulated path is a single closed-form draw of the terminal
//! underlying price under geometric Brownian motion. One simulation loop
//! serves every payoff; calls and puts differ only in the [`Payoff`]
//! strategy handed to it.
//!
//! # Architecture
//!
//! ```text
//! MonteCarloPricer
//! ├── MonteCarloConfig  (path count, seed, threads, batch size)
//! ├── PricerRng         (uniform stream)
//! └── Orchestration
//!     ├── VanillaParams::validate()
//!     ├── simulate_terminal()   (sequential)
//!     ├── simulate_parallel()   (rayon, one stream per batch)
//!     └── PathStatistics::into_result()
//! ```
//!
//! # Usage
//!
//! ```rust
//! use pricer_pricing::mc::{MonteCarloConfig, MonteCarloPricer, PayoffParams, VanillaParams};
//!
//! let config = MonteCarloConfig::builder()
//!     .n_paths(10_000)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! let mut pricer = MonteCarloPricer::new(config).unwrap();
//! let params = VanillaParams::default();
//!
//! let call = pricer.price_european(&params, &PayoffParams::call(100.0)).unwrap();
//! let put = pricer.price_european(&params, &PayoffParams::put(100.0)).unwrap();
//! assert!(call.price > put.price);
//! ```

mod config;
pub mod parallel;
mod params;
mod paths;
mod payoff;
mod pricer;

pub use config::{
    validate_num_sims, MonteCarloConfig, MonteCarloConfigBuilder, DEFAULT_BATCH_SIZE,
    DEFAULT_PATHS,
};
pub use params::VanillaParams;
pub use paths::{simulate_terminal, PathStatistics};
pub use payoff::{Payoff, PayoffParams, PayoffType};
pub use pricer::{monte_carlo_call_price, monte_carlo_put_price, MonteCarloPricer, PricingResult};
