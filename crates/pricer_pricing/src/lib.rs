//! # Vanilla Option Monte Carlo Engine
//!
//! pricer_pricing values European call and put options by Monte Carlo
//! simulation of the terminal underlying price under Black-Scholes dynamics.
//!
//! ## Components
//!
//! - [`rng`]: injectable uniform source and the Marsaglia polar Gaussian generator
//! - [`mc`]: parameter validation, the shared terminal-value simulator, the
//!   pricer and its parallel batch driver
//! - [`analytical`]: closed-form Black-Scholes prices used as a reference
//! - [`error`]: the crate's error type
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::mc::monte_carlo_call_price;
//! use pricer_pricing::rng::PricerRng;
//!
//! let mut rng = PricerRng::from_seed(2024);
//! let call = monte_carlo_call_price(200_000, 100.0, 100.0, 0.05, 0.2, 1.0, &mut rng).unwrap();
//!
//! // Black-Scholes reference: 10.4506
//! assert!((call - 10.4506).abs() < 0.2);
//! ```
//!
//! ## Features
//!
//! - `serde`: `Serialize`/`Deserialize` for [`VanillaParams`], [`PricingResult`]
//!   and [`PayoffParams`]

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
// Allow unknown lints for clippy compatibility across versions
#![allow(unknown_lints)]

pub mod analytical;
pub mod error;
pub mod mc;
pub mod rng;

// Re-export commonly used items for convenience
pub use error::PricingError;
pub use mc::{MonteCarloConfig, MonteCarloPricer, PayoffParams, PricingResult, VanillaParams};
