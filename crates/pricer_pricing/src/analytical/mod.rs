//! Analytical (closed-form) solutions for option pricing.
//!
//! This module provides the Black-Scholes formulas used to verify Monte
//! Carlo pricing accuracy and to print reference prices next to the
//! simulated ones.
//!
//! # Usage
//!
//! ```rust
//! use pricer_pricing::analytical::BlackScholes;
//!
//! let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
//! let call = bs.price_call(100.0, 1.0);
//! let put = bs.price_put(100.0, 1.0);
//! assert!(call > put);
//! ```

pub mod black_scholes;
pub mod distributions;

pub use black_scholes::BlackScholes;
pub use distributions::{norm_cdf, norm_pdf};
