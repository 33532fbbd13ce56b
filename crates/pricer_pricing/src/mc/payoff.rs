//! Payoff strategies for the terminal-value simulator.
//!
//! The simulator is written once and takes the payoff as an injected
//! strategy. [`PayoffParams`] covers the vanilla call and put; any
//! `Fn(f64) -> f64` closure can be passed where a custom terminal payoff is
//! needed.

/// Payoff type for option pricing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PayoffType {
    /// Call option: max(S - K, 0)
    #[default]
    Call,
    /// Put option: max(K - S, 0)
    Put,
}

/// Settlement value of an option as a function of the terminal price.
pub trait Payoff {
    /// Returns the undiscounted payoff for terminal price `terminal`.
    fn payoff(&self, terminal: f64) -> f64;
}

impl<F> Payoff for F
where
    F: Fn(f64) -> f64,
{
    #[inline]
    fn payoff(&self, terminal: f64) -> f64 {
        self(terminal)
    }
}

/// Parameters of a vanilla European payoff.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{Payoff, PayoffParams, PayoffType};
///
/// let call = PayoffParams::call(100.0);
/// assert_eq!(call.payoff_type, PayoffType::Call);
/// assert_eq!(call.payoff(110.0), 10.0);
/// assert_eq!(call.payoff(90.0), 0.0);
///
/// let put = PayoffParams::put(100.0);
/// assert_eq!(put.payoff(90.0), 10.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PayoffParams {
    /// Strike price.
    pub strike: f64,
    /// Payoff type (Call or Put).
    pub payoff_type: PayoffType,
}

impl PayoffParams {
    /// Creates call option payoff parameters.
    #[inline]
    pub fn call(strike: f64) -> Self {
        Self {
            strike,
            payoff_type: PayoffType::Call,
        }
    }

    /// Creates put option payoff parameters.
    #[inline]
    pub fn put(strike: f64) -> Self {
        Self {
            strike,
            payoff_type: PayoffType::Put,
        }
    }
}

impl Payoff for PayoffParams {
    #[inline]
    fn payoff(&self, terminal: f64) -> f64 {
        match self.payoff_type {
            PayoffType::Call => (terminal - self.strike).max(0.0),
            PayoffType::Put => (self.strike - terminal).max(0.0),
        }
    }
}
