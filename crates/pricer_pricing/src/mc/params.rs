//! Market and contract parameters for a European vanilla option.

use crate::error::PricingError;

/// Inputs of a single European option valuation under Black-Scholes dynamics.
///
/// # Model
///
/// Under the risk-neutral measure the terminal price is
/// ```text
/// S_T = S · exp((r - σ²/2)T + σ√T · Z),   Z ~ N(0, 1)
/// ```
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::VanillaParams;
///
/// let params = VanillaParams::new(100.0, 100.0, 0.05, 0.2, 1.0);
/// assert!(params.validate().is_ok());
/// assert_eq!(params, VanillaParams::default());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VanillaParams {
    /// Current underlying price (S).
    pub spot: f64,
    /// Strike price (K).
    pub strike: f64,
    /// Continuously-compounded risk-free rate (r) - annualised.
    pub rate: f64,
    /// Volatility (σ) - annualised.
    pub volatility: f64,
    /// Time to expiry (T) - in years.
    pub maturity: f64,
}

impl VanillaParams {
    /// Creates new option parameters.
    #[inline]
    pub fn new(spot: f64, strike: f64, rate: f64, volatility: f64, maturity: f64) -> Self {
        Self {
            spot,
            strike,
            rate,
            volatility,
            maturity,
        }
    }

    /// Validates the parameters, reporting the first offending field.
    ///
    /// # Errors
    ///
    /// `PricingError::InvalidParameter` when `spot`, `strike`, `volatility`
    /// or `maturity` is negative, or any field is NaN or infinite.
    pub fn validate(&self) -> Result<(), PricingError> {
        non_negative("spot", self.spot)?;
        non_negative("strike", self.strike)?;
        if !self.rate.is_finite() {
            return Err(PricingError::invalid("rate", self.rate, "must be finite"));
        }
        non_negative("volatility", self.volatility)?;
        non_negative("maturity", self.maturity)?;
        Ok(())
    }

    /// Present value factor `exp(-rT)`.
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.maturity).exp()
    }

    /// Spot with the deterministic risk-neutral drift applied:
    /// `S · exp(T(r - σ²/2))`.
    #[inline]
    pub fn drift_adjusted_spot(&self) -> f64 {
        self.spot * (self.maturity * (self.rate - 0.5 * self.volatility * self.volatility)).exp()
    }

    /// Terminal log-return standard deviation `sqrt(σ²T)`.
    #[inline]
    pub fn vol_sqrt_t(&self) -> f64 {
        (self.volatility * self.volatility * self.maturity).sqrt()
    }

    /// Model-free put-call parity value `S - K·exp(-rT)`.
    #[inline]
    pub fn parity_forward(&self) -> f64 {
        self.spot - self.strike * self.discount_factor()
    }
}

impl Default for VanillaParams {
    fn default() -> Self {
        Self {
            spot: 100.0,
            strike: 100.0,
            rate: 0.05,
            volatility: 0.2,
            maturity: 1.0,
        }
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), PricingError> {
    if !value.is_finite() {
        return Err(PricingError::invalid(name, value, "must be finite"));
    }
    if value < 0.0 {
        return Err(PricingError::invalid(name, value, "must be non-negative"));
    }
    Ok(())
}
