//! Black-Scholes pricing model for European options.
//!
//! Closed-form reference prices against which the Monte Carlo estimates
//! are checked.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! When σ√T vanishes the terminal price is deterministic and both formulas
//! collapse to the discounted intrinsic value of the forward.

use num_traits::Float;

use super::distributions::norm_cdf;
use crate::error::PricingError;

/// Black-Scholes model for European option pricing.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float` (e.g., `f64`)
///
/// # Examples
/// ```
/// use pricer_pricing::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
/// let call_price = bs.price_call(100.0, 1.0);
/// let put_price = bs.price_put(100.0, 1.0);
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = call_price - put_price - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct BlackScholes<T: Float> {
    /// Spot price (S)
    spot: T,
    /// Risk-free interest rate (r)
    rate: T,
    /// Volatility (σ)
    volatility: T,
}

impl<T: Float> BlackScholes<T> {
    /// Creates a new Black-Scholes model.
    ///
    /// # Arguments
    /// * `spot` - Current spot price (must be non-negative)
    /// * `rate` - Risk-free interest rate (annualised)
    /// * `volatility` - Volatility (must be non-negative)
    ///
    /// # Errors
    /// `PricingError::InvalidParameter` if spot or volatility is negative or
    /// any input is non-finite.
    ///
    /// # Examples
    /// ```
    /// use pricer_pricing::analytical::BlackScholes;
    ///
    /// assert!(BlackScholes::new(100.0_f64, 0.05, 0.2).is_ok());
    /// assert!(BlackScholes::new(-100.0_f64, 0.05, 0.2).is_err());
    /// assert!(BlackScholes::new(100.0_f64, 0.05, -0.1).is_err());
    /// ```
    pub fn new(spot: T, rate: T, volatility: T) -> Result<Self, PricingError> {
        let zero = T::zero();

        if !spot.is_finite() || spot < zero {
            return Err(PricingError::invalid(
                "spot",
                display(spot),
                "must be finite and non-negative",
            ));
        }
        if !rate.is_finite() {
            return Err(PricingError::invalid("rate", display(rate), "must be finite"));
        }
        if !volatility.is_finite() || volatility < zero {
            return Err(PricingError::invalid(
                "volatility",
                display(volatility),
                "must be finite and non-negative",
            ));
        }

        Ok(Self {
            spot,
            rate,
            volatility,
        })
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    /// Total standard deviation of log returns, σ√T.
    #[inline]
    fn total_vol(&self, expiry: T) -> T {
        self.volatility * expiry.max(T::zero()).sqrt()
    }

    /// Computes the d1 term of the Black-Scholes formula.
    ///
    /// d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
    ///
    /// Only meaningful when σ√T > 0 and S, K > 0.
    #[inline]
    pub fn d1(&self, strike: T, expiry: T) -> T {
        let half = T::one() / (T::one() + T::one());
        let log_moneyness = (self.spot / strike).ln();
        let drift = (self.rate + half * self.volatility * self.volatility) * expiry;

        (log_moneyness + drift) / self.total_vol(expiry)
    }

    /// Computes the d2 term of the Black-Scholes formula.
    ///
    /// d₂ = d₁ - σ√T
    #[inline]
    pub fn d2(&self, strike: T, expiry: T) -> T {
        self.d1(strike, expiry) - self.total_vol(expiry)
    }

    /// True when the closed form degenerates to a deterministic forward.
    #[inline]
    fn is_degenerate(&self, strike: T, expiry: T) -> bool {
        let zero = T::zero();
        self.total_vol(expiry) <= zero || self.spot <= zero || strike <= zero
    }

    /// Computes European call option price.
    ///
    /// C = S·N(d₁) - K·e^(-rT)·N(d₂)
    ///
    /// # Examples
    /// ```
    /// use pricer_pricing::analytical::BlackScholes;
    ///
    /// let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
    /// let price = bs.price_call(100.0, 1.0);
    /// assert!((price - 10.4506).abs() < 1e-3);
    /// ```
    pub fn price_call(&self, strike: T, expiry: T) -> T {
        let df = (-self.rate * expiry).exp();

        if self.is_degenerate(strike, expiry) {
            let forward = self.spot * (self.rate * expiry).exp();
            return (forward - strike).max(T::zero()) * df;
        }

        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        self.spot * norm_cdf(d1) - strike * df * norm_cdf(d2)
    }

    /// Computes European put option price.
    ///
    /// P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
    ///
    /// # Examples
    /// ```
    /// use pricer_pricing::analytical::BlackScholes;
    ///
    /// let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
    /// let price = bs.price_put(100.0, 1.0);
    /// assert!((price - 5.5735).abs() < 1e-3);
    /// ```
    pub fn price_put(&self, strike: T, expiry: T) -> T {
        let df = (-self.rate * expiry).exp();

        if self.is_degenerate(strike, expiry) {
            let forward = self.spot * (self.rate * expiry).exp();
            return (strike - forward).max(T::zero()) * df;
        }

        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        strike * df * norm_cdf(-d2) - self.spot * norm_cdf(-d1)
    }
}

fn display<T: Float>(value: T) -> String {
    value
        .to_f64()
        .map_or_else(|| "NaN".to_string(), |v| v.to_string())
}
