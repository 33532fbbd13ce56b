//! Standard normal variates via the Marsaglia polar method.
//!
//! The polar method is the rejection form of Box-Muller: a point is drawn
//! uniformly in the square `[-1, 1)²` and accepted only if it falls strictly
//! inside the unit disk (and away from the origin). The accepted point's
//! squared norm `s` is itself uniform on `(0, 1)`, which turns
//! `x * sqrt(-2 ln(s) / s)` into an exact standard normal draw without any
//! trigonometric evaluation.
//!
//! # Algorithm Reference
//!
//! - Marsaglia, G. & Bray, T. A. (1964). "A Convenient Method for Generating
//!   Normal Variables". SIAM Review 6(3).

use super::prng::UniformSource;

/// Maps a uniform `[0, 1)` draw onto `[-1, 1)`.
#[inline]
fn to_symmetric(u: f64) -> f64 {
    2.0 * u - 1.0
}

/// Draws one standard normal variate from a uniform source.
///
/// Each attempt consumes exactly two uniforms. Only the `x` coordinate of
/// the accepted point is returned; the companion variate is discarded so
/// that no state survives between calls.
///
/// # Loop Invariant
///
/// Both coordinates are drawn afresh at the top of every iteration,
/// including iterations that end in rejection. Re-using a stale `y` after a
/// rejection biases the accepted points towards the rejected region and
/// the output is no longer normal.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::rng::{gaussian_polar, PricerRng};
///
/// let mut rng = PricerRng::from_seed(42);
/// let z = gaussian_polar(&mut rng);
/// assert!(z.is_finite());
/// ```
#[inline]
pub fn gaussian_polar<U: UniformSource + ?Sized>(source: &mut U) -> f64 {
    loop {
        let x = to_symmetric(source.next_uniform());
        let y = to_symmetric(source.next_uniform());
        let s = x * x + y * y;

        // s == 0 would make ln(s) / s undefined
        if s < 1.0 && s > 0.0 {
            return x * (-2.0 * s.ln() / s).sqrt();
        }
    }
}
