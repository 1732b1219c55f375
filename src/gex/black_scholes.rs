//! Black-Scholes pricing model and gamma calculation.
//!
//! Closed-form pricing feeds the implied volatility bisection; gamma is the
//! metric the GEX aggregation is built on.

use super::config::MIN_SIGMA_SQRT_T;
use super::types::{OptionParams, OptionType};
use std::f64::consts::PI;

/// Square root of 2, precomputed for efficiency.
const SQRT_2: f64 = std::f64::consts::SQRT_2;

/// Black-Scholes pricing model implementation.
///
/// Provides option prices and gamma under continuous compounding.
pub struct BlackScholes;

impl BlackScholes {
    /// Approximation of the error function (erf).
    ///
    /// Uses Abramowitz and Stegun approximation (formula 7.1.26)
    /// with maximum error of 1.5×10⁻⁷.
    #[must_use]
    pub fn erf(x: f64) -> f64 {
        // Constants for the approximation
        const A1: f64 = 0.254829592;
        const A2: f64 = -0.284496736;
        const A3: f64 = 1.421413741;
        const A4: f64 = -1.453152027;
        const A5: f64 = 1.061405429;
        const P: f64 = 0.3275911;

        let sign = if x < 0.0 { -1.0 } else { 1.0 };
        let x = x.abs();

        let t = 1.0 / (1.0 + P * x);
        let y = 1.0 - (((((A5 * t + A4) * t) + A3) * t + A2) * t + A1) * t * (-x * x).exp();

        sign * y
    }

    /// Standard normal cumulative distribution function (CDF).
    #[must_use]
    pub fn norm_cdf(x: f64) -> f64 {
        0.5 * (1.0 + Self::erf(x / SQRT_2))
    }

    /// Standard normal probability density function (PDF).
    #[must_use]
    pub fn norm_pdf(x: f64) -> f64 {
        (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
    }

    /// Calculates the d1 parameter of the Black-Scholes formula.
    ///
    /// d1 = [ln(S/K) + (r + σ²/2)T] / (σ√T)
    #[must_use]
    pub fn d1(spot: f64, strike: f64, rate: f64, time: f64, vol: f64) -> f64 {
        let sqrt_time = time.sqrt();
        ((spot / strike).ln() + (rate + 0.5 * vol * vol) * time) / (vol * sqrt_time)
    }

    /// Calculates the d2 parameter of the Black-Scholes formula.
    ///
    /// d2 = d1 - σ√T
    #[must_use]
    pub fn d2(d1: f64, vol: f64, time: f64) -> f64 {
        d1 - vol * time.sqrt()
    }

    /// Theoretical option price.
    ///
    /// For calls: C = S·N(d1) - K·e^(-rT)·N(d2)
    /// For puts:  P = K·e^(-rT)·N(-d2) - S·N(-d1)
    ///
    /// At expiry or with zero volatility the option collapses to its
    /// (discounted) intrinsic value.
    #[must_use]
    pub fn price(params: &OptionParams, vol: f64) -> f64 {
        if params.time_to_expiry <= 0.0 {
            return match params.option_type {
                OptionType::Call => (params.spot - params.strike).max(0.0),
                OptionType::Put => (params.strike - params.spot).max(0.0),
            };
        }

        if vol <= 0.0 {
            return params.discounted_intrinsic();
        }

        let d1 = Self::d1(
            params.spot,
            params.strike,
            params.risk_free_rate,
            params.time_to_expiry,
            vol,
        );
        let d2 = Self::d2(d1, vol, params.time_to_expiry);
        let discount = (-params.risk_free_rate * params.time_to_expiry).exp();

        match params.option_type {
            OptionType::Call => {
                params.spot * Self::norm_cdf(d1) - params.strike * discount * Self::norm_cdf(d2)
            }
            OptionType::Put => {
                params.strike * discount * Self::norm_cdf(-d2) - params.spot * Self::norm_cdf(-d1)
            }
        }
    }

    /// Calculates gamma (∂²price/∂S²), identical for calls and puts.
    ///
    /// Γ = N'(d1) / (S · σ · √T)
    ///
    /// Returns exactly 0.0 when σ√T is below the [`MIN_SIGMA_SQRT_T`] guard,
    /// avoiding a division blow-up for degenerate contracts.
    #[must_use]
    pub fn gamma(params: &OptionParams, vol: f64) -> f64 {
        let sigma_sqrt_t = vol * params.time_to_expiry.sqrt();
        if sigma_sqrt_t < MIN_SIGMA_SQRT_T {
            return 0.0;
        }

        let d1 = Self::d1(
            params.spot,
            params.strike,
            params.risk_free_rate,
            params.time_to_expiry,
            vol,
        );
        Self::norm_pdf(d1) / (params.spot * sigma_sqrt_t)
    }
}
