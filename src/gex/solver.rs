//! Bisection solver for implied volatility recovery.
//!
//! Inverts the Black-Scholes pricing formula for contracts whose implied
//! volatility is missing from the feed. Bisection is used rather than
//! Newton-Raphson: convergence is slower but guaranteed inside the bracket,
//! and the iteration cap bounds the work per contract.

use super::black_scholes::BlackScholes;
use super::error::IvError;
use super::types::OptionParams;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Configuration for the bisection solver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Maximum iterations before giving up.
    pub max_iterations: u32,
    /// Convergence tolerance on the price error.
    pub tolerance: f64,
    /// Lower volatility search bound (default: 0.01 = 1%).
    pub min_iv: f64,
    /// Upper volatility search bound (default: 5.0 = 500%).
    pub max_iv: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            tolerance: 1e-4,
            min_iv: 0.01,
            max_iv: 5.0,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the convergence tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the volatility search bounds.
    #[must_use]
    pub fn with_bounds(mut self, min_iv: f64, max_iv: f64) -> Self {
        self.min_iv = min_iv;
        self.max_iv = max_iv;
        self
    }
}

/// Solves for implied volatility by bisecting the volatility interval.
///
/// Black-Scholes price is monotonically increasing in volatility, so the
/// interval `[min_iv, max_iv]` brackets at most one solution. Three
/// preconditions are checked before iterating:
///
/// 1. the market price is positive;
/// 2. the market price is not below the discounted intrinsic value
///    (minus tolerance);
/// 3. the market price is achievable within the search bounds
///    (± tolerance).
///
/// Any violation, or exhausting the iteration cap, returns an error the
/// caller treats as "no implied volatility for this contract".
///
/// # Returns
/// `Ok((iv, iterations))` on convergence.
pub fn solve_iv(
    params: &OptionParams,
    market_price: f64,
    config: &SolverConfig,
) -> Result<(f64, u32), IvError> {
    if market_price <= 0.0 {
        return Err(IvError::NonPositivePrice {
            price: market_price,
        });
    }

    let intrinsic = params.discounted_intrinsic();
    if market_price < intrinsic - config.tolerance {
        return Err(IvError::PriceBelowIntrinsic {
            price: market_price,
            intrinsic,
        });
    }

    let mut low = config.min_iv;
    let mut high = config.max_iv;

    let price_low = BlackScholes::price(params, low);
    let price_high = BlackScholes::price(params, high);

    if market_price < price_low - config.tolerance
        || market_price > price_high + config.tolerance
    {
        return Err(IvError::PriceOutsideBounds {
            price: market_price,
            price_low,
            price_high,
        });
    }

    for iteration in 0..config.max_iterations {
        let mid = (low + high) / 2.0;
        let error = BlackScholes::price(params, mid) - market_price;

        if error.abs() < config.tolerance {
            trace!(
                "bisection converged: sigma={:.6} after {} iterations",
                mid,
                iteration + 1
            );
            return Ok((mid, iteration + 1));
        }

        // Price below target means the volatility is too low
        if error < 0.0 {
            low = mid;
        } else {
            high = mid;
        }
    }

    Err(IvError::NoConvergence {
        iterations: config.max_iterations,
    })
}
