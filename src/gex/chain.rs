//! Validation and resolution boundary for raw option contracts.
//!
//! Converts loosely-shaped provider records into [`ResolvedContract`]s that
//! every numeric step downstream can trust: positive strike, recognized
//! option class, positive open interest, positive time-to-expiry, and a
//! usable volatility. Every rejection is a skip with a diagnostic, never an
//! error.

use super::config::{GexConfig, MIN_SIGMA_SQRT_T};
use super::solver::solve_iv;
use super::types::{OptionParams, OptionType, RawContract};
use chrono::NaiveDate;
use tracing::{debug, warn};

/// A contract that passed validation and volatility resolution.
///
/// Discarded after aggregation; never persisted.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedContract {
    pub strike: f64,
    pub option_type: OptionType,
    pub open_interest: i64,
    /// Year-fraction time to expiry, strictly positive.
    pub time_to_expiry: f64,
    /// Resolved volatility, strictly positive with sigma * sqrt(T) above
    /// the degenerate-gamma guard.
    pub sigma: f64,
}

/// Year fraction until expiration, counted in whole days over 365.
///
/// An unparseable date yields 0.0 (treated as expired, hence filtered);
/// a warning is the only side effect.
pub fn time_to_expiry_years(expiration_date: &str, today: NaiveDate) -> f64 {
    let expiry: NaiveDate = match expiration_date.parse() {
        Ok(date) => date,
        Err(_) => {
            warn!("unparseable expiration date {expiration_date:?}, skipping");
            return 0.0;
        }
    };

    (expiry - today).num_days() as f64 / 365.0
}

/// Best available market price for a contract.
///
/// Preference order: mid of bid/ask when both are strictly positive, else
/// the last traded price when strictly positive, else none.
fn market_price(contract: &RawContract) -> Option<f64> {
    if let (Some(bid), Some(ask)) = (contract.bid, contract.ask) {
        if bid > 0.0 && ask > 0.0 {
            return Some((bid + ask) / 2.0);
        }
    }

    match contract.last_price {
        Some(last) if last > 0.0 => Some(last),
        _ => None,
    }
}

/// Validates a raw contract and resolves its volatility.
///
/// Returns `None` (after a debug log) for every contract the engine must
/// skip: missing or malformed required fields, zero open interest, expired
/// or unparseable expiration, no usable volatility, or a degenerate
/// sigma * sqrt(T).
pub(crate) fn resolve_contract(
    contract: &RawContract,
    spot: f64,
    today: NaiveDate,
    config: &GexConfig,
) -> Option<ResolvedContract> {
    let (Some(strike), Some(open_interest)) = (contract.strike, contract.open_interest) else {
        debug!("skipping contract with missing strike or open interest: {contract:?}");
        return None;
    };

    let Some(option_type) = contract.option_type.as_deref().and_then(OptionType::parse) else {
        debug!("skipping contract with unrecognized option type: {contract:?}");
        return None;
    };

    if !strike.is_finite() || strike <= 0.0 {
        debug!("skipping contract with invalid strike {strike}");
        return None;
    }

    if open_interest <= 0 {
        debug!(
            "skipping zero-OI contract: K={:.2} type={}",
            strike,
            option_type.as_str()
        );
        return None;
    }

    let time_to_expiry =
        time_to_expiry_years(contract.expiration_date.as_deref().unwrap_or(""), today);
    if time_to_expiry <= 0.0 {
        debug!(
            "skipping expired contract: K={:.2} expiry={:?} T={:.4}",
            strike, contract.expiration_date, time_to_expiry
        );
        return None;
    }

    let sigma = match contract.implied_volatility {
        Some(iv) if iv > 0.0 => iv,
        _ => {
            debug!(
                "IV missing/zero for K={:.2} {}, attempting bisection",
                strike,
                option_type.as_str()
            );
            let Some(price) = market_price(contract) else {
                debug!(
                    "no usable market price for IV bisection: K={:.2} {}, skipping",
                    strike,
                    option_type.as_str()
                );
                return None;
            };

            let params = OptionParams::new(
                spot,
                strike,
                time_to_expiry,
                config.risk_free_rate,
                option_type,
            );
            match solve_iv(&params, price, &config.solver) {
                Ok((iv, iterations)) => {
                    debug!(
                        "bisection recovered sigma={:.6} in {} iterations for K={:.2} {}",
                        iv,
                        iterations,
                        strike,
                        option_type.as_str()
                    );
                    iv
                }
                Err(e) => {
                    debug!(
                        "bisection failed for K={:.2} {}: {e}",
                        strike,
                        option_type.as_str()
                    );
                    return None;
                }
            }
        }
    };

    let sigma_sqrt_t = sigma * time_to_expiry.sqrt();
    if sigma_sqrt_t < MIN_SIGMA_SQRT_T {
        debug!(
            "sigma*sqrt(T)={:.2e} too small for K={:.2} {}, skipping",
            sigma_sqrt_t,
            strike,
            option_type.as_str()
        );
        return None;
    }

    Some(ResolvedContract {
        strike,
        option_type,
        open_interest,
        time_to_expiry,
        sigma,
    })
}
