//! GEX aggregation engine: per-strike gamma exposure, gamma flip, key levels.
//!
//! The engine is a pure computation over its arguments. It performs no I/O,
//! holds no shared state, and is safe to invoke concurrently for independent
//! inputs; no anomaly in the contract data surfaces as an error.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use super::black_scholes::BlackScholes;
use super::chain::resolve_contract;
use super::clock::{Clock, SystemClock};
use super::config::{CONTRACT_MULTIPLIER, GexConfig};
use super::types::{GexKeyLevels, GexResult, GexStrike, OptionParams, OptionType, RawContract};

/// Per-strike accumulator; expirations are intentionally collapsed.
#[derive(Debug, Default)]
struct StrikeBucket {
    call_gex: f64,
    put_gex: f64,
}

/// Calculates gamma exposure across all option strikes.
///
/// Uses the real system clock; see [`calculate_gex_with_clock`] for the
/// injectable variant.
#[must_use]
pub fn calculate_gex(chain: &[RawContract], current_price: f64, config: &GexConfig) -> GexResult {
    calculate_gex_with_clock(chain, current_price, config, &SystemClock)
}

/// Calculates gamma exposure with an explicit clock.
///
/// Every contract that fails validation or volatility resolution is skipped
/// with a diagnostic; an empty chain or non-positive spot yields an empty
/// result, never an error.
#[must_use]
pub fn calculate_gex_with_clock(
    chain: &[RawContract],
    current_price: f64,
    config: &GexConfig,
    clock: &dyn Clock,
) -> GexResult {
    let last_updated = clock.now_utc().to_rfc3339();

    if chain.is_empty() || current_price <= 0.0 {
        warn!(
            "calculate_gex called with empty chain or invalid price={:.2}",
            current_price
        );
        return GexResult {
            current_price,
            gamma_flip: None,
            total_gex: 0.0,
            strikes: Vec::new(),
            key_levels: GexKeyLevels::default(),
            last_updated,
        };
    }

    let spot = current_price;
    let today = clock.today();

    // Validated strikes are finite and positive, so their IEEE bit patterns
    // sort in numeric order.
    let mut buckets: BTreeMap<u64, StrikeBucket> = BTreeMap::new();

    for contract in chain {
        let Some(resolved) = resolve_contract(contract, spot, today, config) else {
            continue;
        };

        let params = OptionParams::new(
            spot,
            resolved.strike,
            resolved.time_to_expiry,
            config.risk_free_rate,
            resolved.option_type,
        );
        let gamma = BlackScholes::gamma(&params, resolved.sigma);

        // GEX magnitude: gamma * OI * 100 * S², signed negative for puts
        let magnitude = gamma * resolved.open_interest as f64 * CONTRACT_MULTIPLIER * spot * spot;

        let bucket = buckets.entry(resolved.strike.to_bits()).or_default();
        match resolved.option_type {
            OptionType::Call => bucket.call_gex += magnitude,
            OptionType::Put => bucket.put_gex += -magnitude,
        }

        debug!(
            "processed K={:.2} {}: gamma={:.6e} oi={} gex={:.4e}",
            resolved.strike,
            resolved.option_type.as_str(),
            gamma,
            resolved.open_interest,
            magnitude
        );
    }

    let strikes: Vec<GexStrike> = buckets
        .into_iter()
        .map(|(bits, bucket)| GexStrike {
            strike: f64::from_bits(bits),
            call_gex: bucket.call_gex,
            put_gex: bucket.put_gex,
            net_gex: bucket.call_gex + bucket.put_gex,
        })
        .collect();

    let total_gex: f64 = strikes.iter().map(|row| row.net_gex).sum();
    let gamma_flip = find_gamma_flip(&strikes);
    let key_levels = compute_key_levels(&strikes, gamma_flip);

    info!(
        "GEX calculation complete: strikes={} total_gex={:.4e} gamma_flip={:?}",
        strikes.len(),
        total_gex,
        gamma_flip
    );

    GexResult {
        current_price: spot,
        gamma_flip,
        total_gex,
        strikes,
        key_levels,
        last_updated,
    }
}

/// Finds the gamma flip: the first strike (ascending) whose net GEX is
/// positive after at least one strike with negative net GEX.
///
/// The flip is the higher of the two strikes straddling the zero crossing.
/// Returns `None` when no such transition exists.
#[must_use]
pub fn find_gamma_flip(strikes: &[GexStrike]) -> Option<f64> {
    let mut seen_negative = false;

    for row in strikes {
        if row.net_gex < 0.0 {
            seen_negative = true;
        } else if row.net_gex > 0.0 && seen_negative {
            return Some(row.strike);
        }
    }

    None
}

/// Computes key levels from the sorted per-strike rows.
///
/// `max_positive_gex` is the strike with the greatest positive net GEX,
/// `max_negative_gex` the strike with the most negative; either is absent
/// when no row qualifies. The gamma flip is carried through unchanged.
#[must_use]
pub fn compute_key_levels(strikes: &[GexStrike], gamma_flip: Option<f64>) -> GexKeyLevels {
    let mut max_positive: Option<&GexStrike> = None;
    let mut max_negative: Option<&GexStrike> = None;

    for row in strikes {
        if row.net_gex > 0.0 && max_positive.is_none_or(|best| row.net_gex > best.net_gex) {
            max_positive = Some(row);
        }
        if row.net_gex < 0.0 && max_negative.is_none_or(|best| row.net_gex < best.net_gex) {
            max_negative = Some(row);
        }
    }

    GexKeyLevels {
        max_positive_gex: max_positive.map(|row| row.strike),
        max_negative_gex: max_negative.map(|row| row.strike),
        gamma_flip,
    }
}
