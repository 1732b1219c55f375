//! End-to-end GEX calculations against hand-verified fixtures.

use gex_rs::prelude::*;

use super::helpers::{
    CURRENT_PRICE, assert_rel, clock, config, contract, future_date, past_date,
};

/// Verify the full pipeline against hand-computed figures.
///
/// With T = 30/365, S = 950, r = 0.045:
///   K=950 sigma=0.55:
///     sigma*sqrt(T) ≈ 0.15768
///     d1 ≈ 0.10230
///     gamma ≈ 2.6493e-03
///     call_gex = gamma * 5000 * 100 * 950² ≈ 1.1955e+09
///     put_gex  = -(gamma * 3000 * 100 * 950²) ≈ -7.1731e+08
///   K=980 sigma=0.50:
///     call_gex ≈ 1.5751e+09
#[test]
fn basic_gex_known_inputs() {
    let expiry = future_date(30);
    let chain = vec![
        contract(950.0, "call", &expiry, 5000, 0.55),
        contract(950.0, "put", &expiry, 3000, 0.55),
        contract(980.0, "call", &expiry, 6000, 0.50),
    ];

    let result = calculate_gex_with_clock(&chain, CURRENT_PRICE, &config(), &clock());

    assert_eq!(result.current_price, CURRENT_PRICE);
    assert_eq!(result.strikes.len(), 2);
    assert!(!result.last_updated.is_empty());

    let row_950 = &result.strikes[0];
    assert_eq!(row_950.strike, 950.0);
    assert_rel(row_950.call_gex, 1.1955e9, 0.01, "K=950 call_gex");
    assert_rel(row_950.put_gex, -7.1731e8, 0.01, "K=950 put_gex");
    assert_rel(
        row_950.net_gex,
        1.1955e9 - 7.1731e8,
        0.01,
        "K=950 net_gex",
    );

    let row_980 = &result.strikes[1];
    assert_eq!(row_980.strike, 980.0);
    assert_rel(row_980.call_gex, 1.5751e9, 0.01, "K=980 call_gex");
    assert_eq!(row_980.put_gex, 0.0);

    // total_gex equals the sum of all net values
    let net_sum: f64 = result.strikes.iter().map(|r| r.net_gex).sum();
    assert!((result.total_gex - net_sum).abs() < 1.0);
}

#[test]
fn gamma_flip_detected() {
    // K=900 put-only (negative net), K=1000 call-only (positive net)
    let expiry = future_date(45);
    let chain = vec![
        contract(900.0, "put", &expiry, 5000, 0.65),
        contract(1000.0, "call", &expiry, 8000, 0.45),
    ];

    let result = calculate_gex_with_clock(&chain, CURRENT_PRICE, &config(), &clock());

    assert_eq!(result.gamma_flip, Some(1000.0));
    assert_eq!(result.key_levels.gamma_flip, Some(1000.0));
    assert!(result.strikes[0].net_gex < 0.0, "K=900 should be negative");
    assert!(result.strikes[1].net_gex > 0.0, "K=1000 should be positive");
}

#[test]
fn expired_contracts_skipped() {
    let chain = vec![
        contract(950.0, "call", &past_date(1), 5000, 0.55),
        contract(950.0, "put", &past_date(30), 3000, 0.55),
    ];

    let result = calculate_gex_with_clock(&chain, CURRENT_PRICE, &config(), &clock());

    assert!(result.strikes.is_empty());
    assert_eq!(result.total_gex, 0.0);
    assert_eq!(result.gamma_flip, None);
}

#[test]
fn zero_oi_contracts_skipped() {
    let expiry = future_date(30);
    let chain = vec![
        contract(950.0, "call", &expiry, 0, 0.55),
        contract(960.0, "call", &expiry, 1000, 0.52),
    ];

    let result = calculate_gex_with_clock(&chain, CURRENT_PRICE, &config(), &clock());

    assert_eq!(result.strikes.len(), 1);
    assert_eq!(result.strikes[0].strike, 960.0);
}

#[test]
fn unparseable_expiration_skipped() {
    let chain = vec![
        contract(950.0, "call", "not-a-date", 5000, 0.55),
        contract(960.0, "call", &future_date(30), 1000, 0.52),
    ];

    let result = calculate_gex_with_clock(&chain, CURRENT_PRICE, &config(), &clock());

    assert_eq!(result.strikes.len(), 1);
    assert_eq!(result.strikes[0].strike, 960.0);
}

#[test]
fn missing_iv_recovered_via_bisection() {
    let expiry = future_date(30);

    // Zero IV with a realistic mid-price
    let mut zero_iv = contract(950.0, "call", &expiry, 5000, 0.0);
    zero_iv.bid = Some(35.0);
    zero_iv.ask = Some(36.0);
    zero_iv.last_price = Some(35.5);

    // IV absent entirely
    let mut no_iv = contract(960.0, "call", &expiry, 4000, 0.0);
    no_iv.implied_volatility = None;
    no_iv.bid = Some(28.0);
    no_iv.ask = Some(29.0);
    no_iv.last_price = Some(28.5);

    let chain = vec![zero_iv, no_iv];
    let result = calculate_gex_with_clock(&chain, CURRENT_PRICE, &config(), &clock());

    assert_eq!(result.strikes.len(), 2);
    for row in &result.strikes {
        assert!(
            row.call_gex > 0.0,
            "strike {}: expected positive call_gex via bisection",
            row.strike
        );
    }
}

#[test]
fn all_puts_chain_all_negative() {
    let expiry = future_date(60);
    let chain = vec![
        contract(920.0, "put", &expiry, 4000, 0.60),
        contract(940.0, "put", &expiry, 3500, 0.58),
    ];

    let result = calculate_gex_with_clock(&chain, CURRENT_PRICE, &config(), &clock());

    assert_eq!(result.strikes.len(), 2);
    for row in &result.strikes {
        assert_eq!(row.call_gex, 0.0);
        assert!(row.put_gex < 0.0);
        assert!(row.net_gex < 0.0);
    }
    assert!(result.total_gex < 0.0);
    assert_eq!(result.gamma_flip, None);
}

#[test]
fn empty_chain_returns_defaults() {
    let result = calculate_gex_with_clock(&[], CURRENT_PRICE, &config(), &clock());

    assert_eq!(result.current_price, CURRENT_PRICE);
    assert_eq!(result.total_gex, 0.0);
    assert!(result.strikes.is_empty());
    assert_eq!(result.gamma_flip, None);
    assert_eq!(result.key_levels.max_positive_gex, None);
    assert_eq!(result.key_levels.max_negative_gex, None);
    assert_eq!(result.key_levels.gamma_flip, None);
    assert!(!result.last_updated.is_empty());
}

#[test]
fn non_positive_spot_returns_defaults() {
    let chain = vec![contract(950.0, "call", &future_date(30), 5000, 0.55)];

    for spot in [0.0, -950.0] {
        let result = calculate_gex_with_clock(&chain, spot, &config(), &clock());
        assert!(result.strikes.is_empty());
        assert_eq!(result.total_gex, 0.0);
        assert_eq!(result.gamma_flip, None);
    }
}

#[test]
fn key_levels_identified() {
    let expiry = future_date(30);
    // K=900 pure puts (large negative), K=950 mixed small positive,
    // K=980 pure calls (large positive)
    let chain = vec![
        contract(900.0, "put", &expiry, 8000, 0.65),
        contract(950.0, "call", &expiry, 500, 0.55),
        contract(950.0, "put", &expiry, 400, 0.55),
        contract(980.0, "call", &expiry, 10000, 0.50),
    ];

    let result = calculate_gex_with_clock(&chain, CURRENT_PRICE, &config(), &clock());

    assert_eq!(result.key_levels.max_positive_gex, Some(980.0));
    assert_eq!(result.key_levels.max_negative_gex, Some(900.0));
}

#[test]
fn expirations_collapse_into_one_strike_row() {
    let chain_multi = vec![
        contract(950.0, "call", &future_date(30), 2000, 0.55),
        contract(950.0, "call", &future_date(60), 2000, 0.55),
    ];
    let chain_single = vec![contract(950.0, "call", &future_date(30), 2000, 0.55)];

    let result_multi = calculate_gex_with_clock(&chain_multi, CURRENT_PRICE, &config(), &clock());
    let result_single =
        calculate_gex_with_clock(&chain_single, CURRENT_PRICE, &config(), &clock());

    assert_eq!(result_multi.strikes.len(), 1);
    assert_eq!(result_single.strikes.len(), 1);
    assert_eq!(result_multi.strikes[0].strike, 950.0);

    // Two expirations must contribute strictly more than one
    assert!(result_multi.strikes[0].call_gex > result_single.strikes[0].call_gex);
}

#[test]
fn strikes_sorted_ascending() {
    let expiry = future_date(30);
    let chain = vec![
        contract(1000.0, "call", &expiry, 1000, 0.50),
        contract(900.0, "put", &expiry, 1000, 0.60),
        contract(950.0, "call", &expiry, 1000, 0.55),
    ];

    let result = calculate_gex_with_clock(&chain, CURRENT_PRICE, &config(), &clock());

    let strikes: Vec<f64> = result.strikes.iter().map(|r| r.strike).collect();
    assert_eq!(strikes, vec![900.0, 950.0, 1000.0]);
}

#[test]
fn result_serializes_to_flat_json() {
    let chain = vec![contract(950.0, "call", &future_date(30), 5000, 0.55)];
    let result = calculate_gex_with_clock(&chain, CURRENT_PRICE, &config(), &clock());

    let value: serde_json::Value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["current_price"], 950.0);
    assert!(value["gamma_flip"].is_null());
    assert!(value["strikes"][0]["net_gex"].as_f64().unwrap() > 0.0);
    assert_eq!(value["last_updated"], "2026-01-15T12:00:00+00:00");
}

#[test]
fn timestamp_comes_from_clock() {
    let result = calculate_gex_with_clock(&[], CURRENT_PRICE, &config(), &clock());
    assert_eq!(result.last_updated, "2026-01-15T12:00:00+00:00");
}

/// The engine is pure and `Send`; it runs unchanged inside an async task.
#[tokio::test]
async fn engine_runs_inside_async_task() {
    let chain = vec![contract(950.0, "call", &future_date(30), 5000, 0.55)];

    let handle = tokio::task::spawn_blocking(move || {
        calculate_gex_with_clock(&chain, CURRENT_PRICE, &config(), &clock())
    });

    let result = handle.await.unwrap();
    assert_eq!(result.strikes.len(), 1);
    assert!(result.total_gex > 0.0);
}
