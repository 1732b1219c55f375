//! Packaging computed results for cache/transport validation.

use gex_rs::prelude::*;

use super::helpers::{CURRENT_PRICE, clock, config, contract, future_date};

fn computed_result() -> GexResult {
    let expiry = future_date(45);
    let chain = vec![
        contract(900.0, "put", &expiry, 5000, 0.65),
        contract(1000.0, "call", &expiry, 8000, 0.45),
    ];
    calculate_gex_with_clock(&chain, CURRENT_PRICE, &config(), &clock())
}

#[test]
fn computed_result_round_trips_through_package() {
    let package = GexResultPackage::new(computed_result()).unwrap();
    let json = package.to_json().unwrap();

    let restored = GexResultPackage::from_json(&json).unwrap();
    let result = restored.into_result().unwrap();

    assert_eq!(result.gamma_flip, Some(1000.0));
    assert_eq!(result.strikes.len(), 2);
    assert_eq!(result.last_updated, "2026-01-15T12:00:00+00:00");
}

#[test]
fn tampered_json_fails_validation() {
    let package = GexResultPackage::new(computed_result()).unwrap();
    let json = package.to_json().unwrap();

    // Corrupt the spot price inside the serialized payload
    let tampered = json.replace("\"current_price\":950.0", "\"current_price\":949.0");
    assert_ne!(json, tampered);

    let restored = GexResultPackage::from_json(&tampered).unwrap();
    assert!(matches!(
        restored.validate(),
        Err(SnapshotError::ChecksumMismatch { .. })
    ));
}
