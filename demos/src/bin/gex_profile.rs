//! Example computing a GEX profile from a synthetic options chain.
//!
//! This example shows how to:
//! 1. Deserialize provider-format contract records
//! 2. Load engine configuration from the environment
//! 3. Compute the per-strike GEX profile and gamma flip
//! 4. Package the result with a checksum for caching

use chrono::{Duration, Utc};
use gex_rs::prelude::*;
use tracing::info;

fn synthetic_chain() -> Vec<RawContract> {
    let expiry_30 = (Utc::now().date_naive() + Duration::days(30))
        .format("%Y-%m-%d")
        .to_string();
    let expiry_60 = (Utc::now().date_naive() + Duration::days(60))
        .format("%Y-%m-%d")
        .to_string();

    // Provider wire format: camelCase field names, IV sometimes missing
    let payload = serde_json::json!([
        {"strike": 900.0, "expirationDate": expiry_30, "type": "put",
         "openInterest": 8000, "impliedVolatility": 0.65,
         "bid": 9.5, "ask": 10.5, "lastPrice": 10.0},
        {"strike": 950.0, "expirationDate": expiry_30, "type": "call",
         "openInterest": 5000, "impliedVolatility": 0.55,
         "bid": 34.5, "ask": 35.5, "lastPrice": 35.0},
        {"strike": 950.0, "expirationDate": expiry_30, "type": "put",
         "openInterest": 3000, "impliedVolatility": 0.55,
         "bid": 29.5, "ask": 30.5, "lastPrice": 30.0},
        {"strike": 950.0, "expirationDate": expiry_60, "type": "call",
         "openInterest": 2000, "impliedVolatility": 0.55,
         "bid": 36.5, "ask": 37.5, "lastPrice": 37.0},
        // IV missing: recovered via bisection from the mid-price
        {"strike": 980.0, "expirationDate": expiry_30, "type": "call",
         "openInterest": 6000,
         "bid": 19.5, "ask": 20.5, "lastPrice": 20.0},
        // Zero open interest: filtered out
        {"strike": 1000.0, "expirationDate": expiry_30, "type": "call",
         "openInterest": 0, "impliedVolatility": 0.45,
         "bid": 14.5, "ask": 15.5, "lastPrice": 15.0},
    ]);

    serde_json::from_value(payload).expect("fixture chain deserializes")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let spot = 950.0;
    let config = GexConfig::from_env()?;
    info!("risk-free rate: {}", config.risk_free_rate);

    let chain = synthetic_chain();
    let result = calculate_gex(&chain, spot, &config);

    println!("GEX profile @ spot {spot:.2}");
    println!("{:>10} {:>14} {:>14} {:>14}", "strike", "call_gex", "put_gex", "net_gex");
    for row in &result.strikes {
        println!(
            "{:>10.2} {:>14.4e} {:>14.4e} {:>14.4e}",
            row.strike, row.call_gex, row.put_gex, row.net_gex
        );
    }
    println!("total GEX:   {:.4e}", result.total_gex);
    println!("gamma flip:  {:?}", result.gamma_flip);
    println!("key levels:  {:?}", result.key_levels);

    // Package for a caller-side cache: versioned JSON with a checksum
    let package = GexResultPackage::new(result)?;
    let json = package.to_json()?;
    info!("packaged {} bytes, checksum {}", json.len(), package.checksum);

    Ok(())
}
