//! Gamma exposure (GEX) calculation from an options chain snapshot.
//!
//! # Overview
//!
//! Dealers hedging short option positions buy and sell the underlying in
//! proportion to their aggregate gamma. Summing Black-Scholes gamma over the
//! open interest at every strike, signed positive for calls and negative for
//! puts, yields a per-strike GEX profile whose sign structure locates the
//! "gamma flip": the level where dealer hedging pressure changes direction.
//!
//! # Pipeline
//!
//! 1. Validate each raw contract and compute its time-to-expiry.
//! 2. Resolve volatility, inverting Black-Scholes via bisection when the
//!    feed supplies none.
//! 3. Evaluate gamma and scale by open interest, the contract multiplier,
//!    and spot squared.
//! 4. Aggregate net GEX per strike across all expirations.
//! 5. Detect the gamma flip and the max-positive / max-negative strikes.
//!
//! # Example
//!
//! ```ignore
//! use gex_rs::gex::{GexConfig, calculate_gex};
//!
//! let config = GexConfig::from_env()?;
//! let result = calculate_gex(&chain, spot, &config);
//! println!("gamma flip: {:?}", result.gamma_flip);
//! ```

mod black_scholes;
mod chain;
mod clock;
mod config;
mod engine;
mod error;
mod snapshot;
mod solver;
mod types;

pub use black_scholes::BlackScholes;
pub use chain::time_to_expiry_years;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{
    CONTRACT_MULTIPLIER, DEFAULT_RISK_FREE_RATE, GexConfig, MIN_SIGMA_SQRT_T, RISK_FREE_RATE_ENV,
};
pub use engine::{calculate_gex, calculate_gex_with_clock, compute_key_levels, find_gamma_flip};
pub use error::{ConfigError, IvError, SnapshotError};
pub use snapshot::{GEX_SNAPSHOT_FORMAT_VERSION, GexResultPackage};
pub use solver::{SolverConfig, solve_iv};
pub use types::{GexKeyLevels, GexResult, GexStrike, OptionParams, OptionType, RawContract};
