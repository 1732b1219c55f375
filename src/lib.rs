//! # gex-rs
//!
//! A gamma exposure (GEX) engine for single-underlying options chains.
//!
//! Given a snapshot of option contracts and the current spot price, the
//! engine produces a per-strike GEX profile: signed dealer gamma exposure in
//! notional dollars, the gamma-flip level where net exposure turns from
//! negative to positive, and the max-positive / max-negative strikes.
//!
//! The computation is pure and synchronous: no I/O, no shared state, safe to
//! call concurrently or from inside an async task. Contracts with missing or
//! degenerate data are skipped with a diagnostic, never an error, so the
//! engine always returns a structurally valid [`gex::GexResult`].
//!
//! ```ignore
//! use gex_rs::prelude::*;
//!
//! let chain: Vec<RawContract> = serde_json::from_str(payload)?;
//! let config = GexConfig::from_env()?;
//! let result = calculate_gex(&chain, spot, &config);
//! for row in &result.strikes {
//!     println!("{:>8.2}  net {:+.3e}", row.strike, row.net_gex);
//! }
//! ```

pub mod gex;

/// Commonly used items, re-exported for convenient glob imports.
pub mod prelude {
    pub use crate::gex::{
        BlackScholes, Clock, ConfigError, FixedClock, GexConfig, GexKeyLevels, GexResult,
        GexResultPackage, GexStrike, IvError, OptionParams, OptionType, RawContract,
        SnapshotError, SolverConfig, SystemClock, calculate_gex, calculate_gex_with_clock,
        solve_iv,
    };
}
