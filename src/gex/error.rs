//! Error types for the gamma exposure engine.
//!
//! None of these errors escape [`crate::gex::engine::calculate_gex`] for
//! malformed data: every anomaly at the contract level is a skip-and-continue.
//! They exist so the solver, configuration, and snapshot layers can report
//! precisely *why* something was rejected.

use std::fmt;

/// Errors from the implied volatility bisection solver.
///
/// The resolution layer treats every variant as "no result for this
/// contract" and skips it after a debug log.
#[derive(Debug, Clone)]
pub enum IvError {
    /// Market price is zero or negative; no volatility can reproduce it.
    NonPositivePrice {
        /// Market price observed.
        price: f64,
    },

    /// Market price is below the discounted intrinsic value.
    PriceBelowIntrinsic {
        /// Market price observed.
        price: f64,
        /// Discounted intrinsic value.
        intrinsic: f64,
    },

    /// Market price is outside the range achievable within the search bounds.
    PriceOutsideBounds {
        /// Market price observed.
        price: f64,
        /// Black-Scholes price at the lower volatility bound.
        price_low: f64,
        /// Black-Scholes price at the upper volatility bound.
        price_high: f64,
    },

    /// Bisection exhausted its iteration cap without converging.
    NoConvergence {
        /// Number of iterations attempted.
        iterations: u32,
    },
}

impl fmt::Display for IvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IvError::NonPositivePrice { price } => {
                write!(f, "market price {price:.4} is not positive")
            }
            IvError::PriceBelowIntrinsic { price, intrinsic } => {
                write!(
                    f,
                    "market price {price:.4} is below discounted intrinsic value {intrinsic:.4}"
                )
            }
            IvError::PriceOutsideBounds {
                price,
                price_low,
                price_high,
            } => {
                write!(
                    f,
                    "market price {price:.4} is outside achievable range [{price_low:.4}, {price_high:.4}]"
                )
            }
            IvError::NoConvergence { iterations } => {
                write!(f, "bisection did not converge after {iterations} iterations")
            }
        }
    }
}

impl std::error::Error for IvError {}

/// Errors raised while loading engine configuration from the environment.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// The risk-free rate could not be parsed as a number.
    InvalidRiskFreeRate {
        /// Raw environment value.
        raw: String,
    },

    /// The risk-free rate is outside the allowed [0, 1] range.
    RiskFreeRateOutOfRange {
        /// Parsed value.
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidRiskFreeRate { raw } => {
                write!(f, "risk-free rate {raw:?} is not a valid number")
            }
            ConfigError::RiskFreeRateOutOfRange { value } => {
                write!(f, "risk-free rate {value} is outside [0, 1]")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors from the checksummed result snapshot package.
#[derive(Debug, Clone)]
pub enum SnapshotError {
    /// Failed to serialize the result payload.
    SerializationError {
        /// Description of the failure.
        message: String,
    },

    /// Failed to deserialize a result payload.
    DeserializationError {
        /// Description of the failure.
        message: String,
    },

    /// Stored checksum does not match the recomputed one.
    ChecksumMismatch {
        /// Checksum carried by the package.
        expected: String,
        /// Checksum recomputed from the payload.
        actual: String,
    },

    /// Package was produced by an unsupported format version.
    UnsupportedVersion {
        /// Version carried by the package.
        version: u32,
        /// Version this build understands.
        expected: u32,
    },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::SerializationError { message } => {
                write!(f, "serialization failed: {message}")
            }
            SnapshotError::DeserializationError { message } => {
                write!(f, "deserialization failed: {message}")
            }
            SnapshotError::ChecksumMismatch { expected, actual } => {
                write!(f, "checksum mismatch: expected {expected}, got {actual}")
            }
            SnapshotError::UnsupportedVersion { version, expected } => {
                write!(
                    f,
                    "unsupported snapshot version: {version} (expected {expected})"
                )
            }
        }
    }
}

impl std::error::Error for SnapshotError {}
