//! Engine configuration and numeric constants.

use super::error::ConfigError;
use super::solver::SolverConfig;
use serde::{Deserialize, Serialize};

/// Multiplier applied per contract (each contract controls 100 shares).
pub const CONTRACT_MULTIPLIER: f64 = 100.0;

/// Guard: contracts where sigma * sqrt(T) falls below this are skipped to
/// avoid a degenerate gamma denominator.
pub const MIN_SIGMA_SQRT_T: f64 = 1e-8;

/// Risk-free rate used when the environment provides none.
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.045;

/// Environment variable consulted by [`GexConfig::from_env`].
pub const RISK_FREE_RATE_ENV: &str = "RISK_FREE_RATE";

/// Configuration for one GEX engine invocation.
///
/// Passed explicitly into the engine rather than read from ambient state, so
/// the calculation stays referentially transparent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GexConfig {
    /// Risk-free rate applied uniformly to every contract (0 <= r <= 1).
    pub risk_free_rate: f64,
    /// Bisection solver settings used when implied volatility must be
    /// recovered from a market price.
    pub solver: SolverConfig,
}

impl Default for GexConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
            solver: SolverConfig::default(),
        }
    }
}

impl GexConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the risk-free rate.
    #[must_use]
    pub fn with_risk_free_rate(mut self, risk_free_rate: f64) -> Self {
        self.risk_free_rate = risk_free_rate;
        self
    }

    /// Sets the solver configuration.
    #[must_use]
    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    /// Loads configuration from the environment.
    ///
    /// Reads `RISK_FREE_RATE` when set; an unset variable yields the
    /// default. A value that fails to parse or falls outside [0, 1] is a
    /// configuration error, not a silent fallback.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(RISK_FREE_RATE_ENV) {
            Err(_) => Ok(Self::default()),
            Ok(raw) => {
                let rate: f64 =
                    raw.trim()
                        .parse()
                        .map_err(|_| ConfigError::InvalidRiskFreeRate { raw: raw.clone() })?;
                if !rate.is_finite() || !(0.0..=1.0).contains(&rate) {
                    return Err(ConfigError::RiskFreeRateOutOfRange { value: rate });
                }
                Ok(Self::default().with_risk_free_rate(rate))
            }
        }
    }
}
