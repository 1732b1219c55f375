//! Types for the gamma exposure engine.

use serde::{Deserialize, Serialize};

/// Option class for pricing and GEX sign conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionType {
    /// Call option (right to buy the underlying at strike price).
    Call,
    /// Put option (right to sell the underlying at strike price).
    Put,
}

impl OptionType {
    /// Parses an option class from a raw contract field, case-insensitively.
    ///
    /// Anything other than "call" or "put" is rejected.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "call" => Some(Self::Call),
            "put" => Some(Self::Put),
            _ => None,
        }
    }

    /// Returns the lowercase name used in logs and wire formats.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Call => "call",
            Self::Put => "put",
        }
    }
}

/// Parameters describing one option contract for pricing purposes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionParams {
    /// Underlying spot price.
    pub spot: f64,
    /// Option strike price.
    pub strike: f64,
    /// Time to expiration in years (e.g., 30 days = 30.0 / 365.0).
    pub time_to_expiry: f64,
    /// Risk-free interest rate (annualized, e.g., 0.045 for 4.5%).
    pub risk_free_rate: f64,
    /// Option class (Call or Put).
    pub option_type: OptionType,
}

impl OptionParams {
    /// Creates new option parameters.
    #[must_use]
    pub fn new(
        spot: f64,
        strike: f64,
        time_to_expiry: f64,
        risk_free_rate: f64,
        option_type: OptionType,
    ) -> Self {
        Self {
            spot,
            strike,
            time_to_expiry,
            risk_free_rate,
            option_type,
        }
    }

    /// Creates parameters for a call option.
    #[must_use]
    pub fn call(spot: f64, strike: f64, time_to_expiry: f64, risk_free_rate: f64) -> Self {
        Self::new(
            spot,
            strike,
            time_to_expiry,
            risk_free_rate,
            OptionType::Call,
        )
    }

    /// Creates parameters for a put option.
    #[must_use]
    pub fn put(spot: f64, strike: f64, time_to_expiry: f64, risk_free_rate: f64) -> Self {
        Self::new(
            spot,
            strike,
            time_to_expiry,
            risk_free_rate,
            OptionType::Put,
        )
    }

    /// Intrinsic value against the discounted strike.
    ///
    /// For calls: max(S - K·e^(-rT), 0)
    /// For puts:  max(K·e^(-rT) - S, 0)
    ///
    /// A market price below this value admits no implied volatility.
    #[must_use]
    pub fn discounted_intrinsic(&self) -> f64 {
        let discount = (-self.risk_free_rate * self.time_to_expiry).exp();
        match self.option_type {
            OptionType::Call => (self.spot - self.strike * discount).max(0.0),
            OptionType::Put => (self.strike * discount - self.spot).max(0.0),
        }
    }
}

/// One raw option contract as delivered by the market data provider.
///
/// Every field is optional: the validation boundary decides which contracts
/// survive into the calculation. Field names follow the provider's camelCase
/// wire format.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawContract {
    /// Strike price.
    pub strike: Option<f64>,
    /// Open interest (outstanding contracts at this strike/expiration).
    #[serde(rename = "openInterest")]
    pub open_interest: Option<i64>,
    /// Option class: "call" or "put", case-insensitive.
    #[serde(rename = "type")]
    pub option_type: Option<String>,
    /// ISO-8601 calendar date, e.g. "2026-03-21".
    #[serde(rename = "expirationDate")]
    pub expiration_date: Option<String>,
    /// Implied volatility as supplied by the provider; recovered via
    /// bisection when absent or non-positive.
    #[serde(rename = "impliedVolatility")]
    pub implied_volatility: Option<f64>,
    /// Best bid.
    pub bid: Option<f64>,
    /// Best ask.
    pub ask: Option<f64>,
    /// Last traded price.
    #[serde(rename = "lastPrice")]
    pub last_price: Option<f64>,
}

/// Net GEX components for a single strike price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GexStrike {
    /// Strike price.
    pub strike: f64,
    /// Aggregate call GEX at this strike (non-negative).
    pub call_gex: f64,
    /// Aggregate put GEX at this strike (non-positive).
    pub put_gex: f64,
    /// Net GEX at this strike (call_gex + put_gex).
    pub net_gex: f64,
}

/// Notable strike levels derived from the GEX profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GexKeyLevels {
    /// Strike with the highest positive net GEX.
    pub max_positive_gex: Option<f64>,
    /// Strike with the most negative net GEX.
    pub max_negative_gex: Option<f64>,
    /// Strike where net GEX crosses from negative to positive.
    pub gamma_flip: Option<f64>,
}

/// Full GEX calculation result.
///
/// Immutable once constructed; the sole externally visible artifact of one
/// engine invocation. Serializes to a flat JSON object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GexResult {
    /// Spot price the profile was computed against.
    pub current_price: f64,
    /// Gamma flip strike (first negative-to-positive crossing, ascending).
    pub gamma_flip: Option<f64>,
    /// Sum of net GEX across all strikes.
    pub total_gex: f64,
    /// Per-strike GEX rows, sorted ascending by strike.
    pub strikes: Vec<GexStrike>,
    /// Notable GEX levels.
    pub key_levels: GexKeyLevels,
    /// ISO-8601 UTC timestamp of when this result was generated.
    pub last_updated: String,
}
