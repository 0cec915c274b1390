use crate::converter::evaluator::Evaluation;
use itertools::Itertools;
use serde::{Deserialize, Serialize, Serializer};

/// The number of significant digits the conversion factor is rounded to.
pub const SIGNIFICANT_DIGITS: i32 = 14;

/// Above this, not every integer has an exact `f64` representation.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A unit expression in SI units, together with the factor that converts into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    pub units: String,
    /// Multiplying a quantity in the original units by this gives the quantity in `units`.
    #[serde(serialize_with = "serialize_factor")]
    pub multiplication_factor: f64,
}

impl ConversionResult {
    /// Serializes the result as `{"units": ..., "multiplication_factor": ...}`.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Integral factors are written without a fractional part, e.g. `1000` instead of `1000.0`.
fn serialize_factor<S: Serializer>(factor: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if factor.fract() == 0.0 && factor.abs() < MAX_EXACT_INTEGER {
        serializer.serialize_i64(*factor as i64)
    } else {
        serializer.serialize_f64(*factor)
    }
}

/// Joins the rewritten tokens back into an expression and rounds the conversion factor.
pub fn format(evaluation: Evaluation) -> ConversionResult {
    ConversionResult {
        units: evaluation.tokens.iter().join(""),
        multiplication_factor: round_significant(evaluation.multiplier, SIGNIFICANT_DIGITS),
    }
}

/// Rounds a number to the given number of significant digits.
///
/// The result is the `f64` nearest to the rounded decimal.
/// Zero and non-finite numbers have no leading digit and are returned as they are.
///
/// # Examples
///
/// ```
/// use si_conversion::converter::formatter::round_significant;
///
/// assert_eq!(round_significant(123.456, 4), 123.5);
/// assert_eq!(round_significant(0.00123456, 2), 0.0012);
/// assert_eq!(round_significant(987_654.0, 2), 990_000.0);
/// ```
pub fn round_significant(value: f64, digits: i32) -> f64 {
    if value == 0.0 || !value.is_finite() || digits < 1 {
        return value;
    }

    let decimal = format!("{:.*e}", (digits - 1) as usize, value);
    decimal.parse().unwrap_or(value)
}
