pub mod error;
pub mod evaluator;
pub mod formatter;
pub mod lexer;
pub mod operation;
pub mod token;
pub mod unit_table;

pub use error::ConversionError;
pub use formatter::ConversionResult;
pub use unit_table::{UnitEntry, UnitTable};

use log::debug;

/// Converts a unit expression into SI units, using the built-in unit table.
///
/// # Arguments
///
/// * `expression`: A unit expression, made of unit symbols, `*`, `/` and brackets.
///
/// returns: The expression in SI units and the factor that converts a quantity into them.
///
/// # Examples
///
/// ```
/// # use si_conversion::converter::ConversionError;
/// # fn main() -> Result<(), ConversionError> {
/// use si_conversion::converter::convert;
///
/// let result = convert("t*degree/ha")?;
///
/// assert_eq!(result.units, "kg*rad/m^2");
/// # Ok(()) }
/// ```
pub fn convert(expression: &str) -> Result<ConversionResult, ConversionError> {
    convert_with(expression, UnitTable::standard())
}

/// Converts a unit expression into SI units, using the given unit table.
///
/// # Arguments
///
/// * `expression`: A unit expression, made of unit symbols, `*`, `/` and brackets.
/// * `table`: The known units and SI symbols.
///
/// returns: The expression in SI units and the factor that converts a quantity into them.
///
/// # Examples
///
/// ```
/// # use anyhow::Result;
/// # fn main() -> Result<()> {
/// use si_conversion::converter::{convert_with, UnitTable};
///
/// let mut table = UnitTable::standard().clone();
/// table.extend(UnitTable::from_toml_str("[units.ft]\nsi = \"m\"\nfactor = 0.3048")?);
///
/// let result = convert_with("ft/min", &table)?;
///
/// assert_eq!(result.units, "m/s");
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn convert_with(
    expression: &str,
    table: &UnitTable,
) -> Result<ConversionResult, ConversionError> {
    let tokens = lexer::tokenize(expression);
    debug!("Tokens of '{}': {:?}", expression, tokens);
    let evaluation = evaluator::evaluate(tokens, table)?;
    let result = formatter::format(evaluation);
    debug!("Converted '{}' to {:?}", expression, result);
    Ok(result)
}

/// Converts a unit expression and describes the outcome as text.
///
/// returns: The JSON form of the [`ConversionResult`], or the error message if the
/// expression could not be converted.
///
/// # Examples
///
/// ```
/// use si_conversion::converter::convert_to_json;
///
/// assert_eq!(
///     convert_to_json("t"),
///     r#"{"units":"kg","multiplication_factor":1000}"#
/// );
/// assert_eq!(convert_to_json("blah"), "Invalid expression blah");
/// ```
pub fn convert_to_json(expression: &str) -> String {
    match convert(expression) {
        Ok(result) => result
            .to_json()
            .unwrap_or_else(|error| format!("Could not serialize result: {}", error)),
        Err(error) => error.to_string(),
    }
}

#[cfg(test)]
mod converter_tests {
    use super::*;
    use crate::converter::formatter::{round_significant, SIGNIFICANT_DIGITS};
    use parameterized_macro::parameterized;
    use std::f64::consts::PI;

    const DEGREE: f64 = PI / 180.0;
    const ARC_SECOND: f64 = PI / 648000.0;

    fn round14(value: f64) -> f64 {
        round_significant(value, SIGNIFICANT_DIGITS)
    }

    fn assert_factor(actual: f64, expected: f64) {
        let expected = round14(expected);
        assert!(
            ((actual - expected) / expected).abs() < 1e-12,
            "{} is not {}",
            actual,
            expected
        );
    }

    #[test]
    fn simple_expression_converts() {
        let result = convert("t").unwrap();

        assert_eq!(
            result,
            ConversionResult {
                units: "kg".into(),
                multiplication_factor: 1000.0,
            }
        );
    }

    #[test]
    fn medium_expression_converts() {
        let result = convert("t*degree/ha").unwrap();

        assert_eq!(result.units, "kg*rad/m^2");
        assert_factor(result.multiplication_factor, 1000.0 * DEGREE / 10000.0);
    }

    #[test]
    fn hard_expression_converts() {
        let result = convert("ha*degree/(h*min/degree)").unwrap();

        assert_eq!(result.units, "m^2*rad/(s*s/rad)");
        assert_factor(
            result.multiplication_factor,
            10000.0 * DEGREE / (3600.0 * 60.0 / DEGREE),
        );
    }

    #[test]
    fn very_hard_expression_converts() {
        let result = convert("ha/(t/(hour*min/(degree)*d)*\")").unwrap();

        assert_eq!(result.units, "m^2/(kg/(s*s/(rad)*s)*rad)");
        assert_factor(
            result.multiplication_factor,
            10000.0 / (1000.0 / (3600.0 * 60.0 / DEGREE * 86400.0) * ARC_SECOND),
        );
    }

    #[test]
    fn tiny_factor_is_rounded_to_nearest_double() {
        let result = convert("\"/(d*d)").unwrap();

        assert_eq!(result.units, "rad/(s*s)");
        assert_eq!(result.multiplication_factor, 6.4945248348221e-16);
        assert_eq!(
            result.to_json().unwrap(),
            r#"{"units":"rad/(s*s)","multiplication_factor":6.4945248348221e-16}"#
        );
    }

    #[test]
    fn too_many_open_brackets_are_reported() {
        assert_eq!(
            convert("(degree*h)/(ha*(ha)").unwrap_err(),
            ConversionError::TooManyOpenBrackets
        );
    }

    #[test]
    fn too_few_open_brackets_are_reported() {
        assert_eq!(
            convert("degree/(ha)*h)").unwrap_err(),
            ConversionError::TooFewOpenBrackets
        );
    }

    #[parameterized(
    expression = {"blah", "t*blah", " t / ( bl ah ) ", "kg*m/(fortnight)"},
    symbol = {"blah", "blah", "bl ah", "fortnight"}
    )]
    fn illegal_units_are_reported(expression: &str, symbol: &str) {
        assert_eq!(
            convert(expression).unwrap_err(),
            ConversionError::InvalidExpression(symbol.to_string())
        );
    }

    #[test]
    fn every_known_unit_converts_on_its_own() {
        for (symbol, entry) in UnitTable::standard().units() {
            let result = convert(symbol).unwrap();

            assert_eq!(result.units, entry.si_symbol);
            assert_eq!(result.multiplication_factor, round14(entry.factor));
        }
    }

    #[parameterized(balanced = {"(t*h)", "t/(h*(min))", "((ha))/(d)", "/(t/(h/(min)))"})]
    fn dropping_a_bracket_unbalances_the_expression(balanced: &str) {
        assert!(convert(balanced).is_ok());

        let without_open = balanced.replacen('(', "", 1);
        let last_close = balanced.rfind(')').unwrap();
        let without_close = format!("{}{}", &balanced[..last_close], &balanced[last_close + 1..]);

        assert_eq!(
            convert(&without_open).unwrap_err(),
            ConversionError::TooFewOpenBrackets
        );
        assert_eq!(
            convert(&without_close).unwrap_err(),
            ConversionError::TooManyOpenBrackets
        );
    }

    #[test]
    fn mixed_si_and_non_si_units_convert() {
        let result = convert("m^3/(kg*h)").unwrap();

        assert_eq!(result.units, "m^3/(kg*s)");
        assert_factor(result.multiplication_factor, 1.0 / 3600.0);
    }

    #[test]
    fn converted_units_convert_again_with_factor_one() {
        let first = convert("L/(ha*d)").unwrap();

        let second = convert(&first.units).unwrap();

        assert_eq!(second.units, first.units);
        assert_eq!(second.multiplication_factor, 1.0);
    }

    #[test]
    fn whitespace_is_removed_from_units() {
        let result = convert(" t * ( h ) ").unwrap();

        assert_eq!(result.units, "kg*(s)");
        assert_eq!(result.multiplication_factor, 3_600_000.0);
    }

    #[test]
    fn empty_expression_is_dimensionless() {
        let result = convert("").unwrap();

        assert_eq!(result.units, "");
        assert_eq!(result.multiplication_factor, 1.0);
    }

    #[test]
    fn json_surface_reports_errors_as_text() {
        assert_eq!(convert_to_json("(t"), "Too many open brackets.");
        assert_eq!(convert_to_json("t)"), "Too few open brackets.");
    }
}
