use std::fmt;

/// Why a unit expression could not be converted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// A `)` was found with no bracket left to close.
    TooFewOpenBrackets,
    /// The expression ended with brackets still open.
    TooManyOpenBrackets,
    /// A symbol that is neither a known unit nor an SI symbol. Holds the symbol as written.
    InvalidExpression(String),
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionError::TooFewOpenBrackets => write!(f, "Too few open brackets."),
            ConversionError::TooManyOpenBrackets => write!(f, "Too many open brackets."),
            ConversionError::InvalidExpression(symbol) => {
                write!(f, "Invalid expression {}", symbol)
            }
        }
    }
}

impl std::error::Error for ConversionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_fixed_texts() {
        assert_eq!(
            ConversionError::TooFewOpenBrackets.to_string(),
            "Too few open brackets."
        );
        assert_eq!(
            ConversionError::TooManyOpenBrackets.to_string(),
            "Too many open brackets."
        );
        assert_eq!(
            ConversionError::InvalidExpression("blah".into()).to_string(),
            "Invalid expression blah"
        );
    }
}
