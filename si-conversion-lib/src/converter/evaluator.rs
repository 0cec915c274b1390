use crate::converter::error::ConversionError;
use crate::converter::operation::Operation;
use crate::converter::token::{BracketKind, Token};
use crate::converter::unit_table::UnitTable;
use log::trace;

/// The outcome of evaluating a token sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// The input tokens, with every known unit rewritten to its SI symbol.
    pub tokens: Vec<Token>,
    /// The unrounded factor that scales a quantity in the input units into SI units.
    pub multiplier: f64,
}

#[derive(Debug, Clone, PartialEq)]
struct EvaluatorState {
    level: u32,
    last_operation: Operation,
    multiplier: f64,
    brackets: Vec<BracketKind>,
}

impl EvaluatorState {
    fn new() -> EvaluatorState {
        EvaluatorState {
            level: 1,
            last_operation: Operation::Multiply,
            multiplier: 1.0,
            brackets: vec![],
        }
    }

    fn open(&mut self, bracket: BracketKind) {
        self.brackets.push(bracket);
        if bracket == BracketKind::Fraction {
            self.level += 1;
            self.last_operation = Operation::Multiply;
        }
    }

    fn close(&mut self) -> Result<(), ConversionError> {
        match self.brackets.pop() {
            None => Err(ConversionError::TooFewOpenBrackets),
            Some(BracketKind::Fraction) => {
                self.level -= 1;
                Ok(())
            }
            Some(BracketKind::Plain) => Ok(()),
        }
    }

    fn apply_factor(&mut self, factor: f64) {
        self.multiplier *= self.last_operation.contribution(self.level, factor);
    }
}

/// Rewrites the units of a token sequence into SI units and accumulates the conversion factor.
///
/// Instead of building and simplifying an expression tree, the evaluator tracks the fraction
/// level of each unit. Only `/(` opens a new level. When the nested fractions are simplified,
/// units on odd levels end up in the numerator and units on even levels in the denominator:
///
/// ```text
/// a/(b*c/(d/e))  ==  (a*d/e)/(b*c)
/// 1  2 2  3 3
/// ```
///
/// # Arguments
///
/// * `tokens`: The tokens of a unit expression, as produced by the lexer.
/// * `table`: The known units and SI symbols.
///
/// returns: The rewritten tokens and the conversion factor, or the first problem found.
///
/// # Examples
///
/// ```
/// # use si_conversion::converter::ConversionError;
/// # fn main() -> Result<(), ConversionError> {
/// use si_conversion::converter::evaluator::evaluate;
/// use si_conversion::converter::lexer::tokenize;
/// use si_conversion::converter::UnitTable;
///
/// let evaluation = evaluate(tokenize("t*h"), UnitTable::standard())?;
///
/// assert_eq!(evaluation.multiplier, 3_600_000.0);
/// # Ok(()) }
/// ```
pub fn evaluate(mut tokens: Vec<Token>, table: &UnitTable) -> Result<Evaluation, ConversionError> {
    let mut state = EvaluatorState::new();

    for token in tokens.iter_mut() {
        match token {
            Token::Unit(symbol) => {
                if let Some(entry) = table.lookup(symbol) {
                    state.apply_factor(entry.factor);
                    trace!(
                        "{} -> {} (level {}, {}): multiplier {}",
                        symbol,
                        entry.si_symbol,
                        state.level,
                        state.last_operation,
                        state.multiplier
                    );
                    *symbol = entry.si_symbol.clone();
                } else if !table.is_si(symbol) {
                    return Err(ConversionError::InvalidExpression(symbol.clone()));
                }
            }
            Token::Asterisk => state.last_operation = Operation::Multiply,
            Token::ForwardSlash => state.last_operation = Operation::Divide,
            Token::LeftParentheses => state.open(BracketKind::Plain),
            Token::FractionParentheses => state.open(BracketKind::Fraction),
            Token::RightParentheses => state.close()?,
        }
    }

    if !state.brackets.is_empty() {
        return Err(ConversionError::TooManyOpenBrackets);
    }

    Ok(Evaluation {
        tokens,
        multiplier: state.multiplier,
    })
}
