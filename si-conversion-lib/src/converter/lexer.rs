use crate::converter::token::{Token, DELIMITERS};

/// Splits a unit expression into tokens.
///
/// Delimiters are kept as tokens of their own. The text between them is trimmed,
/// and dropped if nothing is left. Unit symbols are not checked against any table.
///
/// # Arguments
///
/// * `expression`: A unit expression, e.g. `"ha*degree/(h*min/degree)"`.
///
/// returns: The tokens of the expression, in order.
///
/// # Examples
///
/// ```
/// use si_conversion::converter::lexer::tokenize;
/// use si_conversion::converter::token::Token;
///
/// let tokens = tokenize("t / (h)");
///
/// assert_eq!(tokens[1], Token::ForwardSlash);
/// assert_eq!(tokens[2], Token::LeftParentheses);
/// ```
pub fn tokenize(expression: &str) -> Vec<Token> {
    let mut tokens = vec![];
    let mut unit_start = 0;
    let mut position = 0;

    while position < expression.len() {
        let rest = &expression[position..];
        match DELIMITERS
            .iter()
            .find(|delimiter| rest.starts_with(*delimiter))
        {
            Some(delimiter) => {
                push_unit(&mut tokens, &expression[unit_start..position]);
                tokens.push(Token::from_symbol(delimiter));
                position += delimiter.len();
                unit_start = position;
            }
            None => position += rest.chars().next().map_or(1, char::len_utf8),
        }
    }
    push_unit(&mut tokens, &expression[unit_start..]);

    tokens
}

fn push_unit(tokens: &mut Vec<Token>, text: &str) {
    let symbol = text.trim();
    if !symbol.is_empty() {
        tokens.push(Token::Unit(symbol.to_string()));
    }
}
