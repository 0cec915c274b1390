use std::fmt;
use std::fmt::Formatter;

/// A discrete part of a unit expression.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Token {
    /// A unit symbol. Holds the source text until the evaluator rewrites it to its SI symbol.
    Unit(String),
    Asterisk,
    ForwardSlash,
    LeftParentheses,
    /// The compound `/(`, which opens a new fraction level.
    FractionParentheses,
    RightParentheses,
}

/// The kind of bracket that was opened, as remembered on the evaluator's bracket stack.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BracketKind {
    Plain,
    Fraction,
}

/// Structural symbols, longest first so that `/(` is matched before `/` and `(`.
pub static DELIMITERS: [&str; 5] = ["/(", "(", ")", "*", "/"];

impl Token {
    /// Maps a structural symbol to its token. Any other text is a unit symbol.
    pub fn from_symbol(symbol: &str) -> Token {
        match symbol {
            "*" => Token::Asterisk,
            "/" => Token::ForwardSlash,
            "(" => Token::LeftParentheses,
            "/(" => Token::FractionParentheses,
            ")" => Token::RightParentheses,
            unit => Token::Unit(unit.to_string()),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Token::Unit(symbol) => write!(f, "{}", symbol),
            Token::Asterisk => write!(f, "*"),
            Token::ForwardSlash => write!(f, "/"),
            Token::LeftParentheses => write!(f, "("),
            Token::FractionParentheses => write!(f, "/("),
            Token::RightParentheses => write!(f, ")"),
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
