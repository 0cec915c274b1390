use std::fmt;
use std::fmt::Formatter;

/// The operator that applies to the next unit symbol.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Operation {
    #[default]
    Multiply,
    Divide,
}

impl Operation {
    /// How a unit's conversion factor enters the running product.
    ///
    /// After the nested fractions are fully simplified, units on odd levels end up in
    /// the numerator and units on even levels in the denominator. A division flips that.
    ///
    /// # Arguments
    ///
    /// * `level`: The fraction level the unit sits on, starting at 1.
    /// * `factor`: The unit's conversion factor.
    ///
    /// returns: Either `factor` or its reciprocal.
    pub fn contribution(&self, level: u32, factor: f64) -> f64 {
        let in_numerator = level % 2 == 1;
        match (self, in_numerator) {
            (Operation::Multiply, true) | (Operation::Divide, false) => factor,
            (Operation::Multiply, false) | (Operation::Divide, true) => 1.0 / factor,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Multiply => write!(f, "*"),
            Operation::Divide => write!(f, "/"),
        }
    }
}
