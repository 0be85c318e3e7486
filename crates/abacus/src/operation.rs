//! Binary arithmetic operators

use crate::error::{EvalResult, Failure};

/// The four binary operators the grammar knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (*)
    Multiply,
    /// Division (/)
    Divide,
}

impl Operation {
    /// Maps an operator character to its operation
    #[must_use]
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            _ => None,
        }
    }

    /// Returns the operator symbol for display
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    /// Applies the operation to two operands.
    ///
    /// Division by an exact zero (either sign) is a failure rather than an
    /// infinity. Overflow is left to the final result check.
    pub fn apply(self, a: f64, b: f64) -> EvalResult<f64> {
        match self {
            Self::Add => Ok(a + b),
            Self::Subtract => Ok(a - b),
            Self::Multiply => Ok(a * b),
            Self::Divide => {
                if b == 0.0 {
                    return Err(Failure::DivisionByZero);
                }
                Ok(a / b)
            }
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
