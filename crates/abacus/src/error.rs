//! Evaluation failures
//!
//! Every expected problem with an expression is reported as a [`Failure`]
//! value. Nothing in the evaluation pipeline panics on bad input.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for evaluator stages
pub type EvalResult<T> = Result<T, Failure>;

/// Structured, non-fatal evaluation failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Failure {
    /// A symbol outside `0-9 . + - * / ( ) %` appeared in the expression
    #[error("Invalid character '{character}' at position {position}")]
    InvalidCharacter {
        /// The rejected character
        character: char,
        /// Character offset within the whitespace-stripped expression
        position: usize,
    },

    /// A numeric literal is lexically invalid (e.g. `1..2`)
    #[error("Malformed number: '{literal}'")]
    MalformedNumber {
        /// The offending literal text
        literal: String,
    },

    /// Parenthesis nesting does not balance
    #[error("Mismatched parentheses")]
    MismatchedParentheses,

    /// The token sequence violates the grammar
    #[error("Malformed expression: {reason}")]
    MalformedExpression {
        /// What was wrong with the expression
        reason: String,
    },

    /// A division's right operand evaluated to zero
    #[error("Division by zero")]
    DivisionByZero,

    /// The final value is infinite or NaN
    #[error("Invalid calculation result")]
    InvalidResult,
}

impl Failure {
    /// Create a malformed expression failure
    #[must_use]
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedExpression {
            reason: reason.into(),
        }
    }

    /// Create a malformed number failure
    #[must_use]
    pub fn malformed_number(literal: impl Into<String>) -> Self {
        Self::MalformedNumber {
            literal: literal.into(),
        }
    }

    /// Returns the bare reason code, without any detail payload
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::InvalidCharacter { .. } => FailureKind::InvalidCharacter,
            Self::MalformedNumber { .. } => FailureKind::MalformedNumber,
            Self::MismatchedParentheses => FailureKind::MismatchedParentheses,
            Self::MalformedExpression { .. } => FailureKind::MalformedExpression,
            Self::DivisionByZero => FailureKind::DivisionByZero,
            Self::InvalidResult => FailureKind::InvalidResult,
        }
    }
}

/// Reason code carried by a [`Failure`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Disallowed symbol
    InvalidCharacter,
    /// Lexically invalid literal
    MalformedNumber,
    /// Unbalanced nesting
    MismatchedParentheses,
    /// Grammar violation
    MalformedExpression,
    /// Zero divisor
    DivisionByZero,
    /// Non-finite outcome
    InvalidResult,
}

impl FailureKind {
    /// Stable name of the reason code
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidCharacter => "invalid_character",
            Self::MalformedNumber => "malformed_number",
            Self::MismatchedParentheses => "mismatched_parentheses",
            Self::MalformedExpression => "malformed_expression",
            Self::DivisionByZero => "division_by_zero",
            Self::InvalidResult => "invalid_result",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_invalid_character() {
        let err = Failure::InvalidCharacter {
            character: '@',
            position: 1,
        };
        assert_eq!(err.to_string(), "Invalid character '@' at position 1");
    }

    #[test]
    fn test_display_malformed_number() {
        let err = Failure::malformed_number("1..2");
        assert_eq!(err.to_string(), "Malformed number: '1..2'");
    }

    #[test]
    fn test_display_malformed_expression() {
        let err = Failure::malformed("empty expression");
        assert_eq!(err.to_string(), "Malformed expression: empty expression");
    }

    #[test]
    fn test_display_simple_variants() {
        assert_eq!(
            Failure::MismatchedParentheses.to_string(),
            "Mismatched parentheses"
        );
        assert_eq!(Failure::DivisionByZero.to_string(), "Division by zero");
        assert_eq!(
            Failure::InvalidResult.to_string(),
            "Invalid calculation result"
        );
    }

    #[test]
    fn test_kind_strips_payload() {
        assert_eq!(
            Failure::malformed_number("..").kind(),
            FailureKind::MalformedNumber
        );
        assert_eq!(
            Failure::malformed("x").kind(),
            FailureKind::MalformedExpression
        );
        assert_eq!(Failure::DivisionByZero.kind(), FailureKind::DivisionByZero);
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&FailureKind::MismatchedParentheses).unwrap();
        assert_eq!(json, "\"mismatched_parentheses\"");
        let back: FailureKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, FailureKind::MismatchedParentheses);
    }

    #[test]
    fn test_kind_display_matches_serde_name() {
        assert_eq!(FailureKind::InvalidResult.to_string(), "invalid_result");
    }

    #[test]
    fn test_failure_is_error_trait() {
        let err: Box<dyn std::error::Error> = Box::new(Failure::DivisionByZero);
        assert!(err.to_string().contains("Division"));
    }
}
