//! Abacus - safe arithmetic expression evaluation
//!
//! The core of this crate is [`evaluate`], a pure function that turns an
//! expression such as `"(2 + 3) * 4"` into a finite `f64` or a structured
//! [`Failure`]. It is a real tokenizer and recursive descent parser: no
//! expression text is ever executed.
//!
//! Around it sits a thin calculator session layer ([`Calculator`]) that
//! owns the screen, the last result and the memory register, plus keyboard
//! mapping and theme persistence for front ends.
//!
//! # Example
//!
//! ```rust
//! use abacus::prelude::*;
//!
//! assert_eq!(evaluate("1 + 2 + 3"), Ok(6.0));
//! assert_eq!(evaluate("2 * (3 +"), Err(Failure::MismatchedParentheses));
//!
//! let mut calc = Calculator::new();
//! calc.append_str("200*15%").unwrap();
//! calc.calculate().unwrap();
//! assert_eq!(calc.screen().result(), "30");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod display;
mod error;
pub mod evaluator;
pub mod format;
pub mod keypad;
pub mod lexer;
pub mod memory;
mod operation;
pub mod parser;
pub mod session;
pub mod theme;

pub use error::{EvalResult, Failure, FailureKind};
pub use evaluator::{evaluate, MAX_EXPRESSION_LENGTH};
pub use parser::MAX_DEPTH;
pub use format::{format_number, format_number_with, MAX_DECIMAL_PLACES};
pub use operation::Operation;
pub use session::{Calculator, SessionConfig, SessionError, SessionResult, MAX_INPUT_LENGTH};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::display::{ExpressionSource, ResultSink, Screen};
    pub use crate::keypad::KeyAction;
    pub use crate::lexer::{Token, Tokenizer};
    pub use crate::memory::MemoryRegister;
    pub use crate::parser::{AstNode, Parser};
    pub use crate::session::UnaryOp;
    pub use crate::theme::{FileThemeStore, MemoryThemeStore, Theme, ThemeStore};
    pub use crate::{
        evaluate, format_number, Calculator, EvalResult, Failure, FailureKind, Operation,
        SessionConfig, SessionError,
    };
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_imports() {
        assert_eq!(evaluate("2 + 3"), Ok(5.0));
        assert_eq!(format_number(0.5), "0.5");
    }

    #[test]
    fn test_tokenizer_and_parser_compose() {
        let tokens = Tokenizer::new("1+2*3").tokenize().unwrap();
        let ast = Parser::new(tokens).parse().unwrap();
        assert_eq!(crate::evaluator::eval_node(&ast), Ok(7.0));
    }

    #[test]
    fn test_keyboard_driven_session() {
        let mut calc = Calculator::new();
        for key in ["(", "2", "+", "3", ")", "*", "4", "Enter"] {
            let action = KeyAction::from_key(key).unwrap();
            calc.press(action).unwrap();
        }
        assert_eq!(calc.screen().result(), "20");
        assert_eq!(calc.square(), Ok(400.0));
    }

    #[test]
    fn test_failure_reported_through_session() {
        let mut calc = Calculator::new();
        calc.append_str("1/0").unwrap();
        let err = calc.calculate().unwrap_err();
        assert_eq!(err, SessionError::Evaluation(Failure::DivisionByZero));
        assert_eq!(calc.screen().last_failure(), Some("Division by zero"));
    }

    #[test]
    fn test_theme_store_in_session_context() {
        let mut store = MemoryThemeStore::new();
        assert_eq!(crate::theme::toggle_theme(&mut store).unwrap(), Theme::Dark);
    }
}
