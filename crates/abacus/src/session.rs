//! Calculator session: the state a calculator front end owns.
//!
//! A [`Calculator`] holds the screen, the last result and the memory
//! register. Nothing here is global; the front end creates one session and
//! passes it to whatever handles input.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::display::{deliver, ExpressionSource, ResultSink, Screen};
use crate::error::Failure;
use crate::format::MAX_DECIMAL_PLACES;
use crate::keypad::KeyAction;
use crate::memory::MemoryRegister;
use crate::operation::Operation;

/// Default limit on the operation line length, in characters
pub const MAX_INPUT_LENGTH: usize = 100;

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors reported by session operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The operation line is full
    #[error("Maximum input length reached ({limit} characters)")]
    InputLimit {
        /// Configured limit
        limit: usize,
    },

    /// The result line does not hold a usable number
    #[error("Please enter a valid number")]
    InvalidOperand,

    /// Square root of a negative value
    #[error("Cannot calculate square root of negative number")]
    NegativeSquareRoot,

    /// Expression evaluation failed
    #[error(transparent)]
    Evaluation(#[from] Failure),
}

/// Session limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Longest allowed operation line
    pub max_input_length: usize,
    /// Decimal places shown on the result line
    pub max_decimal_places: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_input_length: MAX_INPUT_LENGTH,
            max_decimal_places: MAX_DECIMAL_PLACES,
        }
    }
}

impl SessionConfig {
    /// Create default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the input length limit
    #[must_use]
    pub const fn with_max_input_length(mut self, limit: usize) -> Self {
        self.max_input_length = limit;
        self
    }

    /// Set the displayed precision
    #[must_use]
    pub const fn with_max_decimal_places(mut self, places: usize) -> Self {
        self.max_decimal_places = places;
        self
    }
}

/// Operations applied to the current value rather than to expression text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// √x
    Sqrt,
    /// x²
    Square,
}

impl UnaryOp {
    /// Applies the operation, rejecting domain errors and non-finite output
    pub fn apply(self, x: f64) -> SessionResult<f64> {
        let value = match self {
            Self::Sqrt => {
                if x < 0.0 {
                    return Err(SessionError::NegativeSquareRoot);
                }
                x.sqrt()
            }
            Self::Square => x * x,
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(Failure::InvalidResult.into())
        }
    }
}

/// A calculator session
#[derive(Debug, Clone)]
pub struct Calculator {
    screen: Screen,
    memory: MemoryRegister,
    last_result: f64,
    config: SessionConfig,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    /// Creates a session with default limits
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    /// Creates a session with custom limits
    #[must_use]
    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            screen: Screen::with_decimal_places(config.max_decimal_places),
            memory: MemoryRegister::new(),
            last_result: 0.0,
            config,
        }
    }

    /// The screen
    #[must_use]
    pub const fn screen(&self) -> &Screen {
        &self.screen
    }

    /// The memory register
    #[must_use]
    pub const fn memory(&self) -> &MemoryRegister {
        &self.memory
    }

    /// The most recent successful value
    #[must_use]
    pub const fn last_result(&self) -> f64 {
        self.last_result
    }

    /// Session limits
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    fn input_len(&self) -> usize {
        self.screen.operation().chars().count()
    }

    /// Appends one character to the operation line.
    ///
    /// - the line is capped at `max_input_length` characters;
    /// - a second `.` within the current number is ignored;
    /// - an operator typed right after another operator replaces it.
    pub fn append(&mut self, ch: char) -> SessionResult<()> {
        let limit = self.config.max_input_length;
        if self.input_len() >= limit {
            return Err(SessionError::InputLimit { limit });
        }

        let line = self.screen.operation_mut();
        if ch == '.' {
            let current_number = line
                .rsplit(|c: char| Operation::from_char(c).is_some())
                .next()
                .unwrap_or_default();
            if current_number.contains('.') {
                return Ok(());
            }
        }

        if Operation::from_char(ch).is_some()
            && line.chars().last().and_then(Operation::from_char).is_some()
        {
            line.pop();
        }

        line.push(ch);
        Ok(())
    }

    /// Appends each character of `text` in turn
    pub fn append_str(&mut self, text: &str) -> SessionResult<()> {
        text.chars().try_for_each(|ch| self.append(ch))
    }

    /// Replaces the operation line, subject to the length limit
    pub fn set_expression(&mut self, expression: &str) -> SessionResult<()> {
        let limit = self.config.max_input_length;
        if expression.chars().count() > limit {
            return Err(SessionError::InputLimit { limit });
        }
        let line = self.screen.operation_mut();
        line.clear();
        line.push_str(expression);
        Ok(())
    }

    /// Empties both screen lines
    pub fn clear(&mut self) {
        self.screen.clear();
    }

    /// Removes the last character of the operation line
    pub fn delete_last(&mut self) {
        self.screen.operation_mut().pop();
    }

    /// Evaluates the operation line.
    ///
    /// Returns `Ok(None)` without touching anything when the line is empty.
    /// On failure the result line is cleared.
    pub fn calculate(&mut self) -> SessionResult<Option<f64>> {
        let expression = self.screen.current_expression();
        if expression.is_empty() {
            return Ok(None);
        }

        let value = deliver(&expression, &mut self.screen)?;
        self.last_result = value;
        tracing::debug!(expression = %expression, value, "calculated");
        Ok(Some(value))
    }

    /// Applies a unary operation to the value on the result line
    pub fn apply(&mut self, op: UnaryOp) -> SessionResult<f64> {
        let current = self
            .screen
            .result_value()
            .ok_or(SessionError::InvalidOperand)?;
        match op.apply(current) {
            Ok(value) => {
                self.last_result = value;
                self.screen.on_result(value);
                tracing::debug!(?op, input = current, value, "applied");
                Ok(value)
            }
            Err(SessionError::Evaluation(failure)) => {
                self.screen.on_failure(&failure);
                Err(failure.into())
            }
            Err(err) => Err(err),
        }
    }

    /// √ of the current value
    pub fn sqrt(&mut self) -> SessionResult<f64> {
        self.apply(UnaryOp::Sqrt)
    }

    /// Square of the current value
    pub fn square(&mut self) -> SessionResult<f64> {
        self.apply(UnaryOp::Square)
    }

    /// Adds the current value to memory; ignored when there is none
    pub fn memory_add(&mut self) {
        if let Some(value) = self.screen.result_value() {
            self.memory.add(value);
        }
    }

    /// Subtracts the current value from memory; ignored when there is none
    pub fn memory_subtract(&mut self) {
        if let Some(value) = self.screen.result_value() {
            self.memory.subtract(value);
        }
    }

    /// Resets memory to zero
    pub fn memory_clear(&mut self) {
        self.memory.clear();
    }

    /// Appends the formatted memory value to the operation line
    pub fn memory_recall(&mut self) -> SessionResult<()> {
        let text = self.screen.format(self.memory.recall());
        let limit = self.config.max_input_length;
        if self.input_len() + text.chars().count() > limit {
            return Err(SessionError::InputLimit { limit });
        }
        self.screen.operation_mut().push_str(&text);
        Ok(())
    }

    /// Dispatches a key action
    pub fn press(&mut self, action: KeyAction) -> SessionResult<()> {
        match action {
            KeyAction::Insert(ch) => self.append(ch),
            KeyAction::Calculate => self.calculate().map(|_| ()),
            KeyAction::Clear => {
                self.clear();
                Ok(())
            }
            KeyAction::DeleteLast => {
                self.delete_last();
                Ok(())
            }
        }
    }
}
