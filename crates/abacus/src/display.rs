//! Input source / result sink seams and the two-line calculator screen
//!
//! The evaluator only needs something that can hand it the current
//! expression and something that accepts the outcome. [`Screen`] is the
//! stock implementation of both: an operation line and a result line.

use crate::error::{EvalResult, Failure};
use crate::evaluator::evaluate;
use crate::format::{format_number_with, MAX_DECIMAL_PLACES};

/// Supplies the expression to evaluate
pub trait ExpressionSource {
    /// Returns the current expression text
    fn current_expression(&self) -> String;
}

/// Receives evaluation outcomes
pub trait ResultSink {
    /// Called with a finite result
    fn on_result(&mut self, value: f64);

    /// Called when evaluation fails.
    ///
    /// Implementations must not keep showing a previous value.
    fn on_failure(&mut self, reason: &Failure);
}

/// Evaluates `expression` and reports the outcome to `sink`
pub fn deliver<K: ResultSink + ?Sized>(expression: &str, sink: &mut K) -> EvalResult<f64> {
    let result = evaluate(expression);
    match &result {
        Ok(value) => sink.on_result(*value),
        Err(failure) => sink.on_failure(failure),
    }
    result
}

/// Pulls the expression from `source` and reports to `sink`
pub fn evaluate_from<S, K>(source: &S, sink: &mut K) -> EvalResult<f64>
where
    S: ExpressionSource + ?Sized,
    K: ResultSink + ?Sized,
{
    deliver(&source.current_expression(), sink)
}

/// Operation line plus result line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    operation: String,
    result: String,
    last_failure: Option<String>,
    decimal_places: usize,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// Creates an empty screen
    #[must_use]
    pub fn new() -> Self {
        Self::with_decimal_places(MAX_DECIMAL_PLACES)
    }

    /// Creates an empty screen rounding results to `places` decimals
    #[must_use]
    pub fn with_decimal_places(places: usize) -> Self {
        Self {
            operation: String::new(),
            result: String::new(),
            last_failure: None,
            decimal_places: places,
        }
    }

    /// The operation line
    #[must_use]
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Mutable access to the operation line
    pub fn operation_mut(&mut self) -> &mut String {
        &mut self.operation
    }

    /// The result line
    #[must_use]
    pub fn result(&self) -> &str {
        &self.result
    }

    /// Message of the most recent failure, cleared by the next success
    #[must_use]
    pub fn last_failure(&self) -> Option<&str> {
        self.last_failure.as_deref()
    }

    /// Decimal places used for the result line
    #[must_use]
    pub const fn decimal_places(&self) -> usize {
        self.decimal_places
    }

    /// Formats `value` the way the result line shows it
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        format_number_with(value, self.decimal_places)
    }

    /// Parses the result line as a finite number
    #[must_use]
    pub fn result_value(&self) -> Option<f64> {
        self.result
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
    }

    /// Empties both lines
    pub fn clear(&mut self) {
        self.operation.clear();
        self.result.clear();
        self.last_failure = None;
    }
}

impl ExpressionSource for Screen {
    fn current_expression(&self) -> String {
        self.operation.clone()
    }
}

impl ResultSink for Screen {
    fn on_result(&mut self, value: f64) {
        self.result = self.format(value);
        self.last_failure = None;
    }

    fn on_failure(&mut self, reason: &Failure) {
        self.result.clear();
        self.last_failure = Some(reason.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        results: Vec<f64>,
        failures: Vec<Failure>,
    }

    impl ResultSink for Recorder {
        fn on_result(&mut self, value: f64) {
            self.results.push(value);
        }

        fn on_failure(&mut self, reason: &Failure) {
            self.failures.push(reason.clone());
        }
    }

    struct Fixed(&'static str);

    impl ExpressionSource for Fixed {
        fn current_expression(&self) -> String {
            self.0.to_string()
        }
    }

    #[test]
    fn test_deliver_success_notifies_result() {
        let mut sink = Recorder::default();
        assert_eq!(deliver("6*7", &mut sink), Ok(42.0));
        assert_eq!(sink.results, vec![42.0]);
        assert!(sink.failures.is_empty());
    }

    #[test]
    fn test_deliver_failure_notifies_failure() {
        let mut sink = Recorder::default();
        assert!(deliver("1/0", &mut sink).is_err());
        assert!(sink.results.is_empty());
        assert_eq!(sink.failures, vec![Failure::DivisionByZero]);
    }

    #[test]
    fn test_evaluate_from_source() {
        let mut sink = Recorder::default();
        assert_eq!(evaluate_from(&Fixed("1+2+3"), &mut sink), Ok(6.0));
    }

    #[test]
    fn test_screen_shows_formatted_result() {
        let mut screen = Screen::new();
        screen.operation_mut().push_str("1/3");
        let source = screen.clone();
        evaluate_from(&source, &mut screen).unwrap();
        assert_eq!(screen.result(), "0.3333333333");
        assert_eq!(screen.last_failure(), None);
    }

    #[test]
    fn test_screen_failure_clears_stale_result() {
        let mut screen = Screen::new();
        screen.on_result(5.0);
        assert_eq!(screen.result(), "5");

        screen.on_failure(&Failure::DivisionByZero);
        assert_eq!(screen.result(), "");
        assert_eq!(screen.last_failure(), Some("Division by zero"));
    }

    #[test]
    fn test_screen_custom_places() {
        let mut screen = Screen::with_decimal_places(2);
        screen.on_result(2.0 / 3.0);
        assert_eq!(screen.result(), "0.67");
        assert_eq!(screen.decimal_places(), 2);
    }

    #[test]
    fn test_result_value() {
        let mut screen = Screen::new();
        assert_eq!(screen.result_value(), None);
        screen.on_result(-2.5);
        assert_eq!(screen.result_value(), Some(-2.5));
    }

    #[test]
    fn test_clear() {
        let mut screen = Screen::new();
        screen.operation_mut().push_str("1+");
        screen.on_failure(&Failure::InvalidResult);
        screen.clear();
        assert_eq!(screen, Screen::new());
    }
}
