//! Eval command handler

use crate::config::AbacusConfig;
use crate::error::{CliError, CliResult};
use crate::output::Reporter;
use crate::EvalArgs;
use abacus::{evaluate, format_number_with, EvalResult, FailureKind, SessionError};
use serde::Serialize;

/// Machine-readable outcome of one evaluation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvalReport {
    /// The expression as given
    pub expression: String,
    /// Raw result value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// Result as displayed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    /// Failure reason code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
    /// Failure message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl EvalReport {
    /// Builds a report from an evaluation outcome
    #[must_use]
    pub fn new(expression: &str, outcome: &EvalResult<f64>, places: usize) -> Self {
        match outcome {
            Ok(value) => Self {
                expression: expression.to_string(),
                value: Some(*value),
                display: Some(format_number_with(*value, places)),
                failure: None,
                message: None,
            },
            Err(failure) => Self {
                expression: expression.to_string(),
                value: None,
                display: None,
                failure: Some(failure.kind()),
                message: Some(failure.to_string()),
            },
        }
    }
}

/// Evaluates `expression` under the configured limits
pub fn evaluate_checked(settings: &AbacusConfig, expression: &str) -> CliResult<EvalResult<f64>> {
    let limit = settings.session.max_input_length;
    if expression.chars().count() > limit {
        return Err(CliError::Session(SessionError::InputLimit { limit }));
    }
    Ok(evaluate(expression))
}

/// Execute the eval command
pub fn execute_eval(
    settings: &AbacusConfig,
    args: &EvalArgs,
    reporter: &Reporter,
) -> CliResult<()> {
    let expression = args.joined();
    let outcome = evaluate_checked(settings, &expression)?;
    let places = settings.session.max_decimal_places;

    if args.json {
        let report = EvalReport::new(&expression, &outcome, places);
        reporter.value(&serde_json::to_string(&report)?);
    } else if let Ok(value) = outcome {
        reporter.value(&format_number_with(value, places));
    }

    outcome.map(|_| ()).map_err(CliError::from)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use abacus::{Failure, SessionConfig};

    #[test]
    fn test_report_success() {
        let report = EvalReport::new("1/3", &Ok(1.0 / 3.0), 4);
        assert_eq!(report.display.as_deref(), Some("0.3333"));
        assert_eq!(report.failure, None);
    }

    #[test]
    fn test_report_failure_json() {
        let report = EvalReport::new("1/0", &Err(Failure::DivisionByZero), 10);
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(
            json,
            r#"{"expression":"1/0","failure":"division_by_zero","message":"Division by zero"}"#
        );
    }

    #[test]
    fn test_evaluate_checked_enforces_limit() {
        let settings = AbacusConfig {
            session: SessionConfig::new().with_max_input_length(3),
            theme_file: None,
        };
        assert!(matches!(
            evaluate_checked(&settings, "1+2+3"),
            Err(CliError::Session(SessionError::InputLimit { limit: 3 }))
        ));
        assert_eq!(evaluate_checked(&settings, "1+2").unwrap(), Ok(3.0));
    }

    #[test]
    fn test_execute_eval_returns_failure() {
        let args = EvalArgs {
            expression: vec!["2*(3+".to_string()],
            json: false,
        };
        let reporter = Reporter::new(false, true);
        let err = execute_eval(&AbacusConfig::default(), &args, &reporter).unwrap_err();
        assert!(matches!(
            err,
            CliError::Evaluation(Failure::MismatchedParentheses)
        ));
    }
}
