//! Expression evaluation
//!
//! [`evaluate`] is the single entry point: a pure function from expression
//! text to a finite `f64` or a [`Failure`]. It runs the lexical stages, the
//! balance and structure checks, walks the AST, and finally rejects any
//! non-finite value.
//!
//! Input size is bounded here rather than by callers: at most
//! [`MAX_EXPRESSION_LENGTH`] non-whitespace characters, and nesting at most
//! [`MAX_DEPTH`](crate::parser::MAX_DEPTH) levels.

use crate::error::{EvalResult, Failure};
use crate::lexer::lex;
use crate::parser::{check_balance, check_structure, AstNode, Parser};

/// Longest expression [`evaluate`] accepts, counted in non-whitespace
/// characters
pub const MAX_EXPRESSION_LENGTH: usize = 4096;

/// Evaluates an arithmetic expression.
///
/// Accepts digits, `.`, `+ - * /`, parentheses, `%` (postfix percent) and
/// whitespace. `*` and `/` bind tighter than `+` and `-`; operators of equal
/// precedence associate left.
///
/// # Example
///
/// ```rust
/// use abacus::{evaluate, Failure};
///
/// assert_eq!(evaluate("2 + 3 * 4"), Ok(14.0));
/// assert_eq!(evaluate("50%"), Ok(0.5));
/// assert_eq!(evaluate("1/0"), Err(Failure::DivisionByZero));
/// ```
pub fn evaluate(expression: &str) -> EvalResult<f64> {
    let result = run_pipeline(expression);
    match &result {
        Ok(value) => tracing::trace!(expression, value, "evaluated"),
        Err(failure) => {
            tracing::debug!(expression, kind = %failure.kind(), "evaluation failed: {failure}");
        }
    }
    result
}

fn run_pipeline(expression: &str) -> EvalResult<f64> {
    check_length(expression)?;
    let tokens = lex(expression)?;
    check_balance(&tokens)?;
    check_structure(&tokens)?;
    let ast = Parser::new(tokens).parse()?;
    let value = eval_node(&ast)?;
    validate_result(value)
}

fn check_length(expression: &str) -> EvalResult<()> {
    let too_long = expression
        .chars()
        .filter(|c| !c.is_whitespace())
        .nth(MAX_EXPRESSION_LENGTH)
        .is_some();
    if too_long {
        return Err(Failure::malformed(format!(
            "expression longer than {MAX_EXPRESSION_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Walks an AST and computes its value.
///
/// Intermediate overflow is allowed to propagate; only the final value is
/// checked by [`validate_result`].
pub fn eval_node(node: &AstNode) -> EvalResult<f64> {
    match node {
        AstNode::Number(n) => Ok(*n),
        AstNode::Negate(inner) => Ok(-eval_node(inner)?),
        AstNode::BinaryOp { left, op, right } => {
            let lhs = eval_node(left)?;
            let rhs = eval_node(right)?;
            op.apply(lhs, rhs)
        }
    }
}

/// Rejects infinite and NaN results
pub fn validate_result(value: f64) -> EvalResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Failure::InvalidResult)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use crate::operation::Operation;
    use crate::parser::MAX_DEPTH;

    fn kind_of(expression: &str) -> FailureKind {
        evaluate(expression).unwrap_err().kind()
    }

    // ===== required behaviour =====

    #[test]
    fn test_precedence() {
        assert_eq!(evaluate("2+3*4"), Ok(14.0));
    }

    #[test]
    fn test_grouping() {
        assert_eq!(evaluate("(2+3)*4"), Ok(20.0));
    }

    #[test]
    fn test_percent() {
        assert_eq!(evaluate("50%"), Ok(0.5));
    }

    #[test]
    fn test_chained_addition() {
        assert_eq!(evaluate("1+2+3"), Ok(6.0));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(evaluate("1/0"), Err(Failure::DivisionByZero));
    }

    #[test]
    fn test_unclosed_group() {
        assert_eq!(evaluate("2*(3+"), Err(Failure::MismatchedParentheses));
    }

    #[test]
    fn test_empty() {
        assert_eq!(kind_of(""), FailureKind::MalformedExpression);
    }

    #[test]
    fn test_double_decimal_point() {
        assert_eq!(kind_of("1..2+3"), FailureKind::MalformedNumber);
    }

    #[test]
    fn test_invalid_character() {
        assert_eq!(
            evaluate("1@2"),
            Err(Failure::InvalidCharacter {
                character: '@',
                position: 1
            })
        );
    }

    #[test]
    fn test_idempotent() {
        for expr in ["1+2*3", "1/0", "(", "7%", "abc"] {
            assert_eq!(evaluate(expr), evaluate(expr));
        }
    }

    // ===== further behaviour =====

    #[test]
    fn test_whitespace_only_is_empty() {
        assert_eq!(kind_of("  \t "), FailureKind::MalformedExpression);
    }

    #[test]
    fn test_whitespace_is_ignored_everywhere() {
        assert_eq!(evaluate(" 1 2 + 3 "), Ok(15.0));
    }

    #[test]
    fn test_chained_subtraction_is_left_associative() {
        assert_eq!(evaluate("10-4-3"), Ok(3.0));
    }

    #[test]
    fn test_chained_division_is_left_associative() {
        assert_eq!(evaluate("100/10/5"), Ok(2.0));
    }

    #[test]
    fn test_unary_minus() {
        assert_eq!(evaluate("-5+10"), Ok(5.0));
        assert_eq!(evaluate("3*-2"), Ok(-6.0));
        assert_eq!(evaluate("-(2+3)"), Ok(-5.0));
        assert_eq!(evaluate("--4"), Ok(4.0));
    }

    #[test]
    fn test_percent_in_arithmetic() {
        assert_eq!(evaluate("200*15%"), Ok(30.0));
        assert_eq!(evaluate("(50%+50%)*4"), Ok(4.0));
    }

    #[test]
    fn test_division_by_expression_that_is_zero() {
        assert_eq!(evaluate("5/(2-2)"), Err(Failure::DivisionByZero));
        assert_eq!(evaluate("5/-0"), Err(Failure::DivisionByZero));
    }

    #[test]
    fn test_zero_numerator_is_fine() {
        assert_eq!(evaluate("0/5"), Ok(0.0));
    }

    #[test]
    fn test_overflow_is_invalid_result() {
        let huge = "9".repeat(200);
        let expr = format!("{huge}*{huge}");
        assert_eq!(evaluate(&expr), Err(Failure::InvalidResult));
    }

    #[test]
    fn test_nan_is_invalid_result() {
        let huge = "9".repeat(200);
        let expr = format!("{huge}*{huge}-{huge}*{huge}");
        assert_eq!(evaluate(&expr), Err(Failure::InvalidResult));
    }

    #[test]
    fn test_decimals() {
        let value = evaluate("0.1+0.2").unwrap();
        assert!((value - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_mismatched_before_structure() {
        // unbalanced and structurally broken: balance is reported first
        assert_eq!(evaluate("(1+"), Err(Failure::MismatchedParentheses));
        assert_eq!(evaluate("1+2)"), Err(Failure::MismatchedParentheses));
    }

    #[test]
    fn test_structural_failures() {
        assert_eq!(kind_of("1+"), FailureKind::MalformedExpression);
        assert_eq!(kind_of("1+*2"), FailureKind::MalformedExpression);
        assert_eq!(kind_of("()"), FailureKind::MalformedExpression);
        assert_eq!(kind_of("2(3)"), FailureKind::MalformedExpression);
        assert_eq!(kind_of("%"), FailureKind::MalformedExpression);
    }

    #[test]
    fn test_code_injection_is_rejected() {
        assert_eq!(kind_of("alert(1)"), FailureKind::InvalidCharacter);
        assert_eq!(kind_of("1;2"), FailureKind::InvalidCharacter);
        assert_eq!(kind_of("2**3"), FailureKind::MalformedExpression);
    }

    // ===== size limits =====

    #[test]
    fn test_huge_unary_chain_is_rejected() {
        let input = format!("{}1", "-".repeat(200_000));
        assert_eq!(kind_of(&input), FailureKind::MalformedExpression);
    }

    #[test]
    fn test_huge_nesting_is_rejected() {
        let input = format!("{}1{}", "(".repeat(200_000), ")".repeat(200_000));
        assert_eq!(kind_of(&input), FailureKind::MalformedExpression);
    }

    #[test]
    fn test_nesting_past_depth_within_length() {
        let depth = MAX_DEPTH + 44;
        let input = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
        assert!(input.len() < MAX_EXPRESSION_LENGTH);
        assert_eq!(kind_of(&input), FailureKind::MalformedExpression);

        let minus = format!("{}1", "-".repeat(depth));
        assert_eq!(kind_of(&minus), FailureKind::MalformedExpression);
    }

    #[test]
    fn test_nesting_at_depth_evaluates() {
        let input = format!("{}7{}", "(".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));
        assert_eq!(evaluate(&input), Ok(7.0));
        // an even count of minus signs cancels out
        assert_eq!(evaluate(&format!("{}7", "-".repeat(MAX_DEPTH))), Ok(7.0));
    }

    #[test]
    fn test_length_limit_boundary() {
        // 2047 "1+" pairs and a two-digit tail: exactly at the limit
        let at_limit = format!("{}10", "1+".repeat(2047));
        assert_eq!(at_limit.len(), MAX_EXPRESSION_LENGTH);
        assert_eq!(evaluate(&at_limit), Ok(2057.0));

        let over = format!("{at_limit}0");
        assert_eq!(kind_of(&over), FailureKind::MalformedExpression);
    }

    #[test]
    fn test_length_limit_ignores_whitespace() {
        let spaced = format!("{}1", "1 + ".repeat(2047));
        assert_eq!(evaluate(&spaced), Ok(2048.0));
    }

    #[test]
    fn test_eval_node_directly() {
        let ast = AstNode::binary(
            AstNode::negate(AstNode::number(4.0)),
            Operation::Divide,
            AstNode::number(2.0),
        );
        assert_eq!(eval_node(&ast), Ok(-2.0));
    }

    #[test]
    fn test_eval_node_propagates_right_failure() {
        let ast = AstNode::binary(
            AstNode::number(5.0),
            Operation::Add,
            AstNode::binary(
                AstNode::number(1.0),
                Operation::Divide,
                AstNode::number(0.0),
            ),
        );
        assert_eq!(eval_node(&ast), Err(Failure::DivisionByZero));
    }

    #[test]
    fn test_validate_result() {
        assert_eq!(validate_result(1.5), Ok(1.5));
        assert_eq!(validate_result(f64::NAN), Err(Failure::InvalidResult));
        assert_eq!(
            validate_result(f64::NEG_INFINITY),
            Err(Failure::InvalidResult)
        );
    }
}
