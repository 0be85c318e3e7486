//! Token-level checks and the recursive descent parser

use crate::error::{EvalResult, Failure};
use crate::lexer::Token;
use crate::operation::Operation;

/// Abstract Syntax Tree node
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    /// Numeric literal
    Number(f64),
    /// Binary operation
    BinaryOp {
        /// Left operand
        left: Box<AstNode>,
        /// Operator
        op: Operation,
        /// Right operand
        right: Box<AstNode>,
    },
    /// Unary negation
    Negate(Box<AstNode>),
}

impl AstNode {
    /// Creates a new number node
    #[must_use]
    pub const fn number(value: f64) -> Self {
        Self::Number(value)
    }

    /// Creates a new binary operation node
    #[must_use]
    pub fn binary(left: Self, op: Operation, right: Self) -> Self {
        Self::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Creates a new negation node
    #[must_use]
    pub fn negate(inner: Self) -> Self {
        Self::Negate(Box::new(inner))
    }
}

/// Verifies parenthesis nesting.
///
/// The depth may never drop below zero and must end at zero.
pub fn check_balance(tokens: &[Token]) -> EvalResult<()> {
    let mut depth: usize = 0;
    for token in tokens {
        match token {
            Token::LeftParen => depth += 1,
            Token::RightParen => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(Failure::MismatchedParentheses)?;
            }
            _ => {}
        }
    }
    if depth == 0 {
        Ok(())
    } else {
        Err(Failure::MismatchedParentheses)
    }
}

/// Rejects token sequences the grammar cannot derive.
///
/// A `-` is accepted wherever an operand is expected and acts as unary
/// minus; every other operator must follow a complete operand.
pub fn check_structure(tokens: &[Token]) -> EvalResult<()> {
    let Some(last) = tokens.last() else {
        return Err(Failure::malformed("empty expression"));
    };

    let mut prev: Option<&Token> = None;
    for token in tokens {
        match (prev, token) {
            (
                None | Some(Token::Operator(_) | Token::LeftParen),
                Token::Operator(Operation::Subtract),
            ) => {}
            (None, Token::Operator(op)) => {
                return Err(Failure::malformed(format!(
                    "expression cannot start with '{op}'"
                )));
            }
            (Some(Token::Operator(a)), Token::Operator(b)) => {
                return Err(Failure::malformed(format!(
                    "adjacent operators '{a}{b}'"
                )));
            }
            (Some(Token::LeftParen), Token::Operator(op)) => {
                return Err(Failure::malformed(format!("'{op}' directly after '('")));
            }
            (Some(Token::LeftParen), Token::RightParen) => {
                return Err(Failure::malformed("empty parentheses"));
            }
            (Some(Token::Operator(op)), Token::RightParen) => {
                return Err(Failure::malformed(format!("'{op}' directly before ')'")));
            }
            (Some(p), Token::Number(_) | Token::LeftParen) if p.ends_operand() => {
                return Err(Failure::malformed(format!(
                    "missing operator between '{p}' and '{token}'"
                )));
            }
            _ => {}
        }
        prev = Some(token);
    }

    if let Token::Operator(op) = last {
        return Err(Failure::malformed(format!("expression ends with '{op}'")));
    }
    Ok(())
}

/// Deepest nesting of parentheses and unary minus the parser accepts
pub const MAX_DEPTH: usize = 256;

/// Recursive descent parser for expressions
///
/// Nesting is limited to [`MAX_DEPTH`] levels; deeper input is a
/// [`Failure::MalformedExpression`].
///
/// Grammar:
/// ```text
/// expr   ::= term (('+' | '-') term)*
/// term   ::= factor (('*' | '/') factor)*
/// factor ::= NUMBER | '(' expr ')' | '-' factor
/// ```
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    /// Creates a new parser from tokens
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    /// Parses the full token sequence into an AST
    pub fn parse(&mut self) -> EvalResult<AstNode> {
        if self.tokens.is_empty() {
            return Err(Failure::malformed("empty expression"));
        }
        let ast = self.parse_expression()?;
        match self.current() {
            None => Ok(ast),
            Some(token) => Err(Failure::malformed(format!("unexpected '{token}'"))),
        }
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn descend(&mut self) -> EvalResult<()> {
        if self.depth >= MAX_DEPTH {
            return Err(Failure::malformed(format!(
                "nesting deeper than {MAX_DEPTH} levels"
            )));
        }
        self.depth += 1;
        Ok(())
    }

    fn parse_expression(&mut self) -> EvalResult<AstNode> {
        let mut left = self.parse_term()?;

        while let Some(&Token::Operator(op @ (Operation::Add | Operation::Subtract))) =
            self.current()
        {
            self.advance();
            let right = self.parse_term()?;
            left = AstNode::binary(left, op, right);
        }

        Ok(left)
    }

    fn parse_term(&mut self) -> EvalResult<AstNode> {
        let mut left = self.parse_factor()?;

        while let Some(&Token::Operator(op @ (Operation::Multiply | Operation::Divide))) =
            self.current()
        {
            self.advance();
            let right = self.parse_factor()?;
            left = AstNode::binary(left, op, right);
        }

        Ok(left)
    }

    fn parse_factor(&mut self) -> EvalResult<AstNode> {
        let token = self
            .advance()
            .cloned()
            .ok_or_else(|| Failure::malformed("unexpected end of expression"))?;

        match token {
            Token::Number(n) => Ok(AstNode::number(n)),
            Token::Operator(Operation::Subtract) => {
                self.descend()?;
                let inner = self.parse_factor()?;
                self.depth -= 1;
                Ok(AstNode::negate(inner))
            }
            Token::LeftParen => {
                self.descend()?;
                let inner = self.parse_expression()?;
                self.depth -= 1;
                match self.advance() {
                    Some(Token::RightParen) => Ok(inner),
                    Some(t) => Err(Failure::malformed(format!("expected ')' but found '{t}'"))),
                    None => Err(Failure::MismatchedParentheses),
                }
            }
            other => Err(Failure::malformed(format!("unexpected '{other}'"))),
        }
    }
}
