//! Lexical stages: whitespace stripping, character validation, percent
//! desugaring and tokenizing.

use crate::error::{EvalResult, Failure};
use crate::operation::Operation;

/// Characters an expression may contain once whitespace is removed
pub const ALLOWED_CHARS: &str = "0123456789.+-*/()%";

/// Token types from lexical analysis
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Numeric literal
    Number(f64),
    /// Binary operator (a `-` may later act as unary minus)
    Operator(Operation),
    /// Left parenthesis
    LeftParen,
    /// Right parenthesis
    RightParen,
}

impl Token {
    /// Returns true if this token can end an operand (number or `)`)
    #[must_use]
    pub const fn ends_operand(&self) -> bool {
        matches!(self, Self::Number(_) | Self::RightParen)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Operator(op) => write!(f, "{op}"),
            Self::LeftParen => f.write_str("("),
            Self::RightParen => f.write_str(")"),
        }
    }
}

/// Removes every whitespace character
#[must_use]
pub fn normalize(input: &str) -> String {
    input.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Checks that every character belongs to [`ALLOWED_CHARS`]
pub fn validate_charset(input: &str) -> EvalResult<()> {
    match input
        .chars()
        .enumerate()
        .find(|(_, c)| !ALLOWED_CHARS.contains(*c))
    {
        Some((position, character)) => Err(Failure::InvalidCharacter {
            character,
            position,
        }),
        None => Ok(()),
    }
}

const fn is_literal_char(ch: char) -> bool {
    ch.is_ascii_digit() || ch == '.'
}

/// Rewrites every `<number>%` as `(<number>/100)`.
///
/// Expects whitespace-free, charset-validated input. A `%` that does not
/// directly follow a numeric literal is rejected.
pub fn desugar_percent(input: &str) -> EvalResult<String> {
    let mut out = String::with_capacity(input.len() + 8);
    for ch in input.chars() {
        if ch != '%' {
            out.push(ch);
            continue;
        }
        // input is ASCII after validation, so byte offsets are char offsets
        let start = out
            .rfind(|c: char| !is_literal_char(c))
            .map_or(0, |i| i + 1);
        if start == out.len() {
            return Err(Failure::malformed("'%' must follow a number"));
        }
        let literal = out.split_off(start);
        out.push('(');
        out.push_str(&literal);
        out.push_str("/100)");
    }
    Ok(out)
}

/// Tokenizer for converting whitespace-free expression text to tokens
#[derive(Debug)]
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    /// Creates a new tokenizer for the given input
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Tokenizes the entire input
    pub fn tokenize(&mut self) -> EvalResult<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Returns the next token, or None at end of input
    pub fn next_token(&mut self) -> EvalResult<Option<Token>> {
        let Some(ch) = self.current_char() else {
            return Ok(None);
        };

        if is_literal_char(ch) {
            return self.read_number().map(Some);
        }

        let token = match ch {
            '(' => Token::LeftParen,
            ')' => Token::RightParen,
            _ => match Operation::from_char(ch) {
                Some(op) => Token::Operator(op),
                None => {
                    return Err(Failure::InvalidCharacter {
                        character: ch,
                        position: self.input[..self.pos].chars().count(),
                    });
                }
            },
        };
        self.advance();
        Ok(Some(token))
    }

    fn current_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.pos += ch.len_utf8();
        }
    }

    /// Consumes a maximal run of digits and dots.
    ///
    /// Accepted shapes: `12`, `1.5`, `.5`, `5.`. More than one dot, or a
    /// run without any digit, is a malformed number.
    fn read_number(&mut self) -> EvalResult<Token> {
        let start = self.pos;
        while self.current_char().is_some_and(is_literal_char) {
            self.advance();
        }

        let literal = &self.input[start..self.pos];
        let dots = literal.matches('.').count();
        if dots > 1 || !literal.bytes().any(|b| b.is_ascii_digit()) {
            return Err(Failure::malformed_number(literal));
        }

        literal
            .parse::<f64>()
            .map(Token::Number)
            .map_err(|_| Failure::malformed_number(literal))
    }
}

/// Runs the lexical stages in order: normalize, validate, desugar, tokenize
pub fn lex(input: &str) -> EvalResult<Vec<Token>> {
    let normalized = normalize(input);
    validate_charset(&normalized)?;
    let desugared = desugar_percent(&normalized)?;
    Tokenizer::new(&desugared).tokenize()
}
