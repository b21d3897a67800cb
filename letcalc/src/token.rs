//! # Calculator Tokens
//!
//! This module defines the token kinds and the concrete token type shared by
//! the lexer and the parser. It provides:
//!
//! - [`TokenID`]: the token kind (keyword, punctuation, literal, variable or
//!   unknown text),
//! - [`TokenValue`]: the numeric payload carried by literal and folded tokens,
//! - [`CalcToken`]: a token that pairs a [`TokenID`] and a [`TokenValue`] with
//!   the matched source text and its byte offset.
//!
//! Tokens read from input always carry a position. Tokens synthesized by the
//! parser when an operation is folded carry none.
use smartstring::alias::String;
use std::fmt;

/// The kind of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokenID {
    /// `add`
    Add = 0,
    /// `sub`
    Subtract = 1,
    /// `mult`
    Multiply = 2,
    /// `div`
    Divide = 3,
    /// `let`
    Let = 4,
    /// `(`
    Open = 5,
    /// `)`
    Close = 6,
    /// `,`
    Comma = 7,
    /// Optionally signed integer literal, or a folded result.
    Value = 8,
    /// Identifier that is not a keyword.
    Variable = 9,
    /// Any other run of non-whitespace characters.
    Unknown = 10,
}

impl TokenID {
    /// The total number of token kinds.
    pub const COUNT: usize = 11;

    /// Human-readable names of each kind, in declaration order.
    pub const STRS: &[&str] = &[
        "add", "sub", "mult", "div", "let", "open", "close", "comma", "value", "variable",
        "unknown",
    ];

    /// Returns the keyword kind spelled by `word`, if any.
    ///
    /// # Example
    /// ```rust
    /// # use letcalc::TokenID;
    /// assert_eq!(TokenID::keyword("mult"), Some(TokenID::Multiply));
    /// assert_eq!(TokenID::keyword("multiply"), None);
    /// ```
    pub fn keyword(word: &str) -> Option<TokenID> {
        match word {
            "add" => Some(TokenID::Add),
            "div" => Some(TokenID::Divide),
            "let" => Some(TokenID::Let),
            "mult" => Some(TokenID::Multiply),
            "sub" => Some(TokenID::Subtract),
            _ => None,
        }
    }

    /// Returns `true` for `add`, `sub`, `mult`, `div` and `let`.
    pub const fn is_operation(self) -> bool {
        matches!(
            self,
            TokenID::Add | TokenID::Subtract | TokenID::Multiply | TokenID::Divide | TokenID::Let
        )
    }
}

impl From<TokenID> for usize {
    fn from(token_id: TokenID) -> Self {
        token_id as usize
    }
}

impl fmt::Display for TokenID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(TokenID::STRS[usize::from(*self)])
    }
}

/// The payload carried by a lexical token.
///
/// Only literal values and folded results carry a number. Keywords,
/// punctuation, variables and unknown text carry [`TokenValue::None`]; their
/// text lives in [`CalcToken::expression`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenValue {
    /// No associated data.
    #[default]
    None,

    /// Integer literal or folded result.
    Number(i64),
}

/// A concrete lexical token for the calculator.
///
/// # Fields
///
/// - [`token_id`](#structfield.token_id): the token’s kind,
/// - [`value`](#structfield.value): numeric payload, if any,
/// - [`expression`](#structfield.expression): the matched source text (for a
///   folded result, its decimal rendering),
/// - [`position`](#structfield.position): byte offset of the first character
///   in the source, or `None` for a token synthesized by the parser.
///
/// # Example
/// ```rust
/// # use letcalc::{CalcToken, TokenID, TokenValue};
/// let tok = CalcToken::number(-12, "-12", 4);
/// assert_eq!(tok.token_id, TokenID::Value);
/// assert_eq!(tok.value, TokenValue::Number(-12));
/// assert_eq!(tok.position, Some(4));
///
/// let folded = CalcToken::synthesized(7);
/// assert!(folded.is_synthesized());
/// assert_eq!(folded.expression.as_str(), "7");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalcToken {
    /// The token’s kind.
    pub token_id: TokenID,
    /// The associated value for the token, if applicable.
    pub value: TokenValue,
    /// The text the token was read from.
    pub expression: String,
    /// Byte offset in the source, `None` when synthesized.
    pub position: Option<usize>,
}

impl CalcToken {
    /// Creates a payload-free token read from the source at `position`.
    pub fn new(token_id: TokenID, expression: impl AsRef<str>, position: usize) -> Self {
        Self {
            token_id,
            value: TokenValue::None,
            expression: String::from(expression.as_ref()),
            position: Some(position),
        }
    }

    /// Creates an integer literal token read from the source at `position`.
    pub fn number(value: i64, expression: impl AsRef<str>, position: usize) -> Self {
        Self {
            token_id: TokenID::Value,
            value: TokenValue::Number(value),
            expression: String::from(expression.as_ref()),
            position: Some(position),
        }
    }

    /// Creates the value token that stands in for a folded operation.
    pub fn synthesized(value: i64) -> Self {
        Self {
            token_id: TokenID::Value,
            value: TokenValue::Number(value),
            expression: value.to_string().into(),
            position: None,
        }
    }

    /// Returns `true` if the token was produced by a fold rather than read.
    pub fn is_synthesized(&self) -> bool {
        self.position.is_none()
    }

    /// Returns the numeric payload, if any.
    pub fn number_value(&self) -> Option<i64> {
        match self.value {
            TokenValue::Number(n) => Some(n),
            TokenValue::None => None,
        }
    }
}

impl fmt::Display for CalcToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(position) => write!(
                f,
                "{} token '{}' at position {}",
                self.token_id, self.expression, position
            ),
            None => write!(f, "folded {} token '{}'", self.token_id, self.expression),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_are_recognized_exactly() {
        assert_eq!(TokenID::keyword("add"), Some(TokenID::Add));
        assert_eq!(TokenID::keyword("sub"), Some(TokenID::Subtract));
        assert_eq!(TokenID::keyword("div"), Some(TokenID::Divide));
        assert_eq!(TokenID::keyword("let"), Some(TokenID::Let));
        assert_eq!(TokenID::keyword("Add"), None);
        assert_eq!(TokenID::keyword("adder"), None);
    }

    #[test]
    fn operation_kinds() {
        let ops: Vec<_> = [
            TokenID::Add,
            TokenID::Subtract,
            TokenID::Multiply,
            TokenID::Divide,
            TokenID::Let,
            TokenID::Open,
            TokenID::Close,
            TokenID::Comma,
            TokenID::Value,
            TokenID::Variable,
            TokenID::Unknown,
        ]
        .into_iter()
        .filter(|t| t.is_operation())
        .collect();
        assert_eq!(ops.len(), 5);
    }

    #[test]
    fn names_cover_every_kind() {
        assert_eq!(TokenID::STRS.len(), TokenID::COUNT);
        assert_eq!(TokenID::Unknown.to_string(), "unknown");
        assert_eq!(TokenID::Multiply.to_string(), "mult");
    }

    #[test]
    fn token_value_number_extraction_with_let_else() {
        let tok = CalcToken::number(42, "42", 0);

        let TokenValue::Number(n) = tok.value else {
            panic!("Expected a numeric token");
        };

        assert_eq!(n, 42);
        assert_eq!(tok.number_value(), Some(42));
    }

    #[test]
    fn payload_free_tokens_have_no_number() {
        let tok = CalcToken::new(TokenID::Variable, "abc", 3);
        assert_eq!(tok.value, TokenValue::None);
        assert_eq!(tok.number_value(), None);
        assert!(!tok.is_synthesized());
    }

    #[test]
    fn synthesized_tokens_have_no_position() {
        let tok = CalcToken::synthesized(-9);
        assert_eq!(tok.position, None);
        assert_eq!(tok.token_id, TokenID::Value);
        assert_eq!(tok.expression.as_str(), "-9");
        assert!(tok.is_synthesized());
    }

    #[test]
    fn display_mentions_text_and_position() {
        let tok = CalcToken::new(TokenID::Unknown, "%^&*(", 0);
        assert_eq!(tok.to_string(), "unknown token '%^&*(' at position 0");

        let folded = CalcToken::synthesized(5);
        assert_eq!(folded.to_string(), "folded value token '5'");
    }

    #[test]
    fn calc_token_is_cloneable_and_debuggable() {
        let t1 = CalcToken::number(-1, "-1", 10);
        let t2 = t1.clone();
        assert_eq!(t1, t2);

        let dbg_out = format!("{t1:?}");
        assert!(dbg_out.contains("CalcToken"));
    }
}
