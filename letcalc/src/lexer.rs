//! # Calculator Lexer
//!
//! [`CalcLexer`] splits an expression into [`CalcToken`]s with a dense DFA
//! compiled from an ordered list of patterns. At each cursor position the
//! automaton runs an anchored, leftmost-first search, so when two patterns
//! match the one listed first wins:
//!
//! | rule         | pattern                   | token                          |
//! |--------------|---------------------------|--------------------------------|
//! | `Whitespace` | `\s+`                     | skipped                        |
//! | `Value`      | `[+-]?[0-9]+`             | `Value`                        |
//! | `Identifier` | `[a-zA-Z_][a-zA-Z0-9_]*`  | keyword kind, else `Variable`  |
//! | `Close`      | `\)`                      | `Close`                        |
//! | `Comma`      | `,`                       | `Comma`                        |
//! | `Open`       | `\(`                      | `Open`                         |
//! | `Unknown`    | `\S+`                     | `Unknown`                      |
//!
//! Every non-whitespace character is therefore covered by some token, and
//! the lexer never fails on input content. A literal that does not fit in an
//! `i64` is emitted as an `Unknown` token.
//!
//! ## Example
//! ```rust
//! # use letcalc::{CalcLexer, TokenID};
//! let mut lexer = CalcLexer::try_new("add(-2, x)").unwrap();
//! let ids: Vec<_> = lexer.by_ref().map(|t| t.unwrap().token_id).collect();
//! assert_eq!(
//!     ids,
//!     [TokenID::Add, TokenID::Open, TokenID::Value, TokenID::Comma, TokenID::Variable, TokenID::Close]
//! );
//! assert_eq!(lexer.stats().tokens, 6);
//! ```
use crate::{CalcError, CalcToken, TokenID};
use regex_automata::{
    Anchored, Input,
    dfa::{Automaton, StartKind, dense},
};

/// The lexical rules, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Rule {
    Whitespace = 0,
    Value = 1,
    Identifier = 2,
    Close = 3,
    Comma = 4,
    Open = 5,
    Unknown = 6,
}

impl Rule {
    pub const COUNT: usize = 7;

    const ALL: [Rule; Rule::COUNT] = [
        Rule::Whitespace,
        Rule::Value,
        Rule::Identifier,
        Rule::Close,
        Rule::Comma,
        Rule::Open,
        Rule::Unknown,
    ];

    /// Pattern source of each rule, indexed by `Rule as usize`.
    pub const PATTERNS: [&str; Rule::COUNT] = [
        r"\s+",
        r"[+-]?[0-9]+",
        r"[a-zA-Z_][a-zA-Z0-9_]*",
        r"\)",
        r",",
        r"\(",
        r"\S+",
    ];

    fn from_pattern(pattern: usize) -> Option<Rule> {
        Rule::ALL.get(pattern).copied()
    }
}

impl From<Rule> for usize {
    fn from(rule: Rule) -> Self {
        rule as usize
    }
}

/// Counters collected while scanning.
#[derive(Debug, Clone, Default)]
pub struct LexerStats {
    /// Bytes consumed, whitespace included.
    pub chars: usize,
    /// Successful automaton matches, whitespace included.
    pub matches: usize,
    /// Tokens handed out.
    pub tokens: usize,
}

/// A tokenizer over a single expression string.
///
/// The automaton is built once in [`CalcLexer::try_new`]; the input can be
/// swapped afterwards with [`CalcLexer::set_expression`] without rebuilding.
#[derive(Debug, Clone)]
pub struct CalcLexer {
    dfa: dense::DFA<Vec<u32>>,
    expression: std::string::String,
    pos: usize,
    stats: LexerStats,
}

impl CalcLexer {
    /// Builds the token automaton and positions the lexer at the start of
    /// `expression`.
    ///
    /// # Errors
    /// Returns [`CalcError::Build`] if the automaton cannot be compiled.
    pub fn try_new(expression: impl AsRef<str>) -> Result<Self, CalcError> {
        let dfa = dense::Builder::new()
            .configure(dense::Config::new().start_kind(StartKind::Anchored))
            .build_many(&Rule::PATTERNS)?;
        Ok(Self {
            dfa,
            expression: expression.as_ref().to_owned(),
            pos: 0,
            stats: LexerStats::default(),
        })
    }

    /// Replaces the input and rewinds to its start. Statistics are kept.
    pub fn set_expression(&mut self, expression: impl AsRef<str>) {
        self.expression.clear();
        self.expression.push_str(expression.as_ref());
        self.pos = 0;
    }

    /// Rewinds to the start of the current input and clears statistics.
    pub fn reset(&mut self) {
        self.pos = 0;
        self.stats = LexerStats::default();
    }

    /// The text being scanned.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Byte offset of the next unread character.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn stats(&self) -> LexerStats {
        self.stats.clone()
    }

    /// Returns the next token, or `Ok(None)` once the input is exhausted.
    ///
    /// # Errors
    /// Returns [`CalcError::Search`] if the automaton gives up, or
    /// [`CalcError::NoMatch`] if no rule matches at the cursor. Neither can
    /// happen for valid UTF-8 input with the built-in rules.
    pub fn try_next(&mut self) -> Result<Option<CalcToken>, CalcError> {
        loop {
            if self.pos >= self.expression.len() {
                return Ok(None);
            }
            let start = self.pos;
            let input = Input::new(&self.expression)
                .range(start..)
                .anchored(Anchored::Yes);
            let Some(m) = self.dfa.try_search_fwd(&input)? else {
                return Err(CalcError::NoMatch { position: start });
            };
            let end = m.offset();
            let Some(rule) = Rule::from_pattern(m.pattern().as_usize()) else {
                return Err(CalcError::NoMatch { position: start });
            };
            if end <= start {
                return Err(CalcError::NoMatch { position: start });
            }

            self.pos = end;
            self.stats.matches += 1;
            self.stats.chars += end - start;

            let text = &self.expression[start..end];
            log::trace!("MATCHED: Rule: {rule:?}, Text: {text:?}, Position: {start}");

            let token = match rule {
                Rule::Whitespace => continue,
                Rule::Value => match text.parse::<i64>() {
                    Ok(n) => CalcToken::number(n, text, start),
                    Err(_) => CalcToken::new(TokenID::Unknown, text, start),
                },
                Rule::Identifier => match TokenID::keyword(text) {
                    Some(id) => CalcToken::new(id, text, start),
                    None => CalcToken::new(TokenID::Variable, text, start),
                },
                Rule::Close => CalcToken::new(TokenID::Close, text, start),
                Rule::Comma => CalcToken::new(TokenID::Comma, text, start),
                Rule::Open => CalcToken::new(TokenID::Open, text, start),
                Rule::Unknown => CalcToken::new(TokenID::Unknown, text, start),
            };
            self.stats.tokens += 1;
            return Ok(Some(token));
        }
    }
}

impl Iterator for CalcLexer {
    type Item = Result<CalcToken, CalcError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.try_next().transpose()
    }
}
