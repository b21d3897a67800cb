//! # Diagnostics
//!
//! Non-fatal reports raised while tokens are processed. None of them stops
//! evaluation: the offending token is dropped or a substitute value is used,
//! and the record is handed to a [`DiagnosticSink`].
//!
//! A sink is supplied when a parser is constructed. Three are provided:
//! `Vec<Diagnostic>` collects records, [`NullSink`] discards them, and
//! [`LogSink`] forwards them to the `log` facade at `warn` level.
use crate::{CalcToken, ParserState};
use smartstring::alias::String;
use thiserror::Error;

fn at(position: &Option<usize>) -> std::string::String {
    match position {
        Some(p) => format!(" at position {p}"),
        None => std::string::String::new(),
    }
}

/// A recoverable anomaly encountered during tokenizing or parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    /// The token is not legal in the current parser state; it was dropped.
    #[error("unexpected {token} while expecting {expected}; continuing to parse")]
    UnexpectedToken {
        /// The dropped token.
        token: CalcToken,
        /// What the parser state would have accepted.
        expected: &'static str,
    },

    /// A variable has no binding in scope; zero was used instead.
    #[error("undefined symbol '{name}'{}; using zero", at(.position))]
    UnresolvedSymbol {
        /// The variable name.
        name: String,
        /// Where the variable was read.
        position: Option<usize>,
    },

    /// An operation was folded with fewer than two arguments; zero was used
    /// for each missing one.
    #[error("no argument number {ordinal} for the operation{}; using zero", at(.position))]
    MissingArgument {
        /// 1-based argument slot.
        ordinal: usize,
        /// Position of the operation token.
        position: Option<usize>,
    },

    /// A closing parenthesis found no pending operation to fold.
    #[error("no operation found to fold for the closing parenthesis{}", at(.position))]
    MalformedReduction {
        /// Position of the closing parenthesis.
        position: Option<usize>,
    },

    /// The divisor was zero; a sentinel result was substituted.
    #[error("divisor of a divide operation is zero; dividend is {dividend}, using {result} as a result")]
    DivisionByZero {
        /// The dividend.
        dividend: i64,
        /// The divisor, always zero.
        divisor: i64,
        /// The substituted result.
        result: i64,
    },

    /// Input ended before the expression was complete.
    #[error("parse of input has ended in state {state}")]
    UnterminatedExpression {
        /// The state the parser was left in.
        state: ParserState,
    },
}

/// Receives diagnostics as they are raised.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: &Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: &Diagnostic) {
        self.push(diagnostic.clone());
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn report(&mut self, diagnostic: &Diagnostic) {
        (**self).report(diagnostic);
    }
}

/// Discards every diagnostic.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&mut self, _diagnostic: &Diagnostic) {}
}

/// Forwards every diagnostic to `log::warn!`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&mut self, diagnostic: &Diagnostic) {
        log::warn!("{diagnostic}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TokenID;

    #[test]
    fn messages_include_positions_when_known() {
        let d = Diagnostic::UnresolvedSymbol {
            name: "x".into(),
            position: Some(4),
        };
        assert_eq!(d.to_string(), "undefined symbol 'x' at position 4; using zero");

        let d = Diagnostic::MissingArgument {
            ordinal: 2,
            position: None,
        };
        assert_eq!(
            d.to_string(),
            "no argument number 2 for the operation; using zero"
        );
    }

    #[test]
    fn unexpected_token_message() {
        let d = Diagnostic::UnexpectedToken {
            token: CalcToken::new(TokenID::Comma, ",", 3),
            expected: "a closing parenthesis, ')'",
        };
        assert_eq!(
            d.to_string(),
            "unexpected comma token ',' at position 3 while expecting a closing parenthesis, ')'; continuing to parse"
        );
    }

    #[test]
    fn unterminated_names_the_state() {
        let d = Diagnostic::UnterminatedExpression {
            state: ParserState::ExpectingClose,
        };
        assert!(d.to_string().contains("expecting_close"));
    }

    #[test]
    fn vec_sink_collects_in_order() {
        let mut sink: Vec<Diagnostic> = Vec::new();
        let first = Diagnostic::MalformedReduction { position: Some(1) };
        let second = Diagnostic::DivisionByZero {
            dividend: 0,
            divisor: 0,
            result: 1,
        };
        sink.report(&first);
        (&mut sink).report(&second);
        assert_eq!(sink, [first, second]);
    }

    #[test]
    fn log_and_null_sinks_accept_anything() {
        let _ = env_logger::builder().is_test(true).try_init();
        let d = Diagnostic::MalformedReduction { position: None };
        LogSink.report(&d);
        NullSink.report(&d);
    }
}
