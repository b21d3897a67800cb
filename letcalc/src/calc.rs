//! # Calculator
//!
//! [`Calculator`] ties a [`CalcLexer`] to a [`CalcParser`] and evaluates
//! whole expression strings. Each call to [`Calculator::evaluate`] starts
//! from a clean parser, feeds every token through it and ends the input, so
//! evaluating the same string twice gives the same [`Evaluation`].
//!
//! ## Example
//! ```rust
//! # use letcalc::{Calculator, Diagnostic};
//! let mut calc = Calculator::try_new().unwrap();
//!
//! let eval = calc.evaluate("let(b, 2, add(b, 3))").unwrap();
//! assert_eq!(eval.results, [5]);
//! assert!(eval.is_clean());
//!
//! let eval = calc.evaluate("add(5,7").unwrap();
//! assert!(eval.results.is_empty());
//! assert!(matches!(eval.diagnostics[..], [Diagnostic::UnterminatedExpression { .. }]));
//! ```
use crate::{CalcError, CalcLexer, CalcParser, Diagnostic, DiagnosticSink, NullSink};

/// The outcome of evaluating one expression string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Evaluation {
    /// One value per completed top-level expression, in input order.
    pub results: Vec<i64>,
    /// Every diagnostic raised, in the order raised.
    pub diagnostics: Vec<Diagnostic>,
}

impl Evaluation {
    /// Returns `true` if nothing was reported.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// A reusable expression evaluator.
#[derive(Debug)]
pub struct Calculator<S = NullSink> {
    lexer: CalcLexer,
    parser: CalcParser<S>,
}

impl Calculator<NullSink> {
    /// Creates a calculator whose diagnostics are only returned, never
    /// forwarded.
    ///
    /// # Errors
    /// Returns [`CalcError::Build`] if the token automaton cannot be built.
    pub fn try_new() -> Result<Self, CalcError> {
        Self::with_sink(NullSink)
    }
}

impl<S: DiagnosticSink> Calculator<S> {
    /// Creates a calculator that also hands every diagnostic to `sink` as it
    /// is raised.
    pub fn with_sink(sink: S) -> Result<Self, CalcError> {
        Ok(Self {
            lexer: CalcLexer::try_new("")?,
            parser: CalcParser::new(sink),
        })
    }

    /// Evaluates `expression`.
    ///
    /// Malformed input is never an error: it shows up as diagnostics, and
    /// as missing or substituted results.
    ///
    /// # Errors
    /// Returns [`CalcError`] only on an internal fault of the token
    /// automaton or the symbol table.
    pub fn evaluate(&mut self, expression: &str) -> Result<Evaluation, CalcError> {
        log::debug!("evaluate {expression:?}");
        self.parser.reset();
        self.lexer.set_expression(expression);
        self.lexer.reset();

        let outcome = self.run();
        self.parser.finish();
        outcome?;

        let eval = Evaluation {
            results: self.parser.take_results(),
            diagnostics: self.parser.take_diagnostics(),
        };
        log::debug!(
            "{} result(s), {} diagnostic(s)",
            eval.results.len(),
            eval.diagnostics.len()
        );
        Ok(eval)
    }

    fn run(&mut self) -> Result<(), CalcError> {
        while let Some(token) = self.lexer.try_next()? {
            self.parser.receive(token)?;
        }
        Ok(())
    }

    pub fn parser(&self) -> &CalcParser<S> {
        &self.parser
    }

    pub fn lexer(&self) -> &CalcLexer {
        &self.lexer
    }

    pub fn sink(&self) -> &S {
        self.parser.sink()
    }

    pub fn into_sink(self) -> S {
        self.parser.into_sink()
    }
}
