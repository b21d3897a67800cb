//! # letcalc
//!
//! An evaluator for a small prefix-notation integer language:
//!
//! ```text
//! expr    := INTEGER | IDENTIFIER | opcall | letcall
//! opcall  := ("add" | "sub" | "mult" | "div") "(" expr "," expr ")"
//! letcall := "let" "(" IDENTIFIER "," expr "," expr ")"
//! ```
//!
//! `let(name, value, body)` evaluates `body` with `name` bound to `value`;
//! an inner `let` of the same name shadows the outer one until it is folded.
//!
//! ## Overview
//!
//! - [`lexer`]: a DFA-driven tokenizer producing [`CalcToken`]s that carry
//!   their byte offset.
//! - [`parser`]: a token-at-a-time state machine with a stack of pending
//!   frames; it folds each operation as its closing parenthesis arrives.
//! - [`symtab`]: the scoped binding stack ([`SymTab`]) used by `let`.
//! - [`oper`]: the operation set ([`Oper`]), wrapping `i64` arithmetic with
//!   sentinel results for division by zero.
//! - [`diag`]: non-fatal [`Diagnostic`]s and the [`DiagnosticSink`]s that
//!   receive them.
//! - [`calc`]: the [`Calculator`] front door.
//!
//! Malformed input never aborts evaluation. Every call returns the values of
//! the expressions that could be completed plus a record of what went wrong.
//!
//! ## Example
//!
//! ```rust
//! use letcalc::{Calculator, Diagnostic};
//!
//! let mut calc = Calculator::try_new().unwrap();
//! let eval = calc.evaluate("let(b,2,add(b,let(b,2,add(1,1))))").unwrap();
//! assert_eq!(eval.results, [4]);
//!
//! let eval = calc.evaluate("div(8,sub(1,1))").unwrap();
//! assert_eq!(eval.results, [i64::MAX]);
//! assert!(matches!(eval.diagnostics[..], [Diagnostic::DivisionByZero { .. }]));
//! ```
pub mod calc;
pub mod diag;
pub mod error;
pub mod lexer;
pub mod oper;
pub mod parser;
pub mod symtab;
pub mod token;

pub use calc::{Calculator, Evaluation};
pub use diag::{Diagnostic, DiagnosticSink, LogSink, NullSink};
pub use error::CalcError;
pub use lexer::{CalcLexer, LexerStats};
pub use oper::Oper;
pub use parser::{CalcParser, ParserAction, ParserState, ParserStats, PendingFrame, lookup};
pub use symtab::{SymTab, SymTabError};
pub use token::{CalcToken, TokenID, TokenValue};
