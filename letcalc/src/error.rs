//! # Calculator Error Type
//!
//! This module defines [`CalcError`], the error enum for *faults* of the
//! calculator pipeline. Malformed input is never a fault: it is reported
//! through [`Diagnostic`](crate::Diagnostic) records and evaluation carries on.
//! A `CalcError` aggregates failures from:
//!
//! - **Automaton construction** (building the token DFA),
//! - **Automaton search** (an anchored scan that gives up),
//! - **Symbol-table operations** (popping an empty scope stack).
//!
//! Conversions from underlying error types are derived with `#[from]`, enabling
//! ergonomic propagation via the `?` operator.
use crate::SymTabError;
use regex_automata::{MatchError, dfa::dense::BuildError};
use thiserror::Error;

/// Represents all possible faults that can occur within the calculator.
///
/// # Examples
/// Wrapping a symbol-table error:
/// ```rust
/// # use letcalc::{CalcError, SymTabError};
/// let underlying = SymTabError::Underflow;
/// let err: CalcError = underlying.into();
/// assert!(matches!(err, CalcError::SymTab(_)));
/// ```
#[derive(Debug, Error)]
pub enum CalcError {
    /// The token automaton could not be built from its patterns.
    #[error("unable to build token automaton: {0}")]
    Build(#[from] BuildError),

    /// The token automaton stopped before finishing a match.
    #[error("token automaton search failed: {0}")]
    Search(#[from] MatchError),

    /// No token pattern matched at the given byte offset.
    #[error("no token matches at position {position}")]
    NoMatch {
        /// Byte offset of the scan cursor.
        position: usize,
    },

    /// A symbol-table operation failed.
    #[error("symtab error {0:?}")]
    SymTab(#[from] SymTabError),
}
