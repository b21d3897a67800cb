//! # Calculator Parser
//!
//! [`CalcParser`] consumes [`CalcToken`]s one at a time and drives a small
//! state machine over a stack of [`PendingFrame`]s. Every value, variable or
//! operation token accepted is pushed as a frame that remembers the state it
//! arrived in. A closing parenthesis in [`ParserState::ExpectingClose`] folds
//! the innermost pending operation with its two arguments into a single
//! value, which is fed back in as if it had been read from the input.
//!
//! The legal moves form a pure table, [`lookup`], keyed on the current state
//! and the incoming token kind. A token with no legal move is reported as a
//! [`Diagnostic::UnexpectedToken`] and otherwise ignored.
//!
//! `let(name, value, body)` binds `name` on the parser's [`SymTab`] as soon
//! as `value` is known, so `body` sees it. Folding the `let` removes that one
//! binding again.
//!
//! ## Example
//! ```rust
//! # use letcalc::{CalcLexer, CalcParser, Diagnostic, ParserState};
//! let mut parser = CalcParser::new(Vec::<Diagnostic>::new());
//! for token in CalcLexer::try_new("let(x, 4, mult(x, x))").unwrap() {
//!     parser.receive(token.unwrap()).unwrap();
//! }
//! parser.finish();
//! assert_eq!(parser.results(), [16]);
//! assert_eq!(parser.state(), ParserState::ExpectingOperation);
//! assert!(parser.symtab().is_empty());
//! assert!(parser.sink().is_empty());
//! ```
use crate::{
    CalcError, CalcToken, Diagnostic, DiagnosticSink, NullSink, Oper, SymTab, TokenID, TokenValue,
};
use std::fmt;
use std::mem;

/// The position of the parser within an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum ParserState {
    /// Between top-level expressions.
    #[default]
    ExpectingOperation = 0,
    ExpectingOpen = 1,
    ExpectingFirstArgument = 2,
    ExpectingLastComma = 3,
    ExpectingLastArgument = 4,
    ExpectingClose = 5,
    ExpectingOpenAfterLet = 6,
    /// Waiting for the name a `let` binds.
    ExpectingFirstArgumentAfterLet = 7,
    ExpectingCommaAfterLet = 8,
    /// Waiting for the value a `let` binds.
    ExpectingSecondArgumentAfterLet = 9,
}

impl ParserState {
    pub const COUNT: usize = 10;

    pub const STRS: &[&str] = &[
        "expecting_operation",
        "expecting_open",
        "expecting_first_argument",
        "expecting_last_comma",
        "expecting_last_argument",
        "expecting_close",
        "expecting_open_after_let",
        "expecting_first_argument_after_let",
        "expecting_comma_after_let",
        "expecting_second_argument_after_let",
    ];

    /// Describes the tokens this state accepts, for diagnostics.
    pub const fn expected(self) -> &'static str {
        match self {
            ParserState::ExpectingOperation => "an add, div, let, mult or sub operation",
            ParserState::ExpectingOpen => "an opening parenthesis, '(', after an arithmetic operation",
            ParserState::ExpectingFirstArgument => {
                "an operation, integer value or defined variable as a first argument"
            }
            ParserState::ExpectingLastComma => "a ',' before the final argument of an operation",
            ParserState::ExpectingLastArgument => {
                "an operation, integer value or defined variable as a last argument"
            }
            ParserState::ExpectingClose => "a closing parenthesis, ')'",
            ParserState::ExpectingOpenAfterLet => "an opening parenthesis, '(', after a 'let'",
            ParserState::ExpectingFirstArgumentAfterLet => "a variable to be defined by a 'let'",
            ParserState::ExpectingCommaAfterLet => "a ',' before the second argument of a 'let'",
            ParserState::ExpectingSecondArgumentAfterLet => {
                "an operation, integer value or defined variable as the value of a 'let'"
            }
        }
    }
}

impl From<ParserState> for usize {
    fn from(state: ParserState) -> Self {
        state as usize
    }
}

impl fmt::Display for ParserState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(ParserState::STRS[usize::from(*self)])
    }
}

/// What the parser does with a token in a given state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserAction {
    /// The token is illegal here.
    Error,
    /// Consume a punctuation token and move to the state.
    Shift(ParserState),
    /// Push a frame for the token and move to the state.
    Push(ParserState),
    /// Fold the innermost pending operation.
    Reduce,
}

/// The transition table.
///
/// # Example
/// ```rust
/// # use letcalc::{lookup, ParserAction, ParserState, TokenID};
/// assert_eq!(
///     lookup(ParserState::ExpectingOperation, TokenID::Let),
///     ParserAction::Push(ParserState::ExpectingOpenAfterLet)
/// );
/// assert_eq!(lookup(ParserState::ExpectingOperation, TokenID::Value), ParserAction::Error);
/// ```
pub const fn lookup(state: ParserState, token_id: TokenID) -> ParserAction {
    use ParserAction::*;
    use ParserState::*;
    match (state, token_id) {
        (ExpectingOpen, TokenID::Open) => Shift(ExpectingFirstArgument),
        (ExpectingOpenAfterLet, TokenID::Open) => Shift(ExpectingFirstArgumentAfterLet),
        (ExpectingLastComma, TokenID::Comma) => Shift(ExpectingLastArgument),
        (ExpectingCommaAfterLet, TokenID::Comma) => Shift(ExpectingSecondArgumentAfterLet),
        (ExpectingClose, TokenID::Close) => Reduce,

        (
            ExpectingOperation
            | ExpectingFirstArgument
            | ExpectingLastArgument
            | ExpectingSecondArgumentAfterLet,
            TokenID::Add | TokenID::Subtract | TokenID::Multiply | TokenID::Divide,
        ) => Push(ExpectingOpen),
        (
            ExpectingOperation
            | ExpectingFirstArgument
            | ExpectingLastArgument
            | ExpectingSecondArgumentAfterLet,
            TokenID::Let,
        ) => Push(ExpectingOpenAfterLet),

        (ExpectingFirstArgument, TokenID::Value | TokenID::Variable) => Push(ExpectingLastComma),
        (ExpectingLastArgument, TokenID::Value | TokenID::Variable) => Push(ExpectingClose),
        (ExpectingSecondArgumentAfterLet, TokenID::Value | TokenID::Variable) => {
            Push(ExpectingLastComma)
        }
        (ExpectingFirstArgumentAfterLet, TokenID::Variable) => Push(ExpectingCommaAfterLet),

        _ => Error,
    }
}

/// An entry on the pending stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFrame {
    /// The accepted token.
    pub token: CalcToken,
    /// The state the parser was in when the token was accepted.
    pub state: ParserState,
    /// The operation, or `None` for an argument frame.
    pub oper: Option<Oper>,
}

#[derive(Debug, Clone, Default)]
pub struct ParserStats {
    pub tokens: usize,
    pub shifts: usize,
    pub pushes: usize,
    pub reductions: usize,
    pub rejects: usize,
}

/// The calculator's parsing and evaluation engine.
///
/// Diagnostics are kept in order for [`CalcParser::take_diagnostics`] and
/// are also passed to the sink `S` the moment they are raised.
#[derive(Debug)]
pub struct CalcParser<S = NullSink> {
    state: ParserState,
    pending: Vec<PendingFrame>,
    symtab: SymTab,
    results: Vec<i64>,
    diagnostics: Vec<Diagnostic>,
    sink: S,
    stats: ParserStats,
}

impl<S: DiagnosticSink> CalcParser<S> {
    pub fn new(sink: S) -> Self {
        Self {
            state: ParserState::default(),
            pending: Vec::new(),
            symtab: SymTab::new(),
            results: Vec::new(),
            diagnostics: Vec::new(),
            sink,
            stats: ParserStats::default(),
        }
    }

    pub fn state(&self) -> ParserState {
        self.state
    }

    pub fn pending(&self) -> &[PendingFrame] {
        &self.pending
    }

    pub fn symtab(&self) -> &SymTab {
        &self.symtab
    }

    /// Values of the top-level expressions folded so far.
    pub fn results(&self) -> &[i64] {
        &self.results
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn stats(&self) -> ParserStats {
        self.stats.clone()
    }

    pub fn take_results(&mut self) -> Vec<i64> {
        mem::take(&mut self.results)
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        mem::take(&mut self.diagnostics)
    }

    /// Returns the parser to its initial state and drops everything collected.
    /// The sink is kept.
    pub fn reset(&mut self) {
        self.state = ParserState::default();
        self.pending.clear();
        self.symtab.clear();
        self.results.clear();
        self.diagnostics.clear();
        self.stats = ParserStats::default();
    }

    /// Processes one token.
    ///
    /// # Errors
    /// Returns [`CalcError::SymTab`] if a `let` fold finds no binding to
    /// remove. Malformed input never produces an error.
    pub fn receive(&mut self, token: CalcToken) -> Result<(), CalcError> {
        self.stats.tokens += 1;
        log::trace!("RECEIVED: {token} in state {}", self.state);

        match lookup(self.state, token.token_id) {
            ParserAction::Error => {
                self.stats.rejects += 1;
                let expected = self.state.expected();
                self.report(Diagnostic::UnexpectedToken { token, expected });
            }
            ParserAction::Shift(next) => {
                log::trace!("Shift {} -> {}", self.state, next);
                self.stats.shifts += 1;
                self.state = next;
            }
            ParserAction::Push(next) => self.push(token, next),
            ParserAction::Reduce => self.fold(token.position)?,
        }

        if log::log_enabled!(log::Level::Trace) {
            self.dump_state();
        }
        Ok(())
    }

    /// Ends the current input.
    ///
    /// Reports [`Diagnostic::UnterminatedExpression`] unless the parser is
    /// between expressions, then clears the state, the pending stack and the
    /// symbol table. Results and diagnostics are kept.
    pub fn finish(&mut self) {
        if self.state != ParserState::ExpectingOperation {
            self.report(Diagnostic::UnterminatedExpression { state: self.state });
        }
        self.state = ParserState::ExpectingOperation;
        self.pending.clear();
        self.symtab.clear();
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        log::trace!("DIAGNOSTIC: {diagnostic}");
        self.sink.report(&diagnostic);
        self.diagnostics.push(diagnostic);
    }

    fn push(&mut self, mut token: CalcToken, next: ParserState) {
        let oper = Oper::from_token_id(token.token_id);
        if oper.is_none() && self.state == ParserState::ExpectingSecondArgumentAfterLet {
            self.bind(&mut token);
        }
        log::trace!("Push {} -> {}", self.state, next);
        self.stats.pushes += 1;
        self.pending.push(PendingFrame {
            token,
            state: self.state,
            oper,
        });
        self.state = next;
    }

    /// Binds the name on top of the stack to the value of `token`.
    ///
    /// The resolved value is stored back into `token`, so a variable that
    /// failed to resolve is reported once and folds as zero.
    fn bind(&mut self, token: &mut CalcToken) {
        let name = match self.pending.last() {
            Some(frame) if frame.state == ParserState::ExpectingFirstArgumentAfterLet => {
                frame.token.expression.clone()
            }
            _ => {
                log::debug!("no name to bind {token} to");
                return;
            }
        };
        let value = self.resolve(token);
        token.value = TokenValue::Number(value);
        log::debug!("bind {name} = {value}");
        self.symtab.push(name, value);
    }

    fn resolve(&mut self, token: &CalcToken) -> i64 {
        if let Some(n) = token.number_value() {
            return n;
        }
        match self.symtab.lookup(&token.expression) {
            Some(v) => v,
            None => {
                self.report(Diagnostic::UnresolvedSymbol {
                    name: token.expression.clone(),
                    position: token.position,
                });
                0
            }
        }
    }

    fn fold(&mut self, position: Option<usize>) -> Result<(), CalcError> {
        let Some((at, oper)) = self
            .pending
            .iter()
            .enumerate()
            .rev()
            .find_map(|(i, frame)| frame.oper.map(|oper| (i, oper)))
        else {
            self.pending.clear();
            self.report(Diagnostic::MalformedReduction { position });
            return Ok(());
        };

        let args = self.pending.split_off(at + 1);
        let Some(frame) = self.pending.pop() else {
            unreachable!("operation frame vanished from the pending stack");
        };

        // Two most recently pushed arguments, resolved innermost first.
        let mut kept = args.iter().rev().take(2);
        let second = kept.next();
        let first = kept.next();
        let (first, second) = match (first, second) {
            (Some(first), Some(second)) => {
                let second = self.resolve(&second.token);
                (self.resolve(&first.token), second)
            }
            (None, Some(only)) => {
                let first = self.resolve(&only.token);
                self.missing(2, frame.token.position);
                (first, 0)
            }
            _ => {
                self.missing(1, frame.token.position);
                self.missing(2, frame.token.position);
                (0, 0)
            }
        };

        let mut raised = Vec::new();
        let value = oper.apply(first, second, &mut self.symtab, &mut raised)?;
        for diagnostic in raised {
            self.report(diagnostic);
        }
        log::debug!("fold {oper}({first}, {second}) = {value}");
        self.stats.reductions += 1;

        match frame.state {
            ParserState::ExpectingOperation => {
                log::debug!("result {value}");
                self.results.push(value);
                self.state = ParserState::ExpectingOperation;
            }
            slot @ (ParserState::ExpectingFirstArgument
            | ParserState::ExpectingLastArgument
            | ParserState::ExpectingSecondArgumentAfterLet) => {
                self.state = slot;
                let ParserAction::Push(next) = lookup(slot, TokenID::Value) else {
                    unreachable!("argument slot {slot} rejects a value");
                };
                self.push(CalcToken::synthesized(value), next);
            }
            other => unreachable!("operation frame pushed in state {other}"),
        }
        Ok(())
    }

    fn missing(&mut self, ordinal: usize, position: Option<usize>) {
        self.report(Diagnostic::MissingArgument { ordinal, position });
    }

    fn dump_state(&self) {
        let mut output = std::string::String::new();
        for frame in &self.pending {
            output.push_str(&format!("<{}> {}  ", frame.state, frame.token.expression));
        }
        log::trace!("{}<- <{}>", output, self.state);
    }
}
