//! Operation definitions.
//!
//! Every operation the language knows is binary: the four arithmetic
//! operations and the `let` completion step. [`Oper::apply`] is invoked once
//! per fold with the two arguments in source order.
//!
//! Arithmetic wraps on `i64` overflow. Division by zero never fails; it
//! substitutes a sentinel and raises [`Diagnostic::DivisionByZero`]:
//!
//! | dividend | result       |
//! |----------|--------------|
//! | `< 0`    | `i64::MIN`   |
//! | `0`      | `1`          |
//! | `> 0`    | `i64::MAX`   |

use crate::{Diagnostic, DiagnosticSink, SymTab, SymTabError, TokenID};
use std::fmt;

/// A binary operation attached to a pending operation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Oper {
    /// `add(a, b) = a + b`
    Add = 0,
    /// `sub(a, b) = a - b`
    Subtract = 1,
    /// `mult(a, b) = a * b`
    Multiply = 2,
    /// `div(a, b) = a / b`, truncating
    Divide = 3,
    /// `let(name, v, body) = body`; removes the binding of `name`
    Let = 4,
}

impl Oper {
    /// The total number of operations.
    pub const COUNT: usize = 5;

    /// Keyword spelling of each operation, in declaration order.
    pub const STRS: &[&str] = &["add", "sub", "mult", "div", "let"];

    /// Returns the operation a keyword token stands for.
    pub fn from_token_id(token_id: TokenID) -> Option<Oper> {
        match token_id {
            TokenID::Add => Some(Oper::Add),
            TokenID::Subtract => Some(Oper::Subtract),
            TokenID::Multiply => Some(Oper::Multiply),
            TokenID::Divide => Some(Oper::Divide),
            TokenID::Let => Some(Oper::Let),
            _ => None,
        }
    }

    /// Applies the operation to `(first, second)`.
    ///
    /// `Let` pops the innermost binding from `symtab` and yields `second`, the
    /// value of its body. The other operations leave `symtab` untouched.
    ///
    /// # Errors
    /// Returns [`SymTabError::Underflow`] if `Let` finds no binding to remove.
    ///
    /// # Example
    /// ```rust
    /// # use letcalc::{Diagnostic, Oper, SymTab};
    /// let mut symtab = SymTab::new();
    /// let mut raised: Vec<Diagnostic> = Vec::new();
    /// assert_eq!(Oper::Subtract.apply(5, 7, &mut symtab, &mut raised).unwrap(), -2);
    /// assert_eq!(Oper::Divide.apply(-3, 0, &mut symtab, &mut raised).unwrap(), i64::MIN);
    /// assert_eq!(raised.len(), 1);
    /// ```
    pub fn apply(
        self,
        first: i64,
        second: i64,
        symtab: &mut SymTab,
        sink: &mut impl DiagnosticSink,
    ) -> Result<i64, SymTabError> {
        let value = match self {
            Oper::Add => first.wrapping_add(second),
            Oper::Subtract => first.wrapping_sub(second),
            Oper::Multiply => first.wrapping_mul(second),
            Oper::Divide => divide(first, second, sink),
            Oper::Let => {
                let (name, bound) = symtab.pop()?;
                log::debug!("unbind {name} = {bound}");
                second
            }
        };
        Ok(value)
    }
}

impl From<Oper> for usize {
    fn from(oper: Oper) -> Self {
        oper as usize
    }
}

impl fmt::Display for Oper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Oper::STRS[usize::from(*self)])
    }
}

fn divide(dividend: i64, divisor: i64, sink: &mut impl DiagnosticSink) -> i64 {
    if divisor != 0 {
        return dividend.wrapping_div(divisor);
    }
    let result = match dividend {
        d if d < 0 => i64::MIN,
        0 => 1,
        _ => i64::MAX,
    };
    sink.report(&Diagnostic::DivisionByZero {
        dividend,
        divisor,
        result,
    });
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(oper: Oper, first: i64, second: i64) -> (i64, Vec<Diagnostic>) {
        let mut symtab = SymTab::new();
        let mut raised = Vec::new();
        let value = oper.apply(first, second, &mut symtab, &mut raised).unwrap();
        (value, raised)
    }

    #[test]
    fn arithmetic_in_source_order() {
        assert_eq!(run(Oper::Add, 2, 3).0, 5);
        assert_eq!(run(Oper::Subtract, 2, 3).0, -1);
        assert_eq!(run(Oper::Multiply, -4, 3).0, -12);
        assert_eq!(run(Oper::Divide, 7, 2).0, 3);
    }

    #[test]
    fn division_truncates_toward_zero() {
        assert_eq!(run(Oper::Divide, -7, 2).0, -3);
        assert_eq!(run(Oper::Divide, 7, -2).0, -3);
    }

    #[test]
    fn overflow_wraps() {
        assert_eq!(run(Oper::Add, i64::MAX, 1).0, i64::MIN);
        assert_eq!(run(Oper::Divide, i64::MIN, -1).0, i64::MIN);
    }

    #[test]
    fn division_by_zero_substitutes_sentinels() {
        for (dividend, expected) in [(-8, i64::MIN), (0, 1), (8, i64::MAX)] {
            let (value, raised) = run(Oper::Divide, dividend, 0);
            assert_eq!(value, expected);
            assert_eq!(
                raised,
                [Diagnostic::DivisionByZero {
                    dividend,
                    divisor: 0,
                    result: expected,
                }]
            );
        }
    }

    #[test]
    fn nonzero_division_is_silent() {
        let (_, raised) = run(Oper::Divide, 8, 4);
        assert!(raised.is_empty());
    }

    #[test]
    fn let_pops_one_binding_and_yields_body() {
        let mut symtab = SymTab::new();
        symtab.push("x", 1);
        symtab.push("y", 2);
        let mut raised: Vec<Diagnostic> = Vec::new();
        let value = Oper::Let.apply(2, 40, &mut symtab, &mut raised).unwrap();
        assert_eq!(value, 40);
        assert_eq!(symtab.len(), 1);
        assert_eq!(symtab.lookup("y"), None);
        assert_eq!(symtab.lookup("x"), Some(1));
    }

    #[test]
    fn let_without_binding_errors() {
        let mut symtab = SymTab::new();
        let mut raised: Vec<Diagnostic> = Vec::new();
        let err = Oper::Let.apply(0, 0, &mut symtab, &mut raised).unwrap_err();
        assert_eq!(err, SymTabError::Underflow);
    }

    #[test]
    fn keyword_mapping() {
        assert_eq!(Oper::from_token_id(TokenID::Multiply), Some(Oper::Multiply));
        assert_eq!(Oper::from_token_id(TokenID::Comma), None);
        assert_eq!(Oper::from_token_id(TokenID::Let), Some(Oper::Let));
        assert_eq!(Oper::Multiply.to_string(), "mult");
        assert_eq!(Oper::STRS.len(), Oper::COUNT);
    }
}
