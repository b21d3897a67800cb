//! # symtab
//!
//! A scoped symbol table: a LIFO stack of `(name, value)` bindings.
//!
//! Every `let` pushes one binding and pops it again once its body has been
//! folded. Lookups scan from the most recently pushed binding down, so an
//! inner binding shadows an outer one with the same name until it is popped.
//!
//! ## Example
//! ```rust
//! # use letcalc::SymTab;
//! let mut st = SymTab::new();
//! st.push("b", 2);
//! st.push("b", 5);
//! assert_eq!(st.lookup("b"), Some(5)); // inner binding wins
//! st.pop().unwrap();
//! assert_eq!(st.lookup("b"), Some(2)); // outer binding visible again
//! st.pop().unwrap();
//! assert_eq!(st.lookup("b"), None);
//! ```

use smartstring::alias::String;
use thiserror::Error;

/// Errors that can occur when operating on a [`SymTab`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymTabError {
    /// Attempted to pop a binding from an empty table.
    #[error("no binding left to remove")]
    Underflow,
}

/// A stack of name/value bindings with innermost-first lookup.
#[derive(Debug, Clone, Default)]
pub struct SymTab {
    tab: Vec<(String, i64)>,
}

impl SymTab {
    /// Creates a new, empty symbol table.
    pub fn new() -> Self {
        Self { tab: Vec::new() }
    }

    /// Returns the number of bindings currently stored, shadowed ones included.
    ///
    /// # Example
    /// ```rust
    /// # use letcalc::SymTab;
    /// let mut symtab = SymTab::new();
    /// assert_eq!(symtab.len(), 0);
    /// symtab.push("foo", 1);
    /// symtab.push("foo", 2);
    /// assert_eq!(symtab.len(), 2);
    /// ```
    pub fn len(&self) -> usize {
        self.tab.len()
    }

    /// Returns `true` if no binding is in scope.
    pub fn is_empty(&self) -> bool {
        self.tab.is_empty()
    }

    /// Binds `name` to `value`, shadowing any existing binding of `name`.
    pub fn push(&mut self, name: impl AsRef<str>, value: i64) {
        self.tab.push((String::from(name.as_ref()), value));
    }

    /// Removes and returns the most recently pushed binding.
    ///
    /// Returns [`Err`] if the table is empty.
    pub fn pop(&mut self) -> Result<(String, i64), SymTabError> {
        self.tab.pop().ok_or(SymTabError::Underflow)
    }

    /// Returns the value of the innermost binding of `name`.
    pub fn lookup(&self, name: &str) -> Option<i64> {
        self.tab
            .iter()
            .rev()
            .find(|(n, _)| n.as_str() == name)
            .map(|(_, v)| *v)
    }

    /// Drops every binding.
    pub fn clear(&mut self) {
        self.tab.clear();
    }

    /// Iterates over the bindings from innermost to outermost.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.tab.iter().rev().map(|(n, v)| (n.as_str(), *v))
    }
}
