//! Operator resolution
//!
//! Decides which single operator governs a window of tokens.

use std::fmt;

use super::token::{Symbol, Token};

/// The command a line resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operator {
    Add,
    Reset,
    Diff,
    Push,
    Merge,
    Cd,
    Set,
}

impl Operator {
    /// Every operator, in dispatch order
    pub const ALL: [Operator; 7] = [
        Operator::Add,
        Operator::Reset,
        Operator::Diff,
        Operator::Push,
        Operator::Merge,
        Operator::Cd,
        Operator::Set,
    ];

    /// Position of this operator in [`Operator::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Add => "add",
            Operator::Reset => "reset",
            Operator::Diff => "diff",
            Operator::Push => "push",
            Operator::Merge => "merge",
            Operator::Cd => "cd",
            Operator::Set => "set",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve the operator for a token window.
///
/// A leading `+` or `-` wins outright. Otherwise the first `=`, `->`, `>`,
/// `~` or `cd` anywhere in the window decides. Returns `None` when the
/// window holds no recognised operator.
pub fn resolve(tokens: &[Token]) -> Option<Operator> {
    match tokens.first().and_then(Token::symbol) {
        Some(Symbol::Plus) => return Some(Operator::Add),
        Some(Symbol::Minus) => return Some(Operator::Reset),
        _ => {}
    }

    tokens.iter().find_map(|token| match token.symbol()? {
        Symbol::Equals => Some(Operator::Set),
        Symbol::Arrow => Some(Operator::Push),
        Symbol::Angle => Some(Operator::Merge),
        Symbol::Tilde => Some(Operator::Diff),
        Symbol::Cd => Some(Operator::Cd),
        Symbol::Plus | Symbol::Minus => None,
    })
}
