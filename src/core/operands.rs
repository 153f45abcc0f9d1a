//! Operand partitioning
//!
//! Walks a token sequence and sorts every operand into the bucket of the
//! operator that governs it. A `+`, `-` or `~` found after the first
//! position starts a new window at that symbol, discarding everything in
//! front of it, so `@a > @b + x.txt` only stages `x.txt`.

use tracing::debug;

use super::operator::{resolve, Operator};
use super::token::Token;

/// Operands grouped by operator.
///
/// Every operator always has a bucket, possibly empty. Insertion order is
/// kept: for push and merge the first operand is the source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperandSet {
    buckets: [Vec<Token>; 7],
}

impl OperandSet {
    /// An operand set with all buckets empty
    pub fn new() -> Self {
        Self::default()
    }

    /// Operands collected for `operator`
    pub fn get(&self, operator: Operator) -> &[Token] {
        &self.buckets[operator.index()]
    }

    pub fn push(&mut self, operator: Operator, token: Token) {
        self.buckets[operator.index()].push(token);
    }

    /// Operand values (sigil stripped) for `operator`
    pub fn values(&self, operator: Operator) -> Vec<&str> {
        self.get(operator).iter().map(Token::value).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    /// Non-empty buckets in dispatch order
    pub fn iter(&self) -> impl Iterator<Item = (Operator, &[Token])> {
        Operator::ALL
            .into_iter()
            .map(|op| (op, self.get(op)))
            .filter(|(_, tokens)| !tokens.is_empty())
    }
}

/// Partition a token sequence into operand buckets.
///
/// The window starts at the whole sequence and only ever moves forward, so
/// every restart strictly shrinks it and the walk terminates.
pub fn partition(tokens: &[Token]) -> OperandSet {
    let mut start = 0;

    'window: loop {
        let window = &tokens[start..];
        let mut operands = OperandSet::new();

        let Some((last, body)) = window.split_last() else {
            return operands;
        };

        let operator = resolve(window);

        for (i, token) in body.iter().enumerate() {
            if i > 0 && token.symbol().is_some_and(|s| s.restarts_partition()) {
                debug!(symbol = %token, offset = start + i, "restarting partition");
                start += i;
                continue 'window;
            }

            match operator {
                Some(op) if token.is_operand() => operands.push(op, token.clone()),
                _ if !token.is_operator() => {
                    debug!(token = %token, "ignoring token without operator bucket");
                }
                _ => {}
            }
        }

        if let Some(op) = operator {
            if !last.is_operator() {
                operands.push(op, last.clone());
            }
        }

        return operands;
    }
}
