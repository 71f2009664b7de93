//! ALU bitwise and comparison operations.
//!
//! Comparisons are signed and always produce exactly 0 or 1.

use super::AluOp;
use crate::common::Word;

/// Executes a bitwise or comparison operation.
///
/// Returns `0` for functions outside this group.
pub fn execute(op: AluOp, x: Word, y: Word) -> Word {
    match op {
        AluOp::And => x & y,
        AluOp::Or => x | y,
        AluOp::Gt => Word::from(x > y),
        AluOp::Eq => Word::from(x == y),
        _ => 0,
    }
}
