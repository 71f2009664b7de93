//! ALU arithmetic operations.
//!
//! Addition and multiplication on full words. Both wrap on overflow so that
//! every operation stays total.

use super::AluOp;
use crate::common::Word;

/// Executes an arithmetic operation.
///
/// # Arguments
///
/// * `op` - The ALU function (must be `Add` or `Mul`).
/// * `x`  - First operand value.
/// * `y`  - Second operand value.
///
/// # Returns
///
/// The wrapped sum or product. Returns `0` for non-arithmetic functions.
pub fn execute(op: AluOp, x: Word, y: Word) -> Word {
    match op {
        AluOp::Add => x.wrapping_add(y),
        AluOp::Mul => x.wrapping_mul(y),
        _ => 0,
    }
}
