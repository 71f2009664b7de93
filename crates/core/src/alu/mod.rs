//! Arithmetic Logic Unit (ALU).
//!
//! Every catalog operation reduces to one ALU function applied to two decoded
//! operand values. Operations are organized into submodules by category:
//! - [`arithmetic`]: Add, Mul
//! - [`logic`]:      And, Or, Gt, Eq

/// Integer arithmetic operations (add, multiply).
pub mod arithmetic;

/// Bitwise and comparison operations (and, or, greater-than, equality).
pub mod logic;

use crate::common::Word;

/// ALU function selected by an operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AluOp {
    /// `x + y`, wrapping.
    Add,
    /// `x * y`, wrapping.
    Mul,
    /// Bitwise `x & y`.
    And,
    /// Bitwise `x | y`.
    Or,
    /// `x`; the second operand is ignored.
    Set,
    /// `1` if `x > y`, else `0`.
    Gt,
    /// `1` if `x == y`, else `0`.
    Eq,
}

/// Arithmetic Logic Unit for register operations.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Executes an ALU function on two operand values.
    ///
    /// # Examples
    ///
    /// ```
    /// use elfvm_core::alu::{Alu, AluOp};
    ///
    /// assert_eq!(Alu::execute(AluOp::Add, 40, 2), 42);
    /// assert_eq!(Alu::execute(AluOp::Gt, 3, 7), 0);
    /// assert_eq!(Alu::execute(AluOp::Set, 9, 1234), 9);
    /// assert_eq!(Alu::execute(AluOp::Add, i64::MAX, 1), i64::MIN);
    /// ```
    pub fn execute(op: AluOp, x: Word, y: Word) -> Word {
        match op {
            AluOp::Add | AluOp::Mul => arithmetic::execute(op, x, y),
            AluOp::And | AluOp::Or | AluOp::Gt | AluOp::Eq => logic::execute(op, x, y),
            AluOp::Set => x,
        }
    }
}
