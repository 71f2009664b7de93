//! Behavioral samples.
//!
//! A sample records the registers before and after one raw instruction ran.
//! It is evidence about which operation the instruction's numeric id denotes.

use crate::common::{RegisterFile, Result, VmError, Word};
use crate::isa::{Operation, OperationSet, RawInstruction};

/// An observed `(before, instruction, after)` triple.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sample {
    before: Vec<Word>,
    instruction: RawInstruction,
    after: Vec<Word>,
}

impl Sample {
    /// Builds a sample.
    ///
    /// # Errors
    ///
    /// [`VmError::MalformedSample`] if `before` and `after` differ in length
    /// or are empty.
    pub fn new(before: Vec<Word>, instruction: RawInstruction, after: Vec<Word>) -> Result<Self> {
        if before.is_empty() {
            return Err(VmError::MalformedSample("no registers".into()));
        }
        if before.len() != after.len() {
            return Err(VmError::MalformedSample(format!(
                "{} registers before but {} after",
                before.len(),
                after.len()
            )));
        }
        Ok(Self {
            before,
            instruction,
            after,
        })
    }

    /// Registers before the instruction.
    pub fn before(&self) -> &[Word] {
        &self.before
    }

    /// The raw instruction.
    pub const fn instruction(&self) -> &RawInstruction {
        &self.instruction
    }

    /// Registers after the instruction.
    pub fn after(&self) -> &[Word] {
        &self.after
    }

    /// Whether running `op` with the sample's operands on a copy of `before`
    /// yields exactly `after`.
    ///
    /// An operand that does not fit the register file makes the sample
    /// inconsistent with `op` rather than an error.
    pub fn consistent_with(&self, op: Operation) -> bool {
        let mut regs = RegisterFile::from_slice(&self.before);
        let RawInstruction { a, b, c, .. } = self.instruction;
        op.apply(&mut regs, a, b, c).is_ok() && regs.as_slice() == self.after.as_slice()
    }

    /// Every operation the sample is consistent with.
    pub fn candidates(&self) -> OperationSet {
        Operation::ALL
            .into_iter()
            .filter(|&op| self.consistent_with(op))
            .collect()
    }
}
