//! Instruction representation.
//!
//! An instruction is an opcode plus three operands. The opcode is either a
//! named [`Operation`] (symbolic phase) or a bare numeric [`OpcodeId`] (raw
//! phase, before opcode identity is known).

use std::fmt;

use serde::{Deserialize, Serialize};

use super::opcodes::Operation;
use crate::common::{OPCODE_COUNT, RegisterFile, Result, VmError, Word};

/// Numeric opcode of a raw instruction, always in `0..16`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct OpcodeId(u8);

impl OpcodeId {
    /// Validates a numeric opcode.
    ///
    /// # Errors
    ///
    /// [`VmError::UnknownOpcode`] unless `raw` is in `0..16`.
    pub fn new(raw: Word) -> Result<Self> {
        u8::try_from(raw)
            .ok()
            .filter(|&id| usize::from(id) < OPCODE_COUNT)
            .map(Self)
            .ok_or(VmError::UnknownOpcode(raw))
    }

    /// Every id, in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..OPCODE_COUNT as u8).map(Self)
    }

    /// The id as a number.
    pub const fn get(self) -> u8 {
        self.0
    }

    /// The id as a table index.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<u8> for OpcodeId {
    type Error = VmError;

    fn try_from(raw: u8) -> Result<Self> {
        Self::new(Word::from(raw))
    }
}

impl From<OpcodeId> for u8 {
    fn from(id: OpcodeId) -> Self {
        id.0
    }
}

impl fmt::Display for OpcodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One instruction: an opcode and its `a b c` operands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Instruction<O = Operation> {
    /// Opcode, symbolic or raw.
    pub op: O,
    /// First operand.
    pub a: Word,
    /// Second operand.
    pub b: Word,
    /// Destination register.
    pub c: Word,
}

/// Instruction whose opcode is only known by number.
pub type RawInstruction = Instruction<OpcodeId>;

impl<O> Instruction<O> {
    /// Builds an instruction.
    pub const fn new(op: O, a: Word, b: Word, c: Word) -> Self {
        Self { op, a, b, c }
    }

    /// Replaces the opcode, keeping the operands.
    pub fn with_op<P>(&self, op: P) -> Instruction<P> {
        Instruction {
            op,
            a: self.a,
            b: self.b,
            c: self.c,
        }
    }
}

impl Instruction<Operation> {
    /// Executes the instruction against `regs`.
    ///
    /// # Errors
    ///
    /// [`VmError::RegisterIndexOutOfRange`] if an operand names a missing register.
    pub fn execute(&self, regs: &mut RegisterFile) -> Result<()> {
        self.op.apply(regs, self.a, self.b, self.c)
    }

    /// Checks every register operand against a file of `count` registers.
    ///
    /// # Errors
    ///
    /// [`VmError::RegisterIndexOutOfRange`] for the first operand out of range.
    pub fn validate(&self, count: usize) -> Result<()> {
        let format = self.op.format();
        let mut registers = vec![self.c];
        if format.reads_register_a() {
            registers.push(self.a);
        }
        if format.reads_register_b() {
            registers.push(self.b);
        }
        for index in registers {
            let in_range = usize::try_from(index).is_ok_and(|slot| slot < count);
            if !in_range {
                return Err(VmError::RegisterIndexOutOfRange { index, count });
            }
        }
        Ok(())
    }
}

impl<O: fmt::Display> fmt::Display for Instruction<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.op, self.a, self.b, self.c)
    }
}
