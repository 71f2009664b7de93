//! Programs.
//!
//! A program is an immutable instruction list plus the optional register the
//! instruction pointer is bound to. It is built once by the loader (or by a
//! caller) and validated against a register count before it runs.

use std::fmt;

use super::instruction::{Instruction, OpcodeId};
use super::opcodes::Operation;
use crate::common::{Result, VmError, Word};

/// Ordered instruction sequence with its instruction-pointer binding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Program<O = Operation> {
    ip_register: Option<usize>,
    instructions: Vec<Instruction<O>>,
}

/// Program whose opcodes are raw numeric ids.
pub type RawProgram = Program<OpcodeId>;

impl<O> Program<O> {
    /// Creates a program.
    ///
    /// With `ip_register` set, the instruction pointer is mirrored into that
    /// register on every step; without it the program runs straight through
    /// its own jump-free control flow.
    pub const fn new(ip_register: Option<usize>, instructions: Vec<Instruction<O>>) -> Self {
        Self {
            ip_register,
            instructions,
        }
    }

    /// Register mirrored by the instruction pointer, if any.
    pub const fn ip_register(&self) -> Option<usize> {
        self.ip_register
    }

    /// All instructions in address order.
    pub fn instructions(&self) -> &[Instruction<O>] {
        &self.instructions
    }

    /// Instruction at `address`, if it is inside the program.
    pub fn fetch(&self, address: Word) -> Option<&Instruction<O>> {
        usize::try_from(address)
            .ok()
            .and_then(|pc| self.instructions.get(pc))
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Whether the program has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

impl Program<Operation> {
    /// Checks the ip binding and every register operand against a file of
    /// `register_count` registers.
    ///
    /// # Errors
    ///
    /// [`VmError::RegisterIndexOutOfRange`] for the first reference outside the file.
    pub fn validate(&self, register_count: usize) -> Result<()> {
        if let Some(ip) = self.ip_register.filter(|&ip| ip >= register_count) {
            return Err(VmError::RegisterIndexOutOfRange {
                index: Word::try_from(ip).unwrap_or(Word::MAX),
                count: register_count,
            });
        }
        for (address, instruction) in self.instructions.iter().enumerate() {
            instruction.validate(register_count).inspect_err(|err| {
                tracing::debug!(address, %instruction, %err, "rejected instruction");
            })?;
        }
        Ok(())
    }
}

impl<O: fmt::Display> fmt::Display for Program<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ip) = self.ip_register {
            writeln!(f, "#ip {ip}")?;
        }
        for instruction in &self.instructions {
            writeln!(f, "{instruction}")?;
        }
        Ok(())
    }
}
