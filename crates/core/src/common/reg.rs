//! Register File.
//!
//! This module provides the `RegisterFile` struct, the only mutable state an
//! elf-assembly machine has. It provides:
//! 1. **Fixed Storage:** A register count chosen at construction and never changed.
//! 2. **Bounds Checking:** Indices arrive as signed operands and are checked on every access.
//! 3. **Display:** `r0=1 r1=-2` rendering for run reports.

use std::fmt;

use super::error::{Result, VmError};
use super::Word;

/// Fixed-size bank of integer registers.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RegisterFile {
    regs: Vec<Word>,
}

impl RegisterFile {
    /// Creates a register file of `count` registers, all zero.
    pub fn new(count: usize) -> Self {
        Self {
            regs: vec![0; count],
        }
    }

    /// Creates a register file holding a copy of `values`.
    pub fn from_slice(values: &[Word]) -> Self {
        Self {
            regs: values.to_vec(),
        }
    }

    /// Number of registers.
    pub fn len(&self) -> usize {
        self.regs.len()
    }

    /// Returns `true` for a file without registers.
    pub fn is_empty(&self) -> bool {
        self.regs.is_empty()
    }

    /// Resolves an operand to a slot index.
    ///
    /// # Errors
    ///
    /// [`VmError::RegisterIndexOutOfRange`] if `index` is negative or not below
    /// [`len`](Self::len).
    pub fn slot(&self, index: Word) -> Result<usize> {
        usize::try_from(index)
            .ok()
            .filter(|&slot| slot < self.regs.len())
            .ok_or(VmError::RegisterIndexOutOfRange {
                index,
                count: self.regs.len(),
            })
    }

    /// Reads the register named by `index`.
    ///
    /// # Arguments
    ///
    /// * `index` - Signed operand naming the register.
    ///
    /// # Returns
    ///
    /// The value stored in that register.
    ///
    /// # Errors
    ///
    /// [`VmError::RegisterIndexOutOfRange`] for an index outside the file.
    pub fn read(&self, index: Word) -> Result<Word> {
        let slot = self.slot(index)?;
        Ok(self.regs[slot])
    }

    /// Writes `val` into the register named by `index`.
    ///
    /// # Errors
    ///
    /// [`VmError::RegisterIndexOutOfRange`] for an index outside the file; the
    /// file is left untouched.
    pub fn write(&mut self, index: Word, val: Word) -> Result<()> {
        let slot = self.slot(index)?;
        self.regs[slot] = val;
        Ok(())
    }

    /// Register values in index order.
    pub fn as_slice(&self) -> &[Word] {
        &self.regs
    }

    /// Consumes the file and returns its values.
    pub fn into_vec(self) -> Vec<Word> {
        self.regs
    }
}

impl fmt::Display for RegisterFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, val) in self.regs.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "r{i}={val}")?;
        }
        Ok(())
    }
}
