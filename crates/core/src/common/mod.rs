//! Common types shared by every part of the interpreter.
//!
//! This module provides the building blocks used across the crate:
//! 1. **Word:** The integer type held by registers and carried by operands.
//! 2. **Constants:** Catalog size, default register counts and related limits.
//! 3. **Error Handling:** The crate-wide [`VmError`] type.
//! 4. **Register Management:** The bounds-checked [`RegisterFile`].

/// Crate-wide constants.
pub mod constants;

/// Error type for loading, validating, executing and solving.
pub mod error;

/// Register file implementation.
pub mod reg;

pub use constants::{
    AMBIGUITY_THRESHOLD, DEFAULT_REGISTER_COUNT, OPCODE_COUNT, SAMPLE_REGISTER_COUNT,
};
pub use error::{Result, VmError};
pub use reg::RegisterFile;

/// Value held by a register, and the type of every instruction operand.
///
/// Arithmetic on words wraps on overflow.
pub type Word = i64;
