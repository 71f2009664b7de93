//! Instruction Set Definitions.
//!
//! Contains the operation catalog, the instruction and program types, and the
//! operand formats that tell register operands from immediates.

/// Instruction and raw opcode types.
pub mod instruction;

/// The sixteen operations and the operation bitset.
pub mod opcodes;

/// Instruction sequences with an instruction-pointer binding.
pub mod program;

pub use instruction::{Instruction, OpcodeId, RawInstruction};
pub use opcodes::{OperandFormat, Operation, OperationSet};
pub use program::{Program, RawProgram};
