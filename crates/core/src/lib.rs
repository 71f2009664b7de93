//! Elf-assembly register machine.
//!
//! This crate implements a small register-machine interpreter and the tools
//! around it:
//! 1. **ISA:** Sixteen pure register operations, instructions and programs.
//! 2. **Interpreter:** A fetch-decode-execute loop with an instruction pointer
//!    bound to a register, run to completion, for a bounded number of steps, or
//!    until a watched register signature repeats.
//! 3. **Solver:** Recovery of the numeric opcode encoding from behavioral samples.
//! 4. **Loading:** Parsers for program and sample text, and JSON configuration.

/// ALU functions shared by the operation families.
pub mod alu;
/// Common types (word, constants, errors, register file).
pub mod common;
/// Run configuration (defaults, sections, JSON loading).
pub mod config;
/// Instruction set (operations, instructions, programs).
pub mod isa;
/// Program execution, cycle detection and text loading.
pub mod sim;
/// Opcode identification from samples.
pub mod solver;
/// Execution statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or load from JSON.
pub use crate::config::Config;
/// Crate-wide error type.
pub use crate::common::{VmError, Word};
/// Instruction-set types used by most callers.
pub use crate::isa::{Instruction, OpcodeId, Operation, Program, RawProgram};
/// The interpreter.
pub use crate::sim::{Machine, execute, execute_with_cycle_detection, execute_with_step_limit};
/// The opcode solver.
pub use crate::solver::{OpcodeMapping, Sample, ambiguity_count, identify_opcodes};
