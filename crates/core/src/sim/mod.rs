//! Program execution.
//!
//! The [`Machine`] interprets one program run; the free functions here are the
//! entry points for the three execution modes:
//! 1. **Completion:** [`execute`] runs until the program halts.
//! 2. **Step limit:** [`execute_with_step_limit`] stops early after a fixed
//!    number of instructions, for programs too long to interpret to the end.
//! 3. **Cycle detection:** [`execute_with_cycle_detection`] stops once the
//!    registers observed at a watched address repeat.
//!
//! Every mode validates the program against the register file before the first
//! instruction executes. Runs are deterministic: the same program and initial
//! registers always give the same registers and step count.

/// Cycle detection at a watched address.
pub mod cycle;

/// Text loaders for programs and samples.
pub mod loader;

/// The fetch-decode-execute loop.
pub mod machine;

pub use cycle::{CycleDetector, CycleOutcome, CycleReport, Signature, Watch};
pub use machine::{Machine, MachineState, RunOutcome};

use crate::common::{Result, Word};
use crate::isa::Program;

/// Runs `program` from `initial` registers until it halts and returns the
/// final registers.
///
/// # Errors
///
/// [`VmError::RegisterIndexOutOfRange`](crate::common::VmError::RegisterIndexOutOfRange)
/// if the program does not fit a file of `initial.len()` registers.
///
/// # Examples
///
/// ```
/// use elfvm_core::sim::{execute, loader};
///
/// let program = loader::parse_program("#ip 0\nseti 5 0 1\nseti 6 0 2\n")?;
/// assert_eq!(execute(&program, &[0, 0, 0])?, vec![2, 5, 6]);
/// # Ok::<(), elfvm_core::VmError>(())
/// ```
pub fn execute(program: &Program, initial: &[Word]) -> Result<Vec<Word>> {
    Ok(Machine::new(program, initial)?.run()?.registers)
}

/// Runs at most `max_steps` instructions.
///
/// The outcome's `halted` flag tells whether the program finished within the
/// limit.
///
/// # Errors
///
/// As for [`execute`].
pub fn execute_with_step_limit(
    program: &Program,
    initial: &[Word],
    max_steps: u64,
) -> Result<RunOutcome> {
    Machine::new(program, initial)?.run_for(max_steps)
}

/// Runs until the signature captured at `watch.address` repeats.
///
/// # Errors
///
/// As for [`execute`], and also when the signature names a register outside
/// the file.
pub fn execute_with_cycle_detection(
    program: &Program,
    initial: &[Word],
    watch: &Watch,
) -> Result<CycleOutcome> {
    Machine::new(program, initial)?.run_until_cycle(watch)
}
