//! Cycle detection at a watched address.
//!
//! Some programs loop forever, producing a sequence of register states at one
//! address that eventually repeats. Each time the machine reaches the watched
//! address a signature of the registers is recorded in encounter order; the
//! first signature seen twice ends the run.

use std::collections::HashMap;

use super::machine::RunOutcome;
use crate::common::{RegisterFile, Result, VmError, Word};

/// Which registers make up a signature.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Signature {
    /// The whole register file.
    #[default]
    AllRegisters,
    /// The listed registers, in the listed order.
    Registers(Vec<usize>),
}

impl Signature {
    /// Checks the listed registers against a file of `count` registers.
    ///
    /// # Errors
    ///
    /// [`VmError::RegisterIndexOutOfRange`] for the first register outside the
    /// file, and [`VmError::EmptySignature`] for an empty register list.
    pub fn validate(&self, count: usize) -> Result<()> {
        match self {
            Self::AllRegisters => Ok(()),
            Self::Registers(indices) if indices.is_empty() => Err(VmError::EmptySignature),
            Self::Registers(indices) => match indices.iter().find(|&&i| i >= count) {
                Some(&index) => Err(VmError::RegisterIndexOutOfRange {
                    index: Word::try_from(index).unwrap_or(Word::MAX),
                    count,
                }),
                None => Ok(()),
            },
        }
    }

    /// Captures the signature of `regs`.
    ///
    /// # Errors
    ///
    /// [`VmError::RegisterIndexOutOfRange`] for a listed register outside the file.
    pub fn capture(&self, regs: &RegisterFile) -> Result<Vec<Word>> {
        match self {
            Self::AllRegisters => Ok(regs.as_slice().to_vec()),
            Self::Registers(indices) => indices.iter().map(|&i| regs.read(i as Word)).collect(),
        }
    }
}

/// Where and what to watch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Watch {
    /// Instruction address at which signatures are captured.
    pub address: Word,
    /// Registers forming the signature.
    pub signature: Signature,
    /// Optional cap on instructions executed while watching.
    pub step_limit: Option<u64>,
}

impl Watch {
    /// Watches the full register file at `address`, without a step cap.
    pub const fn at(address: Word) -> Self {
        Self {
            address,
            signature: Signature::AllRegisters,
            step_limit: None,
        }
    }

    /// Restricts the signature to `registers`; an empty list keeps the whole file.
    #[must_use]
    pub fn on_registers(mut self, registers: &[usize]) -> Self {
        self.signature = if registers.is_empty() {
            Signature::AllRegisters
        } else {
            Signature::Registers(registers.to_vec())
        };
        self
    }

    /// Gives up after `steps` instructions.
    #[must_use]
    pub const fn with_step_limit(mut self, steps: u64) -> Self {
        self.step_limit = Some(steps);
        self
    }
}

/// A signature sequence that came back to an earlier value.
///
/// For a sequence `s0 .. s(W-1)` followed by a loop `sW .. s(W+P-1)`,
/// `first_repeated` is `sW`, `last_distinct` is `s(W+P-1)`, `warm_up` is `W`
/// and `period` is `P`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CycleReport {
    /// The first signature observed a second time.
    pub first_repeated: Vec<Word>,
    /// The last new signature before the repeat.
    pub last_distinct: Vec<Word>,
    /// Number of distinct signatures seen.
    pub distinct_signatures: usize,
    /// Encounters before the loop starts.
    pub warm_up: usize,
    /// Length of the loop in encounters.
    pub period: usize,
    /// Instructions executed when the repeat was observed.
    pub steps: u64,
}

impl CycleReport {
    pub(crate) const fn at_step(mut self, steps: u64) -> Self {
        self.steps = steps;
        self
    }
}

/// How a cycle-detecting run ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A signature repeated.
    Repeated(CycleReport),
    /// The program halted before any signature repeated.
    Halted(RunOutcome),
    /// The watch's step cap ran out first.
    StepLimit(RunOutcome),
}

impl CycleOutcome {
    /// The cycle report, if a signature repeated.
    pub const fn report(&self) -> Option<&CycleReport> {
        match self {
            Self::Repeated(report) => Some(report),
            Self::Halted(_) | Self::StepLimit(_) => None,
        }
    }
}

/// Signatures seen so far, with the encounter at which each first appeared.
#[derive(Debug, Default)]
pub struct CycleDetector {
    first_seen: HashMap<Vec<Word>, usize>,
    last: Option<Vec<Word>>,
    encounters: usize,
}

impl CycleDetector {
    /// Creates an empty detector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one observation; returns a report when it repeats an earlier one.
    pub fn observe(&mut self, signature: Vec<Word>) -> Option<CycleReport> {
        let encounter = self.encounters;
        self.encounters += 1;
        if let Some(&start) = self.first_seen.get(&signature) {
            let last_distinct = self.last.clone().unwrap_or_else(|| signature.clone());
            return Some(CycleReport {
                first_repeated: signature,
                last_distinct,
                distinct_signatures: self.first_seen.len(),
                warm_up: start,
                period: encounter - start,
                steps: 0,
            });
        }
        let _ = self.first_seen.insert(signature.clone(), encounter);
        self.last = Some(signature);
        None
    }

    /// Number of observations so far.
    pub const fn encounters(&self) -> usize {
        self.encounters
    }
}
