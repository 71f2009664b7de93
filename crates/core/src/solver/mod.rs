//! Opcode identification.
//!
//! Recovers which catalog operation each raw numeric id denotes from
//! behavioral [`Sample`]s. Every id starts with the operations consistent with
//! all of its samples. Elimination then runs in passes: an id left with a
//! single candidate is committed and that operation is removed from every
//! other id. Committing one id can leave another with a single candidate, so
//! passes repeat until all ids are committed or a pass commits nothing.
//! Remaining ambiguity is reported, never guessed away.

/// Solved id-to-operation mappings.
pub mod mapping;

/// Behavioral samples.
pub mod sample;

pub use mapping::OpcodeMapping;
pub use sample::Sample;

use tracing::{debug, warn};

use crate::common::{OPCODE_COUNT, Result, VmError};
use crate::isa::{OpcodeId, Operation, OperationSet};

/// Number of operations consistent with `sample` on its own.
///
/// No other sample and no committed assignment is taken into account.
pub fn ambiguity_count(sample: &Sample) -> usize {
    sample.candidates().len()
}

/// Number of samples consistent with at least `threshold` operations.
pub fn count_ambiguous(samples: &[Sample], threshold: usize) -> usize {
    samples
        .iter()
        .filter(|sample| ambiguity_count(sample) >= threshold)
        .count()
}

/// Finds the unique id-to-operation bijection consistent with every sample.
///
/// # Arguments
///
/// * `samples` - Observations in any order; an id may have several or none.
///
/// # Returns
///
/// The complete mapping, once elimination has committed all sixteen ids.
///
/// # Errors
///
/// [`VmError::UnsolvableMapping`] when elimination stalls with ids still
/// unassigned, or when an id runs out of candidates.
pub fn identify_opcodes(samples: &[Sample]) -> Result<OpcodeMapping> {
    Elimination::from_samples(samples).solve()
}

/// Candidate sets and commitments of an elimination in progress.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Elimination {
    candidates: [OperationSet; OPCODE_COUNT],
    assigned: [Option<Operation>; OPCODE_COUNT],
    passes: usize,
}

impl Elimination {
    /// Starts from the operations consistent with every sample of each id.
    ///
    /// Ids without samples keep the whole catalog as candidates.
    pub fn from_samples(samples: &[Sample]) -> Self {
        let mut candidates = [OperationSet::FULL; OPCODE_COUNT];
        for sample in samples {
            let slot = &mut candidates[sample.instruction().op.index()];
            *slot = slot.intersection(sample.candidates());
        }
        Self::from_candidates(candidates)
    }

    /// Starts from explicit candidate sets, indexed by id.
    pub const fn from_candidates(candidates: [OperationSet; OPCODE_COUNT]) -> Self {
        Self {
            candidates,
            assigned: [None; OPCODE_COUNT],
            passes: 0,
        }
    }

    /// Operations still possible for `id`.
    pub const fn candidates(&self, id: OpcodeId) -> OperationSet {
        self.candidates[id.index()]
    }

    /// The operation committed to `id`, if any.
    pub const fn assigned(&self, id: OpcodeId) -> Option<Operation> {
        self.assigned[id.index()]
    }

    /// Number of passes run so far.
    pub const fn passes(&self) -> usize {
        self.passes
    }

    /// Whether every id is committed.
    pub fn is_complete(&self) -> bool {
        self.assigned.iter().all(Option::is_some)
    }

    /// Ids not yet committed, ascending.
    pub fn unresolved(&self) -> Vec<u8> {
        OpcodeId::all()
            .filter(|&id| self.assigned(id).is_none())
            .map(OpcodeId::get)
            .collect()
    }

    /// Runs one pass over the unassigned ids and returns how many it committed.
    ///
    /// # Errors
    ///
    /// [`VmError::UnsolvableMapping`] if an unassigned id has no candidate left.
    pub fn pass(&mut self) -> Result<usize> {
        self.passes += 1;
        let mut committed = 0;
        for id in OpcodeId::all() {
            if self.assigned(id).is_some() {
                continue;
            }
            let remaining = self.candidates(id);
            if remaining.is_empty() {
                warn!(id = id.get(), pass = self.passes, "no operation fits opcode");
                return Err(VmError::UnsolvableMapping {
                    unresolved: self.unresolved(),
                });
            }
            if let Some(op) = remaining.single() {
                self.commit(id, op);
                committed += 1;
                debug!(id = id.get(), %op, pass = self.passes, "committed opcode");
            }
        }
        Ok(committed)
    }

    /// Runs passes to a fixed point.
    ///
    /// # Errors
    ///
    /// [`VmError::UnsolvableMapping`] if a pass commits nothing while ids are
    /// still unassigned, or an id runs out of candidates.
    pub fn solve(mut self) -> Result<OpcodeMapping> {
        while !self.is_complete() {
            if self.pass()? == 0 {
                let unresolved = self.unresolved();
                warn!(?unresolved, passes = self.passes, "opcode elimination stalled");
                return Err(VmError::UnsolvableMapping { unresolved });
            }
        }
        let mut table = [Operation::Addr; OPCODE_COUNT];
        for (slot, op) in table.iter_mut().zip(self.assigned) {
            *slot = op.ok_or_else(|| VmError::UnsolvableMapping {
                unresolved: self.unresolved(),
            })?;
        }
        OpcodeMapping::from_table(table)
    }

    fn commit(&mut self, id: OpcodeId, op: Operation) {
        self.assigned[id.index()] = Some(op);
        self.candidates[id.index()] = std::iter::once(op).collect();
        for other in OpcodeId::all().filter(|&other| other != id) {
            self.candidates[other.index()].remove(op);
        }
    }
}
