//! Opcode mappings.
//!
//! The solved bijection from raw numeric ids to catalog operations, and the
//! translation of raw programs into executable ones.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::common::{OPCODE_COUNT, Result, VmError, Word};
use crate::isa::{OpcodeId, Operation, Program, RawProgram};

/// A complete id-to-operation bijection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpcodeMapping {
    table: [Operation; OPCODE_COUNT],
}

impl OpcodeMapping {
    /// Builds a mapping from a table indexed by id.
    ///
    /// # Errors
    ///
    /// [`VmError::UnsolvableMapping`] if an operation appears twice, in which
    /// case the table is not a bijection. The ids sharing an operation are
    /// reported.
    pub fn from_table(table: [Operation; OPCODE_COUNT]) -> Result<Self> {
        let mut owner: [Option<u8>; OPCODE_COUNT] = [None; OPCODE_COUNT];
        let mut clashing = Vec::new();
        for (id, op) in OpcodeId::all().zip(table) {
            match owner[op.index()] {
                Some(first) => clashing.extend([first, id.get()]),
                None => owner[op.index()] = Some(id.get()),
            }
        }
        if clashing.is_empty() {
            Ok(Self { table })
        } else {
            clashing.sort_unstable();
            clashing.dedup();
            Err(VmError::UnsolvableMapping {
                unresolved: clashing,
            })
        }
    }

    /// The operation denoted by `id`.
    pub const fn get(&self, id: OpcodeId) -> Operation {
        self.table[id.index()]
    }

    /// The operation denoted by a numeric id.
    ///
    /// # Errors
    ///
    /// [`VmError::UnknownOpcode`] unless `raw` is in `0..16`.
    pub fn lookup(&self, raw: Word) -> Result<Operation> {
        OpcodeId::new(raw).map(|id| self.get(id))
    }

    /// The id that denotes `op`.
    pub fn id_of(&self, op: Operation) -> Option<OpcodeId> {
        OpcodeId::all().find(|&id| self.get(id) == op)
    }

    /// `(id, operation)` pairs in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (OpcodeId, Operation)> + '_ {
        OpcodeId::all().map(|id| (id, self.get(id)))
    }

    /// Rewrites a raw program with operation names in place of ids.
    pub fn translate(&self, raw: &RawProgram) -> Program {
        let instructions = raw
            .instructions()
            .iter()
            .map(|instruction| instruction.with_op(self.get(instruction.op)))
            .collect();
        Program::new(raw.ip_register(), instructions)
    }
}

impl Serialize for OpcodeMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(OPCODE_COUNT))?;
        for (id, op) in self.iter() {
            map.serialize_entry(&id.get(), &op)?;
        }
        map.end()
    }
}
