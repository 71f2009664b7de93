//! Error definitions.
//!
//! Every failure the crate can report is a [`VmError`]. Loading and validation
//! errors are raised before the first instruction executes; stopping on a step
//! limit or on a detected cycle is a normal outcome and never an error.

use thiserror::Error;

use super::Word;

/// Convenience alias used throughout the crate.
pub type Result<T, E = VmError> = std::result::Result<T, E>;

/// Errors raised while loading, validating, running or identifying programs.
#[derive(Debug, Error)]
pub enum VmError {
    /// A program or sample text could not be parsed.
    ///
    /// `line` is 1-based and refers to the text handed to the loader.
    #[error("malformed program at line {line}: {reason}")]
    MalformedProgram {
        /// Line of the offending text.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// A mnemonic that is not one of the sixteen catalog operations.
    #[error("unknown operation `{0}`")]
    UnknownOperation(String),

    /// A raw opcode id outside `0..16`, or one missing from a mapping.
    #[error("unknown opcode id {0}")]
    UnknownOpcode(Word),

    /// An operand or the instruction-pointer binding names a register that
    /// does not exist.
    #[error("register index {index} out of range for a file of {count} registers")]
    RegisterIndexOutOfRange {
        /// The offending register index.
        index: Word,
        /// Size of the register file.
        count: usize,
    },

    /// A behavioral sample whose parts do not fit together.
    #[error("malformed sample: {0}")]
    MalformedSample(String),

    /// Elimination reached a fixed point with ids still unassigned.
    #[error("opcode mapping is unsolvable: ids {unresolved:?} remain unassigned")]
    UnsolvableMapping {
        /// Raw ids that could not be pinned to a single operation.
        unresolved: Vec<u8>,
    },

    /// A cycle watch lists no registers to compare.
    #[error("cycle watch signature names no registers")]
    EmptySignature,

    /// Reading an input file failed.
    #[error("could not read `{path}`: {source}")]
    Io {
        /// Path that was being read.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

impl VmError {
    /// Builds a [`VmError::MalformedProgram`] for the given 1-based line.
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedProgram {
            line,
            reason: reason.into(),
        }
    }
}
