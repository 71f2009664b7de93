//! Global Constants.
//!
//! Sizes of the operation catalog and the register files observed in practice.

/// Number of operations in the catalog, and therefore of raw opcode ids (`0..16`).
pub const OPCODE_COUNT: usize = 16;

/// Register count of programs that bind the instruction pointer (`#ip`).
pub const DEFAULT_REGISTER_COUNT: usize = 6;

/// Register count used by opcode samples (`Before: [a, b, c, d]`).
pub const SAMPLE_REGISTER_COUNT: usize = 4;

/// Default number of consistent operations at which a sample counts as ambiguous.
pub const AMBIGUITY_THRESHOLD: usize = 3;
