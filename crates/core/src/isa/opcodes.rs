//! Operation Catalog.
//!
//! The sixteen elf-assembly operations. Each one writes exactly register `c`
//! and reads nothing but the registers its operand format names. Operations
//! come in families that share an ALU function and differ only in whether
//! `a` and `b` name registers or carry immediate values:
//!
//! | family     | operations                           | ALU            |
//! |------------|--------------------------------------|----------------|
//! | arithmetic | `addr addi mulr muli`                | `Add`, `Mul`   |
//! | bitwise    | `banr bani borr bori`                | `And`, `Or`    |
//! | move/load  | `setr seti`                          | `Set`          |
//! | comparison | `gtir gtri gtrr eqir eqri eqrr`      | `Gt`, `Eq`     |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::alu::{Alu, AluOp};
use crate::common::{OPCODE_COUNT, RegisterFile, Result, VmError, Word};

/// How an operation interprets its `a` and `b` operands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperandFormat {
    /// `a` and `b` are registers.
    RegReg,
    /// `a` is a register, `b` an immediate.
    RegImm,
    /// `a` is an immediate, `b` a register.
    ImmReg,
    /// `a` is a register, `b` is ignored.
    Reg,
    /// `a` is an immediate, `b` is ignored.
    Imm,
}

impl OperandFormat {
    /// Whether operand `a` is dereferenced as a register.
    pub const fn reads_register_a(self) -> bool {
        matches!(self, Self::RegReg | Self::RegImm | Self::Reg)
    }

    /// Whether operand `b` is dereferenced as a register.
    pub const fn reads_register_b(self) -> bool {
        matches!(self, Self::RegReg | Self::ImmReg)
    }
}

/// One of the sixteen named register operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// `r[c] = r[a] + r[b]`
    Addr,
    /// `r[c] = r[a] + b`
    Addi,
    /// `r[c] = r[a] * r[b]`
    Mulr,
    /// `r[c] = r[a] * b`
    Muli,
    /// `r[c] = r[a] & r[b]`
    Banr,
    /// `r[c] = r[a] & b`
    Bani,
    /// `r[c] = r[a] | r[b]`
    Borr,
    /// `r[c] = r[a] | b`
    Bori,
    /// `r[c] = r[a]`
    Setr,
    /// `r[c] = a`
    Seti,
    /// `r[c] = a > r[b]`
    Gtir,
    /// `r[c] = r[a] > b`
    Gtri,
    /// `r[c] = r[a] > r[b]`
    Gtrr,
    /// `r[c] = a == r[b]`
    Eqir,
    /// `r[c] = r[a] == b`
    Eqri,
    /// `r[c] = r[a] == r[b]`
    Eqrr,
}

impl Operation {
    /// The whole catalog, in a fixed order.
    pub const ALL: [Self; OPCODE_COUNT] = [
        Self::Addr,
        Self::Addi,
        Self::Mulr,
        Self::Muli,
        Self::Banr,
        Self::Bani,
        Self::Borr,
        Self::Bori,
        Self::Setr,
        Self::Seti,
        Self::Gtir,
        Self::Gtri,
        Self::Gtrr,
        Self::Eqir,
        Self::Eqri,
        Self::Eqrr,
    ];

    /// Position of the operation in [`Operation::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Operation at `index` in [`Operation::ALL`].
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Assembly mnemonic.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Addr => "addr",
            Self::Addi => "addi",
            Self::Mulr => "mulr",
            Self::Muli => "muli",
            Self::Banr => "banr",
            Self::Bani => "bani",
            Self::Borr => "borr",
            Self::Bori => "bori",
            Self::Setr => "setr",
            Self::Seti => "seti",
            Self::Gtir => "gtir",
            Self::Gtri => "gtri",
            Self::Gtrr => "gtrr",
            Self::Eqir => "eqir",
            Self::Eqri => "eqri",
            Self::Eqrr => "eqrr",
        }
    }

    /// ALU function evaluated by the operation.
    pub const fn alu_op(self) -> AluOp {
        match self {
            Self::Addr | Self::Addi => AluOp::Add,
            Self::Mulr | Self::Muli => AluOp::Mul,
            Self::Banr | Self::Bani => AluOp::And,
            Self::Borr | Self::Bori => AluOp::Or,
            Self::Setr | Self::Seti => AluOp::Set,
            Self::Gtir | Self::Gtri | Self::Gtrr => AluOp::Gt,
            Self::Eqir | Self::Eqri | Self::Eqrr => AluOp::Eq,
        }
    }

    /// Operand format of the operation.
    pub const fn format(self) -> OperandFormat {
        match self {
            Self::Addr | Self::Mulr | Self::Banr | Self::Borr | Self::Gtrr | Self::Eqrr => {
                OperandFormat::RegReg
            }
            Self::Addi | Self::Muli | Self::Bani | Self::Bori | Self::Gtri | Self::Eqri => {
                OperandFormat::RegImm
            }
            Self::Gtir | Self::Eqir => OperandFormat::ImmReg,
            Self::Setr => OperandFormat::Reg,
            Self::Seti => OperandFormat::Imm,
        }
    }

    /// Applies the operation to `regs`, writing only register `c`.
    ///
    /// # Arguments
    ///
    /// * `regs` - Register file read for register operands and written at `c`.
    /// * `a`    - First operand, a register index or an immediate per [`Self::format`].
    /// * `b`    - Second operand, likewise; ignored by `setr` and `seti`.
    /// * `c`    - Destination register index.
    ///
    /// # Errors
    ///
    /// [`VmError::RegisterIndexOutOfRange`] if `c`, or an operand the format
    /// reads as a register, is outside the file. Nothing is written then.
    pub fn apply(self, regs: &mut RegisterFile, a: Word, b: Word, c: Word) -> Result<()> {
        let (x, y) = match self.format() {
            OperandFormat::RegReg => (regs.read(a)?, regs.read(b)?),
            OperandFormat::RegImm => (regs.read(a)?, b),
            OperandFormat::ImmReg => (a, regs.read(b)?),
            OperandFormat::Reg => (regs.read(a)?, 0),
            OperandFormat::Imm => (a, 0),
        };
        regs.write(c, Alu::execute(self.alu_op(), x, y))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = VmError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| VmError::UnknownOperation(s.to_owned()))
    }
}

/// Set of catalog operations, one bit per [`Operation::index`].
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct OperationSet(u16);

impl OperationSet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// Every operation in the catalog.
    pub const FULL: Self = Self(u16::MAX);

    /// Adds `op` to the set.
    pub const fn insert(&mut self, op: Operation) {
        self.0 |= 1 << op.index();
    }

    /// Removes `op` from the set.
    pub const fn remove(&mut self, op: Operation) {
        self.0 &= !(1 << op.index());
    }

    /// Whether `op` is in the set.
    pub const fn contains(self, op: Operation) -> bool {
        self.0 & (1 << op.index()) != 0
    }

    /// Number of operations in the set.
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Whether the set is empty.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Operations present in both sets.
    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// The only member, if the set has exactly one.
    pub fn single(self) -> Option<Operation> {
        if self.len() == 1 {
            Operation::from_index(self.0.trailing_zeros() as usize)
        } else {
            None
        }
    }

    /// Members in catalog order.
    pub fn iter(self) -> impl Iterator<Item = Operation> {
        Operation::ALL.into_iter().filter(move |&op| self.contains(op))
    }
}

impl FromIterator<Operation> for OperationSet {
    fn from_iter<I: IntoIterator<Item = Operation>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for op in iter {
            set.insert(op);
        }
        set
    }
}

impl fmt::Debug for OperationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
