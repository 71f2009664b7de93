//! Execution statistics collection and reporting.
//!
//! This module tracks what a single run did. It provides:
//! 1. **Step count:** Instructions executed, the quantity that must be identical
//!    between two runs of the same program from the same registers.
//! 2. **Instruction mix:** Retired instructions per operation and per ALU family.
//! 3. **Watch hits:** How many times the cycle detector observed its address.

use std::fmt::Write as _;

use crate::alu::AluOp;
use crate::common::OPCODE_COUNT;
use crate::isa::Operation;

/// Counters for one interpreter run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExecStats {
    /// Instructions executed.
    pub steps: u64,
    /// Retired instructions, indexed by [`Operation::index`].
    pub retired: [u64; OPCODE_COUNT],
    /// Times the watched address was reached during cycle detection.
    pub watch_hits: u64,
}

impl ExecStats {
    /// Records one executed instruction.
    pub const fn record(&mut self, op: Operation) {
        self.steps += 1;
        self.retired[op.index()] += 1;
    }

    /// Retired count for one operation.
    pub const fn retired_by(&self, op: Operation) -> u64 {
        self.retired[op.index()]
    }

    /// Retired count over every operation sharing the ALU function `alu`.
    pub fn retired_by_family(&self, alu: AluOp) -> u64 {
        Operation::ALL
            .into_iter()
            .filter(|op| op.alu_op() == alu)
            .map(|op| self.retired_by(op))
            .sum()
    }

    /// Most frequently executed operation, if anything ran.
    pub fn hottest(&self) -> Option<(Operation, u64)> {
        Operation::ALL
            .into_iter()
            .map(|op| (op, self.retired_by(op)))
            .filter(|&(_, count)| count > 0)
            .max_by_key(|&(op, count)| (count, std::cmp::Reverse(op)))
    }

    /// Renders the report printed by [`print`](Self::print).
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "==========================================================");
        let _ = writeln!(out, "ELF VM EXECUTION STATISTICS");
        let _ = writeln!(out, "==========================================================");
        let _ = writeln!(out, "steps                    {}", self.steps);
        let _ = writeln!(out, "watch_hits               {}", self.watch_hits);
        if let Some((op, count)) = self.hottest() {
            let _ = writeln!(out, "hottest                  {op} ({count})");
        }
        let _ = writeln!(out, "----------------------------------------------------------");
        let _ = writeln!(out, "INSTRUCTION MIX");
        for alu in [
            AluOp::Add,
            AluOp::Mul,
            AluOp::And,
            AluOp::Or,
            AluOp::Set,
            AluOp::Gt,
            AluOp::Eq,
        ] {
            let count = self.retired_by_family(alu);
            let _ = writeln!(
                out,
                "  mix.{:<20}{:>12} ({:>5.1}%)",
                format!("{alu:?}").to_lowercase(),
                count,
                self.share(count)
            );
        }
        let _ = writeln!(out, "----------------------------------------------------------");
        for op in Operation::ALL {
            let count = self.retired_by(op);
            if count > 0 {
                let _ = writeln!(out, "  op.{:<21}{:>12}", op.name(), count);
            }
        }
        let _ = writeln!(out, "==========================================================");
        out
    }

    /// Prints the report to stdout.
    pub fn print(&self) {
        print!("{}", self.summary());
    }

    fn share(&self, count: u64) -> f64 {
        if self.steps == 0 {
            0.0
        } else {
            count as f64 * 100.0 / self.steps as f64
        }
    }
}
