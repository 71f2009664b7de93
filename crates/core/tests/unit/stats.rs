//! Execution Statistics Tests

use crate::common::harness::{COUNTDOWN, TestContext};
use elfvm_core::Operation;
use elfvm_core::alu::AluOp;
use elfvm_core::stats::ExecStats;
use pretty_assertions::assert_eq;

fn countdown_stats() -> ExecStats {
    let ctx = TestContext::new(COUNTDOWN).with_registers(&[0, 10, 0]);
    let mut machine = ctx.machine();
    let _ = machine.run().unwrap();
    machine.stats().clone()
}

#[test]
fn test_countdown_instruction_mix() {
    let stats = countdown_stats();
    assert_eq!(stats.steps, 39);
    assert_eq!(stats.retired_by(Operation::Addi), 10);
    assert_eq!(stats.retired_by(Operation::Eqri), 10);
    assert_eq!(stats.retired_by(Operation::Addr), 10);
    assert_eq!(stats.retired_by(Operation::Seti), 9);
    assert_eq!(stats.retired_by(Operation::Mulr), 0);
    assert_eq!(stats.retired.iter().sum::<u64>(), stats.steps);
}

#[test]
fn test_family_totals() {
    let stats = countdown_stats();
    assert_eq!(stats.retired_by_family(AluOp::Add), 20);
    assert_eq!(stats.retired_by_family(AluOp::Eq), 10);
    assert_eq!(stats.retired_by_family(AluOp::Set), 9);
    assert_eq!(stats.retired_by_family(AluOp::Mul), 0);
}

#[test]
fn test_hottest_breaks_ties_in_catalog_order() {
    assert_eq!(countdown_stats().hottest(), Some((Operation::Addr, 10)));
    assert_eq!(ExecStats::default().hottest(), None);
}

#[test]
fn test_summary_lists_steps_and_used_operations() {
    let summary = countdown_stats().summary();
    assert!(summary.contains("steps                    39"));
    assert!(summary.contains("hottest                  addr (10)"));
    assert!(summary.contains("op.eqri"));
    assert!(!summary.contains("op.mulr"));
}

#[test]
fn test_empty_summary_has_no_division_by_zero() {
    let summary = ExecStats::default().summary();
    assert!(summary.contains("0.0%"));
    assert!(!summary.contains("hottest"));
}
