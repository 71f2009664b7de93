//! Operation Catalog Tests
//!
//! Exact results for every operation, the single-write property and the
//! 0/1 range of comparisons.

use elfvm_core::common::RegisterFile;
use elfvm_core::isa::{OperandFormat, Operation, OperationSet};
use elfvm_core::{VmError, Word};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

/// Applies `op` to `[9, 5, 12, 40]` with `a = 1, b = 2, c = 3`.
fn apply_base(op: Operation) -> Word {
    let mut regs = RegisterFile::from_slice(&[9, 5, 12, 40]);
    op.apply(&mut regs, 1, 2, 3).unwrap();
    regs.read(3).unwrap()
}

#[rstest]
#[case(Operation::Addr, 17)]
#[case(Operation::Addi, 7)]
#[case(Operation::Mulr, 60)]
#[case(Operation::Muli, 10)]
#[case(Operation::Banr, 4)]
#[case(Operation::Bani, 0)]
#[case(Operation::Borr, 13)]
#[case(Operation::Bori, 7)]
#[case(Operation::Setr, 5)]
#[case(Operation::Seti, 1)]
#[case(Operation::Gtir, 0)]
#[case(Operation::Gtri, 1)]
#[case(Operation::Gtrr, 0)]
#[case(Operation::Eqir, 0)]
#[case(Operation::Eqri, 0)]
#[case(Operation::Eqrr, 0)]
fn test_operation_results(#[case] op: Operation, #[case] expected: Word) {
    assert_eq!(apply_base(op), expected);
}

#[test]
fn test_comparisons_true_cases() {
    let mut regs = RegisterFile::from_slice(&[4, 4, 1, 0]);
    Operation::Eqrr.apply(&mut regs, 0, 1, 3).unwrap();
    assert_eq!(regs.read(3).unwrap(), 1);
    Operation::Gtir.apply(&mut regs, 2, 2, 3).unwrap();
    assert_eq!(regs.read(3).unwrap(), 1);
    Operation::Eqir.apply(&mut regs, 4, 0, 3).unwrap();
    assert_eq!(regs.read(3).unwrap(), 1);
}

#[test]
fn test_seti_ignores_b_even_out_of_range() {
    let mut regs = RegisterFile::new(4);
    Operation::Seti.apply(&mut regs, 77, 1000, 2).unwrap();
    assert_eq!(regs.as_slice(), &[0, 0, 77, 0]);
}

#[test]
fn test_register_operand_out_of_range_writes_nothing() {
    let mut regs = RegisterFile::from_slice(&[1, 2, 3, 4]);
    let err = Operation::Addr.apply(&mut regs, 0, 4, 1).unwrap_err();
    assert!(matches!(err, VmError::RegisterIndexOutOfRange { index: 4, count: 4 }));
    assert_eq!(regs.as_slice(), &[1, 2, 3, 4]);
}

#[test]
fn test_immediate_operands_are_not_range_checked() {
    let mut regs = RegisterFile::from_slice(&[1, 2, 3, 4]);
    Operation::Addi.apply(&mut regs, 0, 1000, 1).unwrap();
    assert_eq!(regs.read(1).unwrap(), 1001);
}

#[test]
fn test_mnemonics_round_trip_through_from_str() {
    for op in Operation::ALL {
        assert_eq!(op.name().parse::<Operation>().unwrap(), op);
        assert_eq!(op.to_string(), op.name());
    }
    assert!(matches!(
        "divr".parse::<Operation>(),
        Err(VmError::UnknownOperation(name)) if name == "divr"
    ));
}

#[test]
fn test_catalog_indices_match_positions() {
    for (i, op) in Operation::ALL.into_iter().enumerate() {
        assert_eq!(op.index(), i);
        assert_eq!(Operation::from_index(i), Some(op));
    }
    assert_eq!(Operation::from_index(16), None);
}

#[test]
fn test_formats() {
    assert_eq!(Operation::Gtir.format(), OperandFormat::ImmReg);
    assert_eq!(Operation::Setr.format(), OperandFormat::Reg);
    assert!(!Operation::Seti.format().reads_register_a());
    assert!(Operation::Eqrr.format().reads_register_b());
    assert!(!Operation::Muli.format().reads_register_b());
}

#[test]
fn test_serde_uses_mnemonic() {
    assert_eq!(serde_json::to_string(&Operation::Bori).unwrap(), "\"bori\"");
    let op: Operation = serde_json::from_str("\"gtrr\"").unwrap();
    assert_eq!(op, Operation::Gtrr);
}

#[test]
fn test_operation_set_basics() {
    let mut set = OperationSet::EMPTY;
    assert!(set.is_empty());
    set.insert(Operation::Mulr);
    set.insert(Operation::Seti);
    set.insert(Operation::Mulr);
    assert_eq!(set.len(), 2);
    assert_eq!(set.single(), None);
    set.remove(Operation::Seti);
    assert_eq!(set.single(), Some(Operation::Mulr));
    assert_eq!(OperationSet::FULL.len(), 16);
    assert_eq!(OperationSet::FULL.intersection(set), set);
}

#[test]
fn test_operation_set_iterates_in_catalog_order() {
    let set: OperationSet = [Operation::Eqrr, Operation::Addi, Operation::Setr]
        .into_iter()
        .collect();
    let ops: Vec<Operation> = set.iter().collect();
    assert_eq!(ops, vec![Operation::Addi, Operation::Setr, Operation::Eqrr]);
    assert_eq!(set.intersection(OperationSet::EMPTY), OperationSet::EMPTY);
}

fn any_operation() -> impl Strategy<Value = Operation> {
    (0..16usize).prop_map(|i| Operation::ALL[i])
}

proptest! {
    #[test]
    fn prop_apply_writes_only_register_c(
        op in any_operation(),
        before in prop::array::uniform4(-1000i64..1000),
        a in 0i64..4,
        b in 0i64..4,
        c in 0i64..4,
    ) {
        let mut regs = RegisterFile::from_slice(&before);
        op.apply(&mut regs, a, b, c).unwrap();
        for (slot, (&old, &new)) in before.iter().zip(regs.as_slice()).enumerate() {
            if slot as i64 != c {
                prop_assert_eq!(old, new);
            }
        }
    }

    #[test]
    fn prop_comparisons_write_zero_or_one(
        op in prop::sample::select(vec![
            Operation::Gtir, Operation::Gtri, Operation::Gtrr,
            Operation::Eqir, Operation::Eqri, Operation::Eqrr,
        ]),
        before in prop::array::uniform4(any::<i64>()),
        a in 0i64..4,
        b in 0i64..4,
        c in 0i64..4,
    ) {
        let mut regs = RegisterFile::from_slice(&before);
        op.apply(&mut regs, a, b, c).unwrap();
        let written = regs.read(c).unwrap();
        prop_assert!(written == 0 || written == 1);
    }

    #[test]
    fn prop_arithmetic_matches_wrapping_ops(x in any::<i64>(), y in any::<i64>()) {
        let mut regs = RegisterFile::from_slice(&[x, y, 0, 0]);
        Operation::Addr.apply(&mut regs, 0, 1, 2).unwrap();
        Operation::Mulr.apply(&mut regs, 0, 1, 3).unwrap();
        prop_assert_eq!(regs.read(2).unwrap(), x.wrapping_add(y));
        prop_assert_eq!(regs.read(3).unwrap(), x.wrapping_mul(y));
    }
}
