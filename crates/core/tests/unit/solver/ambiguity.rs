//! Sample Ambiguity Tests
//!
//! How many catalog operations a single sample is consistent with.

use crate::common::builder::{classic_sample, layered_samples, probe_sample, sample};
use elfvm_core::isa::{Instruction, OpcodeId, OperationSet};
use elfvm_core::solver::count_ambiguous;
use elfvm_core::{Operation, Sample, VmError, ambiguity_count};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn test_classic_sample_matches_three_operations() {
    let sample = classic_sample();
    let expected: OperationSet = [Operation::Mulr, Operation::Addi, Operation::Seti]
        .into_iter()
        .collect();
    assert_eq!(sample.candidates(), expected);
    assert_eq!(ambiguity_count(&sample), 3);
}

#[test]
fn test_every_probe_is_unambiguous() {
    for op in Operation::ALL {
        let sample = probe_sample(0, op);
        assert_eq!(ambiguity_count(&sample), 1, "probe for {op}");
        assert_eq!(sample.candidates().single(), Some(op));
    }
}

#[rstest]
#[case(1, 15)]
#[case(2, 1)]
#[case(3, 1)]
#[case(4, 0)]
fn test_count_ambiguous_by_threshold(#[case] threshold: usize, #[case] expected: usize) {
    assert_eq!(count_ambiguous(&layered_samples(), threshold), expected);
}

#[test]
fn test_count_ambiguous_of_nothing() {
    assert_eq!(count_ambiguous(&[], 3), 0);
}

#[test]
fn test_out_of_range_operand_is_inconsistent_not_fatal() {
    // addr reads r9, which a four-register sample does not have.
    let sample = sample([0, 0, 0, 0], 0, 9, 0, 0, [9, 0, 0, 0]);
    assert!(!sample.consistent_with(Operation::Addr));
    assert!(sample.consistent_with(Operation::Seti));
}

#[test]
fn test_out_of_range_destination_matches_nothing() {
    let sample = sample([1, 1, 1, 1], 0, 0, 0, 4, [1, 1, 1, 1]);
    assert_eq!(ambiguity_count(&sample), 0);
}

#[test]
fn test_sample_rejects_mismatched_lengths() {
    let instruction = Instruction::new(OpcodeId::new(0).unwrap(), 0, 0, 0);
    let err = Sample::new(vec![1, 2, 3, 4], instruction, vec![1, 2, 3]).unwrap_err();
    assert!(matches!(err, VmError::MalformedSample(_)));
}

#[test]
fn test_sample_rejects_empty_registers() {
    let instruction = Instruction::new(OpcodeId::new(0).unwrap(), 0, 0, 0);
    assert!(Sample::new(Vec::new(), instruction, Vec::new()).is_err());
}
