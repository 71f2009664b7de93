//! # Error Tests

use elfvm_core::VmError;

#[test]
fn test_malformed_program_display_names_line() {
    let err = VmError::malformed(7, "empty instruction");
    assert_eq!(err.to_string(), "malformed program at line 7: empty instruction");
}

#[test]
fn test_register_out_of_range_display() {
    let err = VmError::RegisterIndexOutOfRange { index: 9, count: 6 };
    assert!(err.to_string().contains("register index 9"));
    assert!(err.to_string().contains("6 registers"));
}

#[test]
fn test_unsolvable_mapping_display_lists_ids() {
    let err = VmError::UnsolvableMapping {
        unresolved: vec![3, 9],
    };
    assert!(err.to_string().contains("[3, 9]"));
}

#[test]
fn test_empty_signature_display() {
    assert!(VmError::EmptySignature.to_string().contains("no registers"));
}

#[test]
fn test_unknown_operation_display() {
    assert_eq!(
        VmError::UnknownOperation("divr".into()).to_string(),
        "unknown operation `divr`"
    );
}

#[test]
fn test_io_error_exposes_source() {
    use std::error::Error;

    let err = VmError::Io {
        path: "missing.txt".into(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
    };
    assert!(err.source().is_some());
    assert!(err.to_string().contains("missing.txt"));
}
