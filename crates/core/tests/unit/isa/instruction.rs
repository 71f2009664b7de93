//! # Instruction Tests

use elfvm_core::common::RegisterFile;
use elfvm_core::isa::{Instruction, OpcodeId};
use elfvm_core::{Operation, VmError};

#[test]
fn test_opcode_id_accepts_zero_to_fifteen() {
    for raw in 0..16 {
        assert_eq!(i64::from(OpcodeId::new(raw).unwrap().get()), raw);
    }
    assert_eq!(OpcodeId::all().count(), 16);
}

#[test]
fn test_opcode_id_rejects_out_of_range() {
    assert!(matches!(OpcodeId::new(16), Err(VmError::UnknownOpcode(16))));
    assert!(matches!(OpcodeId::new(-1), Err(VmError::UnknownOpcode(-1))));
}

#[test]
fn test_opcode_id_serde_validates() {
    let id: OpcodeId = serde_json::from_str("15").unwrap();
    assert_eq!(id.index(), 15);
    assert!(serde_json::from_str::<OpcodeId>("16").is_err());
}

#[test]
fn test_execute_symbolic_instruction() {
    let mut regs = RegisterFile::new(3);
    Instruction::new(Operation::Seti, 5, 0, 1).execute(&mut regs).unwrap();
    assert_eq!(regs.as_slice(), &[0, 5, 0]);
}

#[test]
fn test_validate_checks_only_register_operands() {
    assert!(Instruction::new(Operation::Seti, 99, 99, 1).validate(2).is_ok());
    assert!(Instruction::new(Operation::Gtir, 99, 1, 0).validate(2).is_ok());
    assert!(matches!(
        Instruction::new(Operation::Gtir, 0, 5, 0).validate(2),
        Err(VmError::RegisterIndexOutOfRange { index: 5, count: 2 })
    ));
    assert!(matches!(
        Instruction::new(Operation::Addi, 0, 1, 2).validate(2),
        Err(VmError::RegisterIndexOutOfRange { index: 2, count: 2 })
    ));
}

#[test]
fn test_with_op_keeps_operands() {
    let raw = Instruction::new(OpcodeId::new(9).unwrap(), 2, 1, 2);
    let symbolic = raw.with_op(Operation::Mulr);
    assert_eq!(symbolic, Instruction::new(Operation::Mulr, 2, 1, 2));
}

#[test]
fn test_display() {
    assert_eq!(Instruction::new(Operation::Addi, 1, -1, 1).to_string(), "addi 1 -1 1");
    let raw = Instruction::new(OpcodeId::new(9).unwrap(), 2, 1, 2);
    assert_eq!(raw.to_string(), "9 2 1 2");
}
