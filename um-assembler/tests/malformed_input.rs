//! Tests for malformed input handling in the assembler

use um_assembler::{assemble, AssemblerError};

// ============================================================================
// Invalid Instruction Tests
// ============================================================================

#[test]
fn test_unknown_instruction() {
    let result = assemble("foobar r1, r2, r3");

    if let Err(AssemblerError::UnknownInstruction { line, mnemonic }) = result {
        assert_eq!(line, 1);
        assert_eq!(mnemonic, "foobar");
    } else {
        panic!("Expected UnknownInstruction error");
    }
}

#[test]
fn test_instruction_typo_reports_line() {
    let source = "halt\n\n  addd r1, r2, r3";
    let err = assemble(source).unwrap_err();
    assert_eq!(err.line(), Some(3));
}

#[test]
fn test_blank_lines_are_fine() {
    let source = r#"

        halt

    "#;
    assert!(assemble(source).is_ok());
}

// ============================================================================
// Operand Errors
// ============================================================================

#[test]
fn test_register_out_of_range() {
    let err = assemble("add r8, r1, r2").unwrap_err();
    assert!(matches!(err, AssemblerError::InvalidRegister { ref name, .. } if name == "r8"));
}

#[test]
fn test_immediate_where_register_expected() {
    let err = assemble("out 5").unwrap_err();
    assert!(matches!(err, AssemblerError::SyntaxError { line: 1, .. }));
}

#[test]
fn test_register_where_immediate_expected() {
    let err = assemble("ortho r0, r1").unwrap_err();
    assert!(matches!(err, AssemblerError::SyntaxError { .. }));
}

#[test]
fn test_too_many_operands() {
    let err = assemble("out r1, r2").unwrap_err();
    assert!(matches!(
        err,
        AssemblerError::OperandCount { expected: 1, found: 2, .. }
    ));
}

#[test]
fn test_trailing_comma() {
    let err = assemble("alloc r1,").unwrap_err();
    assert!(matches!(err, AssemblerError::SyntaxError { .. }));
}

#[test]
fn test_immediate_too_wide() {
    let err = assemble("ortho r0, 33554432").unwrap_err();
    assert!(matches!(err, AssemblerError::InvalidImmediate { value: 33_554_432, .. }));
}

#[test]
fn test_word_too_wide() {
    let err = assemble(".word 0x100000000").unwrap_err();
    assert!(matches!(err, AssemblerError::InvalidImmediate { .. }));
}

// ============================================================================
// Lexical and Directive Errors
// ============================================================================

#[test]
fn test_stray_character() {
    let err = assemble("halt\nout r0 $").unwrap_err();
    assert!(matches!(err, AssemblerError::SyntaxError { line: 2, .. }));
}

#[test]
fn test_unknown_directive() {
    let err = assemble(".ascii 1").unwrap_err();
    assert!(matches!(err, AssemblerError::InvalidDirective { ref name, .. } if name == "ascii"));
}

#[test]
fn test_word_requires_value() {
    let err = assemble(".word").unwrap_err();
    assert!(matches!(err, AssemblerError::OperandCount { expected: 1, found: 0, .. }));
}

#[test]
fn test_undefined_label_in_ortho() {
    let err = assemble("ortho r0, missing").unwrap_err();
    assert!(matches!(err, AssemblerError::UndefinedLabel { ref name, .. } if name == "missing"));
}
