//! Additional encoding tests for edge cases not covered in unit tests

use um_spec::encoding::*;
use um_spec::{Instruction, Opcode, Program, Register, UmError, MAX_IMMEDIATE};

// ============================================================================
// Field Layout Edge Cases
// ============================================================================

#[test]
fn test_orthography_register_does_not_overlap_immediate() {
    // Target register bits (25-27) sit directly above the 25-bit immediate
    let inst = encode_orthography(7, 0);
    assert_eq!(extract_ortho_reg(inst), 7);
    assert_eq!(extract_immediate(inst), 0);

    let inst = encode_orthography(0, MAX_IMMEDIATE);
    assert_eq!(extract_ortho_reg(inst), 0);
    assert_eq!(extract_immediate(inst), MAX_IMMEDIATE);
}

#[test]
fn test_standard_fields_on_orthography_word() {
    // Standard fields are still extractable from an orthography word
    let inst = encode_orthography(2, 0b111_110_101);
    let fields = Fields::of(inst);
    assert_eq!(fields.opcode, 13);
    assert_eq!((fields.a, fields.b, fields.c), (7, 6, 5));
}

#[test]
fn test_invalid_opcodes_still_extract() {
    for word in [0xE000_0000u32, 0xFFFF_FFFF] {
        let fields = Fields::of(word);
        assert!(fields.opcode >= 14);
        assert!(Opcode::from_u8(fields.opcode).is_none());
    }
}

// ============================================================================
// Exhaustive register coverage
// ============================================================================

#[test]
fn test_standard_roundtrip_all_registers() {
    for a in 0..8 {
        for b in 0..8 {
            for c in 0..8 {
                let inst = encode_standard(Opcode::NotAnd, a, b, c);
                assert_eq!(extract_opcode(inst), 6);
                assert_eq!(extract_reg_a(inst), a);
                assert_eq!(extract_reg_b(inst), b);
                assert_eq!(extract_reg_c(inst), c);
            }
        }
    }
}

#[test]
fn test_every_opcode_encodes_into_top_nibble() {
    for op in Opcode::ALL {
        let inst = encode_standard(op, 0, 0, 0);
        assert_eq!(inst, (op.to_u8() as u32) << 28);
    }
}

// ============================================================================
// Typed instructions and images
// ============================================================================

#[test]
fn test_instruction_encoding_matches_field_helpers() {
    let instr = Instruction::ArrayAmendment {
        a: Register::R4,
        b: Register::R5,
        c: Register::R6,
    };
    let word = instr.encode();
    assert_eq!(word, encode_standard(Opcode::ArrayAmendment, 4, 5, 6));
}

#[test]
fn test_image_rejects_trailing_bytes() {
    for len in [1usize, 2, 3, 5, 9] {
        let bytes = vec![0u8; len];
        match Program::from_bytes(&bytes) {
            Err(UmError::MalformedImage { len: reported }) => assert_eq!(reported, len),
            other => panic!("expected MalformedImage for {} bytes, got {:?}", len, other),
        }
    }
}

#[test]
fn test_image_roundtrip_through_file() {
    let dir = std::env::temp_dir().join(format!("um-spec-image-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("hello.um");

    let program = Program::from_instructions(&[
        Instruction::Orthography { a: Register::R0, value: 72 },
        Instruction::Output { c: Register::R0 },
        Instruction::Halt,
    ]);
    program.save(&path).unwrap();

    let loaded = Program::load(&path).unwrap();
    assert_eq!(loaded, program);
    assert_eq!(std::fs::metadata(&path).unwrap().len(), 12);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_load_missing_file_is_io_error() {
    let err = Program::load("/nonexistent/path/to/image.um").unwrap_err();
    assert!(matches!(err, UmError::IoError(_)));
}
