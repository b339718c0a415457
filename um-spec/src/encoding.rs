//! # Instruction Encoding Constants and Helpers
//!
//! Centralized bit positions and pure field extraction for Universal Machine
//! instruction words. Extraction never fails: any word yields fields, and the
//! opcode is validated later by the decoder.
//!
//! ## Instruction Format (32-bit)
//!
//! ```text
//! Standard:    [opcode:4][unused:19][A:3][B:3][C:3]
//! Orthography: [opcode:4][A:3][value:25]
//! ```

use crate::Opcode;

// ============================================================================
// Bit Position Constants
// ============================================================================

/// Opcode field: bits 28-31 (4 bits)
pub const OPCODE_SHIFT: u32 = 28;

/// Register A field: bits 6-8 (3 bits)
pub const REG_A_SHIFT: u32 = 6;

/// Register B field: bits 3-5 (3 bits)
pub const REG_B_SHIFT: u32 = 3;

/// Register C field: bits 0-2 (3 bits)
pub const REG_C_SHIFT: u32 = 0;

/// Orthography target register: bits 25-27 (3 bits)
pub const ORTHO_REG_SHIFT: u32 = 25;

// ============================================================================
// Field Masks
// ============================================================================

/// Opcode mask (4 bits)
pub const OPCODE_MASK: u32 = 0xF;

/// Register field mask (3 bits)
pub const REGISTER_MASK: u32 = 0x7;

/// Orthography immediate mask (25 bits)
pub const IMMEDIATE_MASK: u32 = 0x01FF_FFFF;

// ============================================================================
// Field Extraction Functions
// ============================================================================

/// Extract raw opcode nibble (bits 28-31)
#[inline]
pub const fn extract_opcode(inst: u32) -> u32 {
    (inst >> OPCODE_SHIFT) & OPCODE_MASK
}

/// Extract register A (bits 6-8)
#[inline]
pub const fn extract_reg_a(inst: u32) -> u32 {
    (inst >> REG_A_SHIFT) & REGISTER_MASK
}

/// Extract register B (bits 3-5)
#[inline]
pub const fn extract_reg_b(inst: u32) -> u32 {
    (inst >> REG_B_SHIFT) & REGISTER_MASK
}

/// Extract register C (bits 0-2)
#[inline]
pub const fn extract_reg_c(inst: u32) -> u32 {
    (inst >> REG_C_SHIFT) & REGISTER_MASK
}

/// Extract orthography target register (bits 25-27)
#[inline]
pub const fn extract_ortho_reg(inst: u32) -> u32 {
    (inst >> ORTHO_REG_SHIFT) & REGISTER_MASK
}

/// Extract orthography immediate (bits 0-24), zero-extended
#[inline]
pub const fn extract_immediate(inst: u32) -> u32 {
    inst & IMMEDIATE_MASK
}

/// All fields of a word, extracted under both layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fields {
    pub opcode: u8,
    pub a: u32,
    pub b: u32,
    pub c: u32,
    pub ortho_reg: u32,
    pub immediate: u32,
}

impl Fields {
    #[inline]
    pub const fn of(inst: u32) -> Self {
        Self {
            opcode: extract_opcode(inst) as u8,
            a: extract_reg_a(inst),
            b: extract_reg_b(inst),
            c: extract_reg_c(inst),
            ortho_reg: extract_ortho_reg(inst),
            immediate: extract_immediate(inst),
        }
    }
}

// ============================================================================
// Instruction Encoding Functions
// ============================================================================

/// Encode standard-layout instruction
#[inline]
pub const fn encode_standard(opcode: Opcode, a: u32, b: u32, c: u32) -> u32 {
    ((opcode.to_u8() as u32 & OPCODE_MASK) << OPCODE_SHIFT)
        | ((a & REGISTER_MASK) << REG_A_SHIFT)
        | ((b & REGISTER_MASK) << REG_B_SHIFT)
        | ((c & REGISTER_MASK) << REG_C_SHIFT)
}

/// Encode orthography instruction; bits of `value` above 25 are dropped
#[inline]
pub const fn encode_orthography(reg: u32, value: u32) -> u32 {
    ((Opcode::Orthography.to_u8() as u32) << OPCODE_SHIFT)
        | ((reg & REGISTER_MASK) << ORTHO_REG_SHIFT)
        | (value & IMMEDIATE_MASK)
}
