//! # Universal Machine Opcode Definitions
//!
//! Opcodes are 4 bits (bits 28-31 of every instruction word). Values 0-13 are
//! defined; 14 and 15 are invalid and fault when executed.
//!
//! ## Opcode Families
//! - 0x0-0x2: Move and array access (CMOV, INDEX, AMEND)
//! - 0x3-0x6: Arithmetic and logic (ADD, MUL, DIV, NAND)
//! - 0x7: Halt
//! - 0x8-0x9: Heap management (ALLOC, FREE)
//! - 0xA-0xB: Console I/O (OUT, IN)
//! - 0xC: Load program
//! - 0xD: Orthography (load immediate)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Instruction opcode (4 bits, values 0x0-0xD)
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    /// CMOV: if rC != 0 then rA = rB
    ConditionalMove = 0x0,
    /// INDEX: rA = block[rB][rC]
    ArrayIndex = 0x1,
    /// AMEND: block[rA][rB] = rC
    ArrayAmendment = 0x2,
    /// ADD: rA = rB + rC (mod 2^32)
    Addition = 0x3,
    /// MUL: rA = rB * rC (mod 2^32)
    Multiplication = 0x4,
    /// DIV: rA = rB / rC (unsigned)
    Division = 0x5,
    /// NAND: rA = !(rB & rC)
    NotAnd = 0x6,
    /// HALT: stop the machine
    Halt = 0x7,
    /// ALLOC: rB = index of a new zeroed block of rC words
    Allocation = 0x8,
    /// FREE: abandon block rC
    Abandonment = 0x9,
    /// OUT: write byte rC
    Output = 0xA,
    /// IN: rC = next input byte, or all ones at end of input
    Input = 0xB,
    /// LOAD: block 0 = copy of block rB; finger = rC
    LoadProgram = 0xC,
    /// ORTHO: rA = 25-bit immediate
    Orthography = 0xD,
}

impl Opcode {
    /// All defined opcodes in numeric order
    pub const ALL: [Opcode; 14] = [
        Opcode::ConditionalMove,
        Opcode::ArrayIndex,
        Opcode::ArrayAmendment,
        Opcode::Addition,
        Opcode::Multiplication,
        Opcode::Division,
        Opcode::NotAnd,
        Opcode::Halt,
        Opcode::Allocation,
        Opcode::Abandonment,
        Opcode::Output,
        Opcode::Input,
        Opcode::LoadProgram,
        Opcode::Orthography,
    ];

    /// Try to convert from u8
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }

    /// Convert to u8
    #[inline]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Assembly mnemonic
    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::ConditionalMove => "cmov",
            Opcode::ArrayIndex => "index",
            Opcode::ArrayAmendment => "amend",
            Opcode::Addition => "add",
            Opcode::Multiplication => "mul",
            Opcode::Division => "div",
            Opcode::NotAnd => "nand",
            Opcode::Halt => "halt",
            Opcode::Allocation => "alloc",
            Opcode::Abandonment => "free",
            Opcode::Output => "out",
            Opcode::Input => "in",
            Opcode::LoadProgram => "load",
            Opcode::Orthography => "ortho",
        }
    }

    /// Look up an opcode by mnemonic (case-insensitive)
    pub fn from_mnemonic(mnemonic: &str) -> Option<Self> {
        let lower = mnemonic.to_ascii_lowercase();
        Self::ALL.iter().copied().find(|op| op.mnemonic() == lower)
    }

    /// Whether this opcode uses the orthography (immediate) layout
    #[inline]
    pub fn is_orthography(self) -> bool {
        self == Opcode::Orthography
    }
}

impl TryFrom<u8> for Opcode {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Opcode::from_u8(value).ok_or(value)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_values() {
        assert_eq!(Opcode::ConditionalMove.to_u8(), 0);
        assert_eq!(Opcode::Halt.to_u8(), 7);
        assert_eq!(Opcode::Orthography.to_u8(), 13);
    }

    #[test]
    fn test_from_u8_defined() {
        for value in 0u8..14 {
            let op = Opcode::from_u8(value).unwrap();
            assert_eq!(op.to_u8(), value);
        }
    }

    #[test]
    fn test_from_u8_invalid() {
        assert_eq!(Opcode::from_u8(14), None);
        assert_eq!(Opcode::from_u8(15), None);
        assert_eq!(Opcode::try_from(15u8), Err(15));
    }

    #[test]
    fn test_mnemonic_roundtrip() {
        for op in Opcode::ALL {
            assert_eq!(Opcode::from_mnemonic(op.mnemonic()), Some(op));
        }
        assert_eq!(Opcode::from_mnemonic("HALT"), Some(Opcode::Halt));
        assert_eq!(Opcode::from_mnemonic("jmp"), None);
    }

    #[test]
    fn test_only_orthography_is_immediate() {
        let immediates: Vec<_> = Opcode::ALL.iter().filter(|op| op.is_orthography()).collect();
        assert_eq!(immediates, vec![&Opcode::Orthography]);
    }
}
