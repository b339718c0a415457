//! Universal Machine Instruction Set
//!
//! 32-bit instructions with a 4-bit opcode and 3-bit register fields.
//!
//! ## Instruction Formats
//! - Standard:    [opcode:4][unused:19][A:3][B:3][C:3]
//! - Orthography: [opcode:4][A:3][value:25]

use crate::encoding::{encode_orthography, encode_standard};
use crate::error::{Result, UmError};
use crate::opcode::Opcode;
use crate::register::Register;
use crate::{Word, MAX_IMMEDIATE};
use serde::{Deserialize, Serialize};

/// Universal Machine instruction
///
/// Operand names follow the register roles of the standard layout: `a` is
/// bits 6-8, `b` bits 3-5, `c` bits 0-2. Operators that ignore a field do not
/// carry it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instruction {
    /// CMOV: if c != 0 { a = b }
    ConditionalMove { a: Register, b: Register, c: Register },

    /// INDEX: a = heap[b][c]
    ArrayIndex { a: Register, b: Register, c: Register },

    /// AMEND: heap[a][b] = c
    ArrayAmendment { a: Register, b: Register, c: Register },

    /// ADD: a = b + c (wrapping)
    Addition { a: Register, b: Register, c: Register },

    /// MUL: a = b * c (wrapping)
    Multiplication { a: Register, b: Register, c: Register },

    /// DIV: a = b / c (unsigned, faults on zero)
    Division { a: Register, b: Register, c: Register },

    /// NAND: a = !(b & c)
    NotAnd { a: Register, b: Register, c: Register },

    /// HALT
    Halt,

    /// ALLOC: b = new zeroed block of c words
    Allocation { b: Register, c: Register },

    /// FREE: abandon block c
    Abandonment { c: Register },

    /// OUT: emit byte c
    Output { c: Register },

    /// IN: c = next input byte or 0xFFFFFFFF
    Input { c: Register },

    /// LOAD: duplicate block b into block 0, jump to offset c
    LoadProgram { b: Register, c: Register },

    /// ORTHO: a = value (25-bit, zero-extended)
    Orthography { a: Register, value: Word },
}

impl Instruction {
    /// Build an orthography instruction, rejecting immediates wider than 25 bits
    pub fn orthography(a: Register, value: Word) -> Result<Self> {
        if value > MAX_IMMEDIATE {
            return Err(UmError::ImmediateOutOfRange(value));
        }
        Ok(Instruction::Orthography { a, value })
    }

    /// Opcode of this instruction
    pub fn opcode(&self) -> Opcode {
        match self {
            Instruction::ConditionalMove { .. } => Opcode::ConditionalMove,
            Instruction::ArrayIndex { .. } => Opcode::ArrayIndex,
            Instruction::ArrayAmendment { .. } => Opcode::ArrayAmendment,
            Instruction::Addition { .. } => Opcode::Addition,
            Instruction::Multiplication { .. } => Opcode::Multiplication,
            Instruction::Division { .. } => Opcode::Division,
            Instruction::NotAnd { .. } => Opcode::NotAnd,
            Instruction::Halt => Opcode::Halt,
            Instruction::Allocation { .. } => Opcode::Allocation,
            Instruction::Abandonment { .. } => Opcode::Abandonment,
            Instruction::Output { .. } => Opcode::Output,
            Instruction::Input { .. } => Opcode::Input,
            Instruction::LoadProgram { .. } => Opcode::LoadProgram,
            Instruction::Orthography { .. } => Opcode::Orthography,
        }
    }

    /// Encode to the canonical word (unused fields are zero)
    pub fn encode(&self) -> Word {
        let op = self.opcode();
        let r = |reg: &Register| reg.index() as u32;

        match self {
            Instruction::ConditionalMove { a, b, c }
            | Instruction::ArrayIndex { a, b, c }
            | Instruction::ArrayAmendment { a, b, c }
            | Instruction::Addition { a, b, c }
            | Instruction::Multiplication { a, b, c }
            | Instruction::Division { a, b, c }
            | Instruction::NotAnd { a, b, c } => encode_standard(op, r(a), r(b), r(c)),
            Instruction::Halt => encode_standard(op, 0, 0, 0),
            Instruction::Allocation { b, c } | Instruction::LoadProgram { b, c } => {
                encode_standard(op, 0, r(b), r(c))
            }
            Instruction::Abandonment { c }
            | Instruction::Output { c }
            | Instruction::Input { c } => encode_standard(op, 0, 0, r(c)),
            Instruction::Orthography { a, value } => encode_orthography(r(a), *value),
        }
    }
}
