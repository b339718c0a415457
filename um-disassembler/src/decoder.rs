//! Instruction decoder

use um_spec::encoding::Fields;
use um_spec::{Instruction, Opcode, Register};
use crate::error::{DisassemblerError, Result};

/// Decode 32-bit instruction word
///
/// Field extraction never fails; only opcodes 14 and 15 are rejected.
pub fn decode(word: u32) -> Result<Instruction> {
    let fields = Fields::of(word);
    let opcode = Opcode::from_u8(fields.opcode).ok_or(DisassemblerError::UnknownOpcode {
        opcode: fields.opcode,
        word,
    })?;

    let a = Register::from_bits(fields.a);
    let b = Register::from_bits(fields.b);
    let c = Register::from_bits(fields.c);

    let instr = match opcode {
        Opcode::ConditionalMove => Instruction::ConditionalMove { a, b, c },
        Opcode::ArrayIndex => Instruction::ArrayIndex { a, b, c },
        Opcode::ArrayAmendment => Instruction::ArrayAmendment { a, b, c },
        Opcode::Addition => Instruction::Addition { a, b, c },
        Opcode::Multiplication => Instruction::Multiplication { a, b, c },
        Opcode::Division => Instruction::Division { a, b, c },
        Opcode::NotAnd => Instruction::NotAnd { a, b, c },
        Opcode::Halt => Instruction::Halt,
        Opcode::Allocation => Instruction::Allocation { b, c },
        Opcode::Abandonment => Instruction::Abandonment { c },
        Opcode::Output => Instruction::Output { c },
        Opcode::Input => Instruction::Input { c },
        Opcode::LoadProgram => Instruction::LoadProgram { b, c },
        Opcode::Orthography => Instruction::Orthography {
            a: Register::from_bits(fields.ortho_reg),
            value: fields.immediate,
        },
    };

    Ok(instr)
}
