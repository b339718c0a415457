//! Instruction formatting to assembly text

use um_spec::{Instruction, Register};

/// Format instruction as assembly text
pub fn format(instr: &Instruction) -> String {
    let mnemonic = instr.opcode().mnemonic();

    match instr {
        // ========== Three-register operators ==========
        Instruction::ConditionalMove { a, b, c }
        | Instruction::ArrayIndex { a, b, c }
        | Instruction::ArrayAmendment { a, b, c }
        | Instruction::Addition { a, b, c }
        | Instruction::Multiplication { a, b, c }
        | Instruction::Division { a, b, c }
        | Instruction::NotAnd { a, b, c } => {
            format!("{} {}, {}, {}", mnemonic, format_reg(*a), format_reg(*b), format_reg(*c))
        }

        // ========== No operands ==========
        Instruction::Halt => mnemonic.to_string(),

        // ========== Two-register operators ==========
        Instruction::Allocation { b, c } | Instruction::LoadProgram { b, c } => {
            format!("{} {}, {}", mnemonic, format_reg(*b), format_reg(*c))
        }

        // ========== Single register ==========
        Instruction::Abandonment { c } | Instruction::Output { c } | Instruction::Input { c } => {
            format!("{} {}", mnemonic, format_reg(*c))
        }

        // ========== Immediate ==========
        Instruction::Orthography { a, value } => {
            format!("{} {}, {}", mnemonic, format_reg(*a), value)
        }
    }
}

fn format_reg(reg: Register) -> &'static str {
    reg.name()
}
