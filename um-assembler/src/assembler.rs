//! Main assembler logic
//!
//! Two passes: the first parses every line and assigns word offsets to labels,
//! the second resolves label operands and encodes.

use crate::error::{AssemblerError, Result};
use crate::parser::{build_instruction, parse_line, word_value, Line, Operand, Statement};
use std::collections::HashMap;
use um_spec::{Program, Word};

/// Label name to word offset in block 0
pub type SymbolTable = HashMap<String, u32>;

/// Assemble source code into a program
pub fn assemble(source: &str) -> Result<Program> {
    let (lines, symbols) = first_pass(source)?;

    let mut code = Vec::with_capacity(lines.len());
    for line in &lines {
        if let Some(statement) = &line.statement {
            code.push(encode_statement(statement, line.number, &symbols)?);
        }
    }

    Ok(Program::new(code))
}

/// Parse all lines and collect label offsets
pub fn first_pass(source: &str) -> Result<(Vec<Line>, SymbolTable)> {
    let mut lines = Vec::new();
    let mut symbols = SymbolTable::new();
    let mut offset: usize = 0;

    for (index, text) in source.lines().enumerate() {
        let line = parse_line(text, index + 1)?;

        for label in &line.labels {
            let address = u32::try_from(offset)
                .map_err(|_| AssemblerError::ProgramTooLarge { words: offset })?;
            if symbols.insert(label.clone(), address).is_some() {
                return Err(AssemblerError::DuplicateLabel {
                    line: line.number,
                    name: label.clone(),
                });
            }
        }

        if line.statement.is_some() {
            offset += 1;
            lines.push(line);
        }
    }

    Ok((lines, symbols))
}

fn encode_statement(statement: &Statement, line: usize, symbols: &SymbolTable) -> Result<Word> {
    match statement {
        Statement::Instruction { mnemonic, operands } => {
            let instr = build_instruction(mnemonic, operands, line, |name| symbols.get(name).copied())?;
            Ok(instr.encode())
        }
        Statement::Word(Operand::Immediate(value)) => word_value(*value, line),
        Statement::Word(Operand::Label(name)) => {
            symbols
                .get(name)
                .copied()
                .ok_or_else(|| AssemblerError::UndefinedLabel {
                    line,
                    name: name.clone(),
                })
        }
        Statement::Word(Operand::Register(r)) => Err(AssemblerError::SyntaxError {
            line,
            column: 0,
            message: format!(".word takes a number or label, found register {}", r),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_simple() {
        let source = r#"
            ; Simple test
            ortho r0, 'H'
            out r0
            halt
        "#;

        let program = assemble(source).unwrap();
        assert_eq!(program.code, vec![0xD000_0048, 0xA000_0000, 0x7000_0000]);
    }

    #[test]
    fn test_forward_label() {
        let source = r#"
            ortho r1, end
            load r0, r1
            .word 0xDEADBEEF
        end:
            halt
        "#;

        let program = assemble(source).unwrap();
        assert_eq!(program.code[0], 0xD200_0003);
        assert_eq!(program.code[2], 0xDEAD_BEEF);
    }

    #[test]
    fn test_label_on_own_line_binds_next_word() {
        let (_, symbols) = first_pass("a:\n\n  b: halt\nc: halt").unwrap();
        assert_eq!(symbols["a"], 0);
        assert_eq!(symbols["b"], 0);
        assert_eq!(symbols["c"], 1);
    }

    #[test]
    fn test_trailing_label_points_past_end() {
        let (_, symbols) = first_pass("halt\nend:").unwrap();
        assert_eq!(symbols["end"], 1);
    }

    #[test]
    fn test_duplicate_label() {
        let err = assemble("x: halt\nx: halt").unwrap_err();
        assert!(matches!(err, AssemblerError::DuplicateLabel { line: 2, .. }));
    }

    #[test]
    fn test_undefined_label_reports_line() {
        let err = assemble("halt\n.word nowhere").unwrap_err();
        assert!(matches!(err, AssemblerError::UndefinedLabel { line: 2, .. }));
    }

    #[test]
    fn test_word_label_value() {
        let program = assemble("halt\ndata: .word data").unwrap();
        assert_eq!(program.code, vec![0x7000_0000, 1]);
    }
}
