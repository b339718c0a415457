//! Main disassembler logic

use um_spec::Program;
use crate::error::Result;
use crate::decoder::decode;
use crate::formatter::format;

/// Disassemble a program into assembly text
///
/// Undecodable words are emitted as `.word` directives so the listing can be
/// fed back to the assembler.
pub fn disassemble(program: &Program) -> Result<String> {
    let mut output = String::new();

    output.push_str("; Universal Machine Disassembly\n");
    output.push_str(&format!("; Words: {}\n", program.len()));
    output.push_str(&format!("; SHA-256: {}\n", program.checksum_hex()));
    output.push('\n');

    for (offset, &word) in program.code.iter().enumerate() {
        output.push_str(&disassemble_word(offset as u32, word));
        output.push('\n');
    }

    Ok(output)
}

/// Render one listing line: offset, raw word, and assembly text
pub fn disassemble_word(offset: u32, word: u32) -> String {
    let text = match decode(word) {
        Ok(instr) => format(&instr),
        Err(e) => format!(".word 0x{:08X}  ; {}", word, e),
    };
    format!("0x{:08X}:  {:08X}  {}", offset, word, text)
}
