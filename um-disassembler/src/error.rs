//! Disassembler errors

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DisassemblerError {
    #[error("Unknown opcode {opcode} in word 0x{word:08X}")]
    UnknownOpcode { opcode: u8, word: u32 },
}

pub type Result<T> = std::result::Result<T, DisassemblerError>;
