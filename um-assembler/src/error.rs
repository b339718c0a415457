//! Assembler errors

use thiserror::Error;

/// Errors raised while assembling source text
///
/// Line numbers are 1-based; columns are 1-based byte offsets within the line.
#[derive(Debug, Error)]
pub enum AssemblerError {
    #[error("Syntax error at line {line}, column {column}: {message}")]
    SyntaxError {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Unknown instruction at line {line}: {mnemonic}")]
    UnknownInstruction { line: usize, mnemonic: String },

    #[error("Invalid register at line {line}: {name}")]
    InvalidRegister { line: usize, name: String },

    #[error("Invalid immediate value at line {line}: {value}")]
    InvalidImmediate { line: usize, value: i64 },

    #[error("Wrong number of operands at line {line}: {mnemonic} takes {expected}, found {found}")]
    OperandCount {
        line: usize,
        mnemonic: String,
        expected: usize,
        found: usize,
    },

    #[error("Undefined label at line {line}: {name}")]
    UndefinedLabel { line: usize, name: String },

    #[error("Duplicate label at line {line}: {name}")]
    DuplicateLabel { line: usize, name: String },

    #[error("Invalid directive at line {line}: .{name}")]
    InvalidDirective { line: usize, name: String },

    #[error("Program too large: {words} words exceed the addressable range")]
    ProgramTooLarge { words: usize },
}

pub type Result<T> = std::result::Result<T, AssemblerError>;

impl AssemblerError {
    /// Source line the error refers to, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            AssemblerError::SyntaxError { line, .. }
            | AssemblerError::UnknownInstruction { line, .. }
            | AssemblerError::InvalidRegister { line, .. }
            | AssemblerError::InvalidImmediate { line, .. }
            | AssemblerError::OperandCount { line, .. }
            | AssemblerError::UndefinedLabel { line, .. }
            | AssemblerError::DuplicateLabel { line, .. }
            | AssemblerError::InvalidDirective { line, .. } => Some(*line),
            AssemblerError::ProgramTooLarge { .. } => None,
        }
    }
}
