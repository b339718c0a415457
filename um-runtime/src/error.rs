//! Runtime error types for the Universal Machine

use crate::heap::HeapError;
use thiserror::Error;
use um_spec::UmError;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Spec error: {0}")]
    SpecError(#[from] UmError),

    #[error("Unknown opcode {opcode} in word {word:#010x} at pc {pc:#x}")]
    UnknownOpcode { pc: u32, opcode: u8, word: u32 },

    #[error("{source} at pc {pc:#x}")]
    Heap {
        pc: u32,
        #[source]
        source: HeapError,
    },

    #[error("Division by zero at pc {pc:#x}")]
    DivisionByZero { pc: u32 },

    #[error("Output value {value} out of byte range at pc {pc:#x}")]
    OutputRangeError { pc: u32, value: u32 },

    #[error("Program counter {pc:#x} past end of program ({len} words)")]
    ProgramCounterOutOfRange { pc: u32, len: usize },

    #[error("I/O error at pc {pc:#x}: {source}")]
    Io {
        pc: u32,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Stable classification of a fatal condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedImage,
    UnknownOpcode,
    OutOfBoundsArray,
    OutOfBoundsOffset,
    InvalidReclaim,
    DivisionByZero,
    OutputRange,
    ProgramCounterOutOfRange,
    AllocationTooLarge,
    HeapExhausted,
    OutOfMemory,
    Io,
    Other,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::MalformedImage => "malformed image",
            ErrorKind::UnknownOpcode => "unknown opcode",
            ErrorKind::OutOfBoundsArray => "out of bounds array",
            ErrorKind::OutOfBoundsOffset => "out of bounds offset",
            ErrorKind::InvalidReclaim => "invalid reclaim",
            ErrorKind::DivisionByZero => "division by zero",
            ErrorKind::OutputRange => "output range",
            ErrorKind::ProgramCounterOutOfRange => "program counter out of range",
            ErrorKind::AllocationTooLarge => "allocation too large",
            ErrorKind::HeapExhausted => "heap exhausted",
            ErrorKind::OutOfMemory => "out of memory",
            ErrorKind::Io => "i/o",
            ErrorKind::Other => "other",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl RuntimeError {
    pub(crate) fn heap(pc: u32, source: HeapError) -> Self {
        RuntimeError::Heap { pc, source }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            RuntimeError::SpecError(UmError::MalformedImage { .. }) => ErrorKind::MalformedImage,
            RuntimeError::SpecError(UmError::IoError(_)) => ErrorKind::Io,
            RuntimeError::SpecError(_) => ErrorKind::Other,
            RuntimeError::UnknownOpcode { .. } => ErrorKind::UnknownOpcode,
            RuntimeError::Heap { source, .. } => match source {
                HeapError::OutOfBoundsArray { .. } => ErrorKind::OutOfBoundsArray,
                HeapError::OutOfBoundsOffset { .. } => ErrorKind::OutOfBoundsOffset,
                HeapError::InvalidReclaim { .. } => ErrorKind::InvalidReclaim,
                HeapError::AllocationTooLarge { .. } => ErrorKind::AllocationTooLarge,
                HeapError::IndexSpaceExhausted => ErrorKind::HeapExhausted,
                HeapError::OutOfMemory { .. } => ErrorKind::OutOfMemory,
            },
            RuntimeError::DivisionByZero { .. } => ErrorKind::DivisionByZero,
            RuntimeError::OutputRangeError { .. } => ErrorKind::OutputRange,
            RuntimeError::ProgramCounterOutOfRange { .. } => ErrorKind::ProgramCounterOutOfRange,
            RuntimeError::Io { .. } => ErrorKind::Io,
        }
    }

    /// Instruction pointer of the failing instruction, if the error happened while running
    pub fn pc(&self) -> Option<u32> {
        match self {
            RuntimeError::SpecError(_) => None,
            RuntimeError::UnknownOpcode { pc, .. }
            | RuntimeError::Heap { pc, .. }
            | RuntimeError::DivisionByZero { pc }
            | RuntimeError::OutputRangeError { pc, .. }
            | RuntimeError::ProgramCounterOutOfRange { pc, .. }
            | RuntimeError::Io { pc, .. } => Some(*pc),
        }
    }
}
