//! # Error Types for the Universal Machine specification

use thiserror::Error;

#[derive(Debug, Error)]
pub enum UmError {
    // Program image errors
    #[error("Malformed program image: {len} bytes is not a multiple of the 4-byte word size")]
    MalformedImage { len: usize },

    // Instruction errors
    #[error("Immediate value {0:#x} does not fit in 25 bits")]
    ImmediateOutOfRange(u32),

    // Trace encoding errors
    #[error("Trace encoding error: {0}")]
    TraceEncoding(#[from] bincode::Error),

    // I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, UmError>;
