//! # Universal Machine Specification
//!
//! 32-bit register machine with a heap of indexable word blocks.
//!
//! ## Key Features
//! - 32-bit words ("platters"), all arithmetic wraps modulo 2^32
//! - 8 general-purpose registers (r0-r7)
//! - 14 operators with a 4-bit opcode in the top nibble
//! - Block 0 holds the executing program; other blocks are allocated at runtime
//! - Program images are sequences of big-endian 32-bit words

pub mod register;
pub mod opcode;
pub mod encoding;
pub mod instruction;
pub mod error;
pub mod program;
pub mod trace;

pub use register::{Register, NUM_REGISTERS};
pub use opcode::Opcode;
pub use instruction::Instruction;
pub use error::{UmError, Result};
pub use program::Program;
pub use trace::TraceRow;

/// Word size ("platter"): unsigned 32-bit
pub type Word = u32;

/// Bytes per word in a program image
pub const WORD_BYTES: usize = 4;

/// Value placed in a register by Input at end-of-stream
pub const EOF_SENTINEL: Word = 0xFFFF_FFFF;

/// Largest value Output accepts
pub const MAX_OUTPUT: Word = 255;

/// Largest immediate an Orthography instruction can carry (25 bits)
pub const MAX_IMMEDIATE: Word = (1 << 25) - 1;

/// Index of the program block
pub const PROGRAM_BLOCK: Word = 0;
