//! # Universal Machine Disassembler
//!
//! Decode instruction words into typed instructions and render program images
//! as assembly listings.
//!
//! The decoder is the validating half of the codec: the runtime uses
//! [`decode`] for every fetched word, so an opcode of 14 or 15 surfaces as
//! [`DisassemblerError::UnknownOpcode`].
//!
//! ## Example
//!
//! ```rust
//! use um_spec::Program;
//! use um_disassembler::disassemble;
//!
//! let program = Program::new(vec![0xD000_0048, 0xA000_0000, 0x7000_0000]);
//! let asm = disassemble(&program).unwrap();
//! assert!(asm.contains("ortho r0, 72"));
//! ```

pub mod error;
pub mod decoder;
pub mod formatter;
pub mod disassembler;

pub use error::{DisassemblerError, Result};
pub use disassembler::{disassemble, disassemble_word};
pub use decoder::decode;
pub use formatter::format;
