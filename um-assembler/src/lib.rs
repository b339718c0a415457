//! Universal Machine Assembler
//!
//! Assemble UM assembly language into program images.
//!
//! ## Syntax
//!
//! One statement per line. `;` and `#` start comments. A line may begin with
//! any number of `label:` definitions.
//!
//! ```text
//! cmov  a, b, c      index a, b, c      amend a, b, c
//! add   a, b, c      mul   a, b, c      div   a, b, c
//! nand  a, b, c      halt               alloc b, c
//! free  c            out   c            in    c
//! load  b, c         ortho a, imm|label .word imm|label
//! ```
//!
//! Immediates may be decimal, `0x` hex, `0b` binary or character literals.
//!
//! ## Example
//!
//! ```rust
//! use um_assembler::assemble;
//!
//! let source = r#"
//!     ortho r0, 'H'
//!     out r0
//!     halt
//! "#;
//!
//! let program = assemble(source).unwrap();
//! assert_eq!(program.len(), 3);
//! ```

pub mod assembler;
pub mod error;
pub mod lexer;
pub mod parser;

pub use assembler::{assemble, SymbolTable};
pub use error::{AssemblerError, Result};
pub use parser::{parse_instruction, parse_register};
