//! # Universal Machine Runtime
//!
//! Execute Universal Machine program images.
//!
//! The machine has eight 32-bit registers, an instruction pointer into
//! block 0, and a heap of word blocks addressed by integer indices. Block 0
//! holds the running program and can be replaced wholesale by `load`.
//!
//! ## Example
//!
//! ```rust
//! use um_runtime::{VM, VMConfig};
//! use um_spec::{Instruction, Program, Register};
//!
//! let program = Program::from_instructions(&[
//!     Instruction::Orthography { a: Register::R0, value: 72 },
//!     Instruction::Output { c: Register::R0 },
//!     Instruction::Halt,
//! ]);
//! let mut vm = VM::with_input(program, vec![], VMConfig::default());
//! let result = vm.run().unwrap();
//! assert_eq!(result.cycles, 3);
//! assert_eq!(vm.io().outputs(), b"H");
//! ```

pub mod error;
pub mod execute;
pub mod heap;
pub mod io;
pub mod state;
pub mod vm;

pub use error::{ErrorKind, Result, RuntimeError};
pub use heap::{Heap, HeapError, HeapStats};
pub use io::IOHandler;
pub use state::{HaltReason, VMState};
pub use vm::{ExecutionResult, VMConfig, VM};

/// Simple execution helper
///
/// Runs a program to completion on the given input and returns its output.
pub fn run(program: um_spec::Program, inputs: Vec<u8>) -> Result<Vec<u8>> {
    let mut vm = VM::with_input(program, inputs, VMConfig::default());
    vm.run()?;
    Ok(vm.into_io().take_outputs())
}
