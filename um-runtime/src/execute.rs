//! Instruction execution for the Universal Machine
//!
//! The VM advances the instruction pointer before calling [`execute`], so
//! `state.pc` already names the next word. `pc` is the offset the instruction
//! was fetched from and is only used to report errors.

use crate::error::{Result, RuntimeError};
use crate::heap::Heap;
use crate::io::IOHandler;
use crate::state::{HaltReason, VMState};
use std::io::{Read, Write};
use um_spec::{Instruction, MAX_OUTPUT};

/// Execute single instruction
pub fn execute<R: Read, W: Write>(
    instr: &Instruction,
    pc: u32,
    state: &mut VMState,
    heap: &mut Heap,
    io: &mut IOHandler<R, W>,
) -> Result<()> {
    match *instr {
        // ========== Register operations ==========
        Instruction::ConditionalMove { a, b, c } => {
            if state.read_reg(c) != 0 {
                state.write_reg(a, state.read_reg(b));
            }
        }

        Instruction::Addition { a, b, c } => {
            state.write_reg(a, state.read_reg(b).wrapping_add(state.read_reg(c)));
        }

        Instruction::Multiplication { a, b, c } => {
            state.write_reg(a, state.read_reg(b).wrapping_mul(state.read_reg(c)));
        }

        Instruction::Division { a, b, c } => {
            let divisor = state.read_reg(c);
            if divisor == 0 {
                return Err(RuntimeError::DivisionByZero { pc });
            }
            state.write_reg(a, state.read_reg(b) / divisor);
        }

        Instruction::NotAnd { a, b, c } => {
            state.write_reg(a, !(state.read_reg(b) & state.read_reg(c)));
        }

        Instruction::Orthography { a, value } => {
            state.write_reg(a, value);
        }

        // ========== Heap operations ==========
        Instruction::ArrayIndex { a, b, c } => {
            let value = heap
                .read(state.read_reg(b), state.read_reg(c))
                .map_err(|e| RuntimeError::heap(pc, e))?;
            state.write_reg(a, value);
        }

        Instruction::ArrayAmendment { a, b, c } => {
            heap.write(state.read_reg(a), state.read_reg(b), state.read_reg(c))
                .map_err(|e| RuntimeError::heap(pc, e))?;
        }

        Instruction::Allocation { b, c } => {
            let index = heap
                .allocate(state.read_reg(c))
                .map_err(|e| RuntimeError::heap(pc, e))?;
            state.write_reg(b, index);
        }

        Instruction::Abandonment { c } => {
            heap.reclaim(state.read_reg(c))
                .map_err(|e| RuntimeError::heap(pc, e))?;
        }

        // ========== I/O ==========
        Instruction::Output { c } => {
            let value = state.read_reg(c);
            if value > MAX_OUTPUT {
                return Err(RuntimeError::OutputRangeError { pc, value });
            }
            io.write_byte(value as u8)
                .map_err(|source| RuntimeError::Io { pc, source })?;
        }

        Instruction::Input { c } => {
            let value = io
                .read_byte()
                .map_err(|source| RuntimeError::Io { pc, source })?;
            state.write_reg(c, value);
        }

        // ========== Control flow ==========
        Instruction::Halt => {
            state.halt(HaltReason::Halt);
        }

        Instruction::LoadProgram { b, c } => {
            let source = state.read_reg(b);
            if source != 0 {
                heap.replace_zero(source)
                    .map_err(|e| RuntimeError::heap(pc, e))?;
            }
            state.pc = state.read_reg(c);
        }
    }

    Ok(())
}
