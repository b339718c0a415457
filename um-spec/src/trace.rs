//! # Execution Trace Types
//!
//! Per-instruction records collected by the runtime when execution tracing is
//! enabled, and their binary encoding for trace files.

use crate::error::Result;
use crate::register::NUM_REGISTERS;
use crate::Word;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single execution trace row
///
/// Records the machine state immediately before one instruction executes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceRow {
    /// Cycle number (0-based count of instructions executed before this one)
    pub cycle: u64,

    /// Offset into block 0 the instruction was fetched from
    pub pc: u32,

    /// Encoded instruction word
    pub instruction: Word,

    /// Register state before execution
    pub registers: [Word; NUM_REGISTERS],
}

impl TraceRow {
    pub fn new(cycle: u64, pc: u32, instruction: Word, registers: [Word; NUM_REGISTERS]) -> Self {
        Self {
            cycle,
            pc,
            instruction,
            registers,
        }
    }
}

impl fmt::Display for TraceRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:8}] pc={:#010x} word={:08X} regs=", self.cycle, self.pc, self.instruction)?;
        for (i, value) in self.registers.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{:08X}", value)?;
        }
        Ok(())
    }
}

/// Encode a trace for storage
pub fn encode_trace(rows: &[TraceRow]) -> Result<Vec<u8>> {
    Ok(bincode::serialize(rows)?)
}

/// Decode a trace produced by [`encode_trace`]
pub fn decode_trace(bytes: &[u8]) -> Result<Vec<TraceRow>> {
    Ok(bincode::deserialize(bytes)?)
}
