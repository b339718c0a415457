//! VM state for the Universal Machine

use um_spec::{Register, Word, NUM_REGISTERS};

/// VM state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VMState {
    /// General purpose registers (r0-r7)
    pub registers: [Word; NUM_REGISTERS],

    /// Offset into block 0 of the next instruction
    pub pc: u32,

    /// Instructions executed
    pub cycles: u64,

    /// Halted flag
    pub halted: bool,

    /// Halt reason, set on a clean stop
    pub halt_reason: Option<HaltReason>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaltReason {
    /// HALT instruction
    Halt,
    /// Configured cycle budget used up
    CycleLimit,
}

impl VMState {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn read_reg(&self, reg: Register) -> Word {
        self.registers[reg.index()]
    }

    #[inline]
    pub fn write_reg(&mut self, reg: Register, value: Word) {
        self.registers[reg.index()] = value;
    }

    /// Halt execution
    pub fn halt(&mut self, reason: HaltReason) {
        self.halted = true;
        self.halt_reason = Some(reason);
    }

    /// Stop after a fatal error; no halt reason is recorded
    pub fn fault(&mut self) {
        self.halted = true;
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }
}
