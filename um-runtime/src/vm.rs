//! Virtual Machine for the Universal Machine

use crate::error::{Result, RuntimeError};
use crate::execute::execute;
use crate::heap::{Heap, HeapStats};
use crate::io::IOHandler;
use crate::state::{HaltReason, VMState};
use std::io::{Cursor, Read, Write};
use tracing::{debug, trace};
use um_disassembler::DisassemblerError;
use um_spec::{Instruction, Program, TraceRow, Word};

/// VM configuration
#[derive(Debug, Clone)]
pub struct VMConfig {
    /// Stop cleanly after this many instructions
    pub max_cycles: Option<u64>,

    /// Emit a trace event per instruction
    pub trace: bool,

    /// Collect a [`TraceRow`] per instruction into the result
    ///
    /// Rows are held in memory until the run ends, one per executed
    /// instruction. Bound long runs with `max_cycles`.
    pub enable_execution_trace: bool,

    /// Largest block `alloc` may create
    pub max_block_words: u32,

    /// Flush the output sink after every byte
    pub flush_output: bool,
}

impl Default for VMConfig {
    fn default() -> Self {
        Self {
            max_cycles: None,
            trace: false,
            enable_execution_trace: false,
            max_block_words: u32::MAX,
            flush_output: true,
        }
    }
}

/// Execution result
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Number of instructions executed
    pub cycles: u64,

    /// Reason for halting
    pub halt_reason: HaltReason,

    /// Heap counters at the time of the stop
    pub heap_stats: HeapStats,

    /// Execution trace (if execution tracing enabled)
    pub execution_trace: Vec<TraceRow>,
}

impl ExecutionResult {
    pub fn hit_cycle_limit(&self) -> bool {
        self.halt_reason == HaltReason::CycleLimit
    }
}

/// Universal Machine
pub struct VM<R = Cursor<Vec<u8>>, W = Vec<u8>> {
    /// Registers, instruction pointer, halt state
    state: VMState,

    /// Block heap; block 0 is the running program
    heap: Heap,

    io: IOHandler<R, W>,

    config: VMConfig,

    execution_trace: Vec<TraceRow>,
}

impl VM {
    /// Create a VM reading from an in-memory input and collecting output
    pub fn with_input(program: Program, inputs: Vec<u8>, config: VMConfig) -> Self {
        VM::new(program, IOHandler::new(inputs), config)
    }
}

impl<R: Read, W: Write> VM<R, W> {
    pub fn new(program: Program, mut io: IOHandler<R, W>, config: VMConfig) -> Self {
        io.set_flush(config.flush_output);
        Self {
            state: VMState::new(),
            heap: Heap::with_limit(program.code, config.max_block_words),
            io,
            config,
            execution_trace: Vec::new(),
        }
    }

    /// Run the VM until halt, cycle limit, or a fatal error
    pub fn run(&mut self) -> Result<ExecutionResult> {
        debug!(
            words = self.heap.program().len(),
            max_cycles = ?self.config.max_cycles,
            "starting execution"
        );

        while !self.state.is_halted() {
            if let Err(err) = self.step() {
                debug!(cycles = self.state.cycles, error = %err, "execution failed");
                return Err(err);
            }
        }

        let halt_reason = self.state.halt_reason.unwrap_or(HaltReason::Halt);
        debug!(cycles = self.state.cycles, reason = ?halt_reason, "execution stopped");

        Ok(ExecutionResult {
            cycles: self.state.cycles,
            halt_reason,
            heap_stats: self.heap.stats(),
            execution_trace: std::mem::take(&mut self.execution_trace),
        })
    }

    /// Execute exactly one instruction
    ///
    /// Does nothing once the machine has halted. A fatal error also halts it.
    pub fn step(&mut self) -> Result<()> {
        if self.state.is_halted() {
            return Ok(());
        }
        if let Some(max) = self.config.max_cycles {
            if self.state.cycles >= max {
                self.state.halt(HaltReason::CycleLimit);
                return Ok(());
            }
        }

        let result = self.step_inner();
        if result.is_err() {
            self.state.fault();
        }
        result
    }

    fn step_inner(&mut self) -> Result<()> {
        let pc = self.state.pc;
        let (instr, word) = self.fetch_and_decode(pc)?;

        if self.config.trace {
            trace!(
                cycle = self.state.cycles,
                pc,
                "{}",
                um_disassembler::format(&instr)
            );
        }
        if self.config.enable_execution_trace {
            self.execution_trace
                .push(TraceRow::new(self.state.cycles, pc, word, self.state.registers));
        }

        self.state.pc = pc.wrapping_add(1);
        execute(&instr, pc, &mut self.state, &mut self.heap, &mut self.io)?;
        self.state.cycles += 1;
        Ok(())
    }

    /// Fetch and decode the instruction at `pc`
    fn fetch_and_decode(&self, pc: u32) -> Result<(Instruction, Word)> {
        let program = self.heap.program();
        let word = *program
            .get(pc as usize)
            .ok_or(RuntimeError::ProgramCounterOutOfRange {
                pc,
                len: program.len(),
            })?;

        let instr = um_disassembler::decode(word).map_err(|e| match e {
            DisassemblerError::UnknownOpcode { opcode, word } => {
                RuntimeError::UnknownOpcode { pc, opcode, word }
            }
        })?;

        Ok((instr, word))
    }

    /// Get current state (for debugging)
    pub fn state(&self) -> &VMState {
        &self.state
    }

    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    pub fn io(&self) -> &IOHandler<R, W> {
        &self.io
    }

    /// Trace rows collected so far, left behind when a run fails
    pub fn take_execution_trace(&mut self) -> Vec<TraceRow> {
        std::mem::take(&mut self.execution_trace)
    }

    pub fn io_mut(&mut self) -> &mut IOHandler<R, W> {
        &mut self.io
    }

    pub fn into_io(self) -> IOHandler<R, W> {
        self.io
    }
}
