//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, the container for the architectural
//! state of one simulation run:
//! 1. **State Management:** Registers, program counter and the Running/Halted state.
//! 2. **Memory:** The data region targeted by `ld` and `sd`.
//! 3. **Accounting:** Cycle count and instruction mix.

/// Fetch, decode and execute.
pub mod execution;

use crate::common::RegisterFile;
use crate::config::Config;
use crate::core::memory::DataMemory;
use crate::stats::SimStats;

/// Execution state of the CPU.
///
/// `Halted` is terminal: it is entered when the all-zero word is fetched and further
/// steps leave the CPU untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CpuState {
    /// Fetching and executing instructions.
    #[default]
    Running,
    /// The halt sentinel has been fetched.
    Halted,
}

/// Architectural state of one simulation run.
#[derive(Clone, Debug)]
pub struct Cpu {
    /// General Purpose Registers.
    pub regs: RegisterFile,
    /// Program Counter (byte offset into the instruction stream).
    pub pc: u64,
    /// Running or halted.
    pub state: CpuState,
    /// Data memory for loads and stores.
    pub memory: DataMemory,
    /// Enable per-instruction tracing.
    pub trace: bool,
    /// Performance statistics, including the cycle counter.
    pub stats: SimStats,
}

impl Cpu {
    /// Creates a CPU with zeroed registers and memory, PC 0, in the `Running` state.
    ///
    /// # Arguments
    ///
    /// * `config` - Supplies the data memory size and the trace flag.
    pub fn new(config: &Config) -> Self {
        Self {
            regs: RegisterFile::new(),
            pc: 0,
            state: CpuState::Running,
            memory: DataMemory::new(config.memory.size_bytes),
            trace: config.general.trace_instructions,
            stats: SimStats::default(),
        }
    }

    /// Returns `true` once the halt sentinel has been fetched.
    pub fn is_halted(&self) -> bool {
        self.state == CpuState::Halted
    }

    /// Number of instruction words fetched so far, including the halting one.
    pub fn cycles(&self) -> u64 {
        self.stats.cycles
    }

    /// Returns the CPU to its initial state, keeping the memory size and trace flag.
    pub fn reset(&mut self) {
        self.regs = RegisterFile::new();
        self.pc = 0;
        self.state = CpuState::Running;
        self.memory.reset();
        self.stats = SimStats::default();
    }

    /// Renders the PC, state and registers for diagnostics.
    pub fn dump_state(&self) -> String {
        format!(
            "PC = {:#018x} ({:?}, {} cycles)\n{}",
            self.pc,
            self.state,
            self.stats.cycles,
            self.regs.dump()
        )
    }
}
