//! Simulator: owns the CPU and the instruction stream side-by-side.
//!
//! The instruction stream is read-only and separate from data memory, so `ld`/`sd`
//! can never modify the program being executed.

use crate::common::error::{ConfigError, SimError};
use crate::config::Config;
use crate::core::{Cpu, CpuState};
use crate::sim::loader;
use crate::sim::snapshot::Snapshot;

/// Top-level simulator: CPU architectural state + instruction stream.
#[derive(Clone, Debug)]
pub struct Simulator {
    /// CPU architectural state (registers, memory, PC, stats).
    pub cpu: Cpu,
    program: Vec<u8>,
    max_cycles: Option<u64>,
}

impl Simulator {
    /// Creates a simulator over a raw big-endian instruction stream.
    ///
    /// The stream must already end with the 4-byte zero sentinel; use
    /// [`Simulator::from_words`] to have it appended.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] from [`Config::validate`].
    pub fn new(program: Vec<u8>, config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            cpu: Cpu::new(config),
            program,
            max_cycles: config.general.max_cycles,
        })
    }

    /// Creates a simulator over instruction words, appending the halt sentinel.
    ///
    /// # Errors
    ///
    /// As [`Simulator::new`].
    pub fn from_words(words: &[u32], config: &Config) -> Result<Self, ConfigError> {
        Self::new(loader::to_stream(words), config)
    }

    /// The instruction stream being executed.
    pub fn program(&self) -> &[u8] {
        &self.program
    }

    /// Advances the simulator by one instruction.
    ///
    /// # Errors
    ///
    /// [`SimError::CycleLimit`] once the configured limit is used up, otherwise whatever
    /// [`Cpu::step`] reports.
    pub fn tick(&mut self) -> Result<CpuState, SimError> {
        if let Some(limit) = self.max_cycles {
            if !self.cpu.is_halted() && self.cpu.stats.cycles >= limit {
                return Err(SimError::CycleLimit {
                    limit,
                    pc: self.cpu.pc,
                });
            }
        }
        self.cpu.step(&self.program)
    }

    /// Runs until the halt sentinel is fetched and returns the final state.
    ///
    /// # Errors
    ///
    /// The first [`SimError`] raised by [`Simulator::tick`].
    pub fn run(&mut self) -> Result<Snapshot, SimError> {
        while self.tick()? == CpuState::Running {}
        Ok(self.snapshot())
    }

    /// Captures the current register file and cycle count.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_cpu(&self.cpu)
    }
}
