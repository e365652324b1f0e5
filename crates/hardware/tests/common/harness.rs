use rvgold_core::Simulator;
use rvgold_core::config::Config;
use rvgold_core::core::{Cpu, CpuState};
use rvgold_core::isa::asm::assemble;
use rvgold_core::isa::encode::encode_all;
use rvgold_core::isa::instruction::Instruction;
use rvgold_core::sim::Snapshot;

use super::init_tracing;

pub struct TestContext {
    pub sim: Simulator,
}

impl TestContext {
    /// Builds a simulator over `program` with the default configuration.
    pub fn new(program: &[Instruction]) -> Self {
        Self::with_config(program, &Config::default())
    }

    pub fn with_config(program: &[Instruction], config: &Config) -> Self {
        init_tracing();
        let sim = Simulator::from_words(&encode_all(program), config)
            .expect("test configuration must be valid");
        Self { sim }
    }

    /// Assembles `source` and builds a simulator over it.
    pub fn from_source(source: &str) -> Self {
        Self::new(&assemble(source).expect("test program must assemble"))
    }

    /// Builds a simulator over raw words (the sentinel is appended).
    pub fn from_words(words: &[u32]) -> Self {
        init_tracing();
        let sim = Simulator::from_words(words, &Config::default())
            .expect("default configuration is valid");
        Self { sim }
    }

    pub fn cpu(&self) -> &Cpu {
        &self.sim.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.sim.cpu
    }

    pub fn set_reg(&mut self, reg: usize, val: u64) {
        self.sim.cpu.regs.write(reg, val);
    }

    pub fn get_reg(&self, reg: usize) -> u64 {
        self.sim.cpu.regs.read(reg)
    }

    /// Executes one instruction, panicking on simulator errors.
    pub fn step(&mut self) -> CpuState {
        self.sim.tick().expect("step failed")
    }

    /// Runs to the halt sentinel, panicking on simulator errors.
    pub fn run(&mut self) -> Snapshot {
        self.sim.run().expect("run failed")
    }

    pub fn cycles(&self) -> u64 {
        self.sim.cpu.cycles()
    }
}
