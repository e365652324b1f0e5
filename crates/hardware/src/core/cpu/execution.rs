//! Main Execution Step.
//!
//! This module implements the fetch/decode/execute cycle. It performs the following:
//! 1. **Fetch:** Reads the big-endian word at the PC from the instruction stream.
//! 2. **Halt:** Counts the fetch, then stops on the all-zero sentinel.
//! 3. **Execute:** Applies the operation's semantics with wrapping arithmetic.
//! 4. **Advance:** Moves the PC by 4, or by the branch offset when `beq` is taken.

use tracing::{debug, info};

use super::{Cpu, CpuState};
use crate::common::constants::{HALT_WORD, INSTRUCTION_BYTES};
use crate::common::error::SimError;
use crate::isa::decode::decode;
use crate::isa::disasm::disassemble;
use crate::isa::instruction::{Decoded, Op};

impl Cpu {
    /// Fetches the instruction word at the current PC.
    ///
    /// # Errors
    ///
    /// [`SimError::FetchOutOfBounds`] if the four bytes at the PC are not all inside
    /// `program`.
    pub fn fetch(&self, program: &[u8]) -> Result<u32, SimError> {
        usize::try_from(self.pc)
            .ok()
            .and_then(|start| program.get(start..start.checked_add(4)?))
            .and_then(|bytes| <[u8; 4]>::try_from(bytes).ok())
            .map(u32::from_be_bytes)
            .ok_or(SimError::FetchOutOfBounds {
                pc: self.pc,
                len: program.len(),
            })
    }

    /// Executes one instruction and returns the resulting state.
    ///
    /// The cycle counter is incremented for every fetch, including the halting one.
    /// Stepping a halted CPU is a no-op that returns `Halted` again.
    ///
    /// # Errors
    ///
    /// [`SimError::FetchOutOfBounds`] when the PC leaves the stream, and
    /// [`SimError::IllegalInstruction`] for non-zero words outside the subset.
    pub fn step(&mut self, program: &[u8]) -> Result<CpuState, SimError> {
        if self.state == CpuState::Halted {
            return Ok(CpuState::Halted);
        }

        let word = self.fetch(program)?;
        self.stats.cycles += 1;

        if word == HALT_WORD {
            self.state = CpuState::Halted;
            info!(
                pc = self.pc,
                cycles = self.stats.cycles,
                retired = self.stats.instructions_retired,
                "halt sentinel fetched"
            );
            return Ok(CpuState::Halted);
        }

        let decoded = decode(word);
        let op = Op::classify(&decoded).ok_or(SimError::IllegalInstruction { pc: self.pc, word })?;

        let next_pc = self.execute(op, &decoded);

        if self.trace {
            let asm = disassemble(word);
            debug!(pc = self.pc, word, %asm, next_pc, "retire");
        }

        self.pc = next_pc;
        Ok(CpuState::Running)
    }

    /// Applies the semantics of `op` to registers and memory.
    ///
    /// Returns the next PC. Writes to `x0` are discarded by the register file and all
    /// arithmetic, including address computation, wraps modulo 2^64.
    pub fn execute(&mut self, op: Op, d: &Decoded) -> u64 {
        let rs1 = self.regs.read(d.rs1);
        let rs2 = self.regs.read(d.rs2);
        let imm = d.imm as u64;
        let fall_through = self.pc.wrapping_add(INSTRUCTION_BYTES);

        let mut taken = false;
        let next_pc = match op {
            Op::Add => {
                self.regs.write(d.rd, rs1.wrapping_add(rs2));
                fall_through
            }
            Op::Sub => {
                self.regs.write(d.rd, rs1.wrapping_sub(rs2));
                fall_through
            }
            Op::And => {
                self.regs.write(d.rd, rs1 & rs2);
                fall_through
            }
            Op::Or => {
                self.regs.write(d.rd, rs1 | rs2);
                fall_through
            }
            Op::Addi => {
                self.regs.write(d.rd, rs1.wrapping_add(imm));
                fall_through
            }
            Op::Ld => {
                let value = self.memory.read_u64(rs1.wrapping_add(imm));
                self.regs.write(d.rd, value);
                fall_through
            }
            Op::Sd => {
                self.memory.write_u64(rs1.wrapping_add(imm), rs2);
                fall_through
            }
            Op::Beq => {
                taken = rs1 == rs2;
                if taken {
                    self.pc.wrapping_add(imm)
                } else {
                    fall_through
                }
            }
        };

        self.stats.record(op, taken);
        next_pc
    }
}
