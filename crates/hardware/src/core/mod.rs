//! Core processor implementation.
//!
//! This module contains the architectural state machine (register file, PC, data memory)
//! and the fetch/decode/execute step that advances it one instruction at a time.

/// CPU state and execution.
pub mod cpu;

/// Byte-addressable data memory with modulo addressing.
pub mod memory;

pub use self::cpu::{Cpu, CpuState};
pub use self::memory::DataMemory;
