//! RV64I subset encoder and reference simulator.
//!
//! This crate produces golden test vectors for external CPU cores. It covers:
//! 1. **ISA:** Encoding, decoding, assembling and disassembling `add`, `sub`, `and`, `or`,
//!    `addi`, `ld`, `sd` and `beq`.
//! 2. **Core:** A sequential architectural model (register file, data memory, PC) that halts
//!    on an all-zero instruction word.
//! 3. **Simulation:** Byte-stream loading, snapshots of the final state, and the
//!    instruction/expected file pair consumed by hardware test benches.

/// Common types and constants (register file, errors).
pub mod common;
/// Simulator configuration (defaults and JSON deserialization).
pub mod config;
/// Architectural core (CPU state machine and data memory).
pub mod core;
/// Instruction set (opcodes, encode, decode, assembler, disassembler).
pub mod isa;
/// Program loading, simulation driver and golden vectors.
pub mod sim;
/// Execution statistics.
pub mod stats;

/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// Crate-level error type.
pub use crate::common::error::Error;
/// Architectural CPU state.
pub use crate::core::Cpu;
/// Simulation driver owning the CPU and the instruction stream.
pub use crate::sim::simulator::Simulator;
/// Final architectural state of a run.
pub use crate::sim::snapshot::Snapshot;
