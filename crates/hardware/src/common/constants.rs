//! System-wide constants.

/// Number of integer registers (`x0`-`x31`).
pub const NUM_REGS: usize = 32;

/// Width of one instruction word in bytes.
pub const INSTRUCTION_BYTES: u64 = 4;

/// Width of a doubleword (the only load/store granularity) in bytes.
pub const DOUBLEWORD_BYTES: usize = 8;

/// Instruction word that halts the simulator when fetched.
///
/// No supported instruction has opcode `0b0000000`, so the all-zero word is free
/// to act as the end-of-program sentinel.
pub const HALT_WORD: u32 = 0;

/// Bytes appended after the last instruction so the final fetch reads [`HALT_WORD`].
pub const SENTINEL: [u8; 4] = HALT_WORD.to_be_bytes();

/// Smallest signed value of a 12-bit I/S-type immediate.
pub const IMM12_MIN: i64 = -2048;

/// Largest signed value of a 12-bit I/S-type immediate.
pub const IMM12_MAX: i64 = 2047;

/// Smallest branch displacement a B-type word can express.
pub const BRANCH_OFFSET_MIN: i64 = -4096;

/// Largest branch displacement a B-type word can express.
pub const BRANCH_OFFSET_MAX: i64 = 4094;
