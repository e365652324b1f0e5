//! RISC-V Base Integer (I) Opcodes.
//!
//! Defines the major opcodes (bits 6-0) used by the supported subset.

/// Load instructions (LD).
pub const OP_LOAD: u32 = 0b0000011;

/// Immediate arithmetic instructions (ADDI).
pub const OP_IMM: u32 = 0b0010011;

/// Store instructions (SD).
pub const OP_STORE: u32 = 0b0100011;

/// Register-Register arithmetic (ADD, SUB, AND, OR).
pub const OP_REG: u32 = 0b0110011;

/// Conditional Branch instructions (BEQ).
pub const OP_BRANCH: u32 = 0b1100011;
