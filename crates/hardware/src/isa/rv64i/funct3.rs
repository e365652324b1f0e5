//! RISC-V Base Integer (I) Function Codes (funct3).
//!
//! The `funct3` field (bits 14-12) distinguishes between instructions sharing
//! the same major opcode (e.g., ADD vs AND vs OR).

/// Load Doubleword.
pub const LD: u32 = 0b011;

/// Store Doubleword.
pub const SD: u32 = 0b011;

/// Branch Equal.
pub const BEQ: u32 = 0b000;

/// Add / Subtract (register and immediate forms).
pub const ADD_SUB: u32 = 0b000;
/// Bitwise OR.
pub const OR: u32 = 0b110;
/// Bitwise AND.
pub const AND: u32 = 0b111;
