//! RISC-V Base Integer Instruction Set (I), restricted to the supported subset.
//!
//! # Structure
//!
//! - `opcodes`: Major opcodes (Load, Store, Branch, OpImm, OpReg).
//! - `funct3`: Minor opcodes distinguishing instructions within a major opcode.
//! - `funct7`: Additional opcode bits for R-type instructions.

/// Function code 3 definitions for base integer operations.
pub mod funct3;

/// Function code 7 definitions for base integer operations.
pub mod funct7;

/// Base integer instruction set opcodes.
pub mod opcodes;
