//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains opcodes, function codes, encoding, decoding and text conversion for the
//! eight supported RV64I instructions: `add`, `sub`, `and`, `or`, `addi`, `ld`, `sd`, `beq`.

/// Assembler for the `op rd, rs1, rs2` mnemonic syntax.
pub mod asm;

/// Instruction decoding logic for the R, I, S and B formats.
pub mod decode;

/// Instruction disassembler for tracing and diagnostics.
pub mod disasm;

/// Instruction encoding for the R, I, S and B formats.
pub mod encode;

/// Instruction structures, operation table and bit extraction utilities.
pub mod instruction;

/// Base integer instruction set (opcodes and function codes).
pub mod rv64i;
