//! RISC-V Instruction Encoder.
//!
//! Packs operands into 32-bit words for the R, I, S and B formats. The encoder never
//! validates: register indices are masked to 5 bits and immediates are truncated to their
//! field width (two's complement), so out-of-range input aliases instead of failing.

use crate::isa::instruction::{FUNCT3_MASK, FUNCT7_MASK, Instruction, OPCODE_MASK, REG_MASK};
use crate::isa::rv64i::{funct3, opcodes};

/// Mask for a 12-bit I/S-type immediate.
const IMM12_MASK: u32 = 0xFFF;

/// Bit position of `rd` (and of S-type `imm[4:0]`).
const RD_SHIFT: u32 = 7;
/// Bit position of `funct3`.
const FUNCT3_SHIFT: u32 = 12;
/// Bit position of `rs1`.
const RS1_SHIFT: u32 = 15;
/// Bit position of `rs2`.
const RS2_SHIFT: u32 = 20;
/// Bit position of `funct7` (and of S-type `imm[11:5]`).
const FUNCT7_SHIFT: u32 = 25;
/// Bit position of the I-type immediate.
const I_IMM_SHIFT: u32 = 20;

#[inline]
fn reg(idx: usize) -> u32 {
    idx as u32 & REG_MASK
}

/// Encodes an R-type word with opcode `OP_REG`.
///
/// `funct7 << 25 | rs2 << 20 | rs1 << 15 | funct3 << 12 | rd << 7 | 0110011`
pub fn r_type(funct7: u32, rs2: usize, rs1: usize, funct3: u32, rd: usize) -> u32 {
    (funct7 & FUNCT7_MASK) << FUNCT7_SHIFT
        | reg(rs2) << RS2_SHIFT
        | reg(rs1) << RS1_SHIFT
        | (funct3 & FUNCT3_MASK) << FUNCT3_SHIFT
        | reg(rd) << RD_SHIFT
        | opcodes::OP_REG
}

/// Encodes an I-type word.
///
/// The immediate is masked to 12 bits; values outside `[-2048, 2047]` alias.
pub fn i_type(imm: i64, rs1: usize, funct3: u32, rd: usize, opcode: u32) -> u32 {
    ((imm as u32) & IMM12_MASK) << I_IMM_SHIFT
        | reg(rs1) << RS1_SHIFT
        | (funct3 & FUNCT3_MASK) << FUNCT3_SHIFT
        | reg(rd) << RD_SHIFT
        | (opcode & OPCODE_MASK)
}

/// Encodes an S-type doubleword store (`sd`).
///
/// `imm[11:5]` goes to bits 31:25 and `imm[4:0]` to bits 11:7.
pub fn s_type(imm: i64, rs2: usize, rs1: usize) -> u32 {
    let imm = (imm as u32) & IMM12_MASK;
    let hi = (imm >> 5) & 0x7F;
    let lo = imm & 0x1F;
    hi << FUNCT7_SHIFT
        | reg(rs2) << RS2_SHIFT
        | reg(rs1) << RS1_SHIFT
        | funct3::SD << FUNCT3_SHIFT
        | lo << RD_SHIFT
        | opcodes::OP_STORE
}

/// Encodes a B-type branch-if-equal (`beq`).
///
/// `offset` is a byte displacement. Bit 0 is never encoded, so odd displacements lose
/// their low bit; bits above 12 are dropped.
pub fn b_type(offset: i64, rs2: usize, rs1: usize) -> u32 {
    let v = offset as u32;
    let bit12 = (v >> 12) & 1;
    let bit11 = (v >> 11) & 1;
    let bits10_5 = (v >> 5) & 0x3F;
    let bits4_1 = (v >> 1) & 0xF;
    bit12 << 31
        | bits10_5 << 25
        | reg(rs2) << RS2_SHIFT
        | reg(rs1) << RS1_SHIFT
        | funct3::BEQ << FUNCT3_SHIFT
        | bits4_1 << 8
        | bit11 << 7
        | opcodes::OP_BRANCH
}

/// Encodes a typed instruction into its 32-bit word.
///
/// The format variant selects the layout and the operation supplies opcode, `funct3`
/// and `funct7`.
///
/// ```
/// use rvgold_core::isa::encode::encode;
/// use rvgold_core::isa::instruction::Instruction;
///
/// assert_eq!(encode(&Instruction::addi(1, 0, -1)), 0xFFF0_0093);
/// assert_eq!(encode(&Instruction::beq(3, 0, 8)), 0x0001_8463);
/// ```
pub fn encode(inst: &Instruction) -> u32 {
    match *inst {
        Instruction::R { op, rd, rs1, rs2 } => r_type(op.funct7(), rs2, rs1, op.funct3(), rd),
        Instruction::I { op, rd, rs1, imm } => i_type(imm, rs1, op.funct3(), rd, op.opcode()),
        Instruction::S { rs1, rs2, imm, .. } => s_type(imm, rs2, rs1),
        Instruction::B {
            rs1, rs2, offset, ..
        } => b_type(offset, rs2, rs1),
    }
}

/// Encodes a sequence of instructions in program order.
pub fn encode_all(program: &[Instruction]) -> Vec<u32> {
    program.iter().map(encode).collect()
}
