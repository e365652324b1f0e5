//! RISC-V Instruction Decoder.
//!
//! This module handles the decoding of 32-bit RISC-V instruction encodings into
//! a structured `Decoded` format. It extracts opcodes, register indices, function
//! codes, and handles the sign-extension of immediate values for the I, S and B formats,
//! exactly inverting the layouts in [`encode`](crate::isa::encode).

use crate::isa::instruction::{Decoded, Instruction, InstructionBits};
use crate::isa::rv64i::opcodes;

/// Bit shift for extracting I-Type immediate field (bits 20-31).
const I_IMM_SHIFT: u32 = 20;

/// Bit mask for the I-Type immediate after shifting (12 bits).
const I_IMM_MASK: u32 = 0xFFF;

/// Total number of bits in I-Type and S-Type immediates.
const IMM12_BITS: u32 = 12;

/// Bit shift for extracting S-Type immediate low field (bits 7-11).
///
/// S-Type format: `imm[11:5] | rs2 | rs1 | funct3 | imm[4:0] | opcode`
const S_IMM_LOW_SHIFT: u32 = 7;

/// Bit mask for S-Type immediate low field (5 bits: imm[4:0]).
const S_IMM_LOW_MASK: u32 = 0x1F;

/// Bit shift for extracting S-Type immediate high field (bits 25-31).
const S_IMM_HIGH_SHIFT: u32 = 25;

/// Bit mask for S-Type immediate high field (7 bits: imm[11:5]).
const S_IMM_HIGH_MASK: u32 = 0x7F;

/// Bit shift for combining S-Type immediate fields after extraction.
const S_IMM_COMBINED_SHIFT: u32 = 5;

/// Bit shift for extracting B-Type immediate bit 11 (bit 7 of instruction).
///
/// B-Type format: `imm[12] | imm[10:5] | rs2 | rs1 | funct3 | imm[4:1] | imm[11] | opcode`
const B_IMM_11_SHIFT: u32 = 7;

/// Bit shift for extracting B-Type immediate bits 4-1 (bits 8-11 of instruction).
const B_IMM_4_1_SHIFT: u32 = 8;

/// Bit mask for B-Type immediate bits 4-1 (4 bits).
const B_IMM_4_1_MASK: u32 = 0xF;

/// Bit shift for extracting B-Type immediate bits 10-5 (bits 25-30 of instruction).
const B_IMM_10_5_SHIFT: u32 = 25;

/// Bit mask for B-Type immediate bits 10-5 (6 bits).
const B_IMM_10_5_MASK: u32 = 0x3F;

/// Bit shift for extracting B-Type immediate bit 12 (bit 31 of instruction).
const B_IMM_12_SHIFT: u32 = 31;

/// Total number of bits in B-Type immediate (13 bits, sign-extended).
const B_IMM_BITS: u32 = 13;

/// Decodes a RISC-V instruction into its component fields.
///
/// Register and function fields are extracted for every word; the immediate is
/// reconstructed according to the opcode's format and is 0 for R-type or unknown opcodes.
pub fn decode(inst: u32) -> Decoded {
    let opcode = inst.opcode();

    let imm = match opcode {
        opcodes::OP_IMM | opcodes::OP_LOAD => decode_i_type_imm(inst),
        opcodes::OP_STORE => decode_s_type_imm(inst),
        opcodes::OP_BRANCH => decode_b_type_imm(inst),
        _ => 0,
    };

    Decoded {
        raw: inst,
        opcode,
        rd: inst.rd(),
        rs1: inst.rs1(),
        rs2: inst.rs2(),
        funct3: inst.funct3(),
        funct7: inst.funct7(),
        imm,
    }
}

/// Decodes a word straight into a typed instruction.
///
/// Returns `None` for the halt word and for opcodes outside the subset.
pub fn decode_instruction(inst: u32) -> Option<Instruction> {
    Instruction::from_decoded(&decode(inst))
}

/// Decodes the immediate value for I-Type instructions (`addi`, `ld`).
fn decode_i_type_imm(inst: u32) -> i64 {
    sign_extend((inst >> I_IMM_SHIFT) & I_IMM_MASK, IMM12_BITS)
}

/// Decodes the immediate value for S-Type instructions (`sd`).
fn decode_s_type_imm(inst: u32) -> i64 {
    let low = (inst >> S_IMM_LOW_SHIFT) & S_IMM_LOW_MASK;
    let high = (inst >> S_IMM_HIGH_SHIFT) & S_IMM_HIGH_MASK;
    let combined = (high << S_IMM_COMBINED_SHIFT) | low;
    sign_extend(combined, IMM12_BITS)
}

/// Decodes the immediate value for B-Type instructions (`beq`).
///
/// The four fragments are reassembled with bit 0 fixed at zero, giving an even offset.
fn decode_b_type_imm(inst: u32) -> i64 {
    let bit_11 = (inst >> B_IMM_11_SHIFT) & 1;
    let bits_4_1 = (inst >> B_IMM_4_1_SHIFT) & B_IMM_4_1_MASK;
    let bits_10_5 = (inst >> B_IMM_10_5_SHIFT) & B_IMM_10_5_MASK;
    let bit_12 = (inst >> B_IMM_12_SHIFT) & 1;

    let combined = (bit_12 << 12) | (bit_11 << 11) | (bits_10_5 << 5) | (bits_4_1 << 1);
    sign_extend(combined, B_IMM_BITS)
}

/// Sign extends the low `bits` of `val` to a 64-bit signed integer.
///
/// If the field's most significant bit is set the result is `val - 2^bits`.
///
/// # Panics
///
/// Panics unless `bits` is in `1..=64`.
///
/// ```
/// use rvgold_core::isa::decode::sign_extend;
///
/// assert_eq!(sign_extend(0xFFF, 12), -1);
/// assert_eq!(sign_extend(0x7FF, 12), 2047);
/// assert_eq!(sign_extend(0x1000, 13), -4096);
/// ```
pub fn sign_extend(val: u32, bits: u32) -> i64 {
    assert!((1..=64).contains(&bits), "sign_extend width must be 1..=64, got {bits}");
    let shift = 64 - bits;
    (i64::from(val) << shift) >> shift
}
