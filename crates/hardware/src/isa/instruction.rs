//! Instruction structures and bit extraction utilities.
//!
//! Provides:
//! 1. **Field extraction:** The `InstructionBits` trait over raw 32-bit words.
//! 2. **Operation table:** `Op`, mapping each mnemonic to its format, opcode, funct3 and funct7,
//!    and classifying decoded words into the operation the simulator executes.
//! 3. **Typed instructions:** `Instruction`, a tagged variant over the four formats.
//! 4. **Decoded fields:** `Decoded`, the raw field view produced by the decoder.

use std::fmt;

use crate::isa::rv64i::{funct3, funct7, opcodes};

/// Bit mask for extracting the opcode field (bits 0-6).
pub const OPCODE_MASK: u32 = 0x7F;
/// Bit mask for extracting a register field (5 bits).
pub const REG_MASK: u32 = 0x1F;
/// Bit mask for extracting the funct3 field (bits 12-14).
pub const FUNCT3_MASK: u32 = 0x7;
/// Bit mask for extracting the funct7 field (bits 25-31).
pub const FUNCT7_MASK: u32 = 0x7F;

/// Trait for extracting instruction fields from encoded instructions.
pub trait InstructionBits {
    /// Extracts the opcode field (bits 0-6).
    fn opcode(&self) -> u32;

    /// Extracts the destination register field (bits 7-11).
    ///
    /// Register 0 (x0) is hardwired to zero and writes are ignored.
    fn rd(&self) -> usize;

    /// Extracts the first source register field (bits 15-19).
    fn rs1(&self) -> usize;

    /// Extracts the second source register field (bits 20-24).
    fn rs2(&self) -> usize;

    /// Extracts the funct3 field (bits 12-14).
    fn funct3(&self) -> u32;

    /// Extracts the funct7 field (bits 25-31).
    fn funct7(&self) -> u32;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode(&self) -> u32 {
        self & OPCODE_MASK
    }

    #[inline(always)]
    fn rd(&self) -> usize {
        ((self >> 7) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rs1(&self) -> usize {
        ((self >> 15) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rs2(&self) -> usize {
        ((self >> 20) & REG_MASK) as usize
    }

    #[inline(always)]
    fn funct3(&self) -> u32 {
        (self >> 12) & FUNCT3_MASK
    }

    #[inline(always)]
    fn funct7(&self) -> u32 {
        (self >> 25) & FUNCT7_MASK
    }
}

/// The four instruction bit-layouts of the subset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Format {
    /// `funct7 | rs2 | rs1 | funct3 | rd | opcode`
    R,
    /// `imm[11:0] | rs1 | funct3 | rd | opcode`
    I,
    /// `imm[11:5] | rs2 | rs1 | funct3 | imm[4:0] | opcode`
    S,
    /// `imm[12|10:5] | rs2 | rs1 | funct3 | imm[4:1|11] | opcode`
    B,
}

impl Format {
    /// Returns the format selected by a major opcode, if it belongs to the subset.
    pub const fn from_opcode(opcode: u32) -> Option<Self> {
        match opcode {
            opcodes::OP_REG => Some(Self::R),
            opcodes::OP_IMM | opcodes::OP_LOAD => Some(Self::I),
            opcodes::OP_STORE => Some(Self::S),
            opcodes::OP_BRANCH => Some(Self::B),
            _ => None,
        }
    }
}

/// Supported operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    /// `rd = rs1 + rs2`
    Add,
    /// `rd = rs1 - rs2`
    Sub,
    /// `rd = rs1 & rs2`
    And,
    /// `rd = rs1 | rs2`
    Or,
    /// `rd = rs1 + imm`
    Addi,
    /// `rd = mem64[rs1 + imm]`
    Ld,
    /// `mem64[rs1 + imm] = rs2`
    Sd,
    /// `if rs1 == rs2 { pc += offset }`
    Beq,
}

impl Op {
    /// Every supported operation, in encoding-table order.
    pub const ALL: [Self; 8] = [
        Self::Add,
        Self::Sub,
        Self::And,
        Self::Or,
        Self::Addi,
        Self::Ld,
        Self::Sd,
        Self::Beq,
    ];

    /// Lowercase assembler mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::And => "and",
            Self::Or => "or",
            Self::Addi => "addi",
            Self::Ld => "ld",
            Self::Sd => "sd",
            Self::Beq => "beq",
        }
    }

    /// Looks up an operation by mnemonic (case-insensitive).
    pub fn from_mnemonic(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.mnemonic().eq_ignore_ascii_case(name))
    }

    /// Bit-layout used to encode this operation.
    pub const fn format(self) -> Format {
        match self {
            Self::Add | Self::Sub | Self::And | Self::Or => Format::R,
            Self::Addi | Self::Ld => Format::I,
            Self::Sd => Format::S,
            Self::Beq => Format::B,
        }
    }

    /// Major opcode.
    pub const fn opcode(self) -> u32 {
        match self {
            Self::Add | Self::Sub | Self::And | Self::Or => opcodes::OP_REG,
            Self::Addi => opcodes::OP_IMM,
            Self::Ld => opcodes::OP_LOAD,
            Self::Sd => opcodes::OP_STORE,
            Self::Beq => opcodes::OP_BRANCH,
        }
    }

    /// `funct3` field.
    pub const fn funct3(self) -> u32 {
        match self {
            Self::Add | Self::Sub | Self::Addi => funct3::ADD_SUB,
            Self::And => funct3::AND,
            Self::Or => funct3::OR,
            Self::Ld => funct3::LD,
            Self::Sd => funct3::SD,
            Self::Beq => funct3::BEQ,
        }
    }

    /// `funct7` field (only meaningful for R-type operations).
    pub const fn funct7(self) -> u32 {
        match self {
            Self::Sub => funct7::SUB,
            _ => funct7::DEFAULT,
        }
    }

    /// Selects the operation the simulator executes for a decoded word.
    ///
    /// Mirrors the reference dispatch: within `OP_REG`, `funct7 == SUB` wins, then
    /// `funct3` picks AND or OR, and anything else is ADD. The other major opcodes map
    /// to a single operation regardless of `funct3`. Returns `None` for opcodes outside
    /// the subset (including the all-zero halt word).
    pub const fn classify(decoded: &Decoded) -> Option<Self> {
        match decoded.opcode {
            opcodes::OP_REG => Some(if decoded.funct7 == funct7::SUB {
                Self::Sub
            } else if decoded.funct3 == funct3::AND {
                Self::And
            } else if decoded.funct3 == funct3::OR {
                Self::Or
            } else {
                Self::Add
            }),
            opcodes::OP_IMM => Some(Self::Addi),
            opcodes::OP_LOAD => Some(Self::Ld),
            opcodes::OP_STORE => Some(Self::Sd),
            opcodes::OP_BRANCH => Some(Self::Beq),
            _ => None,
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// A typed instruction: an operation plus the operands its format carries.
///
/// Register operands are indices `0..32`; the encoder masks anything wider. Immediates are
/// byte values as written in assembly and are truncated to their field width on encode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// Register-register operation (`add`, `sub`, `and`, `or`).
    R {
        /// Operation.
        op: Op,
        /// Destination register.
        rd: usize,
        /// First source register.
        rs1: usize,
        /// Second source register.
        rs2: usize,
    },
    /// Register-immediate operation (`addi`, `ld`).
    I {
        /// Operation.
        op: Op,
        /// Destination register.
        rd: usize,
        /// Source (or base address) register.
        rs1: usize,
        /// 12-bit signed immediate.
        imm: i64,
    },
    /// Store (`sd`).
    S {
        /// Operation.
        op: Op,
        /// Base address register.
        rs1: usize,
        /// Value register.
        rs2: usize,
        /// 12-bit signed byte offset.
        imm: i64,
    },
    /// Conditional branch (`beq`).
    B {
        /// Operation.
        op: Op,
        /// First compared register.
        rs1: usize,
        /// Second compared register.
        rs2: usize,
        /// Even 13-bit signed byte displacement from the branch itself.
        offset: i64,
    },
}

impl Instruction {
    /// `add rd, rs1, rs2`
    pub const fn add(rd: usize, rs1: usize, rs2: usize) -> Self {
        Self::R { op: Op::Add, rd, rs1, rs2 }
    }

    /// `sub rd, rs1, rs2`
    pub const fn sub(rd: usize, rs1: usize, rs2: usize) -> Self {
        Self::R { op: Op::Sub, rd, rs1, rs2 }
    }

    /// `and rd, rs1, rs2`
    pub const fn and(rd: usize, rs1: usize, rs2: usize) -> Self {
        Self::R { op: Op::And, rd, rs1, rs2 }
    }

    /// `or rd, rs1, rs2`
    pub const fn or(rd: usize, rs1: usize, rs2: usize) -> Self {
        Self::R { op: Op::Or, rd, rs1, rs2 }
    }

    /// `addi rd, rs1, imm`
    pub const fn addi(rd: usize, rs1: usize, imm: i64) -> Self {
        Self::I { op: Op::Addi, rd, rs1, imm }
    }

    /// `ld rd, imm(rs1)`
    pub const fn ld(rd: usize, rs1: usize, imm: i64) -> Self {
        Self::I { op: Op::Ld, rd, rs1, imm }
    }

    /// `sd rs2, imm(rs1)`
    pub const fn sd(rs2: usize, rs1: usize, imm: i64) -> Self {
        Self::S { op: Op::Sd, rs1, rs2, imm }
    }

    /// `beq rs1, rs2, offset`
    pub const fn beq(rs1: usize, rs2: usize, offset: i64) -> Self {
        Self::B { op: Op::Beq, rs1, rs2, offset }
    }

    /// Operation carried by this instruction.
    pub const fn op(&self) -> Op {
        match *self {
            Self::R { op, .. } | Self::I { op, .. } | Self::S { op, .. } | Self::B { op, .. } => {
                op
            }
        }
    }

    /// Rebuilds a typed instruction from decoded fields.
    ///
    /// Returns `None` when the opcode is outside the subset.
    pub const fn from_decoded(d: &Decoded) -> Option<Self> {
        let Some(op) = Op::classify(d) else {
            return None;
        };
        Some(match op.format() {
            Format::R => Self::R {
                op,
                rd: d.rd,
                rs1: d.rs1,
                rs2: d.rs2,
            },
            Format::I => Self::I {
                op,
                rd: d.rd,
                rs1: d.rs1,
                imm: d.imm,
            },
            Format::S => Self::S {
                op,
                rs1: d.rs1,
                rs2: d.rs2,
                imm: d.imm,
            },
            Format::B => Self::B {
                op,
                rs1: d.rs1,
                rs2: d.rs2,
                offset: d.imm,
            },
        })
    }
}

impl fmt::Display for Instruction {
    /// Formats the instruction in assembler syntax (`ld x3, 8(x1)`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::R { op, rd, rs1, rs2 } => write!(f, "{op} x{rd}, x{rs1}, x{rs2}"),
            Self::I {
                op: Op::Ld,
                rd,
                rs1,
                imm,
            } => write!(f, "ld x{rd}, {imm}(x{rs1})"),
            Self::I { op, rd, rs1, imm } => write!(f, "{op} x{rd}, x{rs1}, {imm}"),
            Self::S { op, rs1, rs2, imm } => write!(f, "{op} x{rs2}, {imm}(x{rs1})"),
            Self::B {
                op,
                rs1,
                rs2,
                offset,
            } => write!(f, "{op} x{rs1}, x{rs2}, {offset}"),
        }
    }
}

/// Decoded instruction structure containing all extracted fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Decoded {
    /// Raw 32-bit instruction encoding.
    pub raw: u32,
    /// Extracted opcode field.
    pub opcode: u32,
    /// Destination register index.
    pub rd: usize,
    /// First source register index.
    pub rs1: usize,
    /// Second source register index.
    pub rs2: usize,
    /// Function code field 3.
    pub funct3: u32,
    /// Function code field 7.
    pub funct7: u32,
    /// Sign-extended immediate value (0 for R-type and unknown opcodes).
    pub imm: i64,
}

impl Decoded {
    /// Bit-layout selected by the opcode, if it belongs to the subset.
    pub const fn format(&self) -> Option<Format> {
        Format::from_opcode(self.opcode)
    }
}
