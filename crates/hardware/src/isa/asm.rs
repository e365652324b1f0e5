//! Assembler for the supported subset.
//!
//! Accepts one instruction per line in the syntax
//!
//! ```text
//! add  rd, rs1, rs2        # also sub, and, or
//! addi rd, rs1, imm
//! ld   rd, imm(rs1)
//! sd   rs2, imm(rs1)
//! beq  rs1, rs2, offset    # byte offset from the branch
//! ```
//!
//! Commas and whitespace both separate tokens, `#` starts a comment and blank lines are
//! skipped. Registers are `x0`..`x31`. Immediates are decimal (optionally signed) or
//! `0x` hexadecimal. Values that do not fit their field are accepted and alias on encode;
//! a warning is logged so a vector author notices.

use tracing::warn;

use crate::common::constants::{
    BRANCH_OFFSET_MAX, BRANCH_OFFSET_MIN, IMM12_MAX, IMM12_MIN, NUM_REGS,
};
use crate::common::error::AsmError;
use crate::isa::encode::encode;
use crate::isa::instruction::{Format, Instruction, Op};

/// Character that starts a comment running to the end of the line.
const COMMENT: char = '#';

/// Assembles a whole program.
///
/// # Errors
///
/// Returns the first [`AsmError`] encountered, tagged with its 1-based line number.
///
/// ```
/// use rvgold_core::isa::asm::assemble;
/// use rvgold_core::isa::instruction::Instruction;
///
/// let program = assemble("addi x1, x0, 5\nsd x1, 8(x0)  # spill\n").unwrap();
/// assert_eq!(program, vec![Instruction::addi(1, 0, 5), Instruction::sd(1, 0, 8)]);
/// ```
pub fn assemble(source: &str) -> Result<Vec<Instruction>, AsmError> {
    let mut program = Vec::new();
    for (idx, line) in source.lines().enumerate() {
        if let Some(inst) = assemble_line(line, idx + 1)? {
            program.push(inst);
        }
    }
    Ok(program)
}

/// Assembles a whole program straight to instruction words.
///
/// # Errors
///
/// As [`assemble`].
pub fn assemble_words(source: &str) -> Result<Vec<u32>, AsmError> {
    Ok(assemble(source)?.iter().map(encode).collect())
}

/// Assembles a single source line.
///
/// Returns `Ok(None)` for blank and comment-only lines.
///
/// # Errors
///
/// Any [`AsmError`] for the line, tagged with `line_no`.
pub fn assemble_line(line: &str, line_no: usize) -> Result<Option<Instruction>, AsmError> {
    let code = line.split(COMMENT).next().unwrap_or_default();
    let mut tokens = code
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty());

    let Some(mnemonic) = tokens.next() else {
        return Ok(None);
    };
    let operands: Vec<&str> = tokens.collect();

    let op = Op::from_mnemonic(mnemonic).ok_or_else(|| AsmError::UnknownMnemonic {
        line: line_no,
        mnemonic: mnemonic.to_string(),
    })?;

    let expected = match op {
        Op::Ld | Op::Sd => 2,
        _ => 3,
    };
    if operands.len() != expected {
        return Err(AsmError::OperandCount {
            line: line_no,
            mnemonic: op.mnemonic().to_string(),
            expected,
            found: operands.len(),
        });
    }

    let inst = match (op.format(), op) {
        (Format::R, _) => Instruction::R {
            op,
            rd: parse_register(operands[0], line_no)?,
            rs1: parse_register(operands[1], line_no)?,
            rs2: parse_register(operands[2], line_no)?,
        },
        (Format::I, Op::Ld) => {
            let rd = parse_register(operands[0], line_no)?;
            let (imm, rs1) = parse_memory_operand(operands[1], line_no)?;
            Instruction::I { op, rd, rs1, imm }
        }
        (Format::I, _) => Instruction::I {
            op,
            rd: parse_register(operands[0], line_no)?,
            rs1: parse_register(operands[1], line_no)?,
            imm: parse_immediate(operands[2], line_no)?,
        },
        (Format::S, _) => {
            let rs2 = parse_register(operands[0], line_no)?;
            let (imm, rs1) = parse_memory_operand(operands[1], line_no)?;
            Instruction::S { op, rs1, rs2, imm }
        }
        (Format::B, _) => Instruction::B {
            op,
            rs1: parse_register(operands[0], line_no)?,
            rs2: parse_register(operands[1], line_no)?,
            offset: parse_immediate(operands[2], line_no)?,
        },
    };

    check_ranges(&inst, line_no);
    Ok(Some(inst))
}

/// Parses a register name `x0`..`x31`.
///
/// # Errors
///
/// [`AsmError::BadRegister`] unless the token is `x0`..`x31`.
pub fn parse_register(token: &str, line: usize) -> Result<usize, AsmError> {
    let bad = || AsmError::BadRegister {
        line,
        token: token.to_string(),
    };
    let digits = token
        .strip_prefix('x')
        .or_else(|| token.strip_prefix('X'))
        .ok_or_else(bad)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(bad());
    }
    match digits.parse::<usize>() {
        Ok(idx) if idx < NUM_REGS => Ok(idx),
        _ => Err(bad()),
    }
}

/// Parses a signed decimal or `0x`-prefixed hexadecimal immediate.
///
/// # Errors
///
/// [`AsmError::BadImmediate`] for anything else.
pub fn parse_immediate(token: &str, line: usize) -> Result<i64, AsmError> {
    let bad = || AsmError::BadImmediate {
        line,
        token: token.to_string(),
    };
    let (negative, body) = match token.as_bytes().first() {
        Some(b'-') => (true, &token[1..]),
        Some(b'+') => (false, &token[1..]),
        _ => (false, token),
    };
    if body.is_empty() || body.starts_with(['+', '-']) {
        return Err(bad());
    }
    let magnitude = match body
        .strip_prefix("0x")
        .or_else(|| body.strip_prefix("0X"))
    {
        Some(hex) if hex.starts_with(['+', '-']) => return Err(bad()),
        Some(hex) => i64::from_str_radix(hex, 16),
        None => body.parse::<i64>(),
    }
    .map_err(|_| bad())?;
    Ok(if negative { -magnitude } else { magnitude })
}

/// Parses an `imm(reg)` address operand into `(imm, reg)`.
///
/// An empty immediate (`(x5)`) means 0.
///
/// # Errors
///
/// [`AsmError::BadMemoryOperand`] if the parentheses are missing, otherwise the
/// immediate or register error.
pub fn parse_memory_operand(token: &str, line: usize) -> Result<(i64, usize), AsmError> {
    let bad = || AsmError::BadMemoryOperand {
        line,
        token: token.to_string(),
    };
    let (imm, rest) = token.split_once('(').ok_or_else(bad)?;
    let base = rest.strip_suffix(')').ok_or_else(bad)?;
    let imm = if imm.is_empty() {
        0
    } else {
        parse_immediate(imm, line)?
    };
    Ok((imm, parse_register(base, line)?))
}

/// Logs immediates that the encoder will silently alias.
fn check_ranges(inst: &Instruction, line: usize) {
    match *inst {
        Instruction::I { op, imm, .. } | Instruction::S { op, imm, .. }
            if !(IMM12_MIN..=IMM12_MAX).contains(&imm) =>
        {
            warn!(line, %op, imm, "immediate does not fit in 12 bits and will be truncated");
        }
        Instruction::B { offset, .. } => {
            if offset % 2 != 0 {
                warn!(line, offset, "odd branch offset; bit 0 is not encoded");
            }
            if !(BRANCH_OFFSET_MIN..=BRANCH_OFFSET_MAX).contains(&offset) {
                warn!(line, offset, "branch offset does not fit in 13 bits and will be truncated");
            }
        }
        _ => {}
    }
}
