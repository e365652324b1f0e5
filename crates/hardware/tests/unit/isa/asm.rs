//! # Assembler Tests

use pretty_assertions::assert_eq;

use rvgold_core::common::error::AsmError;
use rvgold_core::isa::asm::{
    assemble, assemble_line, assemble_words, parse_immediate, parse_memory_operand,
    parse_register,
};
use rvgold_core::isa::instruction::Instruction;

use crate::common::capture_logs;

#[test]
fn assembles_every_mnemonic() {
    let source = "
        add  x3, x1, x2
        sub  x5, x3, x4
        and  x7, x1, x3
        or   x9, x3, x6
        addi x1, x0, -1
        ld   x3, 0(x1)
        sd   x2, -8(x1)
        beq  x0, x0, -4
    ";
    assert_eq!(
        assemble(source).unwrap(),
        vec![
            Instruction::add(3, 1, 2),
            Instruction::sub(5, 3, 4),
            Instruction::and(7, 1, 3),
            Instruction::or(9, 3, 6),
            Instruction::addi(1, 0, -1),
            Instruction::ld(3, 1, 0),
            Instruction::sd(2, 1, -8),
            Instruction::beq(0, 0, -4),
        ]
    );
}

#[test]
fn comments_blank_lines_and_case() {
    let source = "# header\n\n  ADDI X1, x0, 0x10   # sixteen\n\t# indented comment\n";
    assert_eq!(assemble(source).unwrap(), vec![Instruction::addi(1, 0, 16)]);
}

#[test]
fn whitespace_only_separators() {
    assert_eq!(
        assemble_line("add x1 x2 x3", 1).unwrap(),
        Some(Instruction::add(1, 2, 3))
    );
}

#[test]
fn blank_line_yields_nothing() {
    assert_eq!(assemble_line("   ", 1).unwrap(), None);
    assert_eq!(assemble_line("# only a comment", 1).unwrap(), None);
}

#[test]
fn words_match_known_encodings() {
    let words = assemble_words("addi x1, x0, -1\nbeq x3, x0, 8").unwrap();
    assert_eq!(words, vec![0xFFF0_0093, 0x0001_8463]);
}

#[test]
fn unknown_mnemonic_reports_line() {
    let err = assemble("addi x1, x0, 1\njal x1, 8\n").unwrap_err();
    assert_eq!(
        err,
        AsmError::UnknownMnemonic {
            line: 2,
            mnemonic: "jal".to_string()
        }
    );
}

#[test]
fn operand_count_is_checked() {
    let err = assemble_line("ld x1, 0(x2), x3", 7).unwrap_err();
    assert_eq!(
        err,
        AsmError::OperandCount {
            line: 7,
            mnemonic: "ld".to_string(),
            expected: 2,
            found: 3
        }
    );
    assert!(matches!(
        assemble_line("add x1, x2", 1),
        Err(AsmError::OperandCount {
            expected: 3,
            found: 2,
            ..
        })
    ));
}

#[test]
fn registers_must_be_x0_to_x31() {
    assert_eq!(parse_register("x31", 1).unwrap(), 31);
    assert_eq!(parse_register("X0", 1).unwrap(), 0);
    for bad in ["x32", "x", "r1", "x-1", "x1a", "sp"] {
        assert!(
            matches!(parse_register(bad, 4), Err(AsmError::BadRegister { line: 4, .. })),
            "{bad} should be rejected"
        );
    }
}

#[test]
fn immediates_accept_sign_and_hex() {
    assert_eq!(parse_immediate("-2048", 1).unwrap(), -2048);
    assert_eq!(parse_immediate("+7", 1).unwrap(), 7);
    assert_eq!(parse_immediate("0x7ff", 1).unwrap(), 2047);
    assert_eq!(parse_immediate("-0x10", 1).unwrap(), -16);
    for bad in ["", "-", "--1", "0x", "12abc", "x1", "0x-5", "-0x-5", "+0x+5", "0X-1"] {
        assert!(
            matches!(parse_immediate(bad, 2), Err(AsmError::BadImmediate { line: 2, .. })),
            "{bad:?} should be rejected"
        );
    }
}

#[test]
fn memory_operands() {
    assert_eq!(parse_memory_operand("16(x20)", 1).unwrap(), (16, 20));
    assert_eq!(parse_memory_operand("-8(x1)", 1).unwrap(), (-8, 1));
    assert_eq!(parse_memory_operand("(x5)", 1).unwrap(), (0, 5));
    assert!(matches!(
        parse_memory_operand("16x20", 3),
        Err(AsmError::BadMemoryOperand { line: 3, .. })
    ));
    assert!(matches!(
        parse_memory_operand("16(x20", 3),
        Err(AsmError::BadMemoryOperand { .. })
    ));
    assert!(matches!(
        parse_memory_operand("4(x40)", 3),
        Err(AsmError::BadRegister { .. })
    ));
}

#[test]
fn out_of_range_immediates_are_accepted() {
    // Aliasing is logged, not rejected.
    assert_eq!(
        assemble_words("addi x1, x0, 4095").unwrap(),
        assemble_words("addi x1, x0, -1").unwrap()
    );
    assert_eq!(
        assemble_line("beq x1, x2, 9", 1).unwrap(),
        Some(Instruction::beq(1, 2, 9))
    );
}

#[test]
fn branch_offset_warnings_are_independent() {
    let (inst, logs) = capture_logs(|| assemble_line("beq x1, x2, 5001", 4));
    assert_eq!(inst.unwrap(), Some(Instruction::beq(1, 2, 5001)));
    assert!(logs.contains("odd branch offset"), "{logs}");
    assert!(logs.contains("does not fit in 13 bits"), "{logs}");

    let (_, logs) = capture_logs(|| assemble_line("beq x1, x2, 8", 5));
    assert!(logs.is_empty(), "{logs}");
}
