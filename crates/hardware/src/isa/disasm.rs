//! Instruction Disassembler.
//!
//! Converts a 32-bit instruction encoding into the assembler syntax accepted by
//! [`asm`](crate::isa::asm), for debug tracing and the `disasm` command. The output
//! re-assembles to the same word for every encoding the simulator recognises with a
//! canonical `funct3`/`funct7`.
//!
//! # Usage
//!
//! ```
//! use rvgold_core::isa::disasm::disassemble;
//! assert_eq!(disassemble(0x002081B3), "add x3, x1, x2");
//! assert_eq!(disassemble(0x0000B183), "ld x3, 0(x1)");
//! assert_eq!(disassemble(0), "halt");
//! ```

use crate::common::constants::HALT_WORD;
use crate::isa::decode::decode_instruction;

/// Text produced for the all-zero sentinel word.
pub const HALT_TEXT: &str = "halt";

/// Text produced for words outside the supported subset.
pub const UNKNOWN_TEXT: &str = "unknown";

/// Disassembles a 32-bit instruction into a human-readable string.
///
/// Returns `"halt"` for the sentinel and `"unknown"` for unsupported opcodes.
pub fn disassemble(inst: u32) -> String {
    if inst == HALT_WORD {
        return HALT_TEXT.to_string();
    }
    decode_instruction(inst).map_or_else(|| UNKNOWN_TEXT.to_string(), |i| i.to_string())
}

/// Disassembles a program into `pc: word  text` lines, starting at PC 0.
pub fn disassemble_listing(words: &[u32]) -> String {
    let mut out = String::new();
    for (i, &word) in words.iter().enumerate() {
        out.push_str(&format!(
            "{:#06x}: {:08x}  {}\n",
            i * 4,
            word,
            disassemble(word)
        ));
    }
    out
}
