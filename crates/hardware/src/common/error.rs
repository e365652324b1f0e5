//! Error definitions.
//!
//! The encoder and the execution core never fail: out-of-range values are masked and
//! addresses wrap. Errors exist only at the edges, where callers hand in text, files or
//! instruction streams that break the documented contracts:
//! 1. **Assembling:** Unknown mnemonics, malformed operands, bad register names.
//! 2. **Simulating:** Fetching past the end of the stream, unsupported opcodes, cycle limits.
//! 3. **Loading:** I/O failures and malformed instruction/expected files.
//! 4. **Configuration:** Malformed JSON and invalid memory sizes.

use thiserror::Error;

/// Error raised while turning assembly text into instructions.
///
/// Every variant carries the 1-based source line it was raised on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AsmError {
    /// The first token of a line is not one of the supported mnemonics.
    #[error("line {line}: unknown mnemonic `{mnemonic}`")]
    UnknownMnemonic {
        /// Source line.
        line: usize,
        /// Offending mnemonic as written.
        mnemonic: String,
    },

    /// The mnemonic was followed by the wrong number of operands.
    #[error("line {line}: `{mnemonic}` takes {expected} operands, found {found}")]
    OperandCount {
        /// Source line.
        line: usize,
        /// Mnemonic being assembled.
        mnemonic: String,
        /// Number of operands the mnemonic takes.
        expected: usize,
        /// Number of operands present.
        found: usize,
    },

    /// A register operand is not `x0`..`x31`.
    #[error("line {line}: invalid register `{token}`")]
    BadRegister {
        /// Source line.
        line: usize,
        /// Offending token.
        token: String,
    },

    /// An immediate operand is not a decimal or `0x` hex integer.
    #[error("line {line}: invalid immediate `{token}`")]
    BadImmediate {
        /// Source line.
        line: usize,
        /// Offending token.
        token: String,
    },

    /// A load/store address operand is not of the form `imm(reg)`.
    #[error("line {line}: expected `imm(reg)`, found `{token}`")]
    BadMemoryOperand {
        /// Source line.
        line: usize,
        /// Offending token.
        token: String,
    },
}

/// Error raised by the simulator when the instruction stream breaks its contract.
///
/// Well-formed programs (zero-padded after the last instruction, branching only inside
/// the stream) never produce these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// The 4-byte fetch at `pc` extends past the end of the stream.
    #[error("fetch at pc {pc:#x} runs past the end of the {len}-byte instruction stream")]
    FetchOutOfBounds {
        /// Program counter of the fetch.
        pc: u64,
        /// Length of the instruction stream in bytes.
        len: usize,
    },

    /// The fetched word is non-zero and its opcode is not supported.
    #[error("illegal instruction {word:#010x} at pc {pc:#x}")]
    IllegalInstruction {
        /// Program counter of the fetch.
        pc: u64,
        /// Raw instruction word.
        word: u32,
    },

    /// The configured cycle limit was reached before the halt sentinel.
    #[error("cycle limit of {limit} reached at pc {pc:#x} without halting")]
    CycleLimit {
        /// Configured limit.
        limit: u64,
        /// Program counter when the limit was hit.
        pc: u64,
    },
}

/// Error raised while reading or writing golden-vector files.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Underlying filesystem error.
    #[error("{path}: {source}")]
    Io {
        /// File being accessed.
        path: String,
        /// I/O failure.
        source: std::io::Error,
    },

    /// A line of an instruction file is not a single hex byte.
    #[error("line {line}: `{token}` is not a hex byte")]
    BadByte {
        /// Source line.
        line: usize,
        /// Offending token.
        token: String,
    },

    /// The byte count of an instruction stream is not a whole number of words.
    #[error("instruction stream is {len} bytes, not a multiple of 4")]
    MisalignedStream {
        /// Stream length in bytes.
        len: usize,
    },

    /// A register line of an expected file is not a 16-digit hex value.
    #[error("line {line}: `{token}` is not a 16-digit hex register value")]
    BadRegisterLine {
        /// Source line.
        line: usize,
        /// Offending token.
        token: String,
    },

    /// The last line of an expected file is not a decimal cycle count.
    #[error("line {line}: `{token}` is not a decimal cycle count")]
    BadCycleLine {
        /// Source line.
        line: usize,
        /// Offending token.
        token: String,
    },

    /// An expected file does not have 32 register lines plus one cycle line.
    #[error("expected {expected} non-empty lines, found {found}")]
    LineCount {
        /// Required number of lines.
        expected: usize,
        /// Number of lines present.
        found: usize,
    },
}

/// Error raised while loading or validating a [`Config`](crate::config::Config).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration text is not valid JSON for the schema.
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration file could not be read.
    #[error("{path}: {source}")]
    Io {
        /// File being read.
        path: String,
        /// I/O failure.
        source: std::io::Error,
    },

    /// Data memory must hold at least one doubleword.
    #[error("memory.size_bytes must be at least 8, got {0}")]
    InvalidMemorySize(usize),
}

/// Crate-level error gathering every failure kind.
#[derive(Debug, Error)]
pub enum Error {
    /// Assembling failed.
    #[error(transparent)]
    Asm(#[from] AsmError),

    /// Simulation failed.
    #[error(transparent)]
    Sim(#[from] SimError),

    /// Loading or writing a file failed.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
