//! Final architectural state of a run.
//!
//! The text form is the oracle contract parsed by hardware test benches: 32 lines of
//! 16-digit lowercase hex register values (`x0` first) followed by one decimal cycle
//! count.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::common::constants::NUM_REGS;
use crate::common::error::LoadError;
use crate::core::Cpu;

/// Register file contents and cycle count after halting.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Register values, `x0` first.
    #[serde(serialize_with = "serialize_hex_regs")]
    pub regs: [u64; NUM_REGS],
    /// Instruction words fetched, including the halt sentinel.
    pub cycles: u64,
}

/// One difference between an expected and an actual snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mismatch {
    /// A register holds a different value.
    Register {
        /// Register index.
        index: usize,
        /// Value from the expected snapshot.
        expected: u64,
        /// Value from the actual snapshot.
        actual: u64,
    },
    /// The cycle counts differ.
    Cycles {
        /// Expected cycle count.
        expected: u64,
        /// Actual cycle count.
        actual: u64,
    },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Register {
                index,
                expected,
                actual,
            } => write!(
                f,
                "x{index}: expected {expected:016x}, got {actual:016x}"
            ),
            Self::Cycles { expected, actual } => {
                write!(f, "cycles: expected {expected}, got {actual}")
            }
        }
    }
}

impl Snapshot {
    /// Captures the state of `cpu`.
    pub fn from_cpu(cpu: &Cpu) -> Self {
        Self {
            regs: cpu.regs.values(),
            cycles: cpu.stats.cycles,
        }
    }

    /// Value of register `idx`.
    pub fn reg(&self, idx: usize) -> u64 {
        self.regs[idx]
    }

    /// Parses the text form written by `Display`.
    ///
    /// Blank lines and surrounding whitespace are ignored; hex digits may be either case.
    ///
    /// # Errors
    ///
    /// [`LoadError::LineCount`] unless there are exactly 33 non-empty lines, and
    /// [`LoadError::BadRegisterLine`] / [`LoadError::BadCycleLine`] for malformed values.
    pub fn parse(text: &str) -> Result<Self, LoadError> {
        let lines: Vec<(usize, &str)> = text
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty())
            .collect();
        if lines.len() != NUM_REGS + 1 {
            return Err(LoadError::LineCount {
                expected: NUM_REGS + 1,
                found: lines.len(),
            });
        }

        let mut regs = [0u64; NUM_REGS];
        for (slot, &(line, token)) in regs.iter_mut().zip(&lines) {
            *slot = parse_register_line(token).ok_or_else(|| LoadError::BadRegisterLine {
                line,
                token: token.to_string(),
            })?;
        }

        let (line, token) = lines[NUM_REGS];
        let cycles = token.parse::<u64>().map_err(|_| LoadError::BadCycleLine {
            line,
            token: token.to_string(),
        })?;

        Ok(Self { regs, cycles })
    }

    /// Lists every register and the cycle count where `actual` differs from `self`.
    pub fn diff(&self, actual: &Self) -> Vec<Mismatch> {
        let mut out: Vec<Mismatch> = self
            .regs
            .iter()
            .zip(actual.regs.iter())
            .enumerate()
            .filter(|(_, (e, a))| e != a)
            .map(|(index, (&expected, &actual))| Mismatch::Register {
                index,
                expected,
                actual,
            })
            .collect();
        if self.cycles != actual.cycles {
            out.push(Mismatch::Cycles {
                expected: self.cycles,
                actual: actual.cycles,
            });
        }
        out
    }

    /// Serializes to pretty-printed JSON (registers as hex strings).
    ///
    /// # Errors
    ///
    /// Only if serialization itself fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for value in &self.regs {
            writeln!(f, "{value:016x}")?;
        }
        writeln!(f, "{}", self.cycles)
    }
}

fn parse_register_line(token: &str) -> Option<u64> {
    if token.len() != 16 || !token.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u64::from_str_radix(token, 16).ok()
}

fn serialize_hex_regs<S: Serializer>(regs: &[u64; NUM_REGS], s: S) -> Result<S::Ok, S::Error> {
    s.collect_seq(regs.iter().map(|r| format!("{r:016x}")))
}
