//! Golden test vectors.
//!
//! A vector pairs an instruction file with the expected-state file produced by running it
//! on the reference simulator. Hardware test benches load the first, run the design and
//! compare its final register file and cycle count against the second.

use std::fs;
use std::path::{Path, PathBuf};

use crate::common::error::{Error, LoadError};
use crate::config::Config;
use crate::isa::asm::assemble;
use crate::isa::encode::encode_all;
use crate::isa::instruction::Instruction;
use crate::sim::loader::{render_hex_bytes, write_text};
use crate::sim::simulator::Simulator;
use crate::sim::snapshot::Snapshot;
use crate::stats::SimStats;

/// Negative immediates, wrapping addition and a not-taken branch. Halts after 7 cycles.
pub const BASIC_PROGRAM: &str = "\
addi x1, x0, -1
addi x2, x0, 5
add  x3, x1, x2
beq  x3, x0, 8
addi x4, x0, 9
addi x5, x0, 7
";

/// A doubleword store read straight back. Halts after 5 cycles.
pub const STORE_LOAD_PROGRAM: &str = "\
addi x1, x0, 0
addi x2, x0, 123
sd   x2, 0(x1)
ld   x3, 0(x1)
";

/// Edge cases: `x0` writes, immediate extremes, mixed-sign arithmetic, bitwise identities,
/// memory round trips and taken/not-taken branches. Halts after 30 cycles.
pub const EDGE_PROGRAM: &str = "\
# x0 is hardwired
addi x0, x0, 100

# immediate extremes
addi x1, x0, -1
addi x2, x0, -2048
addi x3, x0, 2047

# mixed signs
add  x4, x1, x3
sub  x5, x3, x4
sub  x6, x3, x3

# bitwise
and  x7, x1, x3
and  x8, x1, x6
or   x9, x3, x6
or   x10, x2, x3

# not taken: x5 = 1, x6 = 0
beq  x5, x6, 8
addi x11, x0, 42

addi x20, x0, 0
sd   x1, 0(x20)
ld   x12, 0(x20)
sd   x3, 8(x20)
ld   x13, 8(x20)
sd   x4, 16(x20)
ld   x14, 16(x20)

# taken on zero, skips x15
beq  x6, x0, 8
addi x15, x0, 999

add  x16, x11, x12
addi x17, x0, 1
sub  x18, x0, x1
addi x0, x3, 500

or   x19, x10, x10
and  x21, x4, x4

# taken on equal non-zero registers, skips x22
beq  x7, x3, 8
addi x22, x0, 111

add  x23, x16, x17
";

/// Programs shipped with the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Builtin {
    /// [`BASIC_PROGRAM`].
    Basic,
    /// [`STORE_LOAD_PROGRAM`].
    StoreLoad,
    /// [`EDGE_PROGRAM`].
    Edge,
}

impl Builtin {
    /// Every built-in program.
    pub const ALL: [Self; 3] = [Self::Basic, Self::StoreLoad, Self::Edge];

    /// Assembly source of the program.
    pub const fn source(self) -> &'static str {
        match self {
            Self::Basic => BASIC_PROGRAM,
            Self::StoreLoad => STORE_LOAD_PROGRAM,
            Self::Edge => EDGE_PROGRAM,
        }
    }

    /// Name used in output file names (`instructions_<name>.txt`).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::StoreLoad => "store_load",
            Self::Edge => "edge",
        }
    }
}

/// Paths written by [`GoldenVector::write_to`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VectorPaths {
    /// The instruction file.
    pub instructions: PathBuf,
    /// The expected-state file.
    pub expected: PathBuf,
}

/// An assembled program together with its simulated outcome.
#[derive(Clone, Debug)]
pub struct GoldenVector {
    /// Instructions in program order.
    pub program: Vec<Instruction>,
    /// Encoded instruction words.
    pub words: Vec<u32>,
    /// Final registers and cycle count.
    pub expected: Snapshot,
    /// Instruction mix of the run.
    pub stats: SimStats,
}

impl GoldenVector {
    /// Assembles and simulates `source`.
    ///
    /// # Errors
    ///
    /// Assembly, configuration and simulation failures, wrapped in [`Error`].
    ///
    /// ```
    /// use rvgold_core::config::Config;
    /// use rvgold_core::sim::vector::{GoldenVector, BASIC_PROGRAM};
    ///
    /// let vector = GoldenVector::from_source(BASIC_PROGRAM, &Config::default()).unwrap();
    /// assert_eq!(vector.expected.cycles, 7);
    /// assert!(vector.expected_text().ends_with("\n7\n"));
    /// ```
    pub fn from_source(source: &str, config: &Config) -> Result<Self, Error> {
        Self::from_program(assemble(source)?, config)
    }

    /// Encodes and simulates an already-built program.
    ///
    /// # Errors
    ///
    /// Configuration and simulation failures, wrapped in [`Error`].
    pub fn from_program(program: Vec<Instruction>, config: &Config) -> Result<Self, Error> {
        let words = encode_all(&program);
        let mut sim = Simulator::from_words(&words, config)?;
        let expected = sim.run()?;
        Ok(Self {
            program,
            words,
            expected,
            stats: sim.cpu.stats,
        })
    }

    /// Contents of the instruction file.
    pub fn instructions_text(&self) -> String {
        render_hex_bytes(&self.words)
    }

    /// Contents of the expected-state file.
    pub fn expected_text(&self) -> String {
        self.expected.to_string()
    }

    /// Writes `instructions_<name>.txt` and `expected_<name>.txt` into `dir`, creating
    /// the directory if needed.
    ///
    /// # Errors
    ///
    /// [`LoadError::Io`] if the directory or either file cannot be written.
    pub fn write_to(&self, dir: &Path, name: &str) -> Result<VectorPaths, LoadError> {
        fs::create_dir_all(dir).map_err(|source| LoadError::Io {
            path: dir.display().to_string(),
            source,
        })?;
        let paths = VectorPaths {
            instructions: dir.join(format!("instructions_{name}.txt")),
            expected: dir.join(format!("expected_{name}.txt")),
        };
        write_text(&paths.instructions, &self.instructions_text())?;
        write_text(&paths.expected, &self.expected_text())?;
        Ok(paths)
    }
}
