//! Simulation driver, program loading and golden vectors.
//!
//! Provides:
//! 1. **Loading:** Conversion between instruction words, big-endian byte streams and the
//!    one-byte-per-line instruction file format.
//! 2. **Driving:** `Simulator`, which owns a CPU and its instruction stream and runs it to
//!    the halt sentinel.
//! 3. **Output:** `Snapshot`, the register/cycle oracle, and `GoldenVector`, the
//!    instruction/expected file pair.

pub mod loader;
pub mod simulator;
pub mod snapshot;
pub mod vector;

use crate::common::error::Error;
use crate::config::Config;

pub use simulator::Simulator;
pub use snapshot::{Mismatch, Snapshot};
pub use vector::{Builtin, GoldenVector};

/// Runs `words` (without sentinel) to completion on a fresh simulator.
///
/// # Errors
///
/// Configuration and simulation failures, wrapped in [`Error`].
///
/// ```
/// use rvgold_core::config::Config;
/// use rvgold_core::isa::asm::assemble_words;
/// use rvgold_core::sim::simulate;
///
/// let words = assemble_words("addi x1, x0, 0\naddi x2, x0, 123\nsd x2, 0(x1)\nld x3, 0(x1)").unwrap();
/// let snapshot = simulate(&words, &Config::default()).unwrap();
/// assert_eq!(snapshot.reg(3), 123);
/// assert_eq!(snapshot.cycles, 5);
/// ```
pub fn simulate(words: &[u32], config: &Config) -> Result<Snapshot, Error> {
    let mut sim = Simulator::from_words(words, config)?;
    Ok(sim.run()?)
}
