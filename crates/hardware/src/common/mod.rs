//! Common utilities and types shared by the encoder, the simulator and the loaders.
//!
//! It includes:
//! 1. **Constants:** Instruction width, register count and the halt sentinel.
//! 2. **Error Handling:** Typed errors for assembling, loading, configuring and simulating.
//! 3. **Register Management:** The 32-entry integer register file.

/// Common constants used throughout the crate.
pub mod constants;

/// Error types.
pub mod error;

/// Register file implementation.
pub mod reg;

pub use constants::{DOUBLEWORD_BYTES, HALT_WORD, INSTRUCTION_BYTES, NUM_REGS};
pub use error::{AsmError, ConfigError, Error, LoadError, SimError};
pub use reg::RegisterFile;
