//! Integer Register File.
//!
//! This module implements the 32-entry general-purpose register file. It performs the following:
//! 1. **Storage:** Maintains 32 integer registers (`x0`-`x31`) of 64 bits each.
//! 2. **Invariant Enforcement:** Ensures that register `x0` is hardwired to zero.
//! 3. **Observability:** Exposes a copy of the full register state for snapshots and dumps.

use crate::common::constants::NUM_REGS;

/// General-purpose register file.
///
/// Register `x0` is hardwired to zero; writes to it are silently discarded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterFile {
    regs: [u64; NUM_REGS],
}

impl RegisterFile {
    /// Creates a new register file with all registers initialized to zero.
    pub fn new() -> Self {
        Self {
            regs: [0; NUM_REGS],
        }
    }

    /// Reads a general-purpose register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31). Register `x0` always returns 0.
    ///
    /// # Returns
    ///
    /// The 64-bit value stored in the specified register.
    pub fn read(&self, idx: usize) -> u64 {
        if idx == 0 { 0 } else { self.regs[idx] }
    }

    /// Writes a value to a general-purpose register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31). Writes to `x0` are ignored.
    /// * `val` - The 64-bit value to write.
    pub fn write(&mut self, idx: usize, val: u64) {
        if idx != 0 {
            self.regs[idx] = val;
        }
    }

    /// Returns a copy of all 32 registers in index order.
    pub fn values(&self) -> [u64; NUM_REGS] {
        self.regs
    }

    /// Renders the register file in pairs with hexadecimal formatting.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for i in (0..NUM_REGS).step_by(2) {
            out.push_str(&format!(
                "x{:<2}={:#018x} x{:<2}={:#018x}\n",
                i,
                self.regs[i],
                i + 1,
                self.regs[i + 1]
            ));
        }
        out
    }
}
