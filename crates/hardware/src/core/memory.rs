//! Data Memory.
//!
//! A flat, zero-initialised, byte-addressable region owned by one simulation run.
//! It performs the following:
//! 1. **Address Wrapping:** Every effective address is reduced modulo the region size, so
//!    accesses alias inside the region instead of faulting.
//! 2. **Doubleword Access:** Loads and stores move 8 bytes, most significant byte at the
//!    lowest address (big-endian), independent of instruction-stream byte order.
//! 3. **Wrap-around spans:** Each byte of a doubleword wraps on its own, so a span
//!    starting in the last 7 bytes continues at address 0 and a store is still undone by
//!    the matching load.

use crate::common::constants::DOUBLEWORD_BYTES;

/// Byte-addressable data memory with modulo addressing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataMemory {
    data: Vec<u8>,
}

impl DataMemory {
    /// Creates a zeroed memory region of `size` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `size` is less than 8 bytes;
    /// [`Config::validate`](crate::config::Config::validate) rejects such configurations
    /// before a simulator is built.
    pub fn new(size: usize) -> Self {
        assert!(
            size >= DOUBLEWORD_BYTES,
            "data memory must hold at least one doubleword"
        );
        Self {
            data: vec![0; size],
        }
    }

    /// Size of the region in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Reduces a 64-bit effective address to an index inside the region.
    #[inline]
    pub fn wrap(&self, addr: u64) -> usize {
        (addr % self.data.len() as u64) as usize
    }

    /// Reads one byte.
    pub fn read_u8(&self, addr: u64) -> u8 {
        self.data[self.wrap(addr)]
    }

    /// Writes one byte.
    pub fn write_u8(&mut self, addr: u64, value: u8) {
        let idx = self.wrap(addr);
        self.data[idx] = value;
    }

    /// Reads a big-endian doubleword (used by `ld`).
    pub fn read_u64(&self, addr: u64) -> u64 {
        let mut bytes = [0u8; DOUBLEWORD_BYTES];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = self.read_u8(addr.wrapping_add(i as u64));
        }
        u64::from_be_bytes(bytes)
    }

    /// Writes a big-endian doubleword (used by `sd`).
    pub fn write_u64(&mut self, addr: u64, value: u64) {
        for (i, byte) in value.to_be_bytes().into_iter().enumerate() {
            self.write_u8(addr.wrapping_add(i as u64), byte);
        }
    }

    /// Returns the raw contents of the region.
    pub fn dump(&self) -> &[u8] {
        &self.data
    }

    /// Clears the region to zero.
    pub fn reset(&mut self) {
        self.data.fill(0);
    }
}
