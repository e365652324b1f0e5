//! Shared helpers for the unit tests.

/// Simulator harness.
pub mod harness;

pub use harness::TestContext;

use std::io;
use std::sync::{Arc, Mutex};

use rvgold_core::common::NUM_REGS;

/// Builds a full register array from `(index, value)` pairs; unnamed registers are zero.
pub fn regs_with(pairs: &[(usize, u64)]) -> [u64; NUM_REGS] {
    let mut regs = [0u64; NUM_REGS];
    for &(idx, val) in pairs {
        regs[idx] = val;
    }
    regs
}

/// Installs a test-writer tracing subscriber once per process.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` with a thread-local subscriber and returns everything it logged.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let out = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8_lossy(&buffer.0.lock().unwrap()).into_owned();
    (out, logs)
}
