//! Instruction Stream Loading and Golden-Vector File I/O.
//!
//! This module converts between the representations an instruction stream passes through:
//! 1. **Words to stream:** Big-endian serialization, most significant byte first, with the
//!    4-byte zero sentinel appended for execution.
//! 2. **Instruction files:** One two-digit uppercase hex byte per line, no sentinel. The
//!    consumer treats bytes past the end as zero.
//! 3. **Files:** Reading and writing the text files with path-tagged errors.

use std::fs;
use std::path::Path;

use crate::common::constants::SENTINEL;
use crate::common::error::LoadError;
use crate::sim::snapshot::Snapshot;

/// Serializes `words` big-endian and appends the halt sentinel.
///
/// # Arguments
///
/// * `words` - Encoded instructions in program order.
///
/// # Returns
///
/// The stream the simulator fetches from: `4 * words.len() + 4` bytes.
///
/// ```
/// use rvgold_core::sim::loader::to_stream;
///
/// assert_eq!(to_stream(&[0x0640_0013]), vec![0x06, 0x40, 0x00, 0x13, 0, 0, 0, 0]);
/// ```
pub fn to_stream(words: &[u32]) -> Vec<u8> {
    let mut stream = words_to_bytes(words);
    stream.extend_from_slice(&SENTINEL);
    stream
}

/// Serializes `words` big-endian without a sentinel.
pub fn words_to_bytes(words: &[u32]) -> Vec<u8> {
    words.iter().flat_map(|w| w.to_be_bytes()).collect()
}

/// Regroups a big-endian byte stream into words.
///
/// # Errors
///
/// [`LoadError::MisalignedStream`] if the length is not a multiple of four.
pub fn bytes_to_words(bytes: &[u8]) -> Result<Vec<u32>, LoadError> {
    let chunks = bytes.chunks_exact(4);
    if !chunks.remainder().is_empty() {
        return Err(LoadError::MisalignedStream { len: bytes.len() });
    }
    Ok(chunks
        .map(|c| u32::from_be_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

/// Appends the halt sentinel to a stream read from an instruction file.
pub fn with_sentinel(mut bytes: Vec<u8>) -> Vec<u8> {
    bytes.extend_from_slice(&SENTINEL);
    bytes
}

/// Renders `words` in the instruction-file format.
///
/// ```
/// use rvgold_core::sim::loader::render_hex_bytes;
///
/// assert_eq!(render_hex_bytes(&[0xFFF0_0093]), "FF\nF0\n00\n93\n");
/// ```
pub fn render_hex_bytes(words: &[u32]) -> String {
    words_to_bytes(words)
        .iter()
        .map(|b| format!("{b:02X}\n"))
        .collect()
}

/// Parses the instruction-file format.
///
/// Each non-blank line holds one byte as one or two hex digits of either case.
///
/// # Errors
///
/// [`LoadError::BadByte`] naming the first malformed line.
pub fn parse_hex_bytes(text: &str) -> Result<Vec<u8>, LoadError> {
    text.lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty())
        .map(|(line, token)| {
            parse_byte(token).ok_or_else(|| LoadError::BadByte {
                line,
                token: token.to_string(),
            })
        })
        .collect()
}

fn parse_byte(token: &str) -> Option<u8> {
    let valid = (1..=2).contains(&token.len()) && token.bytes().all(|b| b.is_ascii_hexdigit());
    if valid {
        u8::from_str_radix(token, 16).ok()
    } else {
        None
    }
}

/// Reads a text file.
///
/// # Errors
///
/// [`LoadError::Io`] naming `path`.
pub fn read_text(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Writes `text` to `path`, replacing any existing file.
///
/// # Errors
///
/// [`LoadError::Io`] naming `path`.
pub fn write_text(path: &Path, text: &str) -> Result<(), LoadError> {
    fs::write(path, text).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Reads an instruction file into bytes (no sentinel).
///
/// # Errors
///
/// [`LoadError::Io`] or [`LoadError::BadByte`].
pub fn read_hex_file(path: &Path) -> Result<Vec<u8>, LoadError> {
    parse_hex_bytes(&read_text(path)?)
}

/// Reads an expected-state file.
///
/// # Errors
///
/// [`LoadError::Io`] or any [`Snapshot::parse`] error.
pub fn read_expected_file(path: &Path) -> Result<Snapshot, LoadError> {
    Snapshot::parse(&read_text(path)?)
}
