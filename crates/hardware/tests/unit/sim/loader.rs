//! # Loader Tests
//!
//! Instruction-file rendering, parsing and file round trips through a temp directory.

use pretty_assertions::assert_eq;
use tempfile::tempdir;

use rvgold_core::common::error::LoadError;
use rvgold_core::isa::asm::assemble_words;
use rvgold_core::sim::loader::{
    bytes_to_words, parse_hex_bytes, read_expected_file, read_hex_file, render_hex_bytes,
    to_stream, with_sentinel, words_to_bytes, write_text,
};
use rvgold_core::sim::vector::EDGE_PROGRAM;

#[test]
fn stream_is_big_endian_with_sentinel() {
    let stream = to_stream(&[0x0640_0013, 0xFFF0_0093]);
    assert_eq!(
        stream,
        vec![0x06, 0x40, 0x00, 0x13, 0xFF, 0xF0, 0x00, 0x93, 0, 0, 0, 0]
    );
}

#[test]
fn empty_program_is_just_the_sentinel() {
    assert_eq!(to_stream(&[]), vec![0, 0, 0, 0]);
    assert_eq!(render_hex_bytes(&[]), "");
}

#[test]
fn rendered_file_is_uppercase_one_byte_per_line() {
    let words = assemble_words(EDGE_PROGRAM).unwrap();
    let text = render_hex_bytes(&words);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 31 * 4);
    assert_eq!(&lines[..8], &["06", "40", "00", "13", "FF", "F0", "00", "93"]);
    assert!(text.ends_with('\n'));
    assert!(lines.iter().all(|l| l.len() == 2 && l.chars().all(|c| !c.is_ascii_lowercase())));
}

#[test]
fn parse_inverts_render() {
    let words = assemble_words(EDGE_PROGRAM).unwrap();
    let bytes = parse_hex_bytes(&render_hex_bytes(&words)).unwrap();
    assert_eq!(bytes, words_to_bytes(&words));
    assert_eq!(bytes_to_words(&bytes).unwrap(), words);
}

#[test]
fn parse_reports_line_of_bad_byte() {
    let err = parse_hex_bytes("00\n13\n\nZZ\n").unwrap_err();
    assert!(matches!(err, LoadError::BadByte { line: 4, ref token } if token == "ZZ"));
}

#[test]
fn with_sentinel_appends_four_zero_bytes() {
    assert_eq!(with_sentinel(vec![1, 2, 3, 4]), vec![1, 2, 3, 4, 0, 0, 0, 0]);
}

#[test]
fn files_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("instructions.txt");
    write_text(&path, "FF\nF0\n00\n93\n").unwrap();
    assert_eq!(read_hex_file(&path).unwrap(), vec![0xFF, 0xF0, 0x00, 0x93]);
}

#[test]
fn missing_file_names_the_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.txt");
    let err = read_hex_file(&path).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert!(err.to_string().contains("absent.txt"));
    assert!(matches!(read_expected_file(&path), Err(LoadError::Io { .. })));
}
