/// Instruction-file rendering and parsing.
pub mod loader;
