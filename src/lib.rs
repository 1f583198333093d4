pub mod config;
pub mod conversion;
pub mod harness;
pub mod profiling;
pub mod record;
pub mod report;
pub mod sink;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BenchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Record mismatch for {approach} at index {index}: expected {expected:?}, got {actual:?}")]
    RecordMismatch {
        approach: &'static str,
        index: u32,
        expected: String,
        actual: String,
    },

    #[error("Parse mismatch for {strategy} on line {line}: expected {expected}, got {actual}")]
    ParseMismatch {
        strategy: &'static str,
        line: usize,
        expected: u64,
        actual: u64,
    },

    #[error("Cursor for {strategy} stopped at byte {offset} after line {line}, not at a line start")]
    CursorMisplaced {
        strategy: &'static str,
        line: usize,
        offset: usize,
    },

    #[error("{strategy} decoded {actual} lines, expected {expected}")]
    LineCount {
        strategy: &'static str,
        expected: usize,
        actual: usize,
    },
}

pub type Result<T> = std::result::Result<T, BenchError>;
