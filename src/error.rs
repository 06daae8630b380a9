//! Error types for the huffpack compressor.

use std::path::PathBuf;

use thiserror::Error;

use crate::huffman_coding::symbol::Symbol;

/// Error variants for map, coding and file operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A code tree was requested from a frequency map with no entries.
    #[error("cannot build a code tree from an empty frequency map")]
    BuildPrecondition,

    /// The input held a symbol that the code table has no code for.
    #[error("symbol {0} has no entry in the code table")]
    EncodeGap(Symbol),

    /// The bit source ran dry before the end-of-stream code was read.
    #[error("bit stream ended after {bits_read} bits without an end-of-stream code")]
    TruncatedStream { bits_read: u64 },

    /// A rebuilt subtree still breaks the weight-balance rule.
    #[error("ordered map lost its weight balance: {detail}")]
    StructuralInvariantViolation { detail: String },

    /// The frequency header at the front of a compressed file could not be parsed.
    #[error("malformed frequency header: {0}")]
    MalformedHeader(String),

    /// The derived output file is already there and overwriting was not requested.
    #[error("output file {} already exists (use --force to overwrite)", .0.display())]
    OutputExists(PathBuf),

    /// An I/O error occurred while reading or writing data.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for huffpack operations.
pub type Result<T> = std::result::Result<T, Error>;
