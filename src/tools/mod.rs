//! The tools module provides the helpers around the coding core.
//!
//! The tools are:
//! - cli: Command line interface and the Options it produces.
//! - freq_count: Frequency count of the input bytes.
//! - header: Text encoding of the frequency map at the front of a compressed file.
//! - naming: Output file names for compression and decompression.
//!
pub mod cli;
pub mod freq_count;
pub mod header;
pub mod naming;
