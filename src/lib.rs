//! A Huffman coding file compressor.
//!
//! Version 0.1.0
//!
//! Counts how often each byte occurs, builds an optimal prefix code from those counts, and
//! writes the frequency table followed by the bit-packed coded data. Decompression reads the
//! table back, rebuilds the identical code tree and decodes until the end-of-stream symbol.
//!
//! Both the frequency table and the code table are held in an OrderedMap, a weight-balanced
//! threaded binary search tree.
//!
//! Basic usage to compress a file is as follows:
//!
//! `$> huffpack test.txt`
//!
//! This will compress the file and create the file test.txt.huf. `huffpack -d test.txt.huf`
//! restores it as test_unc.txt. The input file is never deleted.
//!
//! In memory:
//!
//! ```
//! let (packed, report) = huffpack::compress_bytes(b"aaabbc").unwrap();
//! assert_eq!(report.payload_bits, 13);
//! assert_eq!(huffpack::decompress_bytes(&packed).unwrap(), b"aaabbc");
//! ```
//!
pub mod bitstream;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod ordered_map;
pub mod tools;

pub use compression::compress::{compress_bytes, compress_file, CompressionReport};
pub use compression::decompress::{decompress_bytes, decompress_file};
pub use error::{Error, Result};
pub use huffman_coding::symbol::Symbol;
pub use ordered_map::OrderedMap;
