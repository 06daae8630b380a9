//! The compression module manages both directions of the Huffman pipeline.
//!
//! Compression happens in the following steps:
//! - Frequency count: Tally every byte of the input, plus one end-of-stream symbol.
//! - Tree build: Merge the two lightest nodes until a single code tree remains.
//! - Code table: Record the root-to-leaf path of every symbol.
//! - Header: Write the frequency map as text at the front of the output.
//! - Encoding: Write the code of every input byte, then the end-of-stream code, as packed bits.
//!
//! Decompression reads the header back, rebuilds the same tree from it, and walks the tree one
//! bit at a time until it reaches the end-of-stream leaf.
//!
//! Everything runs on one thread, start to finish.
//!

pub mod compress;
pub mod decode;
pub mod decompress;
pub mod encode;
