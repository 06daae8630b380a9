//! The huffman_coding module turns symbol frequencies into a prefix code.
//!
//! Building the code happens in two steps:
//! - The frequency map is loaded into a min-weight queue and the two lightest nodes are merged
//!   until one tree remains. Ties are broken by queue order: leaves are queued in ascending
//!   symbol order, and each merged node is queued after everything already in the queue.
//! - The finished tree is walked from the root, appending a 0 for every step to a zero child and
//!   a 1 for every step to a one child. The path to each leaf is that symbol's code.
//!
//! Both steps are deterministic, so the decompressor rebuilds exactly the compressor's tree from
//! the frequency header alone.
//!

pub mod code_table;
pub mod code_tree;
pub mod symbol;

use crate::ordered_map::OrderedMap;

use code_table::CodeBits;
use symbol::Symbol;

/// Symbol to occurrence count, including one count for the end-of-stream symbol.
pub type FrequencyMap = OrderedMap<Symbol, u64>;

/// Symbol to the bits that encode it.
pub type CodeTable = OrderedMap<Symbol, CodeBits>;
