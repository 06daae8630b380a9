//! Decoder: walks the code tree one bit at a time.
//!

use log::debug;

use crate::bitstream::BitSource;
use crate::error::{Error, Result};
use crate::huffman_coding::code_tree::{CodeTree, Node, NodeData};
use crate::huffman_coding::symbol::Symbol;

/// Outcome of feeding one bit to the Decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Inside the tree, more bits needed.
    Pending,
    /// Reached a byte leaf. The cursor is back at the root.
    Symbol(u8),
    /// Reached the end-of-stream leaf.
    End,
}

/// Tree-walking state machine. The cursor starts at the root, moves to the zero or one child for
/// each bit, and returns to the root after every leaf.
#[derive(Debug, Clone)]
pub struct Decoder<'t> {
    tree: &'t CodeTree,
    cursor: &'t Node,
}

impl<'t> Decoder<'t> {
    pub fn new(tree: &'t CodeTree) -> Self {
        Self {
            tree,
            cursor: tree.root(),
        }
    }

    /// Feed one bit.
    pub fn step(&mut self, bit: bool) -> Step {
        // A tree that is a single leaf has the one-bit code, so any bit selects the root
        let next = self.cursor.child(bit).unwrap_or(self.cursor);
        match next.node_data {
            NodeData::Kids { .. } => {
                self.cursor = next;
                Step::Pending
            }
            NodeData::Leaf(Symbol::Byte(b)) => {
                self.cursor = self.tree.root();
                Step::Symbol(b)
            }
            NodeData::Leaf(Symbol::PseudoEof) => {
                self.cursor = self.tree.root();
                Step::End
            }
        }
    }
}

/// Decode bits from `source` until the end-of-stream code. Running out of bits first is a
/// TruncatedStream error. Bits after the end-of-stream code are left unread.
pub fn decode<S: BitSource>(source: &mut S, tree: &CodeTree) -> Result<Vec<u8>> {
    let mut decoder = Decoder::new(tree);
    let mut out = Vec::new();
    let mut bits_read: u64 = 0;

    loop {
        if source.at_end()? {
            return Err(Error::TruncatedStream { bits_read });
        }
        let bit = source.read_bit()?;
        bits_read += 1;
        match decoder.step(bit) {
            Step::Pending => {}
            Step::Symbol(b) => out.push(b),
            Step::End => break,
        }
    }

    debug!("Decoded {} bits into {} bytes", bits_read, out.len());
    Ok(out)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bitstream::BitCursor;
    use crate::compression::encode::Encoder;
    use crate::huffman_coding::code_table::build_code_table;
    use crate::huffman_coding::code_tree::build_code_tree;
    use crate::tools::freq_count::count_bytes;

    fn bits(text: &str) -> Vec<bool> {
        text.chars().map(|c| c == '1').collect()
    }

    fn tree_for(data: &[u8]) -> CodeTree {
        build_code_tree(&count_bytes(data).unwrap()).unwrap()
    }

    #[test]
    fn aaabbc_test() {
        let tree = tree_for(b"aaabbc");
        let stream = bits("0001010110111");
        let out = decode(&mut BitCursor::new(&stream), &tree).unwrap();
        assert_eq!(out, b"aaabbc");
    }

    #[test]
    fn stops_at_eof_test() {
        // Padding after the end-of-stream code must not be read as symbols
        let tree = tree_for(b"aaabbc");
        let stream = bits("0111000000");
        let mut cursor = BitCursor::new(&stream);
        assert_eq!(decode(&mut cursor, &tree).unwrap(), b"a");
        assert!(!cursor.at_end().unwrap());
    }

    #[test]
    fn missing_eof_is_truncated_test() {
        let tree = tree_for(b"aaabbc");
        let stream = bits("0001010110");
        let result = decode(&mut BitCursor::new(&stream), &tree);
        assert!(matches!(result, Err(Error::TruncatedStream { bits_read: 10 })));
    }

    #[test]
    fn cut_inside_code_is_truncated_test() {
        let tree = tree_for(b"aaabbc");
        let stream = bits("11");
        let result = decode(&mut BitCursor::new(&stream), &tree);
        assert!(matches!(result, Err(Error::TruncatedStream { bits_read: 2 })));
    }

    #[test]
    fn empty_stream_is_truncated_test() {
        let tree = tree_for(b"abc");
        let result = decode(&mut BitCursor::new(&[]), &tree);
        assert!(matches!(result, Err(Error::TruncatedStream { bits_read: 0 })));
    }

    #[test]
    fn lone_eof_tree_test() {
        let tree = tree_for(b"");
        let out = decode(&mut BitCursor::new(&[false]), &tree).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn step_test() {
        let tree = tree_for(b"aaabbc");
        let mut decoder = Decoder::new(&tree);
        assert_eq!(decoder.step(true), Step::Pending);
        assert_eq!(decoder.step(false), Step::Symbol(b'b'));
        assert_eq!(decoder.step(false), Step::Symbol(b'a'));
        assert_eq!(decoder.step(true), Step::Pending);
        assert_eq!(decoder.step(true), Step::Pending);
        assert_eq!(decoder.step(true), Step::End);
    }

    #[test]
    fn single_byte_alphabet_round_trip_test() {
        let data = b"zzzzzzzz";
        let tree = tree_for(data);
        let table = build_code_table(&tree).unwrap();
        let mut sink: Vec<bool> = Vec::new();
        Encoder::new(&table).encode(data, &mut sink).unwrap();
        let out = decode(&mut BitCursor::new(&sink), &tree).unwrap();
        assert_eq!(out, data);
    }
}
