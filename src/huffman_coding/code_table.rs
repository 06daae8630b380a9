//! Derives the symbol to code table from a finished code tree.
//!

use std::fmt::{self, Display, Formatter};

use log::{debug, trace};

use super::code_tree::{CodeTree, Node, NodeData};
use super::CodeTable;
use crate::error::Result;

/// The code for one symbol: the root-to-leaf path, false for a zero step and true for a one step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CodeBits(Vec<bool>);

impl CodeBits {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, bit: bool) {
        self.0.push(bit);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    /// True if `self` is a prefix of `other`. Every code is a prefix of itself.
    pub fn is_prefix_of(&self, other: &CodeBits) -> bool {
        other.0.starts_with(&self.0)
    }
}

impl From<Vec<bool>> for CodeBits {
    fn from(bits: Vec<bool>) -> Self {
        Self(bits)
    }
}

impl Display for CodeBits {
    /// Renders the code as `0` and `1` characters.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for &bit in &self.0 {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Walk `tree` and record the path to every leaf.
///
/// A tree whose root is itself a leaf would give that symbol an empty code, which could never be
/// read back, so the lone symbol is given the single bit `0` instead.
pub fn build_code_table(tree: &CodeTree) -> Result<CodeTable> {
    let mut table = CodeTable::new();

    if let Some(symbol) = tree.root().symbol() {
        table.put(symbol, CodeBits::from(vec![false]))?;
        debug!("Code tree is a single leaf, {} gets code 0", symbol);
        return Ok(table);
    }

    // Explicit stack instead of recursion; a skewed tree can be as deep as the alphabet
    let mut stack: Vec<(&Node, CodeBits)> = vec![(tree.root(), CodeBits::new())];
    while let Some((node, path)) = stack.pop() {
        match &node.node_data {
            NodeData::Kids { zero, one } => {
                let mut one_path = path.clone();
                one_path.push(true);
                let mut zero_path = path;
                zero_path.push(false);
                stack.push((&**one, one_path));
                stack.push((&**zero, zero_path));
            }
            NodeData::Leaf(symbol) => {
                trace!("{} -> {}", symbol, path);
                table.put(*symbol, path)?;
            }
        }
    }

    debug!("Built code table with {} entries", table.len());
    Ok(table)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::huffman_coding::code_tree::build_code_tree;
    use crate::huffman_coding::symbol::Symbol;
    use crate::huffman_coding::FrequencyMap;

    fn table_for(pairs: &[(Symbol, u64)]) -> CodeTable {
        let mut freqs = FrequencyMap::new();
        for &(s, f) in pairs {
            freqs.put(s, f).unwrap();
        }
        build_code_table(&build_code_tree(&freqs).unwrap()).unwrap()
    }

    #[test]
    fn display_test() {
        let code = CodeBits::from(vec![true, false, true, true]);
        assert_eq!(code.to_string(), "1011");
        assert_eq!(code.len(), 4);
        assert_eq!(CodeBits::new().to_string(), "");
    }

    #[test]
    fn prefix_test() {
        let short = CodeBits::from(vec![true, false]);
        let long = CodeBits::from(vec![true, false, false]);
        assert!(short.is_prefix_of(&long));
        assert!(!long.is_prefix_of(&short));
        assert!(!CodeBits::from(vec![false]).is_prefix_of(&long));
    }

    #[test]
    fn aaabbc_codes_test() {
        let table = table_for(&[
            (Symbol::Byte(b'a'), 3),
            (Symbol::Byte(b'b'), 2),
            (Symbol::Byte(b'c'), 1),
            (Symbol::PseudoEof, 1),
        ]);
        assert_eq!(table.len(), 4);
        assert_eq!(table.get(&Symbol::Byte(b'a')).to_string(), "0");
        assert_eq!(table.get(&Symbol::Byte(b'b')).to_string(), "10");
        assert_eq!(table.get(&Symbol::Byte(b'c')).to_string(), "110");
        assert_eq!(table.get(&Symbol::PseudoEof).to_string(), "111");

        let a = table.get(&Symbol::Byte(b'a')).len();
        let b = table.get(&Symbol::Byte(b'b')).len();
        let c = table.get(&Symbol::Byte(b'c')).len();
        assert!(a <= b && b <= c);
    }

    #[test]
    fn lone_leaf_gets_one_bit_test() {
        let table = table_for(&[(Symbol::PseudoEof, 1)]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(&Symbol::PseudoEof).to_string(), "0");
    }

    #[test]
    fn codes_are_prefix_free_test() {
        let pairs: Vec<(Symbol, u64)> = (0..40u8)
            .map(|b| (Symbol::Byte(b), (b as u64 % 7) * 3 + 1))
            .chain(std::iter::once((Symbol::PseudoEof, 1)))
            .collect();
        let table = table_for(&pairs);
        let codes: Vec<&CodeBits> = table.values().collect();
        for (i, x) in codes.iter().enumerate() {
            assert!(!x.is_empty());
            for (j, y) in codes.iter().enumerate() {
                if i != j {
                    assert!(!x.is_prefix_of(y), "{} is a prefix of {}", x, y);
                }
            }
        }
    }
}
