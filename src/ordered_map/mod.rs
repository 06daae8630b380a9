//! The ordered_map module provides the key-ordered container used by the Huffman pipeline.
//!
//! It is used twice: once to hold symbol frequencies and once to hold the symbol to code table.
//!
//! The map is a weight-balanced, threaded binary search tree. Every node records the sizes of
//! its left and right subtrees, and for every node the larger of the two may be at most one
//! more than twice the smaller. When an insertion breaks that rule the highest offending
//! subtree is rebuilt around its median.
//!
//! A node without a right child reuses its right slot as a thread to its in-order successor,
//! so walking the keys in order needs neither parent links nor a stack.
//!
//! Nodes live in an arena (a Vec) and refer to each other by index. Nothing is ever removed
//! except by clearing the whole map, so an index stays valid for the life of the map and a
//! rebuild only rewires links between existing slots.
//!

mod iter;
#[cfg(test)]
mod proptests;

pub use iter::{Iter, Keys, Values};

use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter, Write};

use log::trace;

use crate::error::{Error, Result};

/// Index of a node in the arena.
type NodeId = usize;

#[derive(Debug, Clone)]
struct Node<K, V> {
    key: K,
    value: V,
    left: Option<NodeId>,
    /// Right child, or the in-order successor when `is_linked` is set.
    right: Option<NodeId>,
    left_count: usize,
    right_count: usize,
    is_linked: bool,
}

impl<K, V> Node<K, V> {
    /// New nodes are always leaves, threaded to their successor.
    fn new(key: K, value: V, successor: Option<NodeId>) -> Self {
        Node {
            key,
            value,
            left: None,
            right: successor,
            left_count: 0,
            right_count: 0,
            is_linked: true,
        }
    }

    /// The structural right child, ignoring the thread.
    fn right_child(&self) -> Option<NodeId> {
        if self.is_linked {
            None
        } else {
            self.right
        }
    }

    fn is_balanced(&self) -> bool {
        let (lo, hi) = if self.left_count < self.right_count {
            (self.left_count, self.right_count)
        } else {
            (self.right_count, self.left_count)
        };
        hi <= 2 * lo + 1
    }
}

/// A key-ordered map backed by a weight-balanced threaded binary search tree.
#[derive(Debug)]
pub struct OrderedMap<K, V> {
    nodes: Vec<Node<K, V>>,
    root: Option<NodeId>,
}

impl<K, V> OrderedMap<K, V> {
    /// Create an empty map.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
        }
    }

    /// Number of distinct keys in the map.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Iterate over `(key, value)` pairs in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self, self.leftmost(self.root))
    }

    /// Iterate over the keys in ascending order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Iterate over the values in ascending key order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Copy every entry out in ascending key order.
    pub fn to_vec(&self) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    /// Reports `key: K, nL: x, nR: y` for every node in pre-order. Useful for checking
    /// the shape of the tree after a series of insertions.
    pub fn balance_report(&self) -> String
    where
        K: Display,
    {
        let mut report = String::new();
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            // Writing to a String cannot fail
            let _ = writeln!(
                report,
                "key: {}, nL: {}, nR: {}",
                node.key, node.left_count, node.right_count
            );
            // Right first, so the left subtree comes off the stack first
            stack.extend(node.right_child());
            stack.extend(node.left);
        }
        report
    }

    /// Follow left links down from `from`.
    fn leftmost(&self, from: Option<NodeId>) -> Option<NodeId> {
        let mut id = from?;
        while let Some(left) = self.nodes[id].left {
            id = left;
        }
        Some(id)
    }

    /// In-order successor, O(1) when the node is threaded.
    fn successor(&self, id: NodeId) -> Option<NodeId> {
        let node = &self.nodes[id];
        if node.is_linked {
            node.right
        } else {
            self.leftmost(node.right)
        }
    }

    /// Collect the subtree under `top` in key order.
    fn collect_in_order(&self, top: NodeId) -> Vec<NodeId> {
        let size = self.nodes[top].left_count + self.nodes[top].right_count + 1;
        let mut order = Vec::with_capacity(size);
        let mut stack = Vec::new();
        let mut cur = Some(top);
        loop {
            while let Some(id) = cur {
                stack.push(id);
                cur = self.nodes[id].left;
            }
            match stack.pop() {
                Some(id) => {
                    order.push(id);
                    cur = self.nodes[id].right_child();
                }
                None => break,
            }
        }
        order
    }

    /// Relink `order` (already sorted) as a perfectly balanced subtree and return its root.
    /// The last node of the subtree is threaded to `successor`.
    fn link_balanced(&mut self, order: &[NodeId], successor: Option<NodeId>) -> Option<NodeId> {
        if order.is_empty() {
            return None;
        }
        let mid = (order.len() - 1) / 2;
        let id = order[mid];
        let left = self.link_balanced(&order[..mid], Some(id));
        let right = self.link_balanced(&order[mid + 1..], successor);

        let node = &mut self.nodes[id];
        node.left = left;
        node.left_count = mid;
        node.right_count = order.len() - mid - 1;
        match right {
            Some(child) => {
                node.right = Some(child);
                node.is_linked = false;
            }
            None => {
                node.right = successor;
                node.is_linked = true;
            }
        }
        Some(id)
    }
}

impl<K: Ord, V> OrderedMap<K, V> {
    /// Insert `value` under `key`, overwriting any previous value in place.
    pub fn put(&mut self, key: K, value: V) -> Result<()> {
        self.insert_node(key, value).map(|_| ())
    }

    /// Value stored under `key`, or `V::default()` when the key is absent.
    /// A miss is not an error.
    pub fn get(&self, key: &K) -> V
    where
        V: Clone + Default,
    {
        self.lookup(key).cloned().unwrap_or_default()
    }

    /// Borrow the value stored under `key`, if any.
    pub fn lookup(&self, key: &K) -> Option<&V> {
        self.find_node(key).map(|id| &self.nodes[id].value)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.find_node(key).is_some()
    }

    /// Value stored under `key`, inserting `V::default()` first if the key is absent.
    pub fn get_or_insert_default(&mut self, key: K) -> Result<&mut V>
    where
        V: Default,
    {
        let id = match self.find_node(&key) {
            Some(id) => id,
            None => self.insert_node(key, V::default())?,
        };
        Ok(&mut self.nodes[id].value)
    }

    fn find_node(&self, key: &K) -> Option<NodeId> {
        let mut cur = self.root;
        while let Some(id) = cur {
            let node = &self.nodes[id];
            cur = match key.cmp(&node.key) {
                Ordering::Equal => return Some(id),
                Ordering::Less => node.left,
                Ordering::Greater => node.right_child(),
            };
        }
        None
    }

    /// Insert or overwrite, returning the arena slot holding `key`.
    fn insert_node(&mut self, key: K, value: V) -> Result<NodeId> {
        // Every node we pass through, and which way we went
        let mut path: Vec<(NodeId, Ordering)> = Vec::new();
        let mut cur = self.root;
        while let Some(id) = cur {
            let node = &mut self.nodes[id];
            match key.cmp(&node.key) {
                Ordering::Equal => {
                    node.value = value;
                    return Ok(id);
                }
                Ordering::Less => {
                    path.push((id, Ordering::Less));
                    cur = node.left;
                }
                Ordering::Greater => {
                    path.push((id, Ordering::Greater));
                    cur = node.right_child();
                }
            }
        }

        let id = self.nodes.len();
        match path.last() {
            None => {
                self.nodes.push(Node::new(key, value, None));
                self.root = Some(id);
            }
            Some(&(parent, Ordering::Less)) => {
                // A new left leaf comes immediately before its parent
                self.nodes.push(Node::new(key, value, Some(parent)));
                self.nodes[parent].left = Some(id);
            }
            Some(&(parent, _)) => {
                // A new right leaf takes over its parent's thread
                let successor = self.nodes[parent].right;
                self.nodes.push(Node::new(key, value, successor));
                let parent = &mut self.nodes[parent];
                parent.right = Some(id);
                parent.is_linked = false;
            }
        }

        for &(ancestor, dir) in path.iter().rev() {
            let node = &mut self.nodes[ancestor];
            match dir {
                Ordering::Less => node.left_count += 1,
                _ => node.right_count += 1,
            }
        }

        self.rebalance(&path)?;
        Ok(id)
    }

    /// Rebuild the highest subtree on the insertion path that lost its balance.
    /// Only nodes on the path had their counts changed, so nothing else can be out of balance.
    fn rebalance(&mut self, path: &[(NodeId, Ordering)]) -> Result<()> {
        let pos = match path
            .iter()
            .position(|&(id, _)| !self.nodes[id].is_balanced())
        {
            Some(pos) => pos,
            None => return Ok(()),
        };
        let top = path[pos].0;

        let order = self.collect_in_order(top);
        // The subtree maximum has no right child, so its right slot is the thread out of the subtree
        let successor = order.last().and_then(|&last| self.nodes[last].right);
        let new_top = match self.link_balanced(&order, successor) {
            Some(id) => id,
            None => {
                return Err(Error::StructuralInvariantViolation {
                    detail: "rebuilt an empty subtree".to_string(),
                })
            }
        };
        trace!("Rebuilt a subtree of {} nodes", order.len());

        match pos.checked_sub(1).map(|p| path[p]) {
            None => self.root = Some(new_top),
            Some((parent, Ordering::Less)) => self.nodes[parent].left = Some(new_top),
            Some((parent, _)) => self.nodes[parent].right = Some(new_top),
        }

        let node = &self.nodes[new_top];
        if !node.is_balanced() || node.left_count + node.right_count + 1 != order.len() {
            return Err(Error::StructuralInvariantViolation {
                detail: format!(
                    "subtree of {} nodes rebuilt with {} left and {} right",
                    order.len(),
                    node.left_count,
                    node.right_count
                ),
            });
        }
        Ok(())
    }
}

impl<K, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone, V: Clone> Clone for OrderedMap<K, V> {
    /// Deep copy. Links are arena indices, so threading and counts carry over unchanged.
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            root: self.root,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.nodes.extend(source.nodes.iter().cloned());
        self.root = source.root;
    }
}

impl<K: Display, V: Display> Display for OrderedMap<K, V> {
    /// One `key: K value: V` line per entry, in key order.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (key, value) in self.iter() {
            writeln!(f, "key: {} value: {}", key, value)?;
        }
        Ok(())
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
