//! An AVL tree keyed by Coord, ordered by a caller-supplied CoordCompare.
//!
//! Nodes live in a Vec and point at each other by index, same as the rest of
//! the crate. Nothing is ever removed, so indexes stay valid for the life of
//! the tree and `len()` is just the Vec length.

use super::CoordCompare;
use crate::geo::Coord;

#[derive(Clone, Debug)]
struct TreeNode<V> {
    key: Coord,
    value: V,
    left: Option<usize>,
    right: Option<usize>,
    height: u8,
}

/// A sorted map from Coord to `V` with no two keys equal under `C`.
#[derive(Clone, Debug)]
pub struct TreeMap<V, C> {
    nodes: Vec<TreeNode<V>>,
    root: Option<usize>,
    compare: C,
}

impl<V, C: CoordCompare> TreeMap<V, C> {
    pub fn new(compare: C) -> TreeMap<V, C> {
        TreeMap {
            nodes: vec![],
            root: None,
            compare: compare,
        }
    }

    pub fn compare(&self) -> &C {
        &self.compare
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Inserts `key` unless an equal key is already present.
    ///
    /// Returns true if inserted. When an equal key exists, neither its key nor
    /// its value changes.
    pub fn insert(&mut self, key: Coord, value: V) -> bool {
        let (root, inserted) = self.insert_at(self.root, key, value);
        self.root = Some(root);
        inserted
    }

    pub fn get(&self, key: &Coord) -> Option<&V> {
        self.find(key).map(|i| &self.nodes[i].value)
    }

    pub fn get_mut(&mut self, key: &Coord) -> Option<&mut V> {
        match self.find(key) {
            Some(i) => Some(&mut self.nodes[i].value),
            None => None,
        }
    }

    pub fn contains_key(&self, key: &Coord) -> bool {
        self.find(key).is_some()
    }

    /// Calls `visit` on every entry in ascending order.
    pub fn walk<F: FnMut(&Coord, &V)>(&self, mut visit: F) {
        for (key, value) in self.iter() {
            visit(key, value);
        }
    }

    /// Iterates entries in ascending order.
    pub fn iter(&self) -> Iter<'_, V> {
        let mut ret = Iter { nodes: &self.nodes, stack: vec![] };
        ret.push_left_spine(self.root);
        ret
    }

    fn find(&self, key: &Coord) -> Option<usize> {
        let mut at = self.root;
        while let Some(i) = at {
            let node = &self.nodes[i];
            if self.compare.is_equals(key, &node.key) {
                return Some(i);
            }
            at = if self.compare.is_less(key, &node.key) {
                node.left
            } else {
                node.right
            };
        }
        None
    }

    /// Returns the (possibly new) root of this subtree and whether we
    /// inserted.
    fn insert_at(&mut self, at: Option<usize>, key: Coord, value: V) -> (usize, bool) {
        let i = match at {
            None => {
                self.nodes.push(TreeNode {
                    key: key,
                    value: value,
                    left: None,
                    right: None,
                    height: 1,
                });
                return (self.nodes.len() - 1, true);
            }
            Some(i) => i,
        };

        if self.compare.is_equals(&key, &self.nodes[i].key) {
            return (i, false);
        }

        if self.compare.is_less(&key, &self.nodes[i].key) {
            let (child, inserted) = self.insert_at(self.nodes[i].left, key, value);
            self.nodes[i].left = Some(child);
            if !inserted {
                return (i, false);
            }
        } else {
            let (child, inserted) = self.insert_at(self.nodes[i].right, key, value);
            self.nodes[i].right = Some(child);
            if !inserted {
                return (i, false);
            }
        }

        (self.rebalance(i), true)
    }

    fn height(&self, at: Option<usize>) -> u8 {
        at.map_or(0, |i| self.nodes[i].height)
    }

    fn update_height(&mut self, i: usize) {
        let h = self.height(self.nodes[i].left).max(self.height(self.nodes[i].right));
        self.nodes[i].height = h + 1;
    }

    fn balance_factor(&self, i: usize) -> i16 {
        self.height(self.nodes[i].left) as i16 - self.height(self.nodes[i].right) as i16
    }

    fn rotate_right(&mut self, i: usize) -> usize {
        // Only called when the left subtree is taller, so it exists.
        let l = match self.nodes[i].left {
            Some(l) => l,
            None => return i,
        };
        self.nodes[i].left = self.nodes[l].right;
        self.nodes[l].right = Some(i);
        self.update_height(i);
        self.update_height(l);
        l
    }

    fn rotate_left(&mut self, i: usize) -> usize {
        let r = match self.nodes[i].right {
            Some(r) => r,
            None => return i,
        };
        self.nodes[i].right = self.nodes[r].left;
        self.nodes[r].left = Some(i);
        self.update_height(i);
        self.update_height(r);
        r
    }

    fn rebalance(&mut self, i: usize) -> usize {
        self.update_height(i);
        let bf = self.balance_factor(i);

        if bf > 1 {
            if let Some(l) = self.nodes[i].left {
                if self.balance_factor(l) < 0 {
                    let new_left = self.rotate_left(l);
                    self.nodes[i].left = Some(new_left);
                }
            }
            return self.rotate_right(i);
        }

        if bf < -1 {
            if let Some(r) = self.nodes[i].right {
                if self.balance_factor(r) > 0 {
                    let new_right = self.rotate_right(r);
                    self.nodes[i].right = Some(new_right);
                }
            }
            return self.rotate_left(i);
        }

        i
    }
}

/// In-order iterator over a TreeMap.
pub struct Iter<'a, V> {
    nodes: &'a [TreeNode<V>],
    stack: Vec<usize>,
}

impl<'a, V> Iter<'a, V> {
    fn push_left_spine(&mut self, mut at: Option<usize>) {
        while let Some(i) = at {
            self.stack.push(i);
            at = self.nodes[i].left;
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a Coord, &'a V);

    fn next(&mut self) -> Option<(&'a Coord, &'a V)> {
        let i = self.stack.pop()?;
        let nodes = self.nodes;
        self.push_left_spine(nodes[i].right);
        Some((&nodes[i].key, &nodes[i].value))
    }
}
