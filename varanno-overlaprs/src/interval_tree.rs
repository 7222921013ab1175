use std::cmp::max;

use varanno_core::models::{Location, Range};

use crate::traits::RangeIntersector;

/// A range and the payload attached to it.
///
/// Entries handed out by queries are read-only views: the range is the ordering key of the
/// index and must never change after insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<T> {
    range: Range,
    payload: T,
}

impl<T> Entry<T> {
    pub fn new(range: Range, payload: T) -> Self {
        Entry { range, payload }
    }

    #[inline]
    pub fn range(&self) -> &Range {
        &self.range
    }

    #[inline]
    pub fn payload(&self) -> &T {
        &self.payload
    }

    pub fn into_parts(self) -> (Range, T) {
        (self.range, self.payload)
    }
}

#[derive(Debug, Clone)]
struct Node<T> {
    entry: Entry<T>,
    left: Option<usize>,
    right: Option<usize>,
    /// Number of nodes on the longest path from this node down to a leaf.
    height: u32,
    /// The largest range boundary `(chromosome, end)` anywhere in this subtree.
    max_end: Location,
}

/// A height-balanced interval tree for genomic range overlap queries.
///
/// Entries are keyed by their [`Range`], ordered on `(chromosome, begin, end)`, and kept in an
/// AVL tree so that the depth stays within `1.44 * log2(n + 2)` no matter the order in which
/// ranges are inserted: sorted input, reverse sorted input and thousands of identical keys all
/// produce shallow trees. Each node is augmented with the maximum end boundary of its subtree,
/// so whole subtrees that end before a query begins are skipped.
///
/// Nodes live in a single arena and refer to their children by index. Cloning the tree
/// copies the arena, so a clone never shares structure with its source.
///
/// # Examples
///
/// ```
/// use varanno_core::models::Range;
/// use varanno_overlaprs::IntervalTree;
///
/// let mut tree = IntervalTree::new();
/// tree.put(Range::new(0, 100, 200), "gene1");
/// tree.put(Range::new(0, 150, 300), "gene2");
/// tree.put(Range::new(1, 100, 200), "gene3");
///
/// let hits = tree.intersect(&Range::new(0, 180, 250));
/// assert_eq!(hits.len(), 2);
///
/// for entry in tree.intersect_iter(&Range::new(1, 0, 150)) {
///     assert_eq!(*entry.payload(), "gene3");
/// }
/// ```
#[derive(Debug, Clone)]
pub struct IntervalTree<T> {
    nodes: Vec<Node<T>>,
    root: Option<usize>,
}

impl<T> Default for IntervalTree<T> {
    fn default() -> Self {
        IntervalTree {
            nodes: Vec::new(),
            root: None,
        }
    }
}

impl<T> IntervalTree<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a range and its payload. Duplicate and overlapping ranges are all kept.
    pub fn put(&mut self, range: Range, payload: T) {
        let idx = self.nodes.len();
        self.nodes.push(Node {
            entry: Entry::new(range, payload),
            left: None,
            right: None,
            height: 1,
            max_end: range.end_location(),
        });
        self.root = Some(self.insert_at(self.root, idx));
    }

    /// Find every entry whose range intersects `query`.
    ///
    /// The order of the results is unspecified.
    pub fn intersect(&self, query: &Range) -> Vec<&Entry<T>> {
        self.intersect_iter(query).collect()
    }

    /// Lazily iterate over every entry whose range intersects `query`.
    pub fn intersect_iter<'a>(&'a self, query: &Range) -> IterIntersect<'a, T> {
        IterIntersect::new(self, *query)
    }

    /// Iterate over all entries in ascending range order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Returns the number of entries in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree contains no entries.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The number of nodes on the longest root-to-leaf path; 0 for an empty tree.
    ///
    /// Measured by walking the tree rather than trusting the cached node heights.
    pub fn max_depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(usize, usize)> = self.root.map(|root| (root, 1)).into_iter().collect();
        while let Some((idx, depth)) = stack.pop() {
            deepest = max(deepest, depth);
            let node = &self.nodes[idx];
            for child in [node.left, node.right].into_iter().flatten() {
                stack.push((child, depth + 1));
            }
        }
        deepest
    }

    fn insert_at(&mut self, node: Option<usize>, new: usize) -> usize {
        let Some(node) = node else {
            return new;
        };

        if self.nodes[new].entry.range < self.nodes[node].entry.range {
            let child = self.insert_at(self.nodes[node].left, new);
            self.nodes[node].left = Some(child);
        } else {
            // equal keys go right, so duplicates keep insertion order in-order
            let child = self.insert_at(self.nodes[node].right, new);
            self.nodes[node].right = Some(child);
        }

        self.rebalance(node)
    }

    #[inline]
    fn height(&self, node: Option<usize>) -> u32 {
        node.map_or(0, |idx| self.nodes[idx].height)
    }

    fn balance_factor(&self, node: usize) -> i64 {
        i64::from(self.height(self.nodes[node].left)) - i64::from(self.height(self.nodes[node].right))
    }

    /// Recompute the cached height and subtree boundary of `node` from its children.
    fn update(&mut self, node: usize) {
        let (left, right) = (self.nodes[node].left, self.nodes[node].right);
        let mut max_end = self.nodes[node].entry.range.end_location();
        for child in [left, right].into_iter().flatten() {
            max_end = max(max_end, self.nodes[child].max_end);
        }

        let height = 1 + max(self.height(left), self.height(right));
        let n = &mut self.nodes[node];
        n.height = height;
        n.max_end = max_end;
    }

    fn rotate_right(&mut self, node: usize) -> usize {
        let Some(pivot) = self.nodes[node].left else {
            return node;
        };
        self.nodes[node].left = self.nodes[pivot].right;
        self.nodes[pivot].right = Some(node);
        self.update(node);
        self.update(pivot);
        pivot
    }

    fn rotate_left(&mut self, node: usize) -> usize {
        let Some(pivot) = self.nodes[node].right else {
            return node;
        };
        self.nodes[node].right = self.nodes[pivot].left;
        self.nodes[pivot].left = Some(node);
        self.update(node);
        self.update(pivot);
        pivot
    }

    fn rebalance(&mut self, node: usize) -> usize {
        self.update(node);
        let balance = self.balance_factor(node);

        if balance > 1 {
            if let Some(left) = self.nodes[node].left {
                if self.balance_factor(left) < 0 {
                    let child = self.rotate_left(left);
                    self.nodes[node].left = Some(child);
                }
            }
            return self.rotate_right(node);
        }

        if balance < -1 {
            if let Some(right) = self.nodes[node].right {
                if self.balance_factor(right) > 0 {
                    let child = self.rotate_right(right);
                    self.nodes[node].right = Some(child);
                }
            }
            return self.rotate_left(node);
        }

        node
    }
}

impl<T> RangeIntersector<T> for IntervalTree<T> {
    fn put(&mut self, range: Range, payload: T) {
        IntervalTree::put(self, range, payload)
    }

    fn intersect(&self, query: &Range) -> Vec<&Entry<T>> {
        IntervalTree::intersect(self, query)
    }

    fn clear(&mut self) {
        IntervalTree::clear(self)
    }

    fn len(&self) -> usize {
        IntervalTree::len(self)
    }

    fn max_depth(&self) -> usize {
        IntervalTree::max_depth(self)
    }
}

/// An iterator over entries in an [`IntervalTree`] that intersect a query range.
///
/// Created by [`IntervalTree::intersect_iter`]. Subtrees are pruned when their maximum end
/// boundary is at or before the query begin, when their keys all sort on an earlier
/// chromosome, or when their keys all begin at or after the query end.
#[derive(Debug)]
pub struct IterIntersect<'a, T> {
    tree: &'a IntervalTree<T>,
    query: Range,
    stack: Vec<usize>,
}

impl<'a, T> IterIntersect<'a, T> {
    fn new(tree: &'a IntervalTree<T>, query: Range) -> Self {
        IterIntersect {
            tree,
            query,
            stack: tree.root.into_iter().collect(),
        }
    }
}

impl<'a, T> Iterator for IterIntersect<'a, T> {
    type Item = &'a Entry<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let query_begin = self.query.begin_location();
        let query_end = self.query.end_location();
        let tree = self.tree;

        while let Some(idx) = self.stack.pop() {
            let node = &tree.nodes[idx];
            if node.max_end <= query_begin {
                continue;
            }

            let range = &node.entry.range;
            if let Some(left) = node.left {
                if range.chromosome >= self.query.chromosome {
                    self.stack.push(left);
                }
            }
            if let Some(right) = node.right {
                if range.begin_location() < query_end {
                    self.stack.push(right);
                }
            }

            if range.intersects(&self.query) {
                return Some(&node.entry);
            }
        }
        None
    }
}

/// An in-order iterator over all entries of an [`IntervalTree`].
#[derive(Debug)]
pub struct Iter<'a, T> {
    tree: &'a IntervalTree<T>,
    stack: Vec<usize>,
    next: Option<usize>,
}

impl<'a, T> Iter<'a, T> {
    fn new(tree: &'a IntervalTree<T>) -> Self {
        Iter {
            tree,
            stack: Vec::new(),
            next: tree.root,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a Entry<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        while let Some(idx) = self.next {
            self.stack.push(idx);
            self.next = tree.nodes[idx].left;
        }
        let idx = self.stack.pop()?;
        self.next = tree.nodes[idx].right;
        Some(&tree.nodes[idx].entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.tree.len()))
    }
}

impl<'a, T> IntoIterator for &'a IntervalTree<T> {
    type Item = &'a Entry<T>;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
