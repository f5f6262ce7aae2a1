//! Indexable binary min-heap with decrease-key.
//!
//! The heap stores [`SearchNode`]s in a dense array and keeps a side table
//! mapping every grid cell index to its current slot in that array, so a
//! queued cell can be located in O(1) and re-keyed in O(log n). A cell has
//! a slot in the side table if and only if it is currently queued.

use fragnet_core::{Error, Result};

const ABSENT: usize = usize::MAX;

/// A queued search state: cell index, accumulated cost `g` and estimated
/// total cost `f = g + h`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SearchNode {
    pub idx: usize,
    pub g: f64,
    pub f: f64,
}

impl SearchNode {
    /// Heap order: smaller `f` first, ties broken by the smaller (row-major)
    /// cell index.
    #[inline]
    fn precedes(&self, other: &SearchNode) -> bool {
        self.f
            .total_cmp(&other.f)
            .then(self.idx.cmp(&other.idx))
            .is_lt()
    }
}

/// Binary min-heap keyed by `f` with O(log n) decrease-key and removal.
#[derive(Debug, Clone, Default)]
pub struct IndexedHeap {
    nodes: Vec<SearchNode>,
    slots: Vec<usize>,
}

impl IndexedHeap {
    /// Create an empty heap able to hold cell indices `0..cells`.
    pub fn new(cells: usize) -> Self {
        Self {
            nodes: Vec::new(),
            slots: vec![ABSENT; cells],
        }
    }

    /// Remove every queued node, keeping allocations.
    pub fn clear(&mut self) {
        for n in self.nodes.drain(..) {
            self.slots[n.idx] = ABSENT;
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Current slot of cell `idx`, or `None` if it is not queued.
    #[inline]
    pub fn slot(&self, idx: usize) -> Option<usize> {
        match self.slots.get(idx) {
            Some(&s) if s != ABSENT => Some(s),
            _ => None,
        }
    }

    /// Add `node` and return the slot it settles in.
    ///
    /// The cell must not already be queued; use
    /// [`decrease_key`](Self::decrease_key) to re-key a queued cell.
    pub fn insert(&mut self, node: SearchNode) -> usize {
        debug_assert_eq!(self.slot(node.idx), None, "cell {} queued twice", node.idx);
        let slot = self.nodes.len();
        self.nodes.push(node);
        self.slots[node.idx] = slot;
        self.sift_up(slot)
    }

    /// Remove and return the node with the least `f`.
    ///
    /// Fails with [`Error::EmptyQueue`] when nothing is queued.
    pub fn extract_min(&mut self) -> Result<SearchNode> {
        if self.nodes.is_empty() {
            return Err(Error::EmptyQueue);
        }
        Ok(self.remove(0))
    }

    /// Lower the key of the node at `slot` to `(g, f)` and restore heap
    /// order. Returns the node's new slot.
    pub fn decrease_key(&mut self, slot: usize, g: f64, f: f64) -> usize {
        let node = &mut self.nodes[slot];
        debug_assert!(f <= node.f, "decrease_key raised f from {} to {}", node.f, f);
        node.g = g;
        node.f = f;
        self.sift_up(slot)
    }

    /// Remove and return the node at `slot`.
    pub fn remove(&mut self, slot: usize) -> SearchNode {
        let node = self.nodes.swap_remove(slot);
        self.slots[node.idx] = ABSENT;
        if slot < self.nodes.len() {
            self.slots[self.nodes[slot].idx] = slot;
            // The replacement can violate order in either direction.
            let s = self.sift_down(slot);
            self.sift_up(s);
        }
        node
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.nodes.swap(a, b);
        self.slots[self.nodes[a].idx] = a;
        self.slots[self.nodes[b].idx] = b;
    }

    fn sift_up(&mut self, mut slot: usize) -> usize {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if !self.nodes[slot].precedes(&self.nodes[parent]) {
                break;
            }
            self.swap(slot, parent);
            slot = parent;
        }
        slot
    }

    fn sift_down(&mut self, mut slot: usize) -> usize {
        let len = self.nodes.len();
        loop {
            let left = 2 * slot + 1;
            let right = left + 1;
            let mut best = slot;
            if left < len && self.nodes[left].precedes(&self.nodes[best]) {
                best = left;
            }
            if right < len && self.nodes[right].precedes(&self.nodes[best]) {
                best = right;
            }
            if best == slot {
                return slot;
            }
            self.swap(slot, best);
            slot = best;
        }
    }
}
