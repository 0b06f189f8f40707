//! Frequency Heap Module
//!
//! Array-backed min-heap ordered by access count, with a key → position index
//! so that any node can be re-positioned after its count changes.

use std::collections::HashMap;

use crate::cache::CacheItem;

// == LFU Node ==
#[derive(Debug, Clone)]
pub struct LfuNode {
    pub item: CacheItem,
    /// Number of accesses, starting at 1 on insert
    pub frequency: u64,
}

// == Frequency Heap ==
#[derive(Debug, Default)]
pub struct FrequencyHeap {
    nodes: Vec<LfuNode>,
    /// Current array position of every key in `nodes`
    positions: HashMap<String, usize>,
}

impl FrequencyHeap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.positions.get(key).copied()
    }

    pub fn node(&self, index: usize) -> &LfuNode {
        &self.nodes[index]
    }

    pub fn node_mut(&mut self, index: usize) -> &mut LfuNode {
        &mut self.nodes[index]
    }

    // == Push ==
    /// Appends a node and sifts it into place.
    pub fn push(&mut self, node: LfuNode) {
        let index = self.nodes.len();
        self.positions.insert(node.item.key.clone(), index);
        self.nodes.push(node);
        self.sift_up(index);
    }

    // == Pop Min ==
    /// Removes the node with the smallest frequency.
    pub fn pop_min(&mut self) -> Option<LfuNode> {
        if self.nodes.is_empty() {
            None
        } else {
            Some(self.remove(0))
        }
    }

    // == Remove ==
    /// Removes the node at `index`, filling the hole with the last node.
    pub fn remove(&mut self, index: usize) -> LfuNode {
        let last = self.nodes.len() - 1;
        if index != last {
            self.swap(index, last);
        }
        let node = self.nodes.pop().expect("heap checked non-empty");
        self.positions.remove(&node.item.key);
        if index < self.nodes.len() {
            self.sift_to_correct_position(index);
        }
        node
    }

    // == Increment ==
    /// Bumps the access count of the node at `index` and restores heap order.
    pub fn increment(&mut self, index: usize) -> usize {
        self.nodes[index].frequency += 1;
        self.sift_to_correct_position(index)
    }

    // == Sift To Correct Position ==
    /// Moves the node at `index` up or down until the heap property holds,
    /// returning its final position.
    pub fn sift_to_correct_position(&mut self, index: usize) -> usize {
        let index = self.sift_up(index);
        self.sift_down(index)
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.positions.clear();
    }

    fn sift_up(&mut self, mut index: usize) -> usize {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.nodes[index].frequency >= self.nodes[parent].frequency {
                break;
            }
            self.swap(index, parent);
            index = parent;
        }
        index
    }

    fn sift_down(&mut self, mut index: usize) -> usize {
        let len = self.nodes.len();
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut smallest = index;

            if left < len && self.nodes[left].frequency < self.nodes[smallest].frequency {
                smallest = left;
            }
            if right < len && self.nodes[right].frequency < self.nodes[smallest].frequency {
                smallest = right;
            }
            if smallest == index {
                return index;
            }
            self.swap(index, smallest);
            index = smallest;
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.nodes.swap(a, b);
        self.positions.insert(self.nodes[a].item.key.clone(), a);
        self.positions.insert(self.nodes[b].item.key.clone(), b);
    }

    /// Checks the heap property and the position index.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        assert_eq!(self.nodes.len(), self.positions.len());
        for (i, node) in self.nodes.iter().enumerate() {
            assert_eq!(self.positions.get(&node.item.key), Some(&i));
            if i > 0 {
                assert!(self.nodes[(i - 1) / 2].frequency <= node.frequency);
            }
        }
    }
}
