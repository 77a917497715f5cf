use crate::error::{MazeError, Result};

/// Items stored in a [`BinaryHeap`].
///
/// The key locates the item's slot in the heap's index, so it must be unique among the items
/// of a heap and less than the heap's capacity.
pub trait HeapKey: Copy {
    fn heap_key(&self) -> usize;
}

impl HeapKey for usize {
    fn heap_key(&self) -> usize {
        *self
    }
}

#[derive(Clone, Copy, Debug)]
struct HeapNode<T> {
    priority: u32,
    sequence: u64,
    item: T,
}

impl<T> HeapNode<T> {
    /// Orders by priority, then by insertion order so that equal priorities pop FIFO.
    #[inline(always)]
    fn le(&self, other: &Self) -> bool {
        (self.priority, self.sequence) <= (other.priority, other.sequence)
    }
}

/// Fixed-capacity indexed min-priority-queue with decrease-key.
pub struct BinaryHeap<T> {
    heap: Vec<HeapNode<T>>,
    // Heap slot of each key, or usize::MAX if that key is not queued.
    slots: Box<[usize]>,
    next_sequence: u64,
}

impl<T: HeapKey> BinaryHeap<T> {
    pub fn new(capacity: usize) -> Self {
        BinaryHeap {
            heap: Vec::with_capacity(capacity),
            slots: vec![usize::MAX; capacity].into_boxed_slice(),
            next_sequence: 0,
        }
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.heap.len() == self.capacity()
    }

    /// O(1) membership test through the slot index.
    pub fn contains(&self, item: T) -> bool {
        self.slot(item).is_some()
    }

    pub fn priority_of(&self, item: T) -> Option<u32> {
        self.slot(item).map(|slot| self.heap[slot].priority)
    }

    pub fn peek(&self) -> Option<(u32, T)> {
        self.heap.first().map(|node| (node.priority, node.item))
    }

    pub fn insert(&mut self, priority: u32, item: T) -> Result<()> {
        let key = item.heap_key();
        if key >= self.capacity() {
            return Err(MazeError::CapacityExceeded {
                resource: "heap key space",
                requested: key + 1,
                capacity: self.capacity(),
            });
        }
        if self.is_full() {
            return Err(MazeError::CapacityExceeded {
                resource: "binary heap",
                requested: self.len() + 1,
                capacity: self.capacity(),
            });
        }
        if self.slots[key] != usize::MAX {
            return Err(MazeError::AlreadyQueued { key });
        }

        let node = HeapNode {
            priority,
            sequence: self.next_sequence,
            item,
        };
        self.next_sequence += 1;
        self.heap.push(node);
        self.sift_up(node, self.heap.len() - 1);
        Ok(())
    }

    pub fn extract_min(&mut self) -> Option<(u32, T)> {
        if self.heap.is_empty() {
            return None;
        }
        let root = self.heap.swap_remove(0);
        self.slots[root.item.heap_key()] = usize::MAX;
        if let Some(&node) = self.heap.first() {
            self.sift_down(node, 0);
        }
        Some((root.priority, root.item))
    }

    /// Lowers the priority of a queued item in place.
    ///
    /// The item keeps its original insertion sequence for tie-breaking.
    pub fn decrease_priority(&mut self, item: T, priority: u32) -> Result<()> {
        let key = item.heap_key();
        let Some(slot) = self.slot(item) else {
            return Err(MazeError::NotQueued { key });
        };
        let mut node = self.heap[slot];
        if priority >= node.priority {
            return Err(MazeError::PriorityNotLower {
                current: node.priority,
                requested: priority,
            });
        }
        node.priority = priority;
        // A strict decrease can only move the node toward the root.
        self.sift_up(node, slot);
        Ok(())
    }

    pub fn clear(&mut self) {
        for node in self.heap.drain(..) {
            self.slots[node.item.heap_key()] = usize::MAX;
        }
        self.next_sequence = 0;
    }

    #[inline(always)]
    fn slot(&self, item: T) -> Option<usize> {
        match self.slots.get(item.heap_key()) {
            Some(&slot) if slot != usize::MAX => Some(slot),
            _ => None,
        }
    }

    fn sift_up(&mut self, node: HeapNode<T>, mut index: usize) {
        while index > 0 {
            let parent_index = (index - 1) / 2;
            let parent = self.heap[parent_index];
            if parent.le(&node) {
                break;
            }
            self.heap[index] = parent;
            self.slots[parent.item.heap_key()] = index;
            index = parent_index;
        }
        self.heap[index] = node;
        self.slots[node.item.heap_key()] = index;
    }

    fn sift_down(&mut self, node: HeapNode<T>, mut index: usize) {
        loop {
            let child_1_index = index * 2 + 1;
            if child_1_index >= self.heap.len() {
                break;
            }
            let child_1 = self.heap[child_1_index];

            let child_index;
            let child;

            let child_2_index = child_1_index + 1;
            if child_2_index < self.heap.len() {
                let child_2 = self.heap[child_2_index];

                if child_1.le(&child_2) {
                    child_index = child_1_index;
                    child = child_1;
                } else {
                    child_index = child_2_index;
                    child = child_2;
                }
            } else {
                child_index = child_1_index;
                child = child_1;
            }

            if node.le(&child) {
                break;
            }

            self.heap[index] = child;
            self.slots[child.item.heap_key()] = index;
            index = child_index;
        }

        self.heap[index] = node;
        self.slots[node.item.heap_key()] = index;
    }

    #[cfg(test)]
    fn check_invariants(&self) {
        for (index, node) in self.heap.iter().enumerate() {
            assert_eq!(self.slots[node.item.heap_key()], index, "stale slot index");
            if index > 0 {
                assert!(self.heap[(index - 1) / 2].le(node), "heap order violated");
            }
        }
        let queued = self.slots.iter().filter(|&&slot| slot != usize::MAX).count();
        assert_eq!(queued, self.heap.len());
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64;

    use super::*;

    fn drain(heap: &mut BinaryHeap<usize>) -> Vec<(u32, usize)> {
        std::iter::from_fn(|| heap.extract_min()).collect()
    }

    #[test]
    fn extracts_in_priority_order() {
        let mut heap = BinaryHeap::new(8);
        for (item, priority) in [5, 3, 8, 1, 9, 2].into_iter().enumerate() {
            heap.insert(priority, item).unwrap();
            heap.check_invariants();
        }
        let priorities: Vec<u32> = drain(&mut heap).into_iter().map(|(p, _)| p).collect();
        assert_eq!(priorities, vec![1, 2, 3, 5, 8, 9]);
        assert!(heap.is_empty());
        assert_eq!(heap.extract_min(), None);
    }

    #[test]
    fn equal_priorities_pop_in_insertion_order() {
        let mut heap = BinaryHeap::new(6);
        for item in [4, 0, 5, 2, 1, 3] {
            heap.insert(7, item).unwrap();
        }
        let items: Vec<usize> = drain(&mut heap).into_iter().map(|(_, i)| i).collect();
        assert_eq!(items, vec![4, 0, 5, 2, 1, 3]);
    }

    #[test]
    fn decrease_priority_repositions_item() {
        let mut heap = BinaryHeap::new(4);
        heap.insert(10, 0).unwrap();
        heap.insert(20, 1).unwrap();
        heap.insert(30, 2).unwrap();
        heap.decrease_priority(2, 5).unwrap();
        heap.check_invariants();
        assert_eq!(heap.priority_of(2), Some(5));
        assert_eq!(heap.peek(), Some((5, 2)));
        assert_eq!(drain(&mut heap), vec![(5, 2), (10, 0), (20, 1)]);
    }

    #[test]
    fn decrease_priority_rejects_bad_requests() {
        let mut heap = BinaryHeap::new(4);
        heap.insert(10, 1).unwrap();
        assert_eq!(
            heap.decrease_priority(1, 10),
            Err(MazeError::PriorityNotLower {
                current: 10,
                requested: 10
            })
        );
        assert_eq!(
            heap.decrease_priority(3, 1),
            Err(MazeError::NotQueued { key: 3 })
        );
        assert_eq!(heap.priority_of(1), Some(10));
    }

    #[test]
    fn insert_fails_when_full_or_duplicate() {
        let mut heap = BinaryHeap::new(2);
        heap.insert(1, 0).unwrap();
        assert_eq!(heap.insert(1, 0), Err(MazeError::AlreadyQueued { key: 0 }));
        heap.insert(2, 1).unwrap();
        assert!(heap.is_full());
        assert!(matches!(
            heap.insert(0, 1),
            Err(MazeError::CapacityExceeded { .. })
        ));
        assert!(matches!(
            heap.insert(0, 2),
            Err(MazeError::CapacityExceeded { .. })
        ));
    }

    #[test]
    fn membership_tracks_extraction_and_clear() {
        let mut heap = BinaryHeap::new(3);
        heap.insert(3, 2).unwrap();
        heap.insert(1, 0).unwrap();
        assert!(heap.contains(2) && heap.contains(0) && !heap.contains(1));
        assert_eq!(heap.extract_min(), Some((1, 0)));
        assert!(!heap.contains(0));
        heap.clear();
        assert!(!heap.contains(2));
        assert!(heap.is_empty());
        heap.insert(9, 2).unwrap();
        heap.check_invariants();
    }

    #[test]
    fn random_interleavings_keep_heap_order() {
        for seed in 0..50 {
            let mut rng = Pcg64::seed_from_u64(seed);
            let capacity = 32;
            let mut heap = BinaryHeap::new(capacity);

            for _ in 0..200 {
                let item = rng.gen_range(0..capacity);
                match rng.gen_range(0..3) {
                    0 => {
                        let _ = heap.insert(rng.gen_range(0..100), item);
                    }
                    1 => {
                        heap.extract_min();
                    }
                    _ => {
                        if let Some(current) = heap.priority_of(item) {
                            if current > 0 {
                                heap.decrease_priority(item, rng.gen_range(0..current))
                                    .unwrap();
                            }
                        }
                    }
                }
                heap.check_invariants();
            }

            let remaining = drain(&mut heap);
            assert!(remaining.windows(2).all(|w| w[0].0 <= w[1].0));
        }
    }
}
