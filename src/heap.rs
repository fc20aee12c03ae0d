/*!
# Indexed Binary Min-Heap

Priority queue for the Dijkstra visit. In addition to the usual array-backed
binary heap, a position index maps every node id to its current slot so that
`decrease_key` finds the element in O(1) before sifting it up in O(log n).

A node id may be enqueued at most once; after it has been dequeued it must not
reappear. Violations of these preconditions (and dequeue on an empty heap
through [`IndexedMinHeap::dequeue_min`] returning `None` being ignored) are
programming errors, guarded by debug assertions rather than `Result`s.
*/

use crate::node::{Dist, Node, NumNodes};

const ABSENT: NumNodes = NumNodes::MAX;

/// Array binary min-heap over `(node, weight)` with O(log n) decrease-key.
#[derive(Debug, Clone)]
pub struct IndexedMinHeap {
    elems: Vec<(Node, Dist)>,
    /// Slot of node `u` in `elems`, `ABSENT` if not enqueued
    pos: Vec<NumNodes>,
}

impl IndexedMinHeap {
    /// Creates an empty heap able to hold the node ids `0..n`
    pub fn new(n: NumNodes) -> Self {
        Self {
            elems: Vec::with_capacity(n as usize),
            pos: vec![ABSENT; n as usize],
        }
    }

    /// Returns *true* if no element is enqueued
    pub fn is_empty(&self) -> bool {
        self.elems.is_empty()
    }

    /// Returns the number of enqueued elements
    pub fn len(&self) -> usize {
        self.elems.len()
    }

    /// Returns *true* if `id` is currently enqueued
    pub fn contains(&self, id: Node) -> bool {
        self.pos[id as usize] != ABSENT
    }

    /// Inserts `id` with the given weight.
    /// ** Panics in debug builds if `id` is already enqueued **
    pub fn enqueue(&mut self, id: Node, weight: Dist) {
        debug_assert!(!self.contains(id));

        let slot = self.elems.len();
        self.elems.push((id, weight));
        self.pos[id as usize] = slot as NumNodes;
        self.sift_up(slot);
    }

    /// Lowers the weight of an enqueued `id` and restores the heap invariant.
    /// ** Panics in debug builds if `id` is absent or the weight increases **
    pub fn decrease_key(&mut self, id: Node, weight: Dist) {
        let slot = self.pos[id as usize];
        debug_assert_ne!(slot, ABSENT);
        let slot = slot as usize;

        debug_assert!(weight <= self.elems[slot].1);
        self.elems[slot].1 = weight;
        self.sift_up(slot);
    }

    /// Removes and returns the element with the minimum weight
    pub fn dequeue_min(&mut self) -> Option<(Node, Dist)> {
        let minimum = *self.elems.first()?;

        let last = self.elems.len() - 1;
        self.elems.swap(0, last);
        self.pos[self.elems[0].0 as usize] = 0;
        self.pos[self.elems[last].0 as usize] = ABSENT;
        self.elems.truncate(last);
        self.sift_down(0);

        Some(minimum)
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.elems[slot].1 >= self.elems[parent].1 {
                break;
            }
            self.swap_slots(slot, parent);
            slot = parent;
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        loop {
            let left = 2 * slot + 1;
            if left >= self.elems.len() {
                break;
            }

            // Smaller of the two children; ties break toward the left child
            let right = left + 1;
            let child = if right < self.elems.len() && self.elems[right].1 < self.elems[left].1 {
                right
            } else {
                left
            };

            if self.elems[slot].1 <= self.elems[child].1 {
                break;
            }
            self.swap_slots(slot, child);
            slot = child;
        }
    }

    fn swap_slots(&mut self, i: usize, j: usize) {
        self.elems.swap(i, j);
        self.pos[self.elems[i].0 as usize] = i as NumNodes;
        self.pos[self.elems[j].0 as usize] = j as NumNodes;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn dequeues_in_order() {
        let mut heap = IndexedMinHeap::new(5);
        for (id, w) in [(0, 7), (1, 3), (2, 9), (3, 1), (4, 5)] {
            heap.enqueue(id, w);
        }

        let mut order = Vec::new();
        while let Some((id, _)) = heap.dequeue_min() {
            order.push(id);
        }
        assert_eq!(order, vec![3, 1, 4, 0, 2]);
        assert!(heap.dequeue_min().is_none());
    }

    #[test]
    fn last_dequeue_clears_membership() {
        let mut heap = IndexedMinHeap::new(3);
        heap.enqueue(0, 5);
        assert_eq!(heap.dequeue_min(), Some((0, 5)));
        assert!(!heap.contains(0));

        // Re-filling afterwards must not alias the drained slot.
        heap.enqueue(1, 2);
        assert!(heap.contains(1));
        assert!(!heap.contains(0));
        heap.enqueue(0, 7);
        heap.decrease_key(0, 1);
        assert_eq!(heap.dequeue_min(), Some((0, 1)));
        assert_eq!(heap.dequeue_min(), Some((1, 2)));
        assert!(heap.is_empty());
    }

    #[test]
    fn decrease_key_reorders() {
        let mut heap = IndexedMinHeap::new(4);
        heap.enqueue(0, 10);
        heap.enqueue(1, 20);
        heap.enqueue(2, 30);
        heap.enqueue(3, 40);

        heap.decrease_key(3, 5);
        assert_eq!(heap.dequeue_min(), Some((3, 5)));
        heap.decrease_key(2, 15);
        assert_eq!(heap.dequeue_min(), Some((0, 10)));
        assert_eq!(heap.dequeue_min(), Some((2, 15)));
        assert_eq!(heap.dequeue_min(), Some((1, 20)));
    }

    /// Interleaved enqueue/decrease-key/dequeue against a naive model:
    /// every dequeue must yield the globally minimum remaining weight.
    #[test]
    fn randomized_against_model() {
        let rng = &mut Pcg64Mcg::seed_from_u64(0x1FED);

        for _ in 0..50 {
            let n: NumNodes = rng.random_range(1..200);
            let mut heap = IndexedMinHeap::new(n);
            let mut model: Vec<Option<Dist>> = vec![None; n as usize];
            let mut never_enqueued: Vec<Node> = (0..n).collect();

            for _ in 0..1000 {
                match rng.random_range(0..3) {
                    0 if !never_enqueued.is_empty() => {
                        let i = rng.random_range(0..never_enqueued.len());
                        let id = never_enqueued.swap_remove(i);
                        let w = rng.random_range(0..1_000_000);
                        heap.enqueue(id, w);
                        model[id as usize] = Some(w);
                    }
                    1 if model.iter().any(Option::is_some) => {
                        let enqueued: Vec<Node> = (0..n)
                            .filter(|&u| model[u as usize].is_some())
                            .collect();
                        let id = enqueued[rng.random_range(0..enqueued.len())];
                        let current = model[id as usize].unwrap();
                        let w = rng.random_range(0..=current);
                        heap.decrease_key(id, w);
                        model[id as usize] = Some(w);
                    }
                    2 if !heap.is_empty() => {
                        let (id, w) = heap.dequeue_min().unwrap();
                        let min = model.iter().flatten().min().copied().unwrap();
                        assert_eq!(w, min);
                        assert_eq!(model[id as usize], Some(w));
                        model[id as usize] = None;
                    }
                    _ => {}
                }
            }

            while let Some((id, w)) = heap.dequeue_min() {
                let min = model.iter().flatten().min().copied().unwrap();
                assert_eq!(w, min);
                assert_eq!(model[id as usize], Some(w));
                model[id as usize] = None;
            }
            assert!(model.iter().all(Option::is_none));
        }
    }
}
