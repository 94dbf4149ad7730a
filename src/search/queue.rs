//! Comparator-ordered priority queue.
//!
//! A binary min-heap stored in a flat array. Ordering comes from a caller-supplied
//! comparator rather than `Ord`, so keys such as `f64` scores can be used directly.
//! Among entries the comparator considers equal, the most recently inserted one is
//! extracted first.

use alloc::vec::Vec;
use core::cmp::Ordering;

struct Slot<T> {
    value: T,
    seq: u64,
}

/// Priority queue returning the smallest element under `compare`.
pub struct PriorityQueue<T, F = fn(&T, &T) -> Ordering>
where
    F: FnMut(&T, &T) -> Ordering,
{
    heap: Vec<Slot<T>>,
    next_seq: u64,
    compare: F,
}

impl<T, F> PriorityQueue<T, F>
where
    F: FnMut(&T, &T) -> Ordering,
{
    /// Create an empty queue ordered by `compare`.
    pub fn new(compare: F) -> Self {
        Self {
            heap: Vec::new(),
            next_seq: 0,
            compare,
        }
    }

    /// Number of queued elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Check if the queue is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Smallest element, without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.heap.first().map(|slot| &slot.value)
    }

    /// Remove every element.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.next_seq = 0;
    }

    /// Add an element.
    pub fn insert(&mut self, value: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Slot { value, seq });
        self.sift_up(self.heap.len() - 1);
    }

    /// Remove and return the smallest element, or `None` when empty.
    pub fn extract_min(&mut self) -> Option<T> {
        let last = self.heap.len().checked_sub(1)?;
        self.heap.swap(0, last);
        let min = self.heap.pop().map(|slot| slot.value);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        min
    }

    /// `true` when slot `i` must sit above slot `j`.
    fn precedes(&mut self, i: usize, j: usize) -> bool {
        let (a, b) = (&self.heap[i], &self.heap[j]);
        match (self.compare)(&a.value, &b.value) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => a.seq > b.seq,
        }
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if !self.precedes(index, parent) {
                break;
            }
            self.heap.swap(index, parent);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * index + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let child = if right < len && self.precedes(right, left) {
                right
            } else {
                left
            };
            if !self.precedes(child, index) {
                break;
            }
            self.heap.swap(index, child);
            index = child;
        }
    }
}

impl<T: Ord> PriorityQueue<T> {
    /// Create an empty queue ordered by `T`'s natural order.
    pub fn natural() -> Self {
        Self::new(T::cmp)
    }
}

impl<T, F> Extend<T> for PriorityQueue<T, F>
where
    F: FnMut(&T, &T) -> Ordering,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}
