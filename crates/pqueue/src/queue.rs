//! Heap implementation.

use crate::InvalidOperation;
use std::cmp::Ordering;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

static NEXT_QUEUE_ID: AtomicU64 = AtomicU64::new(1);

/// Finalizer invoked once for every element permanently leaving a queue.
pub type EvictionHook<T> = Box<dyn FnMut(&T)>;

/// Stable reference to an element inside an [`IndexedPriorityQueue`].
///
/// Valid from `insert` until the element is removed, regardless of how many
/// other elements move around it in the meantime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    queue: u64,
    slot: usize,
    generation: u64,
}

/// Position bookkeeping for one handle.
#[derive(Debug)]
struct Slot {
    /// Index into `heap`, or `None` while the slot is free.
    position: Option<usize>,
    /// Bumped every time the slot is released.
    generation: u64,
}

/// Heap entry.
#[derive(Debug)]
struct Node<T> {
    value: T,
    slot: usize,
}

/// Binary max-heap with handles supporting arbitrary removal.
pub struct IndexedPriorityQueue<T, O> {
    id: u64,
    order: O,
    heap: Vec<Node<T>>,
    slots: Vec<Slot>,
    free_slots: Vec<usize>,
    on_evict: Option<EvictionHook<T>>,
}

impl<T, O> IndexedPriorityQueue<T, O>
where
    O: Fn(&T, &T) -> Ordering,
{
    /// Create an empty queue ordered by `order`.
    pub fn new(order: O) -> Self {
        Self {
            id: NEXT_QUEUE_ID.fetch_add(1, AtomicOrdering::Relaxed),
            order,
            heap: Vec::new(),
            slots: Vec::new(),
            free_slots: Vec::new(),
            on_evict: None,
        }
    }

    /// Build a queue from unordered values using bottom-up heapification.
    ///
    /// All values are appended first, then every internal node is sifted
    /// down from the last internal position to the root. O(n).
    pub fn with_values(order: O, values: impl IntoIterator<Item = T>) -> Self {
        let mut queue = Self::new(order);
        for value in values {
            queue.push_unordered(value);
        }
        for position in (0..queue.heap.len() / 2).rev() {
            queue.sift_down(position);
        }
        queue
    }

    /// Install a finalizer that runs once per evicted element.
    pub fn with_eviction_hook(mut self, hook: impl FnMut(&T) + 'static) -> Self {
        self.on_evict = Some(Box::new(hook));
        self
    }

    /// Peek at the highest-priority element.
    pub fn peek_max(&self) -> Result<&T, InvalidOperation> {
        self.heap
            .first()
            .map(|node| &node.value)
            .ok_or(InvalidOperation::EmptyQueue)
    }

    /// Handle of the highest-priority element.
    pub fn peek_max_handle(&self) -> Result<Handle, InvalidOperation> {
        self.heap
            .first()
            .map(|node| self.handle_for(node.slot))
            .ok_or(InvalidOperation::EmptyQueue)
    }

    /// Insert a value and return its handle. O(log n).
    pub fn insert(&mut self, value: T) -> Handle {
        let slot = self.push_unordered(value);
        let position = self.heap.len() - 1;
        self.sift_up(position);
        self.handle_for(slot)
    }

    /// Remove and return the highest-priority element. O(log n).
    pub fn pop_max(&mut self) -> Result<T, InvalidOperation> {
        if self.heap.is_empty() {
            return Err(InvalidOperation::EmptyQueue);
        }
        let last = self.heap.len() - 1;
        self.swap(0, last);
        let value = self.detach_last();
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        self.evict(&value);
        Ok(value)
    }

    /// Remove the element behind `handle`, wherever it sits. O(log n).
    ///
    /// The last element is moved into the vacated position and re-validated
    /// there, so the heap is in order again when this returns.
    pub fn remove(&mut self, handle: Handle) -> Result<T, InvalidOperation> {
        let position = self.resolve(handle)?;
        if position == 0 {
            return self.pop_max();
        }
        let last = self.heap.len() - 1;
        self.swap(position, last);
        let value = self.detach_last();
        if position < self.heap.len() {
            self.restore(position);
        }
        self.evict(&value);
        Ok(value)
    }

    /// Restore heap order around `handle` after its value was changed
    /// through [`get_mut`](Self::get_mut).
    ///
    /// Tries a sift-up, then a sift-down; at most one of them moves the node.
    pub fn revalidate(&mut self, handle: Handle) -> Result<(), InvalidOperation> {
        let position = self.resolve(handle)?;
        self.restore(position);
        Ok(())
    }

    /// Check that every non-root element is outranked or tied by its parent
    /// and that all slot positions point back at their nodes.
    pub fn check_invariant(&self) -> bool {
        let ordered = (1..self.heap.len())
            .all(|position| self.compare(Self::parent(position), position) != Ordering::Less);
        let indexed = self
            .heap
            .iter()
            .enumerate()
            .all(|(position, node)| self.slots[node.slot].position == Some(position));
        ordered && indexed
    }

    /// Drain every element in priority order.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.heap.len());
        while let Ok(value) = self.pop_max() {
            sorted.push(value);
        }
        sorted
    }

    fn compare(&self, a: usize, b: usize) -> Ordering {
        (self.order)(&self.heap[a].value, &self.heap[b].value)
    }

    fn parent(position: usize) -> usize {
        (position - 1) / 2
    }

    fn sift_up(&mut self, mut position: usize) -> usize {
        while position > 0 {
            let parent = Self::parent(position);
            if self.compare(position, parent) != Ordering::Greater {
                break;
            }
            self.swap(position, parent);
            position = parent;
        }
        position
    }

    fn sift_down(&mut self, mut position: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * position + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let child = if right < len && self.compare(right, left) == Ordering::Greater {
                right
            } else {
                left
            };
            if self.compare(child, position) != Ordering::Greater {
                break;
            }
            self.swap(position, child);
            position = child;
        }
    }

    fn restore(&mut self, position: usize) {
        if self.sift_up(position) == position {
            self.sift_down(position);
        }
    }
}

impl<T, O> IndexedPriorityQueue<T, O> {
    /// Number of elements.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Check if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Check whether `handle` still refers to an element of this queue.
    pub fn contains(&self, handle: Handle) -> bool {
        self.resolve(handle).is_ok()
    }

    /// Borrow the element behind `handle`.
    pub fn get(&self, handle: Handle) -> Result<&T, InvalidOperation> {
        let position = self.resolve(handle)?;
        Ok(&self.heap[position].value)
    }

    /// Mutably borrow the element behind `handle`.
    ///
    /// Changing anything the order function reads leaves the heap unordered
    /// until [`revalidate`](Self::revalidate) is called for this handle.
    pub fn get_mut(&mut self, handle: Handle) -> Result<&mut T, InvalidOperation> {
        let position = self.resolve(handle)?;
        Ok(&mut self.heap[position].value)
    }

    /// Iterate over `(handle, value)` pairs in heap-array order.
    pub fn iter(&self) -> impl Iterator<Item = (Handle, &T)> + '_ {
        self.heap
            .iter()
            .map(move |node| (self.handle_for(node.slot), &node.value))
    }

    /// Snapshot of every live handle.
    pub fn handles(&self) -> Vec<Handle> {
        self.heap
            .iter()
            .map(|node| self.handle_for(node.slot))
            .collect()
    }

    /// Replace the eviction hook, returning the previous one.
    pub fn set_eviction_hook(&mut self, hook: Option<EvictionHook<T>>) -> Option<EvictionHook<T>> {
        std::mem::replace(&mut self.on_evict, hook)
    }

    /// Evict every element. Handles issued so far become stale.
    pub fn clear(&mut self) {
        for node in self.heap.drain(..) {
            let slot = &mut self.slots[node.slot];
            slot.position = None;
            slot.generation += 1;
            self.free_slots.push(node.slot);
            if let Some(hook) = self.on_evict.as_mut() {
                hook(&node.value);
            }
        }
    }

    fn handle_for(&self, slot: usize) -> Handle {
        Handle {
            queue: self.id,
            slot,
            generation: self.slots[slot].generation,
        }
    }

    fn resolve(&self, handle: Handle) -> Result<usize, InvalidOperation> {
        if handle.queue != self.id {
            return Err(InvalidOperation::ForeignHandle);
        }
        self.slots
            .get(handle.slot)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.position)
            .ok_or(InvalidOperation::StaleHandle)
    }

    fn push_unordered(&mut self, value: T) -> usize {
        let position = self.heap.len();
        let slot = match self.free_slots.pop() {
            Some(slot) => {
                self.slots[slot].position = Some(position);
                slot
            }
            None => {
                self.slots.push(Slot {
                    position: Some(position),
                    generation: 0,
                });
                self.slots.len() - 1
            }
        };
        self.heap.push(Node { value, slot });
        slot
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.heap.swap(a, b);
        self.slots[self.heap[a].slot].position = Some(a);
        self.slots[self.heap[b].slot].position = Some(b);
    }

    /// Pop the last heap node and release its slot. The caller evicts.
    fn detach_last(&mut self) -> T {
        let Some(node) = self.heap.pop() else {
            unreachable!("detach_last on an empty heap");
        };
        let slot = &mut self.slots[node.slot];
        slot.position = None;
        slot.generation += 1;
        self.free_slots.push(node.slot);
        node.value
    }

    fn evict(&mut self, value: &T) {
        if let Some(hook) = self.on_evict.as_mut() {
            hook(value);
        }
    }
}

impl<T, O> Drop for IndexedPriorityQueue<T, O> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: fmt::Debug, O> fmt::Debug for IndexedPriorityQueue<T, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexedPriorityQueue")
            .field("id", &self.id)
            .field("len", &self.heap.len())
            .field("heap", &self.heap)
            .field("has_eviction_hook", &self.on_evict.is_some())
            .finish()
    }
}
