//! Uniform bounded front-end over any [`Backend`].

use super::Backend;
use crate::core::Result;
use std::fmt;

/// Wraps one backend and applies the queue's capacity bound.
///
/// For growable backends the bound is the optional `max_elements` supplied at
/// construction. For the ring buffer it is always the ring's physical
/// capacity. Appending beyond the bound panics, so the invariant
/// `size() <= capacity_bound()` holds for every caller, including code run
/// through [`BoundedWorkQueue::with_exclusive_access`].
///
/// [`BoundedWorkQueue::with_exclusive_access`]: crate::pool::BoundedWorkQueue::with_exclusive_access
///
/// # Example
///
/// ```rust
/// use rust_task_queue::queue::{ContainerAdapter, RingBuffer};
///
/// let mut adapter: ContainerAdapter<RingBuffer<u32>> = ContainerAdapter::new(Some(2))?;
/// adapter.append(1);
/// adapter.append(2);
/// assert_eq!(adapter.capacity_bound(), Some(2));
/// assert_eq!(adapter.try_append(3), Err(3));
/// assert_eq!(adapter.pop_front(), Some(1));
/// # Ok::<(), rust_task_queue::TaskQueueError>(())
/// ```
pub struct ContainerAdapter<B: Backend> {
    backend: B,
    max_elements: Option<usize>,
}

impl<B: Backend> ContainerAdapter<B> {
    /// Creates an empty adapter with an optional bound.
    ///
    /// # Errors
    ///
    /// Returns [`TaskQueueError::InvalidConfig`](crate::TaskQueueError::InvalidConfig)
    /// if the backend cannot honour `max_elements` (a ring buffer without a
    /// capacity).
    pub fn new(max_elements: Option<usize>) -> Result<Self> {
        let backend = B::create(max_elements)?;
        Ok(Self {
            backend,
            max_elements,
        })
    }

    /// Effective capacity bound, if any.
    pub fn capacity_bound(&self) -> Option<usize> {
        self.backend.fixed_capacity().or(self.max_elements)
    }

    /// Returns true if a bound is in force.
    pub fn is_bounded(&self) -> bool {
        self.capacity_bound().is_some()
    }

    /// Returns true if one more element fits under the bound.
    pub fn has_room(&self) -> bool {
        match self.capacity_bound() {
            Some(bound) => self.backend.len() < bound,
            None => true,
        }
    }

    /// Number of stored elements.
    pub fn size(&self) -> usize {
        self.backend.len()
    }

    /// Returns true if no element is stored.
    pub fn is_empty(&self) -> bool {
        self.backend.is_empty()
    }

    /// Appends an element at the back.
    ///
    /// # Panics
    ///
    /// Panics if the adapter is at its capacity bound.
    pub fn append(&mut self, item: B::Item) {
        self.emplace(|| item);
    }

    /// Constructs an element at the back inside the backend's storage.
    ///
    /// # Panics
    ///
    /// Panics if the adapter is at its capacity bound.
    pub fn emplace<F>(&mut self, make: F)
    where
        F: FnOnce() -> B::Item,
    {
        assert!(
            self.has_room(),
            "append beyond capacity bound {:?} on {} backend",
            self.capacity_bound(),
            self.backend.name()
        );
        self.backend.emplace_back(make);
    }

    /// Appends an element, handing it back if the adapter is full.
    pub fn try_append(&mut self, item: B::Item) -> std::result::Result<(), B::Item> {
        if !self.has_room() {
            return Err(item);
        }
        self.backend.push_back(item);
        Ok(())
    }

    /// Removes the front element, if any.
    pub fn pop_front(&mut self) -> Option<B::Item> {
        self.backend.pop_front()
    }

    /// Returns the front element, if any.
    pub fn peek_front(&self) -> Option<&B::Item> {
        self.backend.front()
    }

    /// Removes every element, returning them in FIFO order.
    pub fn drain_all(&mut self) -> Vec<B::Item> {
        let mut items = Vec::with_capacity(self.size());
        while let Some(item) = self.backend.pop_front() {
            items.push(item);
        }
        items
    }

    /// The wrapped backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable access to the wrapped backend.
    ///
    /// Writing through the backend directly bypasses the capacity bound.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

impl<B: Backend> fmt::Debug for ContainerAdapter<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerAdapter")
            .field("backend", &self.backend.name())
            .field("size", &self.size())
            .field("capacity_bound", &self.capacity_bound())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::RingBuffer;
    use crate::TaskQueueError;
    use std::collections::{LinkedList, VecDeque};

    #[test]
    fn test_unbounded_vec() {
        let mut adapter: ContainerAdapter<Vec<i32>> =
            ContainerAdapter::new(None).expect("Failed to create adapter");
        assert_eq!(adapter.capacity_bound(), None);
        assert!(!adapter.is_bounded());
        for i in 0..100 {
            adapter.append(i);
        }
        assert!(adapter.has_room());
        assert_eq!(adapter.size(), 100);
        assert_eq!(adapter.peek_front(), Some(&0));
        assert_eq!(adapter.pop_front(), Some(0));
    }

    #[test]
    fn test_bounded_list_rejects_overflow() {
        let mut adapter: ContainerAdapter<LinkedList<&str>> =
            ContainerAdapter::new(Some(2)).expect("Failed to create adapter");
        assert!(adapter.try_append("a").is_ok());
        assert!(adapter.try_append("b").is_ok());
        assert_eq!(adapter.try_append("c"), Err("c"));
        assert_eq!(adapter.size(), 2);
        assert_eq!(adapter.drain_all(), vec!["a", "b"]);
        assert!(adapter.is_empty());
    }

    #[test]
    #[should_panic(expected = "append beyond capacity bound")]
    fn test_bounded_deque_append_past_bound_panics() {
        let mut adapter: ContainerAdapter<VecDeque<u8>> =
            ContainerAdapter::new(Some(1)).expect("Failed to create adapter");
        adapter.append(1);
        adapter.append(2);
    }

    #[test]
    fn test_ring_bound_is_physical_capacity() {
        let adapter: ContainerAdapter<RingBuffer<u8>> =
            ContainerAdapter::new(Some(4)).expect("Failed to create adapter");
        assert_eq!(adapter.capacity_bound(), Some(4));
        assert_eq!(adapter.backend().capacity(), 4);
    }

    #[test]
    fn test_ring_without_capacity_is_rejected() {
        let result: Result<ContainerAdapter<RingBuffer<u8>>> = ContainerAdapter::new(None);
        assert!(matches!(result, Err(TaskQueueError::InvalidConfig { .. })));
    }

    #[test]
    fn test_emplace_constructs_in_backend() {
        let mut adapter: ContainerAdapter<RingBuffer<String>> =
            ContainerAdapter::new(Some(2)).expect("Failed to create adapter");
        adapter.emplace(|| "hello".to_string());
        adapter.emplace(|| "world".to_string());
        assert_eq!(adapter.size(), 2);
        assert!(!adapter.has_room());
        assert_eq!(adapter.peek_front().map(String::as_str), Some("hello"));
    }
}
