//! Storage backends and backend families.

use super::RingBuffer;
use crate::core::{Result, TaskQueueError};
use std::collections::{LinkedList, VecDeque};

/// Native operations a container must offer to back a work queue.
///
/// Implemented for [`Vec`], [`LinkedList`], [`VecDeque`] and [`RingBuffer`].
/// Bound enforcement does not live here; see
/// [`ContainerAdapter`](super::ContainerAdapter).
pub trait Backend: Send + 'static {
    /// Element type stored by the backend
    type Item: Send + 'static;

    /// Builds an empty backend for a queue with the given optional limit.
    ///
    /// # Errors
    ///
    /// Returns [`TaskQueueError::InvalidConfig`] if the backend cannot be
    /// built for that limit.
    fn create(max_elements: Option<usize>) -> Result<Self>
    where
        Self: Sized;

    /// Appends an element at the back.
    fn push_back(&mut self, item: Self::Item);

    /// Constructs an element at the back from a closure.
    fn emplace_back<F>(&mut self, make: F)
    where
        F: FnOnce() -> Self::Item,
    {
        self.push_back(make());
    }

    /// Removes the front element, if any.
    fn pop_front(&mut self) -> Option<Self::Item>;

    /// Returns the front element, if any.
    fn front(&self) -> Option<&Self::Item>;

    /// Number of stored elements.
    fn len(&self) -> usize;

    /// Returns true if no element is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Structural capacity, for backends that cannot grow.
    fn fixed_capacity(&self) -> Option<usize> {
        None
    }

    /// Short name used in logs and debug output.
    fn name(&self) -> &'static str;
}

/// Dynamic array backend.
///
/// `pop_front` shifts every remaining element, so dequeue is linear in the
/// queue length.
impl<T: Send + 'static> Backend for Vec<T> {
    type Item = T;

    fn create(max_elements: Option<usize>) -> Result<Self> {
        let mut vec = Vec::new();
        if let Some(limit) = max_elements {
            vec.try_reserve(limit).map_err(reserve_error)?;
        }
        Ok(vec)
    }

    fn push_back(&mut self, item: T) {
        self.push(item);
    }

    fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            None
        } else {
            Some(self.remove(0))
        }
    }

    fn front(&self) -> Option<&T> {
        self.first()
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn name(&self) -> &'static str {
        "vec"
    }
}

impl<T: Send + 'static> Backend for LinkedList<T> {
    type Item = T;

    fn create(_max_elements: Option<usize>) -> Result<Self> {
        Ok(LinkedList::new())
    }

    fn push_back(&mut self, item: T) {
        LinkedList::push_back(self, item);
    }

    fn pop_front(&mut self) -> Option<T> {
        LinkedList::pop_front(self)
    }

    fn front(&self) -> Option<&T> {
        LinkedList::front(self)
    }

    fn len(&self) -> usize {
        LinkedList::len(self)
    }

    fn name(&self) -> &'static str {
        "list"
    }
}

impl<T: Send + 'static> Backend for VecDeque<T> {
    type Item = T;

    fn create(max_elements: Option<usize>) -> Result<Self> {
        let mut deque = VecDeque::new();
        if let Some(limit) = max_elements {
            deque.try_reserve(limit).map_err(reserve_error)?;
        }
        Ok(deque)
    }

    fn push_back(&mut self, item: T) {
        VecDeque::push_back(self, item);
    }

    fn pop_front(&mut self) -> Option<T> {
        VecDeque::pop_front(self)
    }

    fn front(&self) -> Option<&T> {
        VecDeque::front(self)
    }

    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn name(&self) -> &'static str {
        "deque"
    }
}

impl<T: Send + 'static> Backend for RingBuffer<T> {
    type Item = T;

    fn create(max_elements: Option<usize>) -> Result<Self> {
        match max_elements {
            Some(0) => Err(TaskQueueError::invalid_config(
                "max_elements",
                "ring buffer capacity must be greater than 0",
            )),
            Some(capacity) => RingBuffer::try_new(capacity).map_err(reserve_error),
            None => Err(TaskQueueError::invalid_config(
                "max_elements",
                "ring buffer backend requires a capacity",
            )),
        }
    }

    fn push_back(&mut self, item: T) {
        self.append(item);
    }

    fn emplace_back<F>(&mut self, make: F)
    where
        F: FnOnce() -> T,
    {
        self.emplace(make);
    }

    fn pop_front(&mut self) -> Option<T> {
        self.try_take_front()
    }

    fn front(&self) -> Option<&T> {
        RingBuffer::front(self)
    }

    fn len(&self) -> usize {
        self.size()
    }

    fn fixed_capacity(&self) -> Option<usize> {
        Some(self.capacity())
    }

    fn name(&self) -> &'static str {
        "ring"
    }
}

/// A family of backends, one per element type.
///
/// Lets a queue pick its container shape independently of the element type,
/// which matters for [`TypedDispatchQueue`](crate::typed::TypedDispatchQueue)
/// where the element type is generated from the payload list.
pub trait Storage: 'static {
    /// Backend holding elements of type `T`
    type Container<T: Send + 'static>: Backend<Item = T>;
}

/// [`Vec`]-backed storage.
#[derive(Debug, Clone, Copy, Default)]
pub struct VecStorage;

/// [`LinkedList`]-backed storage.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListStorage;

/// [`VecDeque`]-backed storage.
#[derive(Debug, Clone, Copy, Default)]
pub struct DequeStorage;

/// [`RingBuffer`]-backed storage. Requires `max_elements`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RingStorage;

impl Storage for VecStorage {
    type Container<T: Send + 'static> = Vec<T>;
}

impl Storage for ListStorage {
    type Container<T: Send + 'static> = LinkedList<T>;
}

impl Storage for DequeStorage {
    type Container<T: Send + 'static> = VecDeque<T>;
}

impl Storage for RingStorage {
    type Container<T: Send + 'static> = RingBuffer<T>;
}

fn reserve_error(err: std::collections::TryReserveError) -> TaskQueueError {
    TaskQueueError::invalid_config(
        "max_elements",
        format!("cannot reserve storage for the bound: {}", err),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise<B: Backend<Item = u32>>(mut backend: B) -> Vec<u32> {
        assert!(backend.is_empty());
        for i in 1..=3 {
            backend.push_back(i);
        }
        backend.emplace_back(|| 4);
        assert_eq!(backend.len(), 4);
        assert_eq!(backend.front(), Some(&1));

        let mut out = Vec::new();
        while let Some(item) = backend.pop_front() {
            out.push(item);
        }
        assert!(backend.pop_front().is_none());
        out
    }

    #[test]
    fn test_every_backend_is_fifo() {
        let expected = vec![1, 2, 3, 4];
        assert_eq!(exercise(Vec::create(None).expect("vec")), expected);
        assert_eq!(exercise(LinkedList::create(None).expect("list")), expected);
        assert_eq!(exercise(VecDeque::create(Some(8)).expect("deque")), expected);
        assert_eq!(
            exercise(RingBuffer::create(Some(4)).expect("ring")),
            expected
        );
    }

    #[test]
    fn test_vec_reserves_limit() {
        let v: Vec<u8> = Vec::create(Some(16)).expect("vec");
        assert!(v.capacity() >= 16);
        assert_eq!(v.fixed_capacity(), None);
    }

    #[test]
    fn test_ring_requires_capacity() {
        let err = <RingBuffer<u8> as Backend>::create(None).unwrap_err();
        assert!(matches!(err, TaskQueueError::InvalidConfig { .. }));

        let err = <RingBuffer<u8> as Backend>::create(Some(0)).unwrap_err();
        assert!(matches!(err, TaskQueueError::InvalidConfig { .. }));

        let ring = <RingBuffer<u8> as Backend>::create(Some(3)).expect("ring");
        assert_eq!(ring.fixed_capacity(), Some(3));
    }

    #[test]
    fn test_unallocatable_limit_is_invalid_config() {
        let err = <Vec<u32> as Backend>::create(Some(usize::MAX)).unwrap_err();
        assert!(matches!(err, TaskQueueError::InvalidConfig { ref parameter, .. } if parameter == "max_elements"));

        let err = <VecDeque<u32> as Backend>::create(Some(usize::MAX)).unwrap_err();
        assert!(matches!(err, TaskQueueError::InvalidConfig { .. }));

        let err = <RingBuffer<u32> as Backend>::create(Some(usize::MAX)).unwrap_err();
        assert!(matches!(err, TaskQueueError::InvalidConfig { .. }));

        // The list never preallocates
        assert!(<LinkedList<u32> as Backend>::create(Some(usize::MAX)).is_ok());
    }

    #[test]
    fn test_backend_names() {
        fn name_of<S: Storage>() -> &'static str {
            <S::Container<u8> as Backend>::create(Some(1))
                .expect("backend")
                .name()
        }
        assert_eq!(name_of::<VecStorage>(), "vec");
        assert_eq!(name_of::<ListStorage>(), "list");
        assert_eq!(name_of::<DequeStorage>(), "deque");
        assert_eq!(name_of::<RingStorage>(), "ring");
    }
}
