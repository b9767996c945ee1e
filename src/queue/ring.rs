//! Fixed-capacity FIFO ring buffer.

use std::collections::TryReserveError;
use std::fmt;

/// A fixed-capacity FIFO buffer with wrap-around indexing.
///
/// The logical element order is `slots[(read + i) % capacity]` for
/// `i in 0..len`, and the next element is written at
/// `(read + len) % capacity`. The capacity is fixed at construction.
///
/// Calling [`append`](Self::append) on a full buffer, or
/// [`pop_front`](Self::pop_front) / [`peek_front`](Self::peek_front) /
/// [`take_front`](Self::take_front) on an empty one, is a caller bug and
/// panics. Use the `try_*` variants when the state is not known.
///
/// # Example
///
/// ```rust
/// use rust_task_queue::queue::RingBuffer;
///
/// let mut ring = RingBuffer::new(3);
/// ring.append(10);
/// ring.append(20);
/// ring.append(30);
/// assert_eq!(ring.take_front(), 10);
///
/// // Wraps into the slot freed above
/// ring.append(40);
/// assert_eq!(ring.iter().copied().collect::<Vec<_>>(), vec![20, 30, 40]);
/// ```
pub struct RingBuffer<T> {
    slots: Box<[Option<T>]>,
    read: usize,
    count: usize,
}

impl<T> RingBuffer<T> {
    /// Creates an empty ring buffer holding at most `capacity` elements.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "ring buffer capacity must be greater than 0");
        Self {
            slots: (0..capacity).map(|_| None).collect(),
            read: 0,
            count: 0,
        }
    }

    /// Like [`new`](Self::new), but returns an error instead of aborting when
    /// the slots cannot be allocated.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0.
    pub fn try_new(capacity: usize) -> Result<Self, TryReserveError> {
        assert!(capacity > 0, "ring buffer capacity must be greater than 0");
        let mut slots = Vec::new();
        slots.try_reserve_exact(capacity)?;
        slots.resize_with(capacity, || None);
        Ok(Self {
            slots: slots.into_boxed_slice(),
            read: 0,
            count: 0,
        })
    }

    /// Returns the fixed physical capacity.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of live elements.
    pub fn size(&self) -> usize {
        self.count
    }

    /// Returns true if the buffer holds no elements.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns true if no further element can be appended.
    pub fn is_full(&self) -> bool {
        self.count == self.slots.len()
    }

    fn write_index(&self) -> usize {
        (self.read + self.count) % self.slots.len()
    }

    fn advance_read(&mut self) {
        self.count -= 1;
        self.read += 1;
        if self.read == self.slots.len() {
            self.read = 0;
        }
    }

    /// Appends `value` at the back.
    ///
    /// # Panics
    ///
    /// Panics if the buffer is full.
    pub fn append(&mut self, value: T) {
        self.emplace(|| value);
    }

    /// Constructs an element in the next free slot.
    ///
    /// Whatever occupied the slot before is dropped first, then the new
    /// value is stored.
    ///
    /// # Panics
    ///
    /// Panics if the buffer is full.
    pub fn emplace<F>(&mut self, make: F)
    where
        F: FnOnce() -> T,
    {
        assert!(
            !self.is_full(),
            "append on a full ring buffer (capacity {})",
            self.capacity()
        );
        let index = self.write_index();
        let slot = &mut self.slots[index];
        drop(slot.take());
        *slot = Some(make());
        self.count += 1;
    }

    /// Appends `value`, handing it back if the buffer is full.
    pub fn try_append(&mut self, value: T) -> Result<(), T> {
        if self.is_full() {
            return Err(value);
        }
        self.append(value);
        Ok(())
    }

    /// Returns a reference to the front element.
    ///
    /// # Panics
    ///
    /// Panics if the buffer is empty.
    pub fn peek_front(&self) -> &T {
        assert!(!self.is_empty(), "peek_front on an empty ring buffer");
        match &self.slots[self.read] {
            Some(value) => value,
            None => unreachable!("live ring slot {} is vacant", self.read),
        }
    }

    /// Removes and drops the front element.
    ///
    /// # Panics
    ///
    /// Panics if the buffer is empty.
    pub fn pop_front(&mut self) {
        drop(self.take_front());
    }

    /// Removes the front element and returns it by value.
    ///
    /// # Panics
    ///
    /// Panics if the buffer is empty.
    pub fn take_front(&mut self) -> T {
        assert!(!self.is_empty(), "take_front on an empty ring buffer");
        let value = self.slots[self.read].take();
        self.advance_read();
        match value {
            Some(value) => value,
            None => unreachable!("live ring slot was vacant"),
        }
    }

    /// Removes the front element if there is one.
    pub fn try_take_front(&mut self) -> Option<T> {
        if self.is_empty() {
            None
        } else {
            Some(self.take_front())
        }
    }

    /// Returns the front element if there is one.
    pub fn front(&self) -> Option<&T> {
        if self.is_empty() {
            None
        } else {
            Some(self.peek_front())
        }
    }

    /// Drops every live element and rewinds the cursor.
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = None;
        }
        self.read = 0;
        self.count = 0;
    }

    /// Iterates over live elements front to back.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        let capacity = self.slots.len();
        (0..self.count).filter_map(move |i| self.slots[(self.read + i) % capacity].as_ref())
    }
}

impl<T: fmt::Debug> fmt::Debug for RingBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingBuffer")
            .field("capacity", &self.capacity())
            .field("read", &self.read)
            .field("items", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_try_new() {
        let mut ring = RingBuffer::try_new(2).expect("Failed to allocate ring");
        assert_eq!(ring.capacity(), 2);
        ring.append('a');
        assert_eq!(ring.take_front(), 'a');

        assert!(RingBuffer::<u64>::try_new(usize::MAX).is_err());
    }

    #[test]
    fn test_new_and_capacity() {
        let ring: RingBuffer<i32> = RingBuffer::new(5);
        assert_eq!(ring.capacity(), 5);
        assert!(ring.is_empty());
        assert_eq!(ring.size(), 0);
    }

    #[test]
    #[should_panic(expected = "ring buffer capacity must be greater than 0")]
    fn test_zero_capacity_panics() {
        let _ = RingBuffer::<i32>::new(0);
    }

    #[test]
    fn test_append_and_size() {
        let mut ring = RingBuffer::new(3);
        ring.append(10);
        assert_eq!(ring.size(), 1);
        assert!(!ring.is_empty());
        ring.append(20);
        ring.append(40);
        assert_eq!(ring.size(), 3);
        assert!(ring.is_full());
    }

    #[test]
    fn test_take_peek_and_pop() {
        let mut ring = RingBuffer::new(3);
        ring.append(10);
        ring.emplace(|| 20);
        ring.emplace(|| 30);

        assert_eq!(ring.take_front(), 10);
        assert_eq!(ring.size(), 2);

        assert_eq!(*ring.peek_front(), 20);
        assert_eq!(*ring.peek_front(), 20);

        ring.pop_front();
        assert_eq!(ring.size(), 1);

        assert_eq!(ring.take_front(), 30);
        assert!(ring.is_empty());
    }

    #[test]
    fn test_wrap_around_preserves_order() {
        let mut ring = RingBuffer::new(3);
        ring.append(10);
        ring.append(20);
        ring.append(30);

        assert_eq!(ring.take_front(), 10);
        ring.append(40);
        assert_eq!(ring.size(), 3);

        assert_eq!(ring.take_front(), 20);
        assert_eq!(ring.take_front(), 30);
        assert_eq!(ring.take_front(), 40);
        assert!(ring.is_empty());
    }

    #[test]
    fn test_iter_follows_logical_order_across_wrap() {
        let mut ring = RingBuffer::new(4);
        for i in 0..4 {
            ring.append(i);
        }
        ring.pop_front();
        ring.pop_front();
        ring.append(4);
        ring.append(5);
        assert_eq!(ring.iter().copied().collect::<Vec<_>>(), vec![2, 3, 4, 5]);
    }

    #[test]
    fn test_try_variants() {
        let mut ring = RingBuffer::new(1);
        assert_eq!(ring.try_take_front(), None::<String>);
        assert!(ring.front().is_none());
        assert!(ring.try_append("a".to_string()).is_ok());
        assert_eq!(ring.try_append("b".to_string()), Err("b".to_string()));
        assert_eq!(ring.front().map(String::as_str), Some("a"));
        assert_eq!(ring.try_take_front().as_deref(), Some("a"));
    }

    #[test]
    #[should_panic(expected = "append on a full ring buffer")]
    fn test_append_when_full_panics() {
        let mut ring = RingBuffer::new(1);
        ring.append(1);
        ring.append(2);
    }

    #[test]
    #[should_panic(expected = "peek_front on an empty ring buffer")]
    fn test_peek_when_empty_panics() {
        let ring: RingBuffer<i32> = RingBuffer::new(2);
        let _ = ring.peek_front();
    }

    #[test]
    #[should_panic(expected = "take_front on an empty ring buffer")]
    fn test_pop_when_empty_panics() {
        let mut ring: RingBuffer<i32> = RingBuffer::new(2);
        ring.pop_front();
    }

    #[test]
    fn test_elements_are_dropped_exactly_once() {
        let tracker = Rc::new(());
        let mut ring = RingBuffer::new(2);
        for _ in 0..5 {
            ring.emplace(|| Rc::clone(&tracker));
            ring.pop_front();
        }
        ring.append(Rc::clone(&tracker));
        ring.append(Rc::clone(&tracker));
        assert_eq!(Rc::strong_count(&tracker), 3);

        ring.clear();
        assert_eq!(Rc::strong_count(&tracker), 1);
        assert!(ring.is_empty());
    }

    #[test]
    fn test_complex_types() {
        #[derive(Debug, PartialEq)]
        struct Data {
            id: i32,
            name: String,
        }

        let mut ring = RingBuffer::new(3);
        ring.append(Data {
            id: 1,
            name: "first".to_string(),
        });
        ring.append(Data {
            id: 2,
            name: "second".to_string(),
        });
        assert_eq!(ring.size(), 2);

        let first = ring.take_front();
        assert_eq!(first.id, 1);
        assert_eq!(first.name, "first");
    }
}
