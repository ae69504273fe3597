use std::{fmt, mem};

use log::{debug, trace};

use super::cursor::{Cursor, Iter, Position};
use crate::error::RingError;

/// Fixed-capacity circular buffer over caller-owned storage.
///
/// One physical slot always stays unused so that `head == tail` means empty and
/// nothing else. Once the buffer holds `capacity()` elements every further insertion
/// discards the oldest one.
pub struct RingBuffer<'a, T> {
    slots: &'a mut [T],
    head: usize,
    tail: usize,
    full: bool,
    generation: usize,
}

impl<'a, T> RingBuffer<'a, T> {
    pub fn new(storage: &'a mut [T]) -> Result<Self, RingError> {
        if storage.len() < 2 {
            return Err(RingError::InsufficientStorage(storage.len()));
        }

        Ok(Self {
            slots: storage,
            head: 0,
            tail: 0,
            full: false,
            generation: 0,
        })
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len() - 1
    }

    #[inline]
    pub fn len(&self) -> usize {
        if self.full {
            self.capacity()
        } else {
            self.distance(self.tail, self.head)
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.full
    }

    #[inline]
    pub(crate) fn head(&self) -> usize {
        self.head
    }

    #[inline]
    pub(crate) fn tail(&self) -> usize {
        self.tail
    }

    #[inline]
    pub(crate) fn generation(&self) -> usize {
        self.generation
    }

    #[inline]
    pub(crate) fn slot(&self, index: usize) -> &T {
        &self.slots[index]
    }

    #[inline]
    pub(crate) fn forward(&self, index: usize) -> usize {
        let next = index + 1;
        if next == self.slots.len() {
            0
        } else {
            next
        }
    }

    #[inline]
    pub(crate) fn backward(&self, index: usize) -> usize {
        if index == 0 {
            self.slots.len() - 1
        } else {
            index - 1
        }
    }

    #[inline]
    pub(crate) fn forward_by(&self, index: usize, steps: usize) -> usize {
        (index + steps) % self.slots.len()
    }

    /// Forward cyclic distance from `from` to `to`.
    #[inline]
    pub(crate) fn distance(&self, from: usize, to: usize) -> usize {
        if to >= from {
            to - from
        } else {
            self.slots.len() - from + to
        }
    }

    #[inline]
    fn touch(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    #[inline]
    fn refresh_full(&mut self) {
        self.full = self.distance(self.tail, self.head) == self.capacity();
    }

    pub fn clear(&mut self) {
        self.head = 0;
        self.tail = 0;
        self.full = false;
        self.touch();

        debug!("ring buffer of {} slots cleared", self.slots.len());
    }

    /// Rebinds the buffer to `storage` and returns the previous backing store.
    ///
    /// Elements are not migrated; the buffer is empty afterwards. When `storage` is too
    /// short the old store stays bound and nothing changes.
    pub fn remap(&mut self, storage: &'a mut [T]) -> Result<&'a mut [T], RingError> {
        if storage.len() < 2 {
            return Err(RingError::InsufficientStorage(storage.len()));
        }

        let previous = mem::replace(&mut self.slots, storage);
        self.head = 0;
        self.tail = 0;
        self.full = false;
        self.touch();

        debug!(
            "ring buffer remapped from {} to {} slots",
            previous.len(),
            self.slots.len()
        );

        Ok(previous)
    }

    pub fn front(&self) -> Result<&T, RingError> {
        if self.is_empty() {
            return Err(RingError::Empty);
        }

        Ok(&self.slots[self.tail])
    }

    pub fn back(&self) -> Result<&T, RingError> {
        if self.is_empty() {
            return Err(RingError::Empty);
        }

        Ok(&self.slots[self.backward(self.head)])
    }

    pub fn push_back(&mut self, elem: T) {
        self.slots[self.head] = elem;
        self.head = self.forward(self.head);

        // the write closed the gap, so the oldest element is gone
        if self.head == self.tail {
            self.tail = self.forward(self.tail);
            trace!("ring buffer overwrote its oldest element");
        }

        self.refresh_full();
        self.touch();
    }

    /// Drops the oldest element and returns a reference to it.
    ///
    /// The slot keeps its value until a later insertion overwrites it.
    pub fn pop_front(&mut self) -> Result<&T, RingError> {
        if self.is_empty() {
            return Err(RingError::Empty);
        }

        let index = self.tail;
        self.tail = self.forward(self.tail);
        self.full = false;
        self.touch();

        Ok(&self.slots[index])
    }

    /// Drops the newest element and returns a reference to it.
    pub fn pop_back(&mut self) -> Result<&T, RingError> {
        if self.is_empty() {
            return Err(RingError::Empty);
        }

        self.head = self.backward(self.head);
        self.full = false;
        self.touch();

        Ok(&self.slots[self.head])
    }

    pub fn begin(&self) -> Cursor<'_, 'a, T> {
        Cursor::new(self, self.tail)
    }

    pub fn end(&self) -> Cursor<'_, 'a, T> {
        Cursor::new(self, self.head)
    }

    /// Re-attaches a position taken with [`Cursor::position`].
    ///
    /// Fails with [`RingError::StaleCursor`] if the buffer was modified in between or the
    /// position does not fall inside the live range.
    pub fn cursor_at(&self, position: Position) -> Result<Cursor<'_, 'a, T>, RingError> {
        let index = position.index();

        if position.generation() != self.generation
            || index >= self.slots.len()
            || self.distance(self.tail, index) > self.len()
        {
            return Err(RingError::StaleCursor);
        }

        Ok(Cursor::new(self, index))
    }

    pub fn iter(&self) -> Iter<'_, 'a, T> {
        Iter::new(self, self.tail, self.len())
    }
}

impl<'a, T> RingBuffer<'a, T>
where
    T: Clone,
{
    /// Appends every element of `src`, discarding the oldest elements as needed.
    ///
    /// The result is the same as pushing each element with [`RingBuffer::push_back`],
    /// but the bookkeeping is done once for the whole slice. A slice of at least
    /// `capacity()` elements replaces the whole content with its last `capacity()`
    /// elements, laid out from the start of the storage.
    pub fn extend_from_slice(&mut self, src: &[T]) {
        let count = src.len();
        if count == 0 {
            return;
        }

        let capacity = self.capacity();

        if count >= capacity {
            self.slots[..capacity].clone_from_slice(&src[count - capacity..]);
            self.tail = 0;
            self.head = capacity;
            self.full = true;
            self.touch();

            trace!(
                "bulk insert of {} elements replaced the whole ring buffer",
                count
            );
            return;
        }

        let start = self.head;
        let insert_end = self.forward_by(start, count);
        self.copy_from(start, src);

        // old tail inside the written arc (start, insert_end]
        let tail_offset = self.distance(start, self.tail);
        if (1..=count).contains(&tail_offset) {
            self.tail = insert_end;
            trace!("bulk insert of {} elements overwrote the oldest ones", count);
        }

        self.head = insert_end;
        if self.head == self.tail {
            self.tail = self.forward(self.tail);
        }

        self.refresh_full();
        self.touch();
    }

    /// Discards the `rewind` newest elements and appends `src` in their place.
    pub fn overwrite_back(&mut self, rewind: usize, src: &[T]) -> Result<(), RingError> {
        let len = self.len();
        if rewind > len {
            return Err(RingError::RewindOutOfRange(rewind, len));
        }

        for _ in 0..rewind {
            self.pop_back()?;
        }

        self.extend_from_slice(src);

        Ok(())
    }

    fn copy_from(&mut self, start: usize, src: &[T]) {
        let first = src.len().min(self.slots.len() - start);
        let (leading, wrapped) = src.split_at(first);

        self.slots[start..start + first].clone_from_slice(leading);
        self.slots[..wrapped.len()].clone_from_slice(wrapped);
    }
}

impl<'a, T> Extend<T> for RingBuffer<'a, T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for elem in iter {
            self.push_back(elem);
        }
    }
}

impl<'r, 'a, T> IntoIterator for &'r RingBuffer<'a, T> {
    type Item = &'r T;
    type IntoIter = Iter<'r, 'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> fmt::Debug for RingBuffer<'a, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
