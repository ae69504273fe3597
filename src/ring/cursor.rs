use std::{fmt, iter::FusedIterator, ptr};

use super::buffer::RingBuffer;
use crate::error::RingError;

/// Bidirectional position inside a [`RingBuffer`].
///
/// A cursor only moves within the live range: stepping forward stops at the end
/// position (one past the newest element), stepping backward stops at the oldest
/// element. It holds a shared borrow, so the buffer cannot change underneath it.
pub struct Cursor<'r, 'a, T> {
    ring: &'r RingBuffer<'a, T>,
    index: usize,
}

impl<'r, 'a, T> Cursor<'r, 'a, T> {
    pub(crate) fn new(ring: &'r RingBuffer<'a, T>, index: usize) -> Self {
        Self { ring, index }
    }

    #[inline]
    pub fn is_head(&self) -> bool {
        self.index == self.ring.head()
    }

    #[inline]
    pub fn is_tail(&self) -> bool {
        self.index == self.ring.tail()
    }

    pub fn get(&self) -> Result<&'r T, RingError> {
        if self.is_head() {
            return Err(RingError::EndSentinel);
        }

        Ok(self.ring.slot(self.index))
    }

    pub fn move_next(&mut self) {
        if !self.is_head() {
            self.index = self.ring.forward(self.index);
        }
    }

    pub fn move_prev(&mut self) {
        if !self.is_tail() {
            self.index = self.ring.backward(self.index);
        }
    }

    /// Detaches the cursor from its buffer so the buffer can be borrowed mutably.
    pub fn position(&self) -> Position {
        Position {
            index: self.index,
            generation: self.ring.generation(),
        }
    }
}

impl<'r, 'a, T> Clone for Cursor<'r, 'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'r, 'a, T> Copy for Cursor<'r, 'a, T> {}

impl<'r, 'a, T> PartialEq for Cursor<'r, 'a, T> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.ring, other.ring) && self.index == other.index
    }
}

impl<'r, 'a, T> Eq for Cursor<'r, 'a, T> {}

impl<'r, 'a, T> fmt::Debug for Cursor<'r, 'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("index", &self.index)
            .field("is_tail", &self.is_tail())
            .field("is_head", &self.is_head())
            .finish()
    }
}

/// A cursor location that does not borrow the buffer.
///
/// Turned back into a cursor with [`RingBuffer::cursor_at`], which rejects it once the
/// buffer has been modified.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    index: usize,
    generation: usize,
}

impl Position {
    #[inline]
    pub(crate) fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub(crate) fn generation(&self) -> usize {
        self.generation
    }
}

/// Oldest-to-newest iterator over the live elements.
pub struct Iter<'r, 'a, T> {
    ring: &'r RingBuffer<'a, T>,
    front: usize,
    remaining: usize,
}

impl<'r, 'a, T> Iter<'r, 'a, T> {
    pub(crate) fn new(ring: &'r RingBuffer<'a, T>, front: usize, remaining: usize) -> Self {
        Self {
            ring,
            front,
            remaining,
        }
    }
}

impl<'r, 'a, T> Clone for Iter<'r, 'a, T> {
    fn clone(&self) -> Self {
        Self::new(self.ring, self.front, self.remaining)
    }
}

impl<'r, 'a, T> Iterator for Iter<'r, 'a, T> {
    type Item = &'r T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let elem = self.ring.slot(self.front);
        self.front = self.ring.forward(self.front);
        self.remaining -= 1;

        Some(elem)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'r, 'a, T> DoubleEndedIterator for Iter<'r, 'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        self.remaining -= 1;
        let index = self.ring.forward_by(self.front, self.remaining);

        Some(self.ring.slot(index))
    }
}

impl<'r, 'a, T> ExactSizeIterator for Iter<'r, 'a, T> {}

impl<'r, 'a, T> FusedIterator for Iter<'r, 'a, T> {}

#[cfg(test)]
mod tests {
    use crate::error::RingError;
    use crate::RingBuffer;

    #[test]
    fn walk_forward_from_begin() {
        let mut storage = [0u32; 5];
        let mut ring = RingBuffer::new(&mut storage).unwrap();

        // [5, n, 2, 3, 4]
        ring.extend(0..6);

        let mut cursor = ring.begin();
        let mut seen = Vec::new();
        assert!(cursor.is_tail());

        while cursor != ring.end() {
            seen.push(*cursor.get().unwrap());
            cursor.move_next();
        }

        assert_eq!(seen, vec![2, 3, 4, 5]);
        assert!(cursor.is_head());
    }

    #[test]
    fn walk_backward_from_end() {
        let mut storage = [0u32; 5];
        let mut ring = RingBuffer::new(&mut storage).unwrap();
        ring.extend(0..6);

        let mut cursor = ring.end();
        let mut seen = Vec::new();

        loop {
            cursor.move_prev();
            seen.push(*cursor.get().unwrap());

            if cursor.is_tail() {
                break;
            }
        }

        assert_eq!(seen, vec![5, 4, 3, 2]);
    }

    #[test]
    fn moves_stop_at_boundaries() {
        let mut storage = [0u32; 4];
        let mut ring = RingBuffer::new(&mut storage).unwrap();
        ring.extend([7, 8]);

        let mut cursor = ring.end();
        cursor.move_next();
        cursor.move_next();
        assert!(cursor == ring.end());
        assert_eq!(cursor.get().unwrap_err(), RingError::EndSentinel);

        let mut cursor = ring.begin();
        cursor.move_prev();
        assert!(cursor == ring.begin());
        assert_eq!(*cursor.get().unwrap(), 7);
    }

    #[test]
    fn begin_differs_from_end_when_full() {
        let mut storage = [0u32; 3];
        let mut ring = RingBuffer::new(&mut storage).unwrap();
        ring.extend(0..9);

        assert!(ring.is_full());
        assert!(ring.begin() != ring.end());
        assert!(!ring.begin().is_head());
        assert!(!ring.end().is_tail());
    }

    #[test]
    fn empty_cursor_is_both_head_and_tail() {
        let mut storage = [0u32; 3];
        let ring = RingBuffer::new(&mut storage).unwrap();

        let cursor = ring.begin();
        assert!(cursor.is_head());
        assert!(cursor.is_tail());
        assert_eq!(cursor.get().unwrap_err(), RingError::EndSentinel);
    }

    #[test]
    fn cursors_of_distinct_buffers_differ() {
        let mut first = [0u32; 3];
        let mut second = [0u32; 3];
        let a = RingBuffer::new(&mut first).unwrap();
        let b = RingBuffer::new(&mut second).unwrap();

        assert!(a.begin() != b.begin());
    }

    #[test]
    fn position_survives_reads_only() {
        let mut storage = [0u32; 6];
        let mut ring = RingBuffer::new(&mut storage).unwrap();
        ring.extend([1, 2, 3]);

        let mut cursor = ring.begin();
        cursor.move_next();
        let position = cursor.position();

        let restored = ring.cursor_at(position).unwrap();
        assert_eq!(*restored.get().unwrap(), 2);

        ring.push_back(4);
        assert_eq!(
            ring.cursor_at(position).unwrap_err(),
            RingError::StaleCursor
        );

        let position = ring.end().position();
        ring.clear();
        assert_eq!(
            ring.cursor_at(position).unwrap_err(),
            RingError::StaleCursor
        );
    }

    #[test]
    fn iter_is_double_ended_and_exact() {
        let mut storage = [0u32; 5];
        let mut ring = RingBuffer::new(&mut storage).unwrap();
        ring.extend(10..17);

        let mut iter = ring.iter();
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next(), Some(&13));
        assert_eq!(iter.next_back(), Some(&16));
        assert_eq!(iter.len(), 2);

        let rest: Vec<u32> = iter.copied().collect();
        assert_eq!(rest, vec![14, 15]);

        let reversed: Vec<u32> = ring.iter().rev().copied().collect();
        assert_eq!(reversed, vec![16, 15, 14, 13]);

        let mut total = 0;
        for elem in &ring {
            total += *elem;
        }
        assert_eq!(total, 13 + 14 + 15 + 16);
    }
}
