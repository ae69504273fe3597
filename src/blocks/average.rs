use super::pipe::Block;
use crate::error::RingError;
use crate::ring::RingBuffer;

/// Mean of the most recent inputs, kept in caller-supplied storage.
///
/// The window is the capacity of the history buffer, i.e. one less than the number
/// of slots handed to [`MovingAverage::new`].
pub struct MovingAverage<'a> {
    history: RingBuffer<'a, f32>,
    out: f32,
}

impl<'a> MovingAverage<'a> {
    pub fn new(storage: &'a mut [f32]) -> Result<Self, RingError> {
        Ok(Self {
            history: RingBuffer::new(storage)?,
            out: 0.0,
        })
    }

    #[inline]
    pub fn window(&self) -> usize {
        self.history.capacity()
    }

    #[inline]
    pub fn history(&self) -> &RingBuffer<'a, f32> {
        &self.history
    }

    pub fn reset(&mut self) {
        self.history.clear();
        self.out = 0.0;
    }
}

impl<'a> Block for MovingAverage<'a> {
    type Input = f32;
    type Output = f32;

    fn input(&mut self, value: f32) {
        self.history.push_back(value);

        let sum: f32 = self.history.iter().sum();
        self.out = sum / self.history.len() as f32;
    }

    #[inline]
    fn output(&self) -> f32 {
        self.out
    }
}
