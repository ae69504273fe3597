use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RingError {
    #[error("backing storage has {0} slots but at least 2 are required")]
    InsufficientStorage(usize),

    #[error("ring buffer is empty and has no element to access or remove")]
    Empty,

    #[error("cursor is at the end position and does not denote an element")]
    EndSentinel,

    #[error("cursor position was taken before the ring buffer was last modified")]
    StaleCursor,

    #[error("cannot rewind {0} elements from a ring buffer holding {1}")]
    RewindOutOfRange(usize, usize),
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum BlockError {
    #[error("lower bound must not exceed upper bound")]
    InvalidBounds,

    #[error("rate limits must be non-negative")]
    InvalidRateLimit,

    #[error("regulator gain {0} is not a finite number")]
    NonFiniteGain(f32),
}
