mod buffer;
mod cursor;

pub use buffer::RingBuffer;
pub use cursor::{Cursor, Iter, Position};
