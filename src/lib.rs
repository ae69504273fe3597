//! Fixed-capacity ring buffer over caller-supplied storage, plus the small signal
//! blocks that use it as history in control loops.
//!
//! ```
//! use ring_span::RingBuffer;
//!
//! let mut storage = [0u32; 6];
//! let mut ring = RingBuffer::new(&mut storage).unwrap();
//!
//! ring.extend_from_slice(&[0, 1, 2, 3, 4, 5, 6, 7, 8]);
//! assert!(ring.is_full());
//! assert!(ring.iter().copied().eq([4, 5, 6, 7, 8]));
//! ```

mod ring;

pub mod blocks;
pub mod error;

pub use error::{BlockError, RingError};
pub use ring::*;
