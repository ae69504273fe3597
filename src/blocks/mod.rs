//! Scalar signal blocks for control loops.
//!
//! Every block takes one value per call and exposes its latest output; blocks are
//! chained with [`Block::pipe_into`].

pub mod average;
pub mod pid;
pub mod pipe;
pub mod threshold;

pub use average::MovingAverage;
pub use pid::{Factors, Regulator};
pub use pipe::{Block, Passthrough};
pub use threshold::{Threshold, ThresholdConfig};
