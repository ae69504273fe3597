use std::ops::{Add, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::pipe::Block;
use crate::error::BlockError;

/// Bounds and per-call slew limits of a [`Threshold`]. A `None` limit is unbounded.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ThresholdConfig<T> {
    pub min: T,
    pub max: T,
    #[cfg_attr(feature = "serde", serde(default))]
    pub fall_limit: Option<T>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rise_limit: Option<T>,
}

impl<T> ThresholdConfig<T> {
    pub fn new(min: T, max: T) -> Self {
        Self {
            min,
            max,
            fall_limit: None,
            rise_limit: None,
        }
    }

    pub fn with_limits(mut self, fall_limit: T, rise_limit: T) -> Self {
        self.fall_limit = Some(fall_limit);
        self.rise_limit = Some(rise_limit);
        self
    }
}

/// Clamping, rate-limited filter.
///
/// Input is clamped to `[min, max]`; the output then moves towards it by at most
/// `rise_limit` upwards or `fall_limit` downwards per call.
#[derive(Clone, Debug)]
pub struct Threshold<T> {
    config: ThresholdConfig<T>,
    out: T,
}

impl<T> Threshold<T>
where
    T: Copy + Default + PartialOrd + Add<Output = T> + Sub<Output = T>,
{
    pub fn new(config: ThresholdConfig<T>) -> Result<Self, BlockError> {
        Self::validate(&config)?;

        Ok(Self {
            config,
            out: T::default(),
        })
    }

    fn validate(config: &ThresholdConfig<T>) -> Result<(), BlockError> {
        if !(config.min <= config.max) {
            return Err(BlockError::InvalidBounds);
        }

        let zero = T::default();
        for limit in [config.fall_limit, config.rise_limit].into_iter().flatten() {
            if !(limit >= zero) {
                return Err(BlockError::InvalidRateLimit);
            }
        }

        Ok(())
    }

    #[inline]
    pub fn config(&self) -> &ThresholdConfig<T> {
        &self.config
    }

    pub fn set_bounds(&mut self, min: T, max: T) -> Result<(), BlockError> {
        let config = ThresholdConfig {
            min,
            max,
            ..self.config
        };
        Self::validate(&config)?;

        self.config = config;
        Ok(())
    }

    pub fn set_limits(
        &mut self,
        fall_limit: Option<T>,
        rise_limit: Option<T>,
    ) -> Result<(), BlockError> {
        let config = ThresholdConfig {
            fall_limit,
            rise_limit,
            ..self.config
        };
        Self::validate(&config)?;

        self.config = config;
        Ok(())
    }

    /// Forces the output, e.g. to start slewing from a known value.
    pub fn preset(&mut self, value: T) -> &mut Self {
        self.out = value;
        self
    }
}

impl<T> Block for Threshold<T>
where
    T: Copy + Default + PartialOrd + Add<Output = T> + Sub<Output = T>,
{
    type Input = T;
    type Output = T;

    fn input(&mut self, value: T) {
        let ThresholdConfig {
            min,
            max,
            fall_limit,
            rise_limit,
        } = self.config;

        let clamped = if value < min {
            min
        } else if value > max {
            max
        } else {
            value
        };

        self.out = if clamped >= self.out {
            match rise_limit {
                Some(limit) if clamped - self.out > limit => self.out + limit,
                _ => clamped,
            }
        } else {
            match fall_limit {
                Some(limit) if self.out - clamped > limit => self.out - limit,
                _ => clamped,
            }
        };
    }

    #[inline]
    fn output(&self) -> T {
        self.out
    }
}
