#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::pipe::Block;
use crate::error::BlockError;

/// Gains and integral bounds of a [`Regulator`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Factors {
    pub kp: f32,
    pub ki: f32,
    pub kd: f32,
    #[cfg_attr(feature = "serde", serde(default = "unbounded_max"))]
    pub i_max: f32,
    #[cfg_attr(feature = "serde", serde(default = "unbounded_min"))]
    pub i_min: f32,
}

#[cfg(feature = "serde")]
fn unbounded_max() -> f32 {
    f32::MAX
}

#[cfg(feature = "serde")]
fn unbounded_min() -> f32 {
    f32::MIN
}

impl Factors {
    /// Gains with an unbounded integral term.
    pub fn new(kp: f32, ki: f32, kd: f32) -> Self {
        Self {
            kp,
            ki,
            kd,
            i_max: f32::MAX,
            i_min: f32::MIN,
        }
    }

    pub fn with_integral_bounds(mut self, i_min: f32, i_max: f32) -> Self {
        self.i_min = i_min;
        self.i_max = i_max;
        self
    }

    fn validate(&self) -> Result<(), BlockError> {
        for gain in [self.kp, self.ki, self.kd] {
            if !gain.is_finite() {
                return Err(BlockError::NonFiniteGain(gain));
            }
        }

        // also rejects NaN bounds
        if !(self.i_min <= self.i_max) {
            return Err(BlockError::InvalidBounds);
        }

        Ok(())
    }
}

/// Single-input, single-output PID regulator.
///
/// Each input is a measurement; the output is the correction `P + I + D` computed
/// against the current target. The integral sum is clamped to `[i_min, i_max]`.
#[derive(Clone, Debug)]
pub struct Regulator {
    factors: Factors,
    integral: f32,
    previous_error: f32,
    target: f32,
    out: f32,
}

impl Regulator {
    pub fn new(factors: Factors) -> Result<Self, BlockError> {
        factors.validate()?;

        Ok(Self {
            factors,
            integral: 0.0,
            previous_error: 0.0,
            target: 0.0,
            out: 0.0,
        })
    }

    #[inline]
    pub fn factors(&self) -> &Factors {
        &self.factors
    }

    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn set_target(&mut self, target: f32) -> &mut Self {
        self.target = target;
        self
    }

    /// Forgets the accumulated integral and the previous error.
    pub fn reset(&mut self) {
        self.integral = 0.0;
        self.previous_error = 0.0;
    }
}

impl Block for Regulator {
    type Input = f32;
    type Output = f32;

    fn input(&mut self, measured: f32) {
        let error = self.target - measured;
        self.integral = (self.integral + error).clamp(self.factors.i_min, self.factors.i_max);

        let p = error * self.factors.kp;
        let i = self.integral * self.factors.ki;
        let d = (error - self.previous_error) * self.factors.kd;

        self.out = p + i + d;
        self.previous_error = error;
    }

    #[inline]
    fn output(&self) -> f32 {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::{Factors, Regulator};
    use crate::blocks::pipe::Block;
    use crate::error::BlockError;

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-5,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn proportional_only() {
        let mut pid = Regulator::new(Factors::new(2.0, 0.0, 0.0)).unwrap();
        pid.set_target(10.0);

        pid.input(4.0);
        assert_close(pid.output(), 12.0);

        pid.input(12.0);
        assert_close(pid.output(), -4.0);
    }

    #[test]
    fn integral_accumulates_and_clamps() {
        let factors = Factors::new(0.0, 1.0, 0.0).with_integral_bounds(-5.0, 5.0);
        let mut pid = Regulator::new(factors).unwrap();
        pid.set_target(3.0);

        pid.input(1.0);
        assert_close(pid.output(), 2.0);

        pid.input(1.0);
        assert_close(pid.output(), 4.0);

        pid.input(1.0);
        assert_close(pid.output(), 5.0);

        pid.input(13.0);
        assert_close(pid.output(), -5.0);
    }

    #[test]
    fn derivative_uses_previous_error() {
        let mut pid = Regulator::new(Factors::new(0.0, 0.0, 0.5)).unwrap();
        pid.set_target(0.0);

        // error -4, previous 0
        pid.input(4.0);
        assert_close(pid.output(), -2.0);

        // error -6, previous -4
        pid.input(6.0);
        assert_close(pid.output(), -1.0);

        pid.reset();
        pid.input(6.0);
        assert_close(pid.output(), -3.0);
    }

    #[test]
    fn rejects_bad_factors() {
        assert!(matches!(
            Regulator::new(Factors::new(f32::NAN, 0.0, 0.0)),
            Err(BlockError::NonFiniteGain(gain)) if gain.is_nan()
        ));
        assert_eq!(
            Regulator::new(Factors::new(0.0, f32::INFINITY, 0.0)).unwrap_err(),
            BlockError::NonFiniteGain(f32::INFINITY)
        );
    }

    #[test]
    fn rejects_inverted_integral_bounds() {
        let factors = Factors::new(1.0, 1.0, 1.0).with_integral_bounds(1.0, -1.0);
        assert_eq!(
            Regulator::new(factors).unwrap_err(),
            BlockError::InvalidBounds
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn factors_from_json() {
        let factors: Factors = serde_json::from_str(r#"{"kp": 1.5, "ki": 0.25, "kd": 0.0}"#)
            .expect("factors should deserialize");

        assert_eq!(factors, Factors::new(1.5, 0.25, 0.0));
    }
}
