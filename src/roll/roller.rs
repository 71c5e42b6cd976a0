use crate::common::{Int, NonZeroUInt, Weight};
use num::bigint::RandBigInt;
use rand::Rng;

/// A source of randomness for sampling.
pub trait Roller {
    /// Draws an integer uniformly from `min..=max`.
    fn uniform_int(&mut self, min: Int, max: Int) -> Int;

    /// Draws a weight uniformly from `0..bound`. `bound` is never zero.
    fn uniform_weight(&mut self, bound: &Weight) -> Weight;

    fn roll(&mut self, sides: NonZeroUInt) -> Int {
        self.uniform_int(1, sides.get().into())
    }

    fn roll_fate(&mut self) -> Int {
        self.uniform_int(-1, 1)
    }
}

impl<R: Rng> Roller for R {
    fn uniform_int(&mut self, min: Int, max: Int) -> Int {
        self.gen_range(min..=max)
    }

    fn uniform_weight(&mut self, bound: &Weight) -> Weight {
        self.gen_biguint_below(bound)
    }
}

#[cfg(test)]
pub(crate) use step::StepRoller;
