mod ctx;
mod error;
mod roller;

pub type RResult<T> = Result<T, RollError>;

pub use ctx::{Analyzer, DefaultRoller, Evaluate, Sampler};
pub use error::RollError;
pub use roller::Roller;

#[cfg(test)]
pub(crate) use roller::StepRoller;
