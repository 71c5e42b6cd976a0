//! Dice expressions such as `2d6+1d4` or `3d6>=10`, either rolled once or
//! analyzed into the exact distribution of every possible outcome.
//!
//! ```
//! let dist = dice_odds::analyze("2d6").unwrap();
//! assert_eq!(dist.total(), dice_odds::Weight::from(36u8));
//! assert_eq!(dist.get(7), Some(&dice_odds::Weight::from(6u8)));
//! ```

mod common;
mod config;
mod dist;
mod error;
pub mod parse;
pub mod roll;
mod sim;

pub use common::*;
pub use config::{Association, Config, DEFAULT_MAX_DICE};
pub use dist::{Distribution, Iter};
pub use error::{Error, Result};
pub use parse::{parse, parse_with};
pub use roll::Roller;
pub use sim::{simulate, simulate_with, Simulation};

use roll::{Analyzer, Evaluate, Sampler};

/// Which kind of result an evaluation produces.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Mode {
    /// One concrete roll of every die.
    #[default]
    Sampling,
    /// The exact distribution over all rolls.
    Analytic,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Sample(Int),
    Distribution(Distribution),
}

impl Outcome {
    pub fn as_sample(&self) -> Option<Int> {
        match self {
            Self::Sample(x) => Some(*x),
            Self::Distribution(_) => None,
        }
    }

    pub fn into_distribution(self) -> Option<Distribution> {
        match self {
            Self::Sample(_) => None,
            Self::Distribution(d) => Some(d),
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sample(x) => write!(f, "{}", x),
            Self::Distribution(d) => write!(f, "{}", d),
        }
    }
}

/// Evaluates `expr` under the default [`Config`].
///
/// The roller is only consulted in [`Mode::Sampling`].
pub fn calculate<R: Roller>(expr: &str, mode: Mode, roller: R) -> Result<Outcome> {
    calculate_with(expr, mode, roller, &Config::default())
}

pub fn calculate_with<R: Roller>(
    expr: &str,
    mode: Mode,
    roller: R,
    config: &Config,
) -> Result<Outcome> {
    let postfix = parse_with(expr, config.association)?;
    let outcome = match mode {
        Mode::Sampling => Outcome::Sample(Sampler::new(config, roller).eval(&postfix)?),
        Mode::Analytic => Outcome::Distribution(Analyzer::new(config).eval(&postfix)?),
    };
    Ok(outcome)
}

/// Rolls `expr` once.
///
/// # Errors
///
/// Any [`parse::ParseError`] in the expression, or a [`roll::RollError`]
/// while rolling it.
pub fn sample<R: Roller>(expr: &str, roller: R) -> Result<Int> {
    let postfix = parse(expr)?;
    Ok(Sampler::new(&Config::default(), roller).eval(&postfix)?)
}

/// The exact distribution of `expr`.
pub fn analyze(expr: &str) -> Result<Distribution> {
    let postfix = parse(expr)?;
    Ok(Analyzer::default().eval(&postfix)?)
}
