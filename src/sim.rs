use crate::common::*;
use crate::config::Config;
use crate::dist::Distribution;
use crate::error::Result;
use crate::parse::parse_with;
use crate::roll::{Evaluate, Roller, Sampler};
use log::{debug, warn};
use std::collections::BTreeMap;

/// The observed results of rolling one expression repeatedly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Simulation {
    /// How often each outcome came up, or `None` when no sample was taken.
    pub histogram: Option<Distribution>,
    pub samples: usize,
    /// Whether the run stopped before reaching the requested sample count.
    pub cancelled: bool,
}

impl Simulation {
    pub fn mean(&self) -> Option<f64> {
        self.histogram.as_ref().map(Distribution::mean)
    }
}

/// Rolls `expr` up to `samples` times under the default [`Config`].
///
/// `cancelled` is polled before every roll; once it returns `true` the run
/// stops and whatever was observed so far is returned.
pub fn simulate<R, C>(expr: &str, samples: usize, roller: R, cancelled: C) -> Result<Simulation>
where
    R: Roller,
    C: FnMut() -> bool,
{
    simulate_with(expr, samples, roller, cancelled, &Config::default())
}

pub fn simulate_with<R, C>(
    expr: &str,
    samples: usize,
    roller: R,
    mut cancelled: C,
    config: &Config,
) -> Result<Simulation>
where
    R: Roller,
    C: FnMut() -> bool,
{
    let postfix = parse_with(expr, config.association)?;
    let mut ctx = Sampler::new(config, roller);
    let mut counts: BTreeMap<Int, Weight> = BTreeMap::new();
    let mut taken = 0;
    while taken < samples {
        if cancelled() {
            warn!(
                "simulation of {:?} cancelled after {} of {} samples",
                expr, taken, samples
            );
            break;
        }
        *counts.entry(ctx.eval(&postfix)?).or_default() += 1u32;
        taken += 1;
    }
    debug!("{} samples of {:?} gave {} outcomes", taken, expr, counts.len());

    Ok(Simulation {
        histogram: Distribution::from_counts(counts),
        samples: taken,
        cancelled: taken < samples,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dist::tests::table;
    use crate::error::Error;
    use crate::parse::ParseErrorKind;
    use crate::roll::{RollError, StepRoller};
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_simulate_counts() {
        let sim = simulate("1d4", 8, StepRoller::new(1, 1), || false).unwrap();
        assert_eq!(sim.samples, 8);
        assert!(!sim.cancelled);
        let hist = sim.histogram.as_ref().unwrap();
        assert_eq!(table(hist), vec![(1, 2), (2, 2), (3, 2), (4, 2)]);
        assert_eq!(sim.mean(), Some(2.5));
    }

    #[test]
    fn test_simulate_cancelled() {
        let mut polls = 0;
        let sim = simulate("2d6", 100, StepRoller::new(1, 1), || {
            polls += 1;
            polls > 3
        })
        .unwrap();
        assert_eq!(sim.samples, 3);
        assert!(sim.cancelled);
        assert_eq!(sim.histogram.map(|h| h.total()), Some(Weight::from(3u8)));
    }

    #[test]
    fn test_simulate_nothing() {
        let sim = simulate("1d6", 0, StepRoller::new(1, 1), || false).unwrap();
        assert_eq!(sim.histogram, None);
        assert_eq!(sim.mean(), None);
        assert!(!sim.cancelled);

        let sim = simulate("1d6", 5, StepRoller::new(1, 1), || true).unwrap();
        assert_eq!(sim.samples, 0);
        assert!(sim.cancelled);
    }

    #[test]
    fn test_simulate_errors() {
        let err = simulate("2x6", 10, StepRoller::new(1, 1), || false).unwrap_err();
        assert_eq!(err.parse_kind(), Some(ParseErrorKind::UnknownOperand));
        let config = Config::bounded(20);
        let err = simulate_with("30d6", 10, StepRoller::new(1, 1), || false, &config);
        assert_eq!(err, Err(Error::Roll(RollError::TooManyDice { limit: 20 })));
    }

    #[test]
    fn test_simulate_seeded() {
        let a = simulate("3d6", 200, StdRng::seed_from_u64(7), || false).unwrap();
        let b = simulate("3d6", 200, StdRng::seed_from_u64(7), || false).unwrap();
        assert_eq!(a, b);
        let hist = a.histogram.unwrap();
        assert!(hist.min_key().unwrap() >= 3);
        assert!(hist.max_key().unwrap() <= 18);
    }
}
