use crate::common::*;
use crate::roll::{RResult, RollError, Roller};
use num::rational::Ratio;
use num::traits::{ToPrimitive, Zero};
use std::collections::btree_map::{self, BTreeMap, Entry};
use std::fmt;

type DistMap = BTreeMap<Int, Weight>;

/// An exact discrete distribution: every outcome maps to the number of equally
/// likely elementary events producing it.
///
/// The total weight is the implicit denominator, so repeated combination stays
/// exact. A distribution always holds at least one outcome and every weight is
/// positive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
    outcomes: DistMap,
}

impl Distribution {
    /// A distribution with a single certain outcome.
    pub fn single(value: Int) -> Self {
        let mut outcomes = DistMap::new();
        outcomes.insert(value, Weight::from(1u8));
        Self { outcomes }
    }

    /// A fair die numbered `1..=sides`.
    pub fn uniform(sides: NonZeroUInt) -> Self {
        Self {
            outcomes: (1..=Int::from(sides.get()))
                .map(|x| (x, Weight::from(1u8)))
                .collect(),
        }
    }

    /// A fate die: six faces, two each of -1, 0 and +1.
    pub fn fate() -> Self {
        Self {
            outcomes: (-1..=1).map(|x| (x, Weight::from(2u8))).collect(),
        }
    }

    /// Builds a distribution from observed counts, merging repeated outcomes
    /// and dropping zero counts. Returns `None` when nothing was observed.
    pub fn from_counts<I>(counts: I) -> Option<Self>
    where
        I: IntoIterator<Item = (Int, Weight)>,
    {
        let mut outcomes = DistMap::new();
        for (k, c) in counts.into_iter().filter(|(_, c)| !c.is_zero()) {
            *outcomes.entry(k).or_default() += c;
        }
        if outcomes.is_empty() {
            None
        } else {
            Some(Self { outcomes })
        }
    }

    /// Combines every pair of outcomes with `op`, multiplying their weights
    /// and accumulating the products on the resulting key.
    ///
    /// # Errors
    ///
    /// [`RollError::Overflow`] when `op` overflows.
    pub fn combine_with<F>(&self, other: &Self, op: F) -> RResult<Self>
    where
        F: Fn(Int, Int) -> Option<Int>,
    {
        let mut outcomes = DistMap::new();
        for (&k1, c1) in &self.outcomes {
            for (&k2, c2) in &other.outcomes {
                let key = op(k1, k2).ok_or(RollError::Overflow)?;
                match outcomes.entry(key) {
                    Entry::Vacant(e) => {
                        e.insert(c1 * c2);
                    }
                    Entry::Occupied(mut e) => {
                        *e.get_mut() += c1 * c2;
                    }
                }
            }
        }
        Ok(Self { outcomes })
    }

    /// Applies a binary operator outcome-wise.
    pub fn apply(&self, op: BinaryOperator, other: &Self) -> RResult<Self> {
        self.combine_with(other, |x, y| op.apply(x, y))
    }

    /// Folds `count` independent copies of this distribution together with
    /// `op`. A count of zero or one returns a copy.
    pub fn repeat<F>(&self, count: usize, op: F) -> RResult<Self>
    where
        F: Fn(Int, Int) -> Option<Int> + Copy,
    {
        let mut result = self.clone();
        for _ in 1..count {
            result = result.combine_with(self, op)?;
        }
        Ok(result)
    }

    /// Replaces every weight with the sum of the weights at or below its key.
    pub fn cumulative(&self) -> Self {
        let mut running = Weight::zero();
        let outcomes = self
            .outcomes
            .iter()
            .map(|(&k, c)| {
                running += c;
                (k, running.clone())
            })
            .collect();
        Self { outcomes }
    }

    pub fn total(&self) -> Weight {
        self.outcomes.values().sum()
    }

    pub fn get(&self, key: Int) -> Option<&Weight> {
        self.outcomes.get(&key)
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn min_key(&self) -> Option<Int> {
        self.outcomes.keys().next().copied()
    }

    pub fn max_key(&self) -> Option<Int> {
        self.outcomes.keys().next_back().copied()
    }

    /// Outcomes in increasing order together with their weights.
    pub fn iter(&self) -> Iter<'_> {
        Iter(self.outcomes.iter())
    }

    /// Each outcome with its share of the total weight.
    pub fn probabilities(&self) -> Vec<(Int, f64)> {
        let total = self.total();
        self.iter()
            .map(|(k, c)| {
                let p = Ratio::new(c.clone(), total.clone()).to_f64();
                (k, p.unwrap_or(0.0))
            })
            .collect()
    }

    /// The expected value.
    pub fn mean(&self) -> f64 {
        self.probabilities()
            .into_iter()
            .map(|(k, p)| k as f64 * p)
            .sum()
    }

    /// Draws one outcome with probability proportional to its weight.
    pub fn sample<R: Roller + ?Sized>(&self, roller: &mut R) -> RResult<Int> {
        let choice = roller.uniform_weight(&self.total());

        let mut running = Weight::zero();
        for (k, c) in self.iter() {
            running += c;
            if choice < running {
                return Ok(k);
            }
        }
        self.max_key().ok_or(RollError::MalformedExpression)
    }
}

pub struct Iter<'a>(btree_map::Iter<'a, Int, Weight>);

impl<'a> Iterator for Iter<'a> {
    type Item = (Int, &'a Weight);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(&k, c)| (k, c))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back().map(|(&k, c)| (k, c))
    }
}

impl<'a> IntoIterator for &'a Distribution {
    type Item = (Int, &'a Weight);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (k, c)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", k, c)?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::roll::StepRoller;
    use proptest::prelude::*;

    /// Outcomes with their weights narrowed for comparison against literals.
    pub(crate) fn table(dist: &Distribution) -> Vec<(Int, u64)> {
        dist.iter().map(|(k, c)| (k, c.to_u64().unwrap())).collect()
    }

    fn d(sides: UInt) -> Distribution {
        Distribution::uniform(NonZeroUInt::new(sides).unwrap())
    }

    fn add(x: Int, y: Int) -> Option<Int> {
        x.checked_add(y)
    }

    fn w(x: u64) -> Weight {
        Weight::from(x)
    }

    fn dist_strategy() -> impl Strategy<Value = Distribution> {
        prop::collection::vec((-20i64..20, 1u64..50), 1..8).prop_map(|counts| {
            Distribution::from_counts(counts.into_iter().map(|(k, c)| (k, w(c)))).unwrap()
        })
    }

    fn op_strategy() -> impl Strategy<Value = BinaryOperator> {
        prop::sample::select(BinaryOperator::ALL)
    }

    #[test]
    fn test_uniform() {
        let d6 = d(6);
        assert_eq!(d6.len(), 6);
        assert_eq!(d6.total(), w(6));
        assert_eq!(d6.min_key(), Some(1));
        assert_eq!(d6.max_key(), Some(6));
        assert!(d6.iter().all(|(_, c)| *c == w(1)));
    }

    #[test]
    fn test_two_d6() {
        let two_d6 = d(6).repeat(2, add).unwrap();
        let expected: Vec<_> = (2..=12)
            .zip([1, 2, 3, 4, 5, 6, 5, 4, 3, 2, 1])
            .collect();
        assert_eq!(table(&two_d6), expected);
        assert_eq!(two_d6.total(), w(36));
        assert!((two_d6.mean() - 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_ten_d20_stays_collapsed() {
        let ten_d20 = d(20).repeat(10, add).unwrap();
        assert_eq!(ten_d20.len(), 191);
        assert_eq!(ten_d20.total(), w(20u64.pow(10)));
        assert_eq!(ten_d20.get(10), Some(&w(1)));
        assert_eq!(ten_d20.get(200), Some(&w(1)));
    }

    #[test]
    fn test_weights_beyond_fixed_width() {
        let fifty_d6 = d(6).repeat(50, add).unwrap();
        assert_eq!(fifty_d6.len(), 251);
        assert_eq!(fifty_d6.total(), num::pow(w(6), 50));
        assert_eq!(fifty_d6.get(50), Some(&w(1)));
        assert!((fifty_d6.mean() - 175.0).abs() < 1e-9);

        let twenty_d100 = d(100).repeat(20, add).unwrap();
        assert_eq!(twenty_d100.total(), num::pow(w(100), 20));
    }

    #[test]
    fn test_fate() {
        let four_f = Distribution::fate().repeat(4, add).unwrap();
        assert_eq!(four_f.min_key(), Some(-4));
        assert_eq!(four_f.max_key(), Some(4));
        assert_eq!(four_f.total(), w(6u64.pow(4)));
        assert_eq!(four_f.get(0), Some(&w(19 * 16)));
    }

    #[test]
    fn test_comparison_drops_impossible_outcome() {
        let never = d(6).apply(BinaryOperator::Gt, &Distribution::single(10)).unwrap();
        assert_eq!(table(&never), vec![(0, 6)]);
    }

    #[test]
    fn test_cumulative() {
        let cumulative = d(4).cumulative();
        assert_eq!(table(&cumulative), vec![(1, 1), (2, 2), (3, 3), (4, 4)]);
    }

    #[test]
    fn test_probabilities() {
        let dist = Distribution::from_counts(vec![(0, w(1)), (1, w(3))]).unwrap();
        assert_eq!(dist.probabilities(), vec![(0, 0.25), (1, 0.75)]);
        assert_eq!(dist.mean(), 0.75);
    }

    #[test]
    fn test_overflow() {
        let huge = Distribution::single(Int::MAX);
        assert_eq!(
            huge.apply(BinaryOperator::Add, &Distribution::single(1)),
            Err(RollError::Overflow)
        );
    }

    #[test]
    fn test_from_counts() {
        let counts = vec![(3, w(2)), (1, w(0)), (3, w(1)), (-1, w(4))];
        let dist = Distribution::from_counts(counts).unwrap();
        assert_eq!(table(&dist), vec![(-1, 4), (3, 3)]);
        assert_eq!(Distribution::from_counts(vec![(1, w(0))]), None);
    }

    #[test]
    fn test_sample_walks_cumulative_weights() {
        let dist = Distribution::from_counts(vec![(0, w(1)), (5, w(2)), (9, w(3))]).unwrap();
        // The step roller yields 0, 1, 2, 3, 4, 5 below a total of 6.
        let mut roller = StepRoller::new(1, 1);
        let samples: Vec<_> = (0..6).map(|_| dist.sample(&mut roller).unwrap()).collect();
        assert_eq!(samples, vec![0, 5, 5, 9, 9, 9]);
    }

    #[test]
    fn test_display() {
        assert_eq!(d(3).to_string(), "{1: 1, 2: 1, 3: 1}");
    }

    proptest! {
        #[test]
        fn test_mass_is_conserved(
            a in dist_strategy(),
            b in dist_strategy(),
            op in op_strategy(),
        ) {
            let c = a.apply(op, &b).unwrap();
            prop_assert_eq!(c.total(), a.total() * b.total());
            prop_assert!(c.iter().all(|(_, w)| !w.is_zero()));
        }

        #[test]
        fn test_cumulative_is_monotonic(a in dist_strategy()) {
            let cumulative = a.cumulative();
            let weights: Vec<_> = cumulative.iter().map(|(_, w)| w).collect();
            prop_assert!(weights.windows(2).all(|w| w[0] <= w[1]));
            let total = a.total();
            prop_assert_eq!(weights.last().copied(), Some(&total));
            prop_assert_eq!(cumulative.len(), a.len());
        }

        #[test]
        fn test_comparison_is_boolean(a in dist_strategy(), b in dist_strategy()) {
            let c = a.apply(BinaryOperator::Le, &b).unwrap();
            prop_assert!(c.iter().all(|(k, _)| k == 0 || k == 1));
        }
    }
}
