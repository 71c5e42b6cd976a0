use crate::common::*;
use crate::dist::Distribution;
use crate::roll::{RResult, RollError, Roller};
use log::debug;
use std::fmt;
use std::str::FromStr;

/// Resolves an operand to a concrete value or to its exact distribution.
#[enum_dispatch::enum_dispatch]
pub trait Resolve {
    /// Number of dice thrown to resolve the operand.
    fn dice_count(&self) -> usize {
        0
    }

    fn sample<R: Roller + ?Sized>(&self, roller: &mut R) -> RResult<Int>;

    fn distribution(&self) -> RResult<Distribution>;
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Literal(pub Int);

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Dice {
    pub num: NonZeroUInt,
    pub sides: NonZeroUInt,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FateDice {
    pub num: NonZeroUInt,
}

#[enum_dispatch::enum_dispatch(Resolve)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Operand {
    Literal(Literal),
    Dice(Dice),
    Fate(FateDice),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Token {
    Operand(Operand),
    Operator(BinaryOperator),
    Bracket(Bracket),
}

impl Dice {
    pub const fn new(num: NonZeroUInt, sides: NonZeroUInt) -> Self {
        Self { num, sides }
    }
}

impl FateDice {
    pub const fn new(num: NonZeroUInt) -> Self {
        Self { num }
    }
}

fn sum_rolls(rolls: impl Iterator<Item = Int>) -> RResult<Int> {
    let mut total: Int = 0;
    for x in rolls {
        total = total.checked_add(x).ok_or(RollError::Overflow)?;
    }
    Ok(total)
}

fn add(x: Int, y: Int) -> Option<Int> {
    x.checked_add(y)
}

impl Resolve for Literal {
    fn sample<R: Roller + ?Sized>(&self, _roller: &mut R) -> RResult<Int> {
        Ok(self.0)
    }

    fn distribution(&self) -> RResult<Distribution> {
        Ok(Distribution::single(self.0))
    }
}

impl Resolve for Dice {
    fn dice_count(&self) -> usize {
        self.num.get() as usize
    }

    fn sample<R: Roller + ?Sized>(&self, roller: &mut R) -> RResult<Int> {
        let total = sum_rolls((0..self.num.get()).map(|_| roller.roll(self.sides)))?;
        debug!("rolled {} for {}", total, self);
        Ok(total)
    }

    fn distribution(&self) -> RResult<Distribution> {
        let dist = Distribution::uniform(self.sides).repeat(self.dice_count(), add)?;
        debug!("{} spans {} outcomes", self, dist.len());
        Ok(dist)
    }
}

impl Resolve for FateDice {
    fn dice_count(&self) -> usize {
        self.num.get() as usize
    }

    fn sample<R: Roller + ?Sized>(&self, roller: &mut R) -> RResult<Int> {
        let total = sum_rolls((0..self.num.get()).map(|_| roller.roll_fate()))?;
        debug!("rolled {} for {}", total, self);
        Ok(total)
    }

    fn distribution(&self) -> RResult<Distribution> {
        Distribution::fate().repeat(self.dice_count(), add)
    }
}

#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
pub enum ParseDiceError {
    #[error("cannot parse string as dice without '{0}' delimiter")]
    NoDelimiter(char),
    #[error("{0}")]
    InvalidNum(std::num::ParseIntError),
    #[error("{0}")]
    InvalidSize(std::num::ParseIntError),
}

fn parse_num(num: &str) -> Result<NonZeroUInt, ParseDiceError> {
    if num.is_empty() {
        Ok(NonZeroUInt::MIN)
    } else {
        num.parse().map_err(ParseDiceError::InvalidNum)
    }
}

impl FromStr for Dice {
    type Err = ParseDiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (num, sides) = s.split_once('d').ok_or(ParseDiceError::NoDelimiter('d'))?;
        let num = parse_num(num)?;
        let sides = sides.parse().map_err(ParseDiceError::InvalidSize)?;
        Ok(Self::new(num, sides))
    }
}

impl FromStr for FateDice {
    type Err = ParseDiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let num = s.strip_suffix('F').ok_or(ParseDiceError::NoDelimiter('F'))?;
        Ok(Self::new(parse_num(num)?))
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Display for Dice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.num, self.sides)
    }
}

impl fmt::Display for FateDice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}F", self.num)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(x) => fmt::Display::fmt(x, f),
            Self::Dice(x) => fmt::Display::fmt(x, f),
            Self::Fate(x) => fmt::Display::fmt(x, f),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Operand(x) => fmt::Display::fmt(x, f),
            Self::Operator(x) => fmt::Display::fmt(x, f),
            Self::Bracket(x) => fmt::Display::fmt(x, f),
        }
    }
}
