use super::{error::RollError, roller::Roller, RResult};
use crate::common::*;
use crate::config::Config;
use crate::dist::Distribution;
use crate::parse::{Operand, Postfix, Resolve, Token};
use log::debug;

pub type DefaultRoller = rand::rngs::ThreadRng;

/// One evaluation strategy for a postfix sequence.
pub trait Evaluate {
    type Value;

    /// Starts a fresh evaluation; limits are counted per evaluation.
    fn reset(&mut self);

    fn operand(&mut self, operand: &Operand) -> RResult<Self::Value>;

    fn binary(
        &mut self,
        op: BinaryOperator,
        lhs: Self::Value,
        rhs: Self::Value,
    ) -> RResult<Self::Value>;

    /// Walks the sequence with a value stack. Exactly one value must remain.
    /// An operator pops its right operand first, then its left.
    fn eval(&mut self, postfix: &Postfix) -> RResult<Self::Value> {
        self.reset();
        let mut stack = Vec::with_capacity(postfix.len());
        for token in postfix.tokens() {
            let value = match token {
                Token::Operand(x) => self.operand(x)?,
                Token::Operator(op) => {
                    let rhs = stack.pop().ok_or(RollError::MalformedExpression)?;
                    let lhs = stack.pop().ok_or(RollError::MalformedExpression)?;
                    self.binary(*op, lhs, rhs)?
                }
                Token::Bracket(_) => return Err(RollError::MalformedExpression),
            };
            stack.push(value);
        }

        match (stack.pop(), stack.is_empty()) {
            (Some(result), true) => Ok(result),
            _ => Err(RollError::MalformedExpression),
        }
    }
}

#[derive(Debug, Clone)]
struct DiceBudget {
    max_dice: Option<usize>,
    dice: usize,
}

impl DiceBudget {
    fn new(max_dice: Option<usize>) -> Self {
        Self { max_dice, dice: 0 }
    }

    fn reset(&mut self) {
        self.dice = 0;
    }

    fn count_dice(&mut self, n: usize) -> RResult<()> {
        self.dice = self.dice.saturating_add(n);
        match self.max_dice {
            Some(limit) if self.dice > limit => Err(RollError::TooManyDice { limit }),
            _ => Ok(()),
        }
    }
}

/// Resolves every operand to a concrete roll.
pub struct Sampler<R = DefaultRoller> {
    budget: DiceBudget,
    roller: R,
}

impl<R: Roller> Sampler<R> {
    pub fn new(config: &Config, roller: R) -> Self {
        Self {
            budget: DiceBudget::new(config.max_dice),
            roller,
        }
    }
}

impl<R: Roller> Evaluate for Sampler<R> {
    type Value = Int;

    fn reset(&mut self) {
        self.budget.reset();
    }

    fn operand(&mut self, operand: &Operand) -> RResult<Int> {
        self.budget.count_dice(operand.dice_count())?;
        operand.sample(&mut self.roller)
    }

    fn binary(&mut self, op: BinaryOperator, lhs: Int, rhs: Int) -> RResult<Int> {
        op.apply(lhs, rhs).ok_or(RollError::Overflow)
    }
}

/// Resolves every operand to its exact distribution.
pub struct Analyzer {
    budget: DiceBudget,
}

impl Analyzer {
    pub fn new(config: &Config) -> Self {
        Self {
            budget: DiceBudget::new(config.max_dice),
        }
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Evaluate for Analyzer {
    type Value = Distribution;

    fn reset(&mut self) {
        self.budget.reset();
    }

    fn operand(&mut self, operand: &Operand) -> RResult<Distribution> {
        self.budget.count_dice(operand.dice_count())?;
        operand.distribution()
    }

    fn binary(
        &mut self,
        op: BinaryOperator,
        lhs: Distribution,
        rhs: Distribution,
    ) -> RResult<Distribution> {
        let result = lhs.apply(op, &rhs)?;
        debug!(
            "{} outcomes {} {} outcomes gives {} outcomes",
            lhs.len(),
            op,
            rhs.len(),
            result.len()
        );
        Ok(result)
    }
}
