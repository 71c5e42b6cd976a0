#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The default cap on dice thrown (or convolved) by one evaluation.
pub const DEFAULT_MAX_DICE: usize = 10_000;

/// How operators of equal precedence are chained.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Association {
    /// Equal-precedence operators stay on the operator stack, so a chain
    /// groups from the right: `5-2-1` is `5-(2-1)`.
    #[default]
    Stacked,
    /// Conventional left associativity: `5-2-1` is `(5-2)-1`.
    LeftToRight,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Upper bound on the number of dice in one expression; `None` is
    /// unbounded.
    pub max_dice: Option<usize>,
    pub association: Association,
}

impl Config {
    pub const fn new(max_dice: Option<usize>, association: Association) -> Self {
        Self {
            max_dice,
            association,
        }
    }

    pub const fn bounded(max_dice: usize) -> Self {
        Self::new(Some(max_dice), Association::Stacked)
    }

    pub const fn unbounded() -> Self {
        Self::new(None, Association::Stacked)
    }

    pub fn with_association(mut self, association: Association) -> Self {
        self.association = association;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::bounded(DEFAULT_MAX_DICE)
    }
}
