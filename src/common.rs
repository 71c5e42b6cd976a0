use std::fmt::{self, Write};
use std::num::NonZeroU32;
use std::ops::Range;

pub type Int = i64;
pub type UInt = u32;
pub type NonZeroUInt = NonZeroU32;

/// Number of equally likely elementary events behind an outcome.
pub type Weight = num::BigUint;

pub type Span = Range<usize>;

pub type NonEmpty<T> = vec1::Vec1<T>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned<T> {
    pub value: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(value: T, span: Span) -> Self {
        Self { value, span }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
}

impl BinaryOperator {
    pub const ALL: &'static [Self] = &[
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Lt,
        Self::Gt,
        Self::Le,
        Self::Ge,
        Self::Eq,
    ];

    /// Lower binds looser.
    pub const fn precedence(self) -> i8 {
        match self {
            Self::Lt | Self::Gt | Self::Le | Self::Ge | Self::Eq => -1,
            Self::Add | Self::Sub => 0,
            Self::Mul => 1,
        }
    }

    pub const fn binds_tighter(self, other: Self) -> bool {
        self.precedence() > other.precedence()
    }

    pub const fn is_comparison(self) -> bool {
        self.precedence() < 0
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Le => "<=",
            Self::Ge => ">=",
            Self::Eq => "=",
        }
    }

    /// Applies the operator to two integers. Comparisons yield `1` for true
    /// and `0` for false; `None` means the arithmetic overflowed.
    pub fn apply(self, lhs: Int, rhs: Int) -> Option<Int> {
        match self {
            Self::Add => lhs.checked_add(rhs),
            Self::Sub => lhs.checked_sub(rhs),
            Self::Mul => lhs.checked_mul(rhs),
            Self::Lt => Some((lhs < rhs).into()),
            Self::Gt => Some((lhs > rhs).into()),
            Self::Le => Some((lhs <= rhs).into()),
            Self::Ge => Some((lhs >= rhs).into()),
            Self::Eq => Some((lhs == rhs).into()),
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Bracket {
    Open,
    Close,
}

impl Bracket {
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

impl fmt::Display for Bracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Self::Open => '(',
            Self::Close => ')',
        };
        f.write_char(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_table() {
        use BinaryOperator::*;
        assert!(Mul.binds_tighter(Add));
        assert!(Sub.binds_tighter(Ge));
        assert!(!Add.binds_tighter(Sub));
        assert!(!Lt.binds_tighter(Eq));
        assert!(Eq.is_comparison());
        assert!(!Mul.is_comparison());
    }

    #[test]
    fn test_apply() {
        use BinaryOperator::*;
        assert_eq!(Add.apply(2, 3), Some(5));
        assert_eq!(Sub.apply(2, 3), Some(-1));
        assert_eq!(Mul.apply(-2, 3), Some(-6));
        assert_eq!(Ge.apply(10, 10), Some(1));
        assert_eq!(Gt.apply(10, 10), Some(0));
        assert_eq!(Eq.apply(4, 4), Some(1));
        assert_eq!(Add.apply(Int::MAX, 1), None);
    }
}
