use crate::common::Span;
use std::fmt;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("error at position {} ({slice:?}): {kind}", .span.start)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
    pub slice: String,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    UnknownOperand,
    MismatchedParenthesis,
    InvalidDie,
    Empty,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, span: Span, source: &str) -> Self {
        let slice = source.get(span.clone()).unwrap_or_default().to_string();
        Self { kind, span, slice }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownOperand => write!(f, "unknown operand"),
            Self::MismatchedParenthesis => write!(f, "mismatched parenthesis"),
            Self::InvalidDie => {
                write!(f, "dice need a positive number of dice and sides")
            }
            Self::Empty => write!(f, "expression is empty"),
        }
    }
}

pub type PResult<T> = Result<T, ParseError>;
