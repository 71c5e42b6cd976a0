mod error;
mod lexer;
mod postfix;
mod token;

use crate::config::Association;

pub use error::{PResult, ParseError, ParseErrorKind};
pub use lexer::tokenize;
pub use postfix::{to_postfix, Postfix};
pub use token::{Dice, FateDice, Literal, Operand, ParseDiceError, Resolve, Token};

/// Parses an expression into evaluation order, chaining equal-precedence
/// operators the default way.
pub fn parse(s: &str) -> PResult<Postfix> {
    parse_with(s, Association::default())
}

pub fn parse_with(s: &str, association: Association) -> PResult<Postfix> {
    to_postfix(tokenize(s)?, association)
}
