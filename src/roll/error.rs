use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RollError {
    #[error("malformed expression: every operator needs two operands")]
    MalformedExpression,
    #[error("too many dice rolled (limit is {limit})")]
    TooManyDice { limit: usize },
    #[error("arithmetic overflow")]
    Overflow,
}
