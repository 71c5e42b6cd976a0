use super::error::{PResult, ParseError, ParseErrorKind};
use super::token::Token;
use crate::common::*;
use crate::config::Association;
use log::trace;
use std::fmt;

/// Operands and operators in evaluation order. Never contains brackets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Postfix(NonEmpty<Token>);

impl Postfix {
    pub fn tokens(&self) -> &[Token] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for Postfix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}

impl Association {
    /// Whether `top`, already on the operator stack, is emitted before
    /// `incoming` is pushed.
    fn pops(self, top: BinaryOperator, incoming: BinaryOperator) -> bool {
        match self {
            Self::Stacked => top.binds_tighter(incoming),
            Self::LeftToRight => !incoming.binds_tighter(top),
        }
    }
}

fn mismatched(bracket: &Spanned<Token>) -> ParseError {
    ParseError {
        kind: ParseErrorKind::MismatchedParenthesis,
        span: bracket.span.clone(),
        slice: bracket.value.to_string(),
    }
}

/// Reorders infix tokens into postfix order with the shunting-yard algorithm.
pub fn to_postfix(tokens: Vec<Spanned<Token>>, association: Association) -> PResult<Postfix> {
    let end = tokens.last().map_or(0, |t| t.span.end);
    let mut stack: Vec<Spanned<Token>> = Vec::new();
    let mut output = Vec::with_capacity(tokens.len());

    for token in tokens {
        match token.value {
            Token::Operand(_) => output.push(token.value),
            Token::Operator(op) => {
                while let Some(Spanned {
                    value: Token::Operator(top),
                    ..
                }) = stack.last()
                {
                    let top = *top;
                    if !association.pops(top, op) {
                        break;
                    }
                    stack.pop();
                    output.push(Token::Operator(top));
                }
                stack.push(token);
            }
            Token::Bracket(Bracket::Open) => stack.push(token),
            Token::Bracket(Bracket::Close) => loop {
                match stack.pop() {
                    None => return Err(mismatched(&token)),
                    Some(Spanned {
                        value: Token::Bracket(Bracket::Open),
                        ..
                    }) => break,
                    Some(top) => output.push(top.value),
                }
            },
        }
    }

    while let Some(top) = stack.pop() {
        if let Token::Bracket(_) = top.value {
            return Err(mismatched(&top));
        }
        output.push(top.value);
    }

    let postfix = NonEmpty::try_from_vec(output).map(Postfix).map_err(|_| ParseError {
        kind: ParseErrorKind::Empty,
        span: 0..end,
        slice: String::new(),
    })?;
    trace!("postfix: {}", postfix);
    Ok(postfix)
}
