use super::error::{PResult, ParseError, ParseErrorKind};
use super::token::{Dice, FateDice, Literal, Operand, Token};
use crate::common::*;
use logos::Logos;

#[derive(Logos, Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum TokenKind {
    #[regex(r"[0-9]+")]
    Integer,
    #[regex(r"[0-9]*d[1-9][0-9]*")]
    Dice,
    #[regex(r"[0-9]*F")]
    Fate,

    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("<=")]
    LessEqual,
    #[token(">=")]
    GreaterEqual,
    #[token("<")]
    LessThan,
    #[token(">")]
    GreaterThan,
    #[token("=")]
    Equal,

    #[regex(r"[ \t\r\n]+", logos::skip)]
    #[error]
    Error,
}

impl TokenKind {
    /// Operators and brackets delimit operands; everything else is operand text.
    fn as_delimiter(self) -> Option<Token> {
        Some(match self {
            Self::LeftParen => Token::Bracket(Bracket::Open),
            Self::RightParen => Token::Bracket(Bracket::Close),
            Self::Plus => Token::Operator(BinaryOperator::Add),
            Self::Minus => Token::Operator(BinaryOperator::Sub),
            Self::Star => Token::Operator(BinaryOperator::Mul),
            Self::LessEqual => Token::Operator(BinaryOperator::Le),
            Self::GreaterEqual => Token::Operator(BinaryOperator::Ge),
            Self::LessThan => Token::Operator(BinaryOperator::Lt),
            Self::GreaterThan => Token::Operator(BinaryOperator::Gt),
            Self::Equal => Token::Operator(BinaryOperator::Eq),
            Self::Integer | Self::Dice | Self::Fate | Self::Error => return None,
        })
    }

    /// Matches a single operand lexeme. `None` means the text is not an
    /// operand at all; `Some(Err(_))` means it is a die with a zero or
    /// out-of-range count.
    fn try_operand(self, slice: &str) -> Option<Result<Operand, ParseErrorKind>> {
        match self {
            Self::Integer => slice.parse().ok().map(|x| Ok(Literal(x).into())),
            Self::Dice => Some(
                slice
                    .parse::<Dice>()
                    .map(Operand::from)
                    .map_err(|_| ParseErrorKind::InvalidDie),
            ),
            Self::Fate => Some(
                slice
                    .parse::<FateDice>()
                    .map(Operand::from)
                    .map_err(|_| ParseErrorKind::InvalidDie),
            ),
            _ => None,
        }
    }
}

/// Consecutive non-delimiter lexemes between two delimiters.
struct OperandText {
    kind: TokenKind,
    span: Span,
    lexemes: usize,
}

impl OperandText {
    fn new(kind: TokenKind, span: Span) -> Self {
        Self {
            kind,
            span,
            lexemes: 1,
        }
    }

    fn extend(&mut self, end: usize) {
        self.span.end = end;
        self.lexemes += 1;
    }

    fn finish(self, source: &str) -> PResult<Spanned<Token>> {
        let slice = source.get(self.span.clone()).unwrap_or_default();
        let operand = if self.lexemes == 1 {
            self.kind.try_operand(slice)
        } else {
            None
        };

        match operand {
            Some(Ok(x)) => Ok(Spanned::new(Token::Operand(x), self.span)),
            Some(Err(kind)) => Err(ParseError::new(kind, self.span, source)),
            None => Err(ParseError::new(
                ParseErrorKind::UnknownOperand,
                self.span,
                source,
            )),
        }
    }
}

/// Splits an expression into operands, operators and brackets.
///
/// Whitespace separates lexemes but is otherwise ignored. The text between two
/// operators or brackets must be exactly one integer, dice term or fate term.
pub fn tokenize(s: &str) -> PResult<Vec<Spanned<Token>>> {
    let mut tokens = Vec::new();
    let mut operand: Option<OperandText> = None;

    for (kind, span) in TokenKind::lexer(s).spanned() {
        match kind.as_delimiter() {
            Some(token) => {
                if let Some(text) = operand.take() {
                    tokens.push(text.finish(s)?);
                }
                tokens.push(Spanned::new(token, span));
            }
            None => match operand.as_mut() {
                Some(text) => text.extend(span.end),
                None => operand = Some(OperandText::new(kind, span)),
            },
        }
    }

    if let Some(text) = operand {
        tokens.push(text.finish(s)?);
    }
    Ok(tokens)
}
