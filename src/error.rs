#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{0}")]
    Parse(#[from] crate::parse::ParseError),
    #[error("{0}")]
    Roll(#[from] crate::roll::RollError),
}

impl Error {
    pub fn parse_kind(&self) -> Option<crate::parse::ParseErrorKind> {
        match self {
            Self::Parse(e) => Some(e.kind),
            Self::Roll(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
