use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Error, Diagnostic, Debug)]
pub enum ParseError {
    #[error("unexpected end of input")]
    UnexpectedEnd,

    #[error("expected {expected}, but found `{found}`")]
    Unexpected {
        expected: &'static str,
        found: String,
        #[label("expected {expected}")]
        span: SourceSpan,
    },

    #[error("a subset cannot be empty")]
    EmptySubset {
        #[label("this subset has no elements")]
        span: SourceSpan,
    },

    #[error("duplicate element `{element}`")]
    DuplicateElement {
        element: String,
        #[label("already in the partition")]
        span: SourceSpan,
    },

    #[error("unexpected trailing characters after the partition")]
    Trailing {
        #[label("trailing")]
        span: SourceSpan,
    },

    #[error("unrecognized token")]
    UnrecognizedToken {
        #[label("unrecognized token")]
        span: SourceSpan,
    },

    #[error("a subset element could not be deserialized")]
    Deserialize {
        #[label("this element")]
        span: SourceSpan,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
