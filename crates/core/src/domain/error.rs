// Domain Error Types

use thiserror::Error;

/// Errors raised while reading `iostat -d` output
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected output: {0:?}")]
    UnexpectedOutput(String),

    #[error("no device header line in output")]
    MissingHeader,

    #[error("malformed device row at line {line}: {content:?}")]
    MalformedRow { line: usize, content: String },

    #[error("no devices reported")]
    NoDevices,
}

pub type Result<T> = std::result::Result<T, ParseError>;
