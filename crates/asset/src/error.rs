//! Errors produced while parsing an OBJ document.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ObjError {
    /// A directive received the wrong number of arguments.
    #[error("Invalid format on line {line}: '{directive}' expects {expected} argument(s), found {found}")]
    InvalidFormat {
        line: usize,
        directive: String,
        expected: usize,
        found: usize,
    },

    /// A coordinate or smoothing-group token is not a number.
    #[error("Invalid number '{token}' on line {line}")]
    NumberFormat { line: usize, token: String },

    /// A face corner whose slash-separated index field is not an unsigned integer.
    #[error("Malformed vertex reference '{token}' on line {line}")]
    MalformedReference { line: usize, token: String },

    /// The underlying stream failed to read (or the file failed to open).
    #[error("I/O failure: {0}")]
    Io(#[from] io::Error),
}

impl ObjError {
    /// 1-based line the error was raised on, if it came from the text itself.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::InvalidFormat { line, .. }
            | Self::NumberFormat { line, .. }
            | Self::MalformedReference { line, .. } => Some(*line),
            Self::Io(_) => None,
        }
    }
}

pub type ObjResult<T> = Result<T, ObjError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_is_reported_for_format_errors() {
        let err = ObjError::NumberFormat {
            line: 7,
            token: "abc".into(),
        };
        assert_eq!(err.line(), Some(7));
        assert_eq!(err.to_string(), "Invalid number 'abc' on line 7");
    }

    #[test]
    fn io_errors_have_no_line() {
        let err = ObjError::from(io::Error::new(io::ErrorKind::UnexpectedEof, "eof"));
        assert_eq!(err.line(), None);
    }
}
