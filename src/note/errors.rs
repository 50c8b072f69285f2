//! # Note Store Errors

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for note store operations
pub type NoteResult<T> = Result<T, NoteError>;

/// The four failure classes a store operation can report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Io,
    Decode,
    Encode,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::Io => "io",
            ErrorKind::Decode => "decode",
            ErrorKind::Encode => "encode",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Note store errors
#[derive(Debug, Clone, Error)]
pub enum NoteError {
    /// The backing data file does not exist
    #[error("file {} not found", .0.display())]
    FileNotFound(PathBuf),

    /// No note is stored under the requested id
    #[error("Note not found")]
    NoteNotFound(String),

    #[error("I/O error: {0}")]
    Io(String),

    /// The data file is not a valid id -> note mapping
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Encode error: {0}")]
    Encode(String),
}

impl NoteError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            NoteError::FileNotFound(_) | NoteError::NoteNotFound(_) => ErrorKind::NotFound,
            NoteError::Io(_) => ErrorKind::Io,
            NoteError::Decode(_) => ErrorKind::Decode,
            NoteError::Encode(_) => ErrorKind::Encode,
        }
    }

    /// Get HTTP status code
    ///
    /// Only a missing note is a client-visible 404. A missing data file is
    /// a deployment fault and reported as a server error.
    pub fn status_code(&self) -> u16 {
        match self {
            NoteError::NoteNotFound(_) => 404,
            NoteError::FileNotFound(_) => 500,
            NoteError::Io(_) => 500,
            NoteError::Decode(_) => 500,
            NoteError::Encode(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(NoteError::NoteNotFound("a1".into()).status_code(), 404);
        assert_eq!(
            NoteError::FileNotFound(PathBuf::from("note/db/notes.json")).status_code(),
            500
        );
        assert_eq!(NoteError::Decode("bad".into()).status_code(), 500);
    }

    #[test]
    fn test_kinds() {
        assert_eq!(NoteError::NoteNotFound("x".into()).kind(), ErrorKind::NotFound);
        assert_eq!(NoteError::FileNotFound(PathBuf::from("x")).kind(), ErrorKind::NotFound);
        assert_eq!(NoteError::Io("x".into()).kind(), ErrorKind::Io);
        assert_eq!(NoteError::Encode("x".into()).kind(), ErrorKind::Encode);
    }

    #[test]
    fn test_messages() {
        assert_eq!(NoteError::NoteNotFound("a1".into()).to_string(), "Note not found");
        assert_eq!(
            NoteError::FileNotFound(PathBuf::from("note/db/notes.json")).to_string(),
            "file note/db/notes.json not found"
        );
    }
}
