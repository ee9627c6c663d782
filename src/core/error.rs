use thiserror::Error as ThisError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    Parse,
    NotFound,
    Internal,
    Cancelled,
    /// Index storage could not be allocated; no searches are possible.
    IndexCreationFailed,
    /// A single row could not be written into a batch.
    FieldIndexFailed,
    /// A batch could not be committed to the index.
    FlushFailed,
    /// The document count of the index could not be read.
    CountUnavailable,
    SearchFailed,
}

#[derive(Debug, ThisError)]
#[error("{kind:?}: {context}")]
pub struct Error {
    pub kind: ErrorKind,
    pub context: String,
}

impl Error {
    pub fn new(kind: ErrorKind, context: impl Into<String>) -> Self {
        Error { kind, context: context.into() }
    }

    /// Errors raised while building the index end the session.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::IndexCreationFailed | ErrorKind::FieldIndexFailed | ErrorKind::FlushFailed
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error {
            kind: ErrorKind::Io,
            context: err.to_string(),
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        let path = err
            .path()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        Error {
            kind: ErrorKind::Io,
            context: format!("could not access path {:?}: {}", path, err),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
