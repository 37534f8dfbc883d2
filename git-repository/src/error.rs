/// The workspace-wide outcome surface, shared with [`git_odb::ErrorKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    NotARepository,
    OutOfMemory,
    InvalidType,
    Busy,
    Error,
}

/// The error type returned by repository-level operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0} is not a directory")]
    NotADirectory(std::path::PathBuf),
    #[error("{path} does not look like a repository: {reason}")]
    NotARepository { path: std::path::PathBuf, reason: &'static str },
    #[error("{0} was required but is absent")]
    RequiredPathMissing(std::path::PathBuf),
    #[error("expected object of a different type than what was found")]
    InvalidType,
    #[error("failed to grow the write buffer")]
    OutOfMemory,
    #[error(transparent)]
    Odb(#[from] git_odb::Error),
    #[error("failed to parse object body: {0}")]
    Parse(String),
    #[error("{0}")]
    Other(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::OutOfMemory {
            Error::OutOfMemory
        } else {
            Error::Other(err.to_string())
        }
    }
}

impl Error {
    /// Map this error onto the workspace-wide [`ErrorKind`] exit surface.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotADirectory(_) | Error::NotARepository { .. } => ErrorKind::NotARepository,
            Error::RequiredPathMissing(_) => ErrorKind::NotFound,
            Error::InvalidType => ErrorKind::InvalidType,
            Error::OutOfMemory => ErrorKind::OutOfMemory,
            Error::Odb(err) => match err.kind() {
                git_odb::ErrorKind::NotFound => ErrorKind::NotFound,
                git_odb::ErrorKind::NotARepository => ErrorKind::NotARepository,
                git_odb::ErrorKind::OutOfMemory => ErrorKind::OutOfMemory,
                git_odb::ErrorKind::InvalidType => ErrorKind::InvalidType,
                git_odb::ErrorKind::Busy => ErrorKind::Busy,
                git_odb::ErrorKind::Error => ErrorKind::Error,
            },
            Error::Parse(_) | Error::Other(_) => ErrorKind::Error,
        }
    }
}
