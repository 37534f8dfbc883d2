/// The closed set of coarse-grained outcomes every fallible operation in this workspace maps
/// onto, regardless of which crate's [`Error`] produced it. Callers that only care about the
/// broad outcome can match on this instead of crate-specific variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    NotARepository,
    OutOfMemory,
    InvalidType,
    Busy,
    Error,
}

/// The error type returned by object-database operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no backend in the database could find the requested object")]
    NotFound,
    #[error("the requested object is not a loose-representable type")]
    InvalidType,
    #[error("this backend is already owned by a different object database")]
    Busy,
    #[error("failed to allocate memory for the requested operation")]
    OutOfMemory,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("object has length {length} but no payload bytes were provided")]
    MissingPayload { length: u64 },
    #[error("inflate produced {actual} bytes but the header declared {expected}")]
    InflatedLengthMismatch { expected: u64, actual: u64 },
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Map this error onto the workspace-wide [`ErrorKind`] exit surface.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotFound => ErrorKind::NotFound,
            Error::InvalidType => ErrorKind::InvalidType,
            Error::Busy => ErrorKind::Busy,
            Error::OutOfMemory => ErrorKind::OutOfMemory,
            Error::Io(_) | Error::MissingPayload { .. } | Error::InflatedLengthMismatch { .. } | Error::Other(_) => {
                ErrorKind::Error
            }
        }
    }
}
