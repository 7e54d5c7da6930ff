use std::io;
use thiserror::Error;

/// Failures of a walk, a disk probe or a statistics computation.
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Path not found: {path}")]
    NotFound { path: String },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Invalid path: {path}")]
    InvalidPath { path: String },

    #[error("Maximum depth of {max_depth} exceeded at {path}")]
    DepthExceeded { path: String, max_depth: usize },

    #[error("Disk-space probe is not supported on this platform")]
    Unsupported,

    #[error("Percentage of {what} is undefined for a zero denominator")]
    DivisionUndefined { what: &'static str },
}

pub type IndexResult<T> = Result<T, IndexError>;

impl IndexError {
    /// Splits a filesystem error into `NotFound` and everything else.
    pub fn from_io(path: impl Into<String>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Io { path, source }
        }
    }
}
