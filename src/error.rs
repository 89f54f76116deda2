use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// I/O failure on a named file.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// I/O failure on a reader or writer with no file name attached.
    #[error(transparent)]
    Stream(#[from] io::Error),

    /// Malformed embedding line. Lines are counted from 1.
    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    /// An operation was requested before the data it needs was loaded.
    #[error("{0}")]
    Precondition(String),
}

impl Error {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Error::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    // attach a file name to an anonymous stream error
    pub(crate) fn at_path(self, path: &Path) -> Self {
        match self {
            Error::Stream(source) => Error::io(path, source),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
