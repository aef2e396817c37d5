use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetaError {
    #[error("Usage error: {0}")]
    Usage(String),

    #[error("No such file {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path} at {line}:{column}")]
    Syntax {
        path: String,
        line: usize,
        column: usize,
    },

    #[error("Ambiguous module kind in {path}: both Component and Page are registered")]
    AmbiguousModuleKind { path: String },

    #[error("Grammar error: {0}")]
    Grammar(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl MetaError {
    /// Map a read failure to `NotFound` or `Io`, keeping "absent" distinguishable.
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            MetaError::NotFound { path }
        } else {
            MetaError::Io { path, source }
        }
    }
}

pub type Result<T> = std::result::Result<T, MetaError>;
