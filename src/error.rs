use std::fmt;
use std::io;
use std::path::PathBuf;

/// Crate error type. Only the file-ingestion and CLI paths produce
/// errors; the TOC controller itself has no failure modes — missing
/// mount points and empty documents degrade to documented no-ops.
#[derive(Debug)]
pub enum WaypostError {
    /// Article file does not exist. Carries a did-you-mean candidate
    /// from the parent directory when one is close enough.
    NotFound {
        path: PathBuf,
        suggestion: Option<String>,
    },
    PermissionDenied {
        path: PathBuf,
    },
    Io {
        path: PathBuf,
        source: io::Error,
    },
    /// File exists but is not a scannable article (binary, unknown
    /// extension).
    Unsupported {
        path: PathBuf,
        reason: String,
    },
    /// Malformed CLI argument.
    InvalidQuery {
        query: String,
        reason: String,
    },
    Config {
        path: PathBuf,
        reason: String,
    },
}

impl fmt::Display for WaypostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaypostError::NotFound { path, suggestion } => {
                write!(f, "not found: {}", path.display())?;
                if let Some(s) = suggestion {
                    write!(f, " (did you mean {s}?)")?;
                }
                Ok(())
            }
            WaypostError::PermissionDenied { path } => {
                write!(f, "permission denied: {}", path.display())
            }
            WaypostError::Io { path, source } => {
                write!(f, "{}: {source}", path.display())
            }
            WaypostError::Unsupported { path, reason } => {
                write!(f, "cannot scan {}: {reason}", path.display())
            }
            WaypostError::InvalidQuery { query, reason } => {
                write!(f, "invalid argument \"{query}\": {reason}")
            }
            WaypostError::Config { path, reason } => {
                write!(f, "config {}: {reason}", path.display())
            }
        }
    }
}

impl std::error::Error for WaypostError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WaypostError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl WaypostError {
    /// Wrap an I/O error with the path it occurred on, mapping the
    /// common kinds to their dedicated variants.
    pub fn from_io(path: &std::path::Path, e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::NotFound => WaypostError::NotFound {
                path: path.to_path_buf(),
                suggestion: None,
            },
            io::ErrorKind::PermissionDenied => WaypostError::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => WaypostError::Io {
                path: path.to_path_buf(),
                source: e,
            },
        }
    }
}
