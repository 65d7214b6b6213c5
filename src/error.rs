//! Error types for hil-vpn

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HilVpnError {
    /// Key generation subprocess failed to run or exited abnormally
    #[error("Key generation via '{cmd}' failed{}: {reason}", .code.map(|c| format!(" with code {}", c)).unwrap_or_default())]
    KeyGeneration {
        cmd: String,
        code: Option<i32>,
        reason: String,
    },
    /// Secure random source could not supply bytes
    #[error("Random source unavailable: {0}")]
    RandomSource(String),
    /// Config document template is malformed or failed to render
    #[error("Template error: {0}")]
    Template(String),
    /// Target file already exists
    #[error("Refusing to overwrite existing file {}", .path.display())]
    PathCollision { path: PathBuf },
    /// I/O failure while creating or filling a target file
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl HilVpnError {
    /// Classify an error from an exclusive create of `path`
    pub(crate) fn from_create(path: PathBuf, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::AlreadyExists {
            HilVpnError::PathCollision { path }
        } else {
            HilVpnError::Write { path, source }
        }
    }
}

pub type HilVpnResult<T> = Result<T, HilVpnError>;
