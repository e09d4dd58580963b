//! Error types for retroshell.

use std::io;

/// Errors produced by the retroshell frontend layer.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("platform error: {0}")]
    Platform(String),

    #[error("driver error: {0}")]
    Driver(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("VFS error: {0}")]
    Vfs(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("invalid target: {0}")]
    InvalidTarget(String),

    #[error("unsupported: {0}")]
    Unsupported(String),

    #[error("data source error: {0}")]
    Source(String),

    #[error("lifecycle error: {0}")]
    Lifecycle(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ShellError {
    /// Caller-visible status code. Always negative.
    pub fn code(&self) -> i32 {
        match self {
            Self::InvalidTarget(_) => -1,
            Self::InvalidRequest(_) => -2,
            Self::Unsupported(_) => -3,
            Self::Source(_) => -4,
            Self::Vfs(_) | Self::Io(_) => -5,
            Self::Config(_) | Self::TomlParse(_) | Self::Json(_) => -6,
            Self::Lifecycle(_) => -7,
            Self::Platform(_) | Self::Driver(_) => -8,
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ShellError>;
