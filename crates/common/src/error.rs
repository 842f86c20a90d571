//! Error types shared across Storeshot crates.

use std::path::PathBuf;

/// Top-level error type for Storeshot operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreshotError {
    #[error("Render error: {message}")]
    Render { message: String },

    #[error("Asset error: {message}")]
    Asset { message: String },

    #[error("Export error: {message}")]
    Export { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias using StoreshotError.
pub type StoreshotResult<T> = Result<T, StoreshotError>;

impl StoreshotError {
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render {
            message: msg.into(),
        }
    }

    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset {
            message: msg.into(),
        }
    }

    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}
