//! Error handling for the bag player
//!
//! This module defines the error type and a Result alias for use
//! throughout the application.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for bag player operations
#[derive(Error, Debug)]
pub enum BagPlayerError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a readable bag container
    #[error("Invalid bag file {path:?}: {message}")]
    InvalidBag { path: PathBuf, message: String },

    /// The bag has no index section (needs `rosbag reindex`)
    #[error("Bag file {0:?} is not indexed")]
    UnindexedBag(PathBuf),

    /// Errors related to configuration loading
    #[error("Configuration error: {0}")]
    Config(String),

    /// An external tool could not be started
    #[error("Failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// An external tool produced output we could not interpret
    #[error("Unexpected output from '{program}': {message}")]
    ToolOutput { program: String, message: String },

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<BagPlayerError>,
    },
}

impl BagPlayerError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        BagPlayerError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Shorthand for an [`BagPlayerError::InvalidBag`]
    pub fn invalid_bag(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        BagPlayerError::InvalidBag {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for bag player operations
pub type Result<T> = std::result::Result<T, BagPlayerError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}
