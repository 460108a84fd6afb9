use std::path::PathBuf;

use thiserror::Error;

use modelgen_core::Distribution;

/// Errors emitted by the generation engine.
///
/// Every variant is terminal for the single rule or creation-rule
/// invocation that raised it; sibling rules keep their caches and cursors.
/// Recovery policy belongs to the driver.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid range: {0}")]
    InvalidRange(String),
    #[error("invalid length: {0}")]
    InvalidLength(String),
    #[error("character set '{0}' is not alphabetic")]
    NotAlphaCharset(String),
    #[error("list '{0}' has no backing in the execution context")]
    ListNotFound(String),
    #[error("path is not a file: {0}")]
    InvalidPath(PathBuf),
    #[error("path does not exist: {0}")]
    PathNotFound(PathBuf),
    #[error("no more elements to sample from list '{0}'")]
    SampleExhausted(String),
    #[error("invalid sample size: {0}")]
    InvalidSampleSize(String),
    #[error("unsupported distribution: {0:?}")]
    UnsupportedDistribution(Distribution),
    #[error("invalid annotation '{name}': {reason}")]
    InvalidAnnotation { name: String, reason: String },
    #[error("generation cancelled")]
    Cancelled,
    #[error("instantiation failed: {0}")]
    Instantiation(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
