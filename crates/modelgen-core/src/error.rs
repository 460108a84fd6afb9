use thiserror::Error;

/// Raised by the strict character-set parse. Generating call sites use
/// [`crate::CharacterSet::parse_lossy`] instead, which falls back to
/// `Letter`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown character set '{0}'")]
pub struct UnknownCharacterSet(pub String);
