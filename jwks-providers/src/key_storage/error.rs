//! Enumerates errors related to key storage.

use thiserror::Error;

use crate::key_algorithm::error::KeyAlgorithmError;

#[derive(Debug, PartialEq, Eq, Error)]
pub enum KeyStorageError {
    #[error("unsupported algorithm for key generation: {0}")]
    UnsupportedGenerationAlgorithm(String),
    #[error("unsupported algorithm for key parsing: {0}")]
    UnsupportedParseAlgorithm(String),
    #[error("invalid PEM")]
    InvalidPem,
    #[error("invalid PEM: {0}")]
    InvalidPemContent(String),
    #[error(transparent)]
    KeyAlgorithmError(#[from] KeyAlgorithmError),
}
