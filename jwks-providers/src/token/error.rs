//! Enumerates errors related to the token service.

use thiserror::Error;

use crate::key_algorithm::error::{KeyAlgorithmError, KeyAlgorithmProviderError};

#[derive(Debug, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("failed to parse key: {0}")]
    KeyWrap(String),
    #[error("failed to get public key: {0}")]
    PublicDerivation(String),
    #[error("failed to set payload: {0}")]
    ClaimEncoding(String),
    #[error("failed to set header: {0}")]
    HeaderEncoding(String),
    #[error("failed to sign token: {0}")]
    Signing(String),
    #[error("failed to decode token: {0}")]
    Decoding(String),
    #[error("failed to verify token: {0}")]
    Verification(String),
    #[error(transparent)]
    KeyAlgorithm(#[from] KeyAlgorithmError),
    #[error(transparent)]
    KeyAlgorithmProvider(#[from] KeyAlgorithmProviderError),
}
