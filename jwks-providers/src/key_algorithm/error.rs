//! Enumerates errors related to the key algorithm provider.

use thiserror::Error;

use jwks_crypto::{KeyError, SignerError};

#[derive(Debug, PartialEq, Eq, Error)]
pub enum KeyAlgorithmProviderError {
    #[error("Cannot find key algorithm `{0}`")]
    MissingAlgorithmImplementation(String),
    #[error("Cannot find signer `{0}`")]
    MissingSignerImplementation(String),
}

#[derive(Debug, PartialEq, Eq, Error)]
pub enum KeyAlgorithmError {
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),
    #[error("could not convert algorithm to elliptic curve: {0}")]
    UnsupportedCurve(String),
    #[error("wrong key type: {0}")]
    WrongKeyType(String),
    #[error("Key generation failed: `{0}`")]
    KeyGeneration(#[from] KeyError),
    #[error("Signer error: `{0}`")]
    SignerError(#[from] SignerError),
}
