//! Key material, hashing and raw JWS signatures.
//!
//! This crate holds everything that touches private key bytes: the tagged
//! RSA / ECDSA key representation, key generation, DER decoding and the
//! signers used to produce JWS signatures. Higher level concerns (algorithm
//! selection, PEM handling, JWK mapping and token assembly) live in
//! `jwks-providers`.

use std::sync::Arc;

use thiserror::Error;

pub mod imp;
pub mod key;

pub use key::{
    EcKeyMaterial, EcPublicKeyMaterial, EllipticCurve, KeyMaterial, PrivateComponents,
    PublicComponents, PublicKeyMaterial,
};

#[derive(Debug, PartialEq, Eq, Error)]
pub enum CryptoProviderError {
    #[error("Missing hasher: `{0}`")]
    MissingHasher(String),
    #[error("Missing signer: `{0}`")]
    MissingSigner(String),
}

#[derive(Debug, PartialEq, Eq, Error)]
pub enum HasherError {
    #[error("Could not hash")]
    CouldNotHash,
    #[error("Crypto provider error: `{0}`")]
    CryptoError(#[from] CryptoProviderError),
}

#[derive(Debug, PartialEq, Eq, Error)]
pub enum SignerError {
    #[error("Crypto provider error: `{0}`")]
    CryptoError(#[from] CryptoProviderError),
    #[error("Could not sign: `{0}`")]
    CouldNotSign(String),
    #[error("Could not extract public key: `{0}`")]
    CouldNotExtractPublicKey(String),
    #[error("Could not verify: `{0}`")]
    CouldNotVerify(String),
    #[error("Invalid signature")]
    InvalidSignature,
    #[error("Signer expects {expected} key material")]
    KeyMismatch { expected: String },
}

#[derive(Debug, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("Could not generate key: `{0}`")]
    CouldNotGenerate(String),
    #[error("Could not encode key: `{0}`")]
    CouldNotEncode(String),
    #[error("Invalid public key: `{0}`")]
    InvalidPublicKey(String),
}

/// Provides hashing.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait Hasher: Send + Sync {
    /// Hash and encode as base64url without padding.
    fn hash_base64(&self, input: &[u8]) -> Result<String, HasherError>;

    fn hash(&self, input: &[u8]) -> Result<Vec<u8>, HasherError>;
}

/// Raw JWS signing and verification for a single algorithm.
///
/// The token service is the usual entry point; use this directly only when
/// you already hold the signing input.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait Signer: Send + Sync {
    /// Signs `input`, returning the signature in its JWS encoding.
    fn sign(&self, input: &[u8], key: &KeyMaterial) -> Result<Vec<u8>, SignerError>;

    /// Verifies a JWS-encoded signature over `input`.
    fn verify(
        &self,
        input: &[u8],
        signature: &[u8],
        public_key: &PublicKeyMaterial,
    ) -> Result<(), SignerError>;
}

/// Return hasher or signer instances by name.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait CryptoProvider: Send + Sync {
    fn get_hasher(&self, hasher: &str) -> Result<Arc<dyn Hasher>, CryptoProviderError>;

    /// Signers are registered under their JWA identifier (`RS256`, `ES384`, ...).
    fn get_signer(&self, signer: &str) -> Result<Arc<dyn Signer>, CryptoProviderError>;
}
