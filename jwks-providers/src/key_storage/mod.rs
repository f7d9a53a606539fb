//! Acquisition of the signing key: fresh generation or PEM import.

use jwks_crypto::KeyMaterial;

use crate::key_algorithm::model::SignatureAlgorithm;

pub mod error;
pub mod imp;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait KeyStorage: Send + Sync {
    /// Generates a new key for `algorithm`. RSA keys use `rsa_key_size` bits,
    /// or the default size when `None`.
    fn generate(
        &self,
        algorithm: SignatureAlgorithm,
        rsa_key_size: Option<usize>,
    ) -> Result<KeyMaterial, error::KeyStorageError>;

    /// Decodes the first PEM block in `pem` and checks the key fits `algorithm`.
    fn parse(
        &self,
        pem: &[u8],
        algorithm: SignatureAlgorithm,
    ) -> Result<KeyMaterial, error::KeyStorageError>;
}
