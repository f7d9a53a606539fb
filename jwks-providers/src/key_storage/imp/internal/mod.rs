//! In-memory key storage backed by the algorithm registry.

use std::sync::Arc;

use jwks_crypto::KeyMaterial;

use crate::{
    common_models::key::DEFAULT_RSA_KEY_SIZE,
    key_algorithm::{model::SignatureAlgorithm, provider::KeyAlgorithmProvider},
    key_storage::{error::KeyStorageError, KeyStorage},
};


pub struct InternalKeyProvider {
    key_algorithm_provider: Arc<dyn KeyAlgorithmProvider>,
}

impl InternalKeyProvider {
    pub fn new(key_algorithm_provider: Arc<dyn KeyAlgorithmProvider>) -> Self {
        Self {
            key_algorithm_provider,
        }
    }
}

impl KeyStorage for InternalKeyProvider {
    fn generate(
        &self,
        algorithm: SignatureAlgorithm,
        rsa_key_size: Option<usize>,
    ) -> Result<KeyMaterial, KeyStorageError> {
        let key_algorithm = self
            .key_algorithm_provider
            .get_key_algorithm(&algorithm)
            .ok_or(KeyStorageError::UnsupportedGenerationAlgorithm(
                algorithm.to_string(),
            ))?;

        Ok(key_algorithm.generate_key(rsa_key_size.unwrap_or(DEFAULT_RSA_KEY_SIZE))?)
    }

    fn parse(
        &self,
        pem: &[u8],
        algorithm: SignatureAlgorithm,
    ) -> Result<KeyMaterial, KeyStorageError> {
        let key = decode_private_key(pem)?;

        let key_algorithm = self
            .key_algorithm_provider
            .get_key_algorithm(&algorithm)
            .ok_or(KeyStorageError::UnsupportedParseAlgorithm(
                algorithm.to_string(),
            ))?;
        key_algorithm.validate_key(&key)?;

        Ok(key)
    }
}

/// PKCS#8 first, then the legacy PKCS#1 (RSA) and SEC1 (EC) encodings.
/// The PEM label is not consulted.
pub fn decode_private_key(pem: &[u8]) -> Result<KeyMaterial, KeyStorageError> {
    let block = pem::parse(pem).map_err(|_| KeyStorageError::InvalidPem)?;
    let der = block.contents();

    KeyMaterial::from_pkcs8_der(der)
        .or_else(|| KeyMaterial::from_pkcs1_der(der))
        .or_else(|| KeyMaterial::from_sec1_der(der))
        .ok_or(KeyStorageError::InvalidPemContent(
            "failed to parse private key".to_string(),
        ))
}
