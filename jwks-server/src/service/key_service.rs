use std::{io, sync::Arc};

use jwks_crypto::KeyMaterial;
use jwks_providers::{common_models::KeyConfig, key_storage::KeyStorage};

use super::error::KeyServiceError;

/// Acquires the signing key once at startup.
pub struct KeyService {
    key_storage: Arc<dyn KeyStorage>,
}

impl KeyService {
    pub fn new(key_storage: Arc<dyn KeyStorage>) -> Self {
        Self { key_storage }
    }

    /// Parses the configured key file when it exists, otherwise generates a
    /// fresh key. Read errors other than a missing file are returned.
    pub fn load_or_generate(&self, config: &KeyConfig) -> Result<KeyMaterial, KeyServiceError> {
        let pem = match &config.key_file {
            Some(path) => match std::fs::read(path) {
                Ok(pem) => {
                    log::info!("using key from {}", path.display());
                    Some(pem)
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => None,
                Err(source) => {
                    return Err(KeyServiceError::KeyFile {
                        path: path.clone(),
                        source,
                    })
                }
            },
            None => None,
        };

        let key = match pem {
            Some(pem) => self.key_storage.parse(&pem, config.algorithm)?,
            None => {
                log::info!("key file not found, generating a random key");
                self.key_storage
                    .generate(config.algorithm, Some(config.rsa_key_size))?
            }
        };

        Ok(key)
    }
}
