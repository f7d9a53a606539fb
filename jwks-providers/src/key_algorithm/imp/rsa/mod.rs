use jwks_crypto::KeyMaterial;

use crate::key_algorithm::{
    error::KeyAlgorithmError,
    model::{KeyFamily, SignatureAlgorithm},
    validate_key_matches_algorithm, KeyAlgorithm,
};

#[cfg(test)]
mod test;

/// `RS*` and `PS*` algorithms.
pub struct Rsa {
    algorithm: SignatureAlgorithm,
}

impl Rsa {
    pub fn new(algorithm: SignatureAlgorithm) -> Result<Self, KeyAlgorithmError> {
        match algorithm.family() {
            Some(KeyFamily::Rsa) => Ok(Self { algorithm }),
            _ => Err(KeyAlgorithmError::UnsupportedAlgorithm(
                algorithm.to_string(),
            )),
        }
    }
}

impl KeyAlgorithm for Rsa {
    fn get_signer_algorithm_id(&self) -> String {
        self.algorithm.to_string()
    }

    fn family(&self) -> KeyFamily {
        KeyFamily::Rsa
    }

    fn generate_key(&self, rsa_key_size: usize) -> Result<KeyMaterial, KeyAlgorithmError> {
        Ok(KeyMaterial::generate_rsa(rsa_key_size)?)
    }

    fn validate_key(&self, key: &KeyMaterial) -> Result<(), KeyAlgorithmError> {
        validate_key_matches_algorithm(key, self.algorithm)
    }
}
