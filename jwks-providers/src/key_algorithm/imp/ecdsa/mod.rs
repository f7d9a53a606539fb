use jwks_crypto::{EllipticCurve, KeyMaterial};

use crate::key_algorithm::{
    curve_for,
    error::KeyAlgorithmError,
    model::{KeyFamily, SignatureAlgorithm},
    validate_key_matches_algorithm, KeyAlgorithm,
};


/// `ES256`, `ES384` and `ES512`.
pub struct Ecdsa {
    algorithm: SignatureAlgorithm,
    curve: EllipticCurve,
}

impl Ecdsa {
    pub fn new(algorithm: SignatureAlgorithm) -> Result<Self, KeyAlgorithmError> {
        Ok(Self {
            algorithm,
            curve: curve_for(algorithm)?,
        })
    }
}

impl KeyAlgorithm for Ecdsa {
    fn get_signer_algorithm_id(&self) -> String {
        self.algorithm.to_string()
    }

    fn family(&self) -> KeyFamily {
        KeyFamily::Ecdsa(self.curve)
    }

    fn generate_key(&self, _rsa_key_size: usize) -> Result<KeyMaterial, KeyAlgorithmError> {
        Ok(KeyMaterial::generate_ec(self.curve))
    }

    fn validate_key(&self, key: &KeyMaterial) -> Result<(), KeyAlgorithmError> {
        validate_key_matches_algorithm(key, self.algorithm)
    }
}
