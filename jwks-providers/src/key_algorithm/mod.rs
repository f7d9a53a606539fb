//! Algorithm registry.
//!
//! Maps a JWA signature algorithm to the key family it signs with, generates
//! key material for it and checks that existing key material fits it.
//! Key pairs are normally obtained through the [key storage][ks] module, which
//! adds PEM handling on top.
//!
//! [ks]: crate::key_storage

use error::KeyAlgorithmError;
use jwks_crypto::{EllipticCurve, KeyMaterial};
use model::{KeyFamily, SignatureAlgorithm};

pub mod error;
pub mod imp;
pub mod model;
pub mod provider;


/// Key handling for a single signature algorithm.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait KeyAlgorithm: Send + Sync {
    /// Finds related crypto signer ID.
    fn get_signer_algorithm_id(&self) -> String;

    fn family(&self) -> KeyFamily;

    /// Generates fresh key material. `rsa_key_size` is ignored by EC algorithms.
    fn generate_key(&self, rsa_key_size: usize) -> Result<KeyMaterial, KeyAlgorithmError>;

    /// Fails with [`KeyAlgorithmError::WrongKeyType`] when `key` cannot sign
    /// with this algorithm.
    fn validate_key(&self, key: &KeyMaterial) -> Result<(), KeyAlgorithmError>;
}

/// Curve an `ES*` algorithm signs on.
pub fn curve_for(algorithm: SignatureAlgorithm) -> Result<EllipticCurve, KeyAlgorithmError> {
    match algorithm.family() {
        Some(KeyFamily::Ecdsa(curve)) => Ok(curve),
        _ => Err(KeyAlgorithmError::UnsupportedCurve(algorithm.to_string())),
    }
}

pub fn validate_key_matches_algorithm(
    key: &KeyMaterial,
    algorithm: SignatureAlgorithm,
) -> Result<(), KeyAlgorithmError> {
    match (algorithm.family(), key) {
        (None, _) => Err(KeyAlgorithmError::UnsupportedAlgorithm(
            algorithm.to_string(),
        )),
        (Some(KeyFamily::Rsa), KeyMaterial::Rsa(_)) => Ok(()),
        (Some(KeyFamily::Rsa), KeyMaterial::Ec(_)) => Err(KeyAlgorithmError::WrongKeyType(
            "expected RSA private key".to_string(),
        )),
        (Some(KeyFamily::Ecdsa(curve)), KeyMaterial::Ec(ec_key)) if ec_key.curve() == curve => {
            Ok(())
        }
        (Some(KeyFamily::Ecdsa(_)), KeyMaterial::Ec(_)) => Err(KeyAlgorithmError::WrongKeyType(
            format!("expected {algorithm} curve"),
        )),
        (Some(KeyFamily::Ecdsa(_)), KeyMaterial::Rsa(_)) => Err(KeyAlgorithmError::WrongKeyType(
            "expected ECDSA private key".to_string(),
        )),
    }
}
