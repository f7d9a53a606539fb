//! Key algorithm provider.

use std::sync::Arc;

use jwks_crypto::Signer;

use super::{error::KeyAlgorithmProviderError, model::SignatureAlgorithm, KeyAlgorithm};

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait KeyAlgorithmProvider: Send + Sync {
    fn get_key_algorithm(&self, algorithm: &SignatureAlgorithm) -> Option<Arc<dyn KeyAlgorithm>>;

    fn get_signer(
        &self,
        algorithm: &SignatureAlgorithm,
    ) -> Result<Arc<dyn Signer>, KeyAlgorithmProviderError>;
}
