use std::{collections::HashMap, sync::Arc};

use jwks_crypto::{CryptoProvider, Signer};

use crate::key_algorithm::{
    error::KeyAlgorithmProviderError, model::SignatureAlgorithm, provider::KeyAlgorithmProvider,
    KeyAlgorithm,
};


pub struct KeyAlgorithmProviderImpl {
    algorithms: HashMap<SignatureAlgorithm, Arc<dyn KeyAlgorithm>>,
    crypto: Arc<dyn CryptoProvider>,
}

impl KeyAlgorithmProviderImpl {
    pub fn new(
        algorithms: HashMap<SignatureAlgorithm, Arc<dyn KeyAlgorithm>>,
        crypto: Arc<dyn CryptoProvider>,
    ) -> Self {
        Self { algorithms, crypto }
    }
}

impl KeyAlgorithmProvider for KeyAlgorithmProviderImpl {
    fn get_key_algorithm(&self, algorithm: &SignatureAlgorithm) -> Option<Arc<dyn KeyAlgorithm>> {
        self.algorithms.get(algorithm).cloned()
    }

    fn get_signer(
        &self,
        algorithm: &SignatureAlgorithm,
    ) -> Result<Arc<dyn Signer>, KeyAlgorithmProviderError> {
        let key_algorithm = self.get_key_algorithm(algorithm).ok_or(
            KeyAlgorithmProviderError::MissingAlgorithmImplementation(algorithm.to_string()),
        )?;
        let signer_algorithm = key_algorithm.get_signer_algorithm_id();
        self.crypto
            .get_signer(&signer_algorithm)
            .map_err(|e| KeyAlgorithmProviderError::MissingSignerImplementation(e.to_string()))
    }
}
