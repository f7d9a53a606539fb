//! Implementations of key algorithms.

use std::{collections::HashMap, sync::Arc};

use strum::IntoEnumIterator;

use super::{
    model::{KeyFamily, SignatureAlgorithm},
    KeyAlgorithm,
};

pub mod provider;

pub mod ecdsa;
pub mod rsa;

/// One implementation per algorithm this service can sign with.
pub fn supported_key_algorithms() -> HashMap<SignatureAlgorithm, Arc<dyn KeyAlgorithm>> {
    SignatureAlgorithm::iter()
        .filter_map(|algorithm| {
            let key_algorithm: Arc<dyn KeyAlgorithm> = match algorithm.family()? {
                KeyFamily::Rsa => Arc::new(rsa::Rsa::new(algorithm).ok()?),
                KeyFamily::Ecdsa(_) => Arc::new(ecdsa::Ecdsa::new(algorithm).ok()?),
            };
            Some((algorithm, key_algorithm))
        })
        .collect()
}
