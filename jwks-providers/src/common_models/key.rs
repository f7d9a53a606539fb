use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::key_algorithm::model::SignatureAlgorithm;

pub const DEFAULT_RSA_KEY_SIZE: usize = 2048;
pub const DEFAULT_KEY_USE: &str = "sig";

/// `key_ops` values registered in RFC 7517.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum KeyOperation {
    Sign,
    Verify,
    Encrypt,
    Decrypt,
    WrapKey,
    UnwrapKey,
    DeriveKey,
    DeriveBits,
}

/// Everything needed to acquire the signing key and describe it as a JWK.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyConfig {
    pub algorithm: SignatureAlgorithm,
    /// Only used when generating RSA keys.
    pub rsa_key_size: usize,
    pub key_file: Option<PathBuf>,
    pub key_use: String,
    pub key_ops: Vec<KeyOperation>,
    /// Serialize a single-member `aud` as a bare string.
    pub flatten_audience: bool,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            algorithm: SignatureAlgorithm::Rs256,
            rsa_key_size: DEFAULT_RSA_KEY_SIZE,
            key_file: None,
            key_use: DEFAULT_KEY_USE.to_string(),
            key_ops: vec![],
            flatten_audience: false,
        }
    }
}
