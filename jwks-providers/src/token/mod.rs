//! Token service: holds the signing key, publishes its JWK Set and signs
//! claim sets into compact JWTs.

use std::sync::Arc;

use jwks_crypto::{CryptoProvider, Hasher, KeyMaterial, Signer};
use serde_json::{json, Map, Value};

use self::{
    error::TokenError,
    jwt::{
        model::{JWTHeader, JWTPayload},
        Jwt,
    },
};
use crate::{
    common_models::{
        mapper::{private_key_to_jwk, public_key_to_jwk},
        Jwk, JwkKey, JwkSet, KeyConfig,
    },
    key_algorithm::{
        error::KeyAlgorithmError, model::SignatureAlgorithm, provider::KeyAlgorithmProvider,
    },
};

pub mod error;
pub mod jwt;

#[cfg(test)]
mod test;

/// Hasher used for JWK thumbprints.
pub const THUMBPRINT_HASHER: &str = "sha-256";

/// Claim name to JSON value.
pub type ClaimSet = Map<String, Value>;

/// Extra protected header members.
pub type ProtectedHeaderSet = Map<String, Value>;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait TokenService: Send + Sync {
    /// The held key including private members. Never serve this.
    fn private_jwk(&self) -> Jwk;

    /// Single-member set with the public half of the held key.
    fn key_set(&self) -> Result<JwkSet, TokenError>;

    /// Signs `claims` with the held key. `alg` and `kid` in `headers` are
    /// replaced by the key's own values.
    fn sign_token(
        &self,
        claims: &ClaimSet,
        headers: &ProtectedHeaderSet,
    ) -> Result<String, TokenError>;
}

pub struct TokenServiceImpl {
    key: KeyMaterial,
    jwk: Jwk,
    algorithm: SignatureAlgorithm,
    flatten_audience: bool,
    signer: Arc<dyn Signer>,
}

impl TokenServiceImpl {
    pub fn from_private_key(
        key: KeyMaterial,
        config: &KeyConfig,
        key_algorithm_provider: &dyn KeyAlgorithmProvider,
        crypto: &dyn CryptoProvider,
    ) -> Result<Self, TokenError> {
        let algorithm = config.algorithm;

        key_algorithm_provider
            .get_key_algorithm(&algorithm)
            .ok_or_else(|| KeyAlgorithmError::UnsupportedAlgorithm(algorithm.to_string()))?
            .validate_key(&key)?;
        let signer = key_algorithm_provider.get_signer(&algorithm)?;

        let jwk_key = private_key_to_jwk(&key).map_err(|e| TokenError::KeyWrap(e.to_string()))?;
        let hasher = crypto
            .get_hasher(THUMBPRINT_HASHER)
            .map_err(|e| TokenError::KeyWrap(e.to_string()))?;
        let kid = thumbprint(&jwk_key, hasher.as_ref())?;
        log::debug!("assigned key ID {kid}");

        Ok(Self {
            jwk: Jwk {
                key: jwk_key,
                r#use: Some(config.key_use.clone()),
                key_ops: config.key_ops.clone(),
                alg: Some(algorithm.to_string()),
                kid: Some(kid),
            },
            key,
            algorithm,
            flatten_audience: config.flatten_audience,
            signer,
        })
    }
}

impl TokenService for TokenServiceImpl {
    fn private_jwk(&self) -> Jwk {
        self.jwk.clone()
    }

    fn key_set(&self) -> Result<JwkSet, TokenError> {
        let key = public_key_to_jwk(&self.key.public_key())
            .map_err(|e| TokenError::PublicDerivation(e.to_string()))?;

        Ok(JwkSet {
            keys: vec![Jwk {
                key,
                r#use: self.jwk.r#use.clone(),
                key_ops: self.jwk.key_ops.clone(),
                alg: self.jwk.alg.clone(),
                kid: self.jwk.kid.clone(),
            }],
        })
    }

    fn sign_token(
        &self,
        claims: &ClaimSet,
        headers: &ProtectedHeaderSet,
    ) -> Result<String, TokenError> {
        let payload = JWTPayload::from_claims(claims)?;
        let header =
            JWTHeader::from_headers(self.algorithm.to_string(), self.jwk.kid.clone(), headers)?;

        Jwt::new(header, payload).tokenize(self.signer.as_ref(), &self.key, self.flatten_audience)
    }
}

/// RFC 7638 thumbprint: hash of the required public members, keys sorted,
/// no whitespace.
pub fn thumbprint(key: &JwkKey, hasher: &dyn Hasher) -> Result<String, TokenError> {
    let members = match key {
        JwkKey::Rsa(data) => json!({
            "e": data.e,
            "kty": "RSA",
            "n": data.n,
        }),
        JwkKey::Ec(data) => json!({
            "crv": data.crv,
            "kty": "EC",
            "x": data.x,
            "y": data.y,
        }),
    };
    let canonical =
        serde_json::to_string(&members).map_err(|e| TokenError::KeyWrap(e.to_string()))?;

    hasher
        .hash_base64(canonical.as_bytes())
        .map_err(|e| TokenError::KeyWrap(e.to_string()))
}
