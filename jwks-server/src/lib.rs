//! **local-jwks-server** publishes a signing key as a JSON Web Key Set and
//! signs caller supplied claim sets into JWTs with it. It is meant for local
//! and test environments that need an OIDC-style key distribution endpoint
//! without a full identity provider.
//!
//! ## Repository structure
//!
//! The server consists of three crates:
//!
//! * **Crypto**: key material, key generation and raw JWS signers
//! * **Providers**
//!   * Key algorithm provider (algorithm registry)
//!   * Key storage provider (key generation and PEM import)
//!   * Token service
//! * **Server**: configuration, startup key policy and the HTTP surface
//!
//! ## Getting started
//!
//! ```ignore rust
//! let config = ServerConfig::parse();
//! let server = LocalJwksServer::new(&config)?;
//! axum::serve(listener, server.router(config.server.http_req_timeout)).await?;
//! ```

use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::Router;
use jwks_crypto::imp::{hasher::sha256::SHA256, signer::jws_signers, CryptoProviderImpl};
use jwks_providers::{
    common_models::KeyConfig,
    key_algorithm::imp::{provider::KeyAlgorithmProviderImpl, supported_key_algorithms},
    key_storage::imp::internal::InternalKeyProvider,
    token::{TokenService, TokenServiceImpl, THUMBPRINT_HASHER},
};

use config::ServerConfig;
use router::AppState;
use service::{error::StartupError, key_service::KeyService};

pub mod config;
pub mod model;
pub mod router;
pub mod service;

pub struct LocalJwksServer {
    pub token_service: Arc<dyn TokenService>,
}

impl LocalJwksServer {
    pub fn new(config: &ServerConfig) -> Result<Self, StartupError> {
        Self::from_key_config(&KeyConfig::from(&config.jwk))
    }

    pub fn from_key_config(key_config: &KeyConfig) -> Result<Self, StartupError> {
        // initialize crypto provider
        let crypto_provider = Arc::new(crypto_provider());

        // initialize key algorithm provider
        let key_algorithm_provider = Arc::new(KeyAlgorithmProviderImpl::new(
            supported_key_algorithms(),
            crypto_provider.clone(),
        ));

        // acquire the signing key
        let key_storage = Arc::new(InternalKeyProvider::new(key_algorithm_provider.clone()));
        let private_key = KeyService::new(key_storage).load_or_generate(key_config)?;

        let token_service = TokenServiceImpl::from_private_key(
            private_key,
            key_config,
            key_algorithm_provider.as_ref(),
            crypto_provider.as_ref(),
        )?;

        Ok(Self {
            token_service: Arc::new(token_service),
        })
    }

    pub fn router(&self, request_timeout: Duration) -> Router {
        router::router(
            AppState {
                token_service: self.token_service.clone(),
            },
            request_timeout,
        )
    }
}

/// SHA-256 for thumbprints plus every JWS signer.
pub fn crypto_provider() -> CryptoProviderImpl {
    CryptoProviderImpl::new(
        HashMap::from_iter(vec![(
            THUMBPRINT_HASHER.to_string(),
            Arc::new(SHA256 {}) as _,
        )]),
        jws_signers(),
    )
}
