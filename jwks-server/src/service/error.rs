use std::{io, path::PathBuf};

use jwks_providers::{key_storage::error::KeyStorageError, token::error::TokenError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KeyServiceError {
    #[error("failed to read key file `{path}`: {source}")]
    KeyFile { path: PathBuf, source: io::Error },
    #[error(transparent)]
    KeyStorage(#[from] KeyStorageError),
}

/// Fatal errors while bringing the server up.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to initialize private key: {0}")]
    PrivateKey(#[from] KeyServiceError),
    #[error("failed to initialize token service: {0}")]
    TokenService(#[from] TokenError),
}
