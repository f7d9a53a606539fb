//! Process configuration, read from the command line or the environment.

use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
    time::Duration,
};

use clap::{ArgAction, Args, Parser};
use jwks_providers::{
    common_models::{key::DEFAULT_RSA_KEY_SIZE, KeyConfig, KeyOperation},
    key_algorithm::{error::KeyAlgorithmError, model::SignatureAlgorithm},
};
use thiserror::Error;


pub const DEFAULT_KEY_FILE: &str = "/etc/local-jwks-server/key.pem";

#[derive(Debug, Clone, Parser)]
#[command(name = "local-jwks-server")]
#[command(about = "Local JWKS endpoint and JWT signer for development and testing")]
#[command(version)]
pub struct ServerConfig {
    #[command(flatten)]
    pub server: HttpConfig,

    #[command(flatten)]
    pub jwk: JwkConfig,
}

#[derive(Debug, Clone, Args)]
pub struct HttpConfig {
    /// Address to listen on
    #[arg(long = "addr", env = "SERVER_ADDR", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub addr: IpAddr,

    /// Port to listen on
    #[arg(long = "port", env = "SERVER_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Upper bound for handling a single request, e.g. `500ms`, `30s`, `1m30s`
    #[arg(
        long = "http-req-timeout",
        env = "SERVER_HTTP_REQ_TIMEOUT",
        default_value = "30s",
        value_parser = parse_duration
    )]
    pub http_req_timeout: Duration,
}

impl HttpConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.addr, self.port)
    }
}

#[derive(Debug, Clone, Args)]
pub struct JwkConfig {
    /// JWA signature algorithm of the served key
    #[arg(long = "jwk-alg", env = "JWK_ALG", default_value = "RS256", value_parser = parse_algorithm)]
    pub alg: SignatureAlgorithm,

    /// Modulus size in bits for generated RSA keys
    #[arg(long = "jwk-rsa-key-size", env = "JWK_RSA_KEY_SIZE", default_value_t = DEFAULT_RSA_KEY_SIZE)]
    pub rsa_key_size: usize,

    /// PEM private key; a random key is generated when the file does not exist
    #[arg(long = "jwk-key-file", env = "JWK_KEY_FILE", default_value = DEFAULT_KEY_FILE)]
    pub key_file: PathBuf,

    /// Comma separated `key_ops` advertised in the key set
    #[arg(
        long = "jwk-key-ops",
        env = "JWK_KEY_OPS",
        value_delimiter = ',',
        value_parser = parse_key_operation
    )]
    pub key_ops: Vec<KeyOperation>,

    /// Serialize a single-member `aud` claim as a plain string
    #[arg(
        long = "jwk-flatten-audience",
        env = "JWK_FLATTEN_AUDIENCE",
        default_value_t = false,
        action = ArgAction::Set
    )]
    pub flatten_audience: bool,
}

impl From<&JwkConfig> for KeyConfig {
    fn from(value: &JwkConfig) -> Self {
        Self {
            algorithm: value.alg,
            rsa_key_size: value.rsa_key_size,
            key_file: Some(value.key_file.clone()),
            key_ops: value.key_ops.clone(),
            flatten_audience: value.flatten_audience,
            ..Default::default()
        }
    }
}

#[derive(Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid duration `{0}`")]
    InvalidDuration(String),
    #[error("unknown key operation `{0}`")]
    UnknownKeyOperation(String),
}

fn parse_algorithm(value: &str) -> Result<SignatureAlgorithm, KeyAlgorithmError> {
    SignatureAlgorithm::from_jwa(value.trim())
}

fn parse_key_operation(value: &str) -> Result<KeyOperation, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::UnknownKeyOperation(value.to_owned()))
}

/// Parses a sequence of `<integer><unit>` pairs with units `ms`, `s`, `m`
/// and `h`. A bare `0` is accepted.
pub fn parse_duration(value: &str) -> Result<Duration, ConfigError> {
    let invalid = || ConfigError::InvalidDuration(value.to_owned());

    let input = value.trim();
    if input == "0" {
        return Ok(Duration::ZERO);
    }
    if input.is_empty() {
        return Err(invalid());
    }

    let mut total = Duration::ZERO;
    let mut rest = input;
    while !rest.is_empty() {
        let digits = rest
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(invalid)?;
        if digits == 0 {
            return Err(invalid());
        }
        let amount: u64 = rest[..digits].parse().map_err(|_| invalid())?;
        rest = &rest[digits..];

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit())
            .unwrap_or(rest.len());
        let part = match &rest[..unit_len] {
            "ms" => Duration::from_millis(amount),
            "s" => Duration::from_secs(amount),
            "m" => Duration::from_secs(amount.checked_mul(60).ok_or_else(invalid)?),
            "h" => Duration::from_secs(amount.checked_mul(3600).ok_or_else(invalid)?),
            _ => return Err(invalid()),
        };
        rest = &rest[unit_len..];

        total = total.checked_add(part).ok_or_else(invalid)?;
    }

    Ok(total)
}
