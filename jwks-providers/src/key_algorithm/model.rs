use jwks_crypto::EllipticCurve;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::error::KeyAlgorithmError;

/// JWA signature algorithm identifiers (RFC 7518).
///
/// Only the RSA and NIST-curve ECDSA algorithms can issue tokens; the others
/// are recognised so they can be rejected with a meaningful error.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
pub enum SignatureAlgorithm {
    #[strum(serialize = "RS256")]
    #[serde(rename = "RS256")]
    Rs256,
    #[strum(serialize = "RS384")]
    #[serde(rename = "RS384")]
    Rs384,
    #[strum(serialize = "RS512")]
    #[serde(rename = "RS512")]
    Rs512,
    #[strum(serialize = "PS256")]
    #[serde(rename = "PS256")]
    Ps256,
    #[strum(serialize = "PS384")]
    #[serde(rename = "PS384")]
    Ps384,
    #[strum(serialize = "PS512")]
    #[serde(rename = "PS512")]
    Ps512,
    #[strum(serialize = "ES256")]
    #[serde(rename = "ES256")]
    Es256,
    #[strum(serialize = "ES384")]
    #[serde(rename = "ES384")]
    Es384,
    #[strum(serialize = "ES512")]
    #[serde(rename = "ES512")]
    Es512,
    #[strum(serialize = "ES256K")]
    #[serde(rename = "ES256K")]
    Es256K,
    #[strum(serialize = "EdDSA")]
    #[serde(rename = "EdDSA")]
    EdDsa,
    #[strum(serialize = "HS256")]
    #[serde(rename = "HS256")]
    Hs256,
    #[strum(serialize = "HS384")]
    #[serde(rename = "HS384")]
    Hs384,
    #[strum(serialize = "HS512")]
    #[serde(rename = "HS512")]
    Hs512,
    #[strum(serialize = "none")]
    #[serde(rename = "none")]
    None,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyFamily {
    Rsa,
    Ecdsa(EllipticCurve),
}

impl SignatureAlgorithm {
    /// Parses a JWA identifier; matching is case sensitive.
    pub fn from_jwa(value: &str) -> Result<Self, KeyAlgorithmError> {
        value
            .parse()
            .map_err(|_| KeyAlgorithmError::UnsupportedAlgorithm(value.to_owned()))
    }

    /// Key family used to issue tokens, `None` for algorithms this service
    /// cannot sign with.
    pub fn family(&self) -> Option<KeyFamily> {
        match self {
            Self::Rs256 | Self::Rs384 | Self::Rs512 | Self::Ps256 | Self::Ps384 | Self::Ps512 => {
                Some(KeyFamily::Rsa)
            }
            Self::Es256 => Some(KeyFamily::Ecdsa(EllipticCurve::P256)),
            Self::Es384 => Some(KeyFamily::Ecdsa(EllipticCurve::P384)),
            Self::Es512 => Some(KeyFamily::Ecdsa(EllipticCurve::P521)),
            Self::Es256K
            | Self::EdDsa
            | Self::Hs256
            | Self::Hs384
            | Self::Hs512
            | Self::None => None,
        }
    }

    pub fn is_supported(&self) -> bool {
        self.family().is_some()
    }
}
