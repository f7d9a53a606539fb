//! JSON Web Key representations shared by the providers.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

pub mod key;
pub mod mapper;

pub use key::{KeyConfig, KeyOperation};


/// A JSON Web Key (RFC 7517) with the metadata this service assigns.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwk {
    #[serde(flatten)]
    pub key: JwkKey,

    #[serde(rename = "use", default, skip_serializing_if = "Option::is_none")]
    pub r#use: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key_ops: Vec<KeyOperation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alg: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
}

impl Jwk {
    /// Copy of this key with every private member removed.
    pub fn to_public(&self) -> Jwk {
        Jwk {
            key: self.key.to_public(),
            ..self.clone()
        }
    }

    pub fn is_private(&self) -> bool {
        self.key.is_private()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kty")]
pub enum JwkKey {
    #[serde(rename = "RSA")]
    Rsa(JwkRsaData),
    #[serde(rename = "EC")]
    Ec(JwkEllipticData),
}

impl JwkKey {
    pub fn to_public(&self) -> JwkKey {
        match self {
            Self::Rsa(data) => Self::Rsa(JwkRsaData {
                n: data.n.clone(),
                e: data.e.clone(),
                d: None,
                p: None,
                q: None,
                dp: None,
                dq: None,
                qi: None,
            }),
            Self::Ec(data) => Self::Ec(JwkEllipticData {
                crv: data.crv.clone(),
                x: data.x.clone(),
                y: data.y.clone(),
                d: None,
            }),
        }
    }

    pub fn is_private(&self) -> bool {
        match self {
            Self::Rsa(data) => {
                data.d.is_some()
                    || data.p.is_some()
                    || data.q.is_some()
                    || data.dp.is_some()
                    || data.dq.is_some()
                    || data.qi.is_some()
            }
            Self::Ec(data) => data.d.is_some(),
        }
    }
}

/// RSA members, base64url encoded big-endian integers.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwkRsaData {
    pub n: String,
    pub e: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d: Option<Zeroizing<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p: Option<Zeroizing<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<Zeroizing<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dp: Option<Zeroizing<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dq: Option<Zeroizing<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qi: Option<Zeroizing<String>>,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwkEllipticData {
    pub crv: String,
    pub x: String,
    pub y: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d: Option<Zeroizing<String>>,
}

// Private members are never printed.
impl fmt::Debug for JwkRsaData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwkRsaData")
            .field("n", &self.n)
            .field("e", &self.e)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for JwkEllipticData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwkEllipticData")
            .field("crv", &self.crv)
            .field("x", &self.x)
            .field("y", &self.y)
            .finish_non_exhaustive()
    }
}

/// JWK Set document, as served from `/.well-known/jwks.json`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwkSet {
    pub keys: Vec<Jwk>,
}
