//! Private and public key material.
//!
//! [`KeyMaterial`] is a tagged variant over every key family this service can
//! sign with, so callers match exhaustively instead of downcasting.

use std::fmt;

use p256::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use rand::rngs::OsRng;
use rsa::{
    pkcs1::DecodeRsaPrivateKey,
    pkcs8::DecodePrivateKey,
    traits::{PrivateKeyParts, PublicKeyParts},
    BigUint, RsaPrivateKey, RsaPublicKey,
};
use zeroize::Zeroizing;

use crate::KeyError;


/// NIST curves supported for ECDSA.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EllipticCurve {
    P256,
    P384,
    P521,
}

impl EllipticCurve {
    /// JWK `crv` name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::P256 => "P-256",
            Self::P384 => "P-384",
            Self::P521 => "P-521",
        }
    }

    /// Byte length of a field element (and of each affine coordinate).
    pub fn coordinate_len(&self) -> usize {
        match self {
            Self::P256 => 32,
            Self::P384 => 48,
            Self::P521 => 66,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "P-256" => Some(Self::P256),
            "P-384" => Some(Self::P384),
            "P-521" => Some(Self::P521),
            _ => None,
        }
    }
}

impl fmt::Display for EllipticCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone)]
pub enum KeyMaterial {
    Rsa(Box<RsaPrivateKey>),
    Ec(EcKeyMaterial),
}

#[derive(Clone)]
pub enum EcKeyMaterial {
    P256(p256::SecretKey),
    P384(p384::SecretKey),
    P521(p521::SecretKey),
}

#[derive(Clone, PartialEq, Eq)]
pub enum PublicKeyMaterial {
    Rsa(RsaPublicKey),
    Ec(EcPublicKeyMaterial),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EcPublicKeyMaterial {
    P256(p256::PublicKey),
    P384(p384::PublicKey),
    P521(p521::PublicKey),
}

/// Big-endian public parameters, ready for JWK encoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PublicComponents {
    Rsa {
        n: Vec<u8>,
        e: Vec<u8>,
    },
    Ec {
        curve: EllipticCurve,
        x: Vec<u8>,
        y: Vec<u8>,
    },
}

/// Big-endian private parameters. Wiped on drop.
pub enum PrivateComponents {
    Rsa {
        d: Zeroizing<Vec<u8>>,
        p: Zeroizing<Vec<u8>>,
        q: Zeroizing<Vec<u8>>,
        dp: Zeroizing<Vec<u8>>,
        dq: Zeroizing<Vec<u8>>,
        qi: Zeroizing<Vec<u8>>,
    },
    Ec {
        d: Zeroizing<Vec<u8>>,
    },
}

impl KeyMaterial {
    /// Generates a fresh RSA key of `bits` modulus length.
    pub fn generate_rsa(bits: usize) -> Result<Self, KeyError> {
        RsaPrivateKey::new(&mut OsRng, bits)
            .map(|key| Self::Rsa(Box::new(key)))
            .map_err(|err| KeyError::CouldNotGenerate(err.to_string()))
    }

    pub fn generate_ec(curve: EllipticCurve) -> Self {
        Self::Ec(EcKeyMaterial::generate(curve))
    }

    /// Decodes a PKCS#8 `PrivateKeyInfo`, RSA first, then each supported curve.
    pub fn from_pkcs8_der(der: &[u8]) -> Option<Self> {
        if let Ok(key) = RsaPrivateKey::from_pkcs8_der(der) {
            return Some(Self::Rsa(Box::new(key)));
        }

        EcKeyMaterial::from_pkcs8_der(der).map(Self::Ec)
    }

    /// Decodes a legacy PKCS#1 `RSAPrivateKey`.
    pub fn from_pkcs1_der(der: &[u8]) -> Option<Self> {
        RsaPrivateKey::from_pkcs1_der(der)
            .ok()
            .map(|key| Self::Rsa(Box::new(key)))
    }

    /// Decodes a legacy SEC1 `ECPrivateKey`.
    pub fn from_sec1_der(der: &[u8]) -> Option<Self> {
        EcKeyMaterial::from_sec1_der(der).map(Self::Ec)
    }

    pub fn public_key(&self) -> PublicKeyMaterial {
        match self {
            Self::Rsa(key) => PublicKeyMaterial::Rsa(key.to_public_key()),
            Self::Ec(key) => PublicKeyMaterial::Ec(key.public_key()),
        }
    }

    /// Modulus length in bits for RSA keys.
    pub fn rsa_bits(&self) -> Option<usize> {
        match self {
            Self::Rsa(key) => Some(key.size() * 8),
            Self::Ec(_) => None,
        }
    }

    pub fn curve(&self) -> Option<EllipticCurve> {
        match self {
            Self::Rsa(_) => None,
            Self::Ec(key) => Some(key.curve()),
        }
    }

    pub fn private_components(&self) -> Result<PrivateComponents, KeyError> {
        match self {
            Self::Rsa(key) => {
                let [p, q] = key.primes() else {
                    return Err(KeyError::CouldNotEncode(
                        "multi-prime RSA keys are not supported".to_string(),
                    ));
                };
                let missing_crt = || KeyError::CouldNotEncode("missing CRT values".to_string());
                let dp = key.dp().ok_or_else(missing_crt)?;
                let dq = key.dq().ok_or_else(missing_crt)?;
                let qi = key.crt_coefficient().ok_or_else(missing_crt)?;

                Ok(PrivateComponents::Rsa {
                    d: Zeroizing::new(key.d().to_bytes_be()),
                    p: Zeroizing::new(p.to_bytes_be()),
                    q: Zeroizing::new(q.to_bytes_be()),
                    dp: Zeroizing::new(dp.to_bytes_be()),
                    dq: Zeroizing::new(dq.to_bytes_be()),
                    qi: Zeroizing::new(qi.to_bytes_be()),
                })
            }
            Self::Ec(key) => Ok(PrivateComponents::Ec {
                d: key.to_bytes(),
            }),
        }
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rsa(key) => f
                .debug_struct("KeyMaterial::Rsa")
                .field("bits", &(key.size() * 8))
                .finish_non_exhaustive(),
            Self::Ec(key) => f
                .debug_struct("KeyMaterial::Ec")
                .field("curve", &key.curve())
                .finish_non_exhaustive(),
        }
    }
}

impl EcKeyMaterial {
    pub fn generate(curve: EllipticCurve) -> Self {
        match curve {
            EllipticCurve::P256 => Self::P256(p256::SecretKey::random(&mut OsRng)),
            EllipticCurve::P384 => Self::P384(p384::SecretKey::random(&mut OsRng)),
            EllipticCurve::P521 => Self::P521(p521::SecretKey::random(&mut OsRng)),
        }
    }

    pub fn curve(&self) -> EllipticCurve {
        match self {
            Self::P256(_) => EllipticCurve::P256,
            Self::P384(_) => EllipticCurve::P384,
            Self::P521(_) => EllipticCurve::P521,
        }
    }

    pub fn public_key(&self) -> EcPublicKeyMaterial {
        match self {
            Self::P256(key) => EcPublicKeyMaterial::P256(key.public_key()),
            Self::P384(key) => EcPublicKeyMaterial::P384(key.public_key()),
            Self::P521(key) => EcPublicKeyMaterial::P521(key.public_key()),
        }
    }

    fn to_bytes(&self) -> Zeroizing<Vec<u8>> {
        match self {
            Self::P256(key) => Zeroizing::new(key.to_bytes().to_vec()),
            Self::P384(key) => Zeroizing::new(key.to_bytes().to_vec()),
            Self::P521(key) => Zeroizing::new(key.to_bytes().to_vec()),
        }
    }

    // PKCS#8 carries the curve OID, which the decoders check.
    fn from_pkcs8_der(der: &[u8]) -> Option<Self> {
        if let Ok(key) = p256::SecretKey::from_pkcs8_der(der) {
            return Some(Self::P256(key));
        }
        if let Ok(key) = p384::SecretKey::from_pkcs8_der(der) {
            return Some(Self::P384(key));
        }
        p521::SecretKey::from_pkcs8_der(der).ok().map(Self::P521)
    }

    // Smallest curve first: a scalar longer than the field size is rejected,
    // so a key only ever decodes on its own curve.
    fn from_sec1_der(der: &[u8]) -> Option<Self> {
        if let Ok(key) = p256::SecretKey::from_sec1_der(der) {
            return Some(Self::P256(key));
        }
        if let Ok(key) = p384::SecretKey::from_sec1_der(der) {
            return Some(Self::P384(key));
        }
        p521::SecretKey::from_sec1_der(der).ok().map(Self::P521)
    }
}

impl PublicKeyMaterial {
    pub fn components(&self) -> PublicComponents {
        match self {
            Self::Rsa(key) => PublicComponents::Rsa {
                n: key.n().to_bytes_be(),
                e: key.e().to_bytes_be(),
            },
            Self::Ec(key) => {
                let (x, y) = key.coordinates();
                PublicComponents::Ec {
                    curve: key.curve(),
                    x,
                    y,
                }
            }
        }
    }

    pub fn from_components(components: &PublicComponents) -> Result<Self, KeyError> {
        match components {
            PublicComponents::Rsa { n, e } => {
                RsaPublicKey::new(BigUint::from_bytes_be(n), BigUint::from_bytes_be(e))
                    .map(Self::Rsa)
                    .map_err(|err| KeyError::InvalidPublicKey(err.to_string()))
            }
            PublicComponents::Ec { curve, x, y } => {
                EcPublicKeyMaterial::from_coordinates(*curve, x, y).map(Self::Ec)
            }
        }
    }
}

impl fmt::Debug for PublicKeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PublicKeyMaterial")
            .field(&self.components())
            .finish()
    }
}

impl EcPublicKeyMaterial {
    pub fn curve(&self) -> EllipticCurve {
        match self {
            Self::P256(_) => EllipticCurve::P256,
            Self::P384(_) => EllipticCurve::P384,
            Self::P521(_) => EllipticCurve::P521,
        }
    }

    /// Affine `(x, y)` coordinates, each left-padded to the field size.
    pub fn coordinates(&self) -> (Vec<u8>, Vec<u8>) {
        let (x, y) = match self {
            Self::P256(key) => {
                let point = key.to_encoded_point(false);
                (point.x().map(|x| x.to_vec()), point.y().map(|y| y.to_vec()))
            }
            Self::P384(key) => {
                let point = key.to_encoded_point(false);
                (point.x().map(|x| x.to_vec()), point.y().map(|y| y.to_vec()))
            }
            Self::P521(key) => {
                let point = key.to_encoded_point(false);
                (point.x().map(|x| x.to_vec()), point.y().map(|y| y.to_vec()))
            }
        };

        // a valid public key is never the identity point
        (x.unwrap_or_default(), y.unwrap_or_default())
    }

    pub fn from_coordinates(curve: EllipticCurve, x: &[u8], y: &[u8]) -> Result<Self, KeyError> {
        let len = curve.coordinate_len();
        if x.len() != len || y.len() != len {
            return Err(KeyError::InvalidPublicKey(format!(
                "{curve} coordinates must be {len} bytes"
            )));
        }

        let invalid_point = || KeyError::InvalidPublicKey(format!("point is not on {curve}"));

        match curve {
            EllipticCurve::P256 => {
                let point = p256::EncodedPoint::from_affine_coordinates(
                    p256::FieldBytes::from_slice(x),
                    p256::FieldBytes::from_slice(y),
                    false,
                );
                Option::<p256::PublicKey>::from(p256::PublicKey::from_encoded_point(&point))
                    .map(Self::P256)
                    .ok_or_else(invalid_point)
            }
            EllipticCurve::P384 => {
                let point = p384::EncodedPoint::from_affine_coordinates(
                    p384::FieldBytes::from_slice(x),
                    p384::FieldBytes::from_slice(y),
                    false,
                );
                Option::<p384::PublicKey>::from(p384::PublicKey::from_encoded_point(&point))
                    .map(Self::P384)
                    .ok_or_else(invalid_point)
            }
            EllipticCurve::P521 => {
                let point = p521::EncodedPoint::from_affine_coordinates(
                    p521::FieldBytes::from_slice(x),
                    p521::FieldBytes::from_slice(y),
                    false,
                );
                Option::<p521::PublicKey>::from(p521::PublicKey::from_encoded_point(&point))
                    .map(Self::P521)
                    .ok_or_else(invalid_point)
            }
        }
    }
}
