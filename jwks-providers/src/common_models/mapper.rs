use ct_codecs::{Base64UrlSafeNoPadding, Decoder, Encoder};
use jwks_crypto::{
    EllipticCurve, KeyError, KeyMaterial, PrivateComponents, PublicComponents, PublicKeyMaterial,
};
use thiserror::Error;
use zeroize::Zeroizing;

use super::{JwkEllipticData, JwkKey, JwkRsaData};

#[derive(Debug, PartialEq, Eq, Error)]
pub enum JwkMappingError {
    #[error("Could not encode `{0}`")]
    Encoding(String),
    #[error("Could not decode `{0}`")]
    Decoding(String),
    #[error("Unsupported curve `{0}`")]
    UnsupportedCurve(String),
    #[error("Key error: `{0}`")]
    Key(#[from] KeyError),
}

pub fn bin_to_b64url_string(bin: &[u8]) -> Result<String, JwkMappingError> {
    Base64UrlSafeNoPadding::encode_to_string(bin)
        .map_err(|e| JwkMappingError::Encoding(e.to_string()))
}

pub fn b64url_string_to_bin(value: &str) -> Result<Vec<u8>, JwkMappingError> {
    Base64UrlSafeNoPadding::decode_to_vec(value, None)
        .map_err(|e| JwkMappingError::Decoding(e.to_string()))
}

fn secret_to_b64url_string(bin: &[u8]) -> Result<Option<Zeroizing<String>>, JwkMappingError> {
    bin_to_b64url_string(bin).map(|value| Some(Zeroizing::new(value)))
}

pub fn public_key_to_jwk(key: &PublicKeyMaterial) -> Result<JwkKey, JwkMappingError> {
    Ok(match key.components() {
        PublicComponents::Rsa { n, e } => JwkKey::Rsa(JwkRsaData {
            n: bin_to_b64url_string(&n)?,
            e: bin_to_b64url_string(&e)?,
            d: None,
            p: None,
            q: None,
            dp: None,
            dq: None,
            qi: None,
        }),
        PublicComponents::Ec { curve, x, y } => JwkKey::Ec(JwkEllipticData {
            crv: curve.name().to_string(),
            x: bin_to_b64url_string(&x)?,
            y: bin_to_b64url_string(&y)?,
            d: None,
        }),
    })
}

/// Full JWK including the private members.
pub fn private_key_to_jwk(key: &KeyMaterial) -> Result<JwkKey, JwkMappingError> {
    let mut jwk = public_key_to_jwk(&key.public_key())?;

    match (&mut jwk, key.private_components()?) {
        (JwkKey::Rsa(data), PrivateComponents::Rsa { d, p, q, dp, dq, qi }) => {
            data.d = secret_to_b64url_string(&d)?;
            data.p = secret_to_b64url_string(&p)?;
            data.q = secret_to_b64url_string(&q)?;
            data.dp = secret_to_b64url_string(&dp)?;
            data.dq = secret_to_b64url_string(&dq)?;
            data.qi = secret_to_b64url_string(&qi)?;
        }
        (JwkKey::Ec(data), PrivateComponents::Ec { d }) => {
            data.d = secret_to_b64url_string(&d)?;
        }
        _ => {
            return Err(JwkMappingError::Encoding(
                "private and public key types differ".to_string(),
            ))
        }
    }

    Ok(jwk)
}

/// Public key described by a JWK; private members are ignored.
pub fn jwk_to_public_key(jwk: &JwkKey) -> Result<PublicKeyMaterial, JwkMappingError> {
    let components = match jwk {
        JwkKey::Rsa(data) => PublicComponents::Rsa {
            n: b64url_string_to_bin(&data.n)?,
            e: b64url_string_to_bin(&data.e)?,
        },
        JwkKey::Ec(data) => PublicComponents::Ec {
            curve: EllipticCurve::from_name(&data.crv)
                .ok_or_else(|| JwkMappingError::UnsupportedCurve(data.crv.clone()))?,
            x: b64url_string_to_bin(&data.x)?,
            y: b64url_string_to_bin(&data.y)?,
        },
    };

    Ok(PublicKeyMaterial::from_components(&components)?)
}
