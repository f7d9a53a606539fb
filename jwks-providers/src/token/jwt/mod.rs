//! Compact JWS serialization of JWTs.

use jwks_crypto::{KeyMaterial, Signer};

use self::model::{DecomposedToken, JWTHeader, JWTPayload};
use crate::{
    common_models::{
        mapper::{b64url_string_to_bin, bin_to_b64url_string, jwk_to_public_key},
        Jwk,
    },
    key_algorithm::{model::SignatureAlgorithm, provider::KeyAlgorithmProvider},
    token::error::TokenError,
};

#[cfg(test)]
mod test;

pub mod mapper;
pub mod model;

#[derive(Debug, Clone, PartialEq)]
pub struct Jwt {
    pub header: JWTHeader,
    pub payload: JWTPayload,
}

impl Jwt {
    pub fn new(header: JWTHeader, payload: JWTPayload) -> Jwt {
        Jwt { header, payload }
    }

    pub fn tokenize(
        &self,
        signer: &dyn Signer,
        key: &KeyMaterial,
        flatten_audience: bool,
    ) -> Result<String, TokenError> {
        let header_json = serde_json::to_string(&self.header)
            .map_err(|e| TokenError::HeaderEncoding(e.to_string()))?;
        let payload_json = self.payload.to_json(flatten_audience)?;

        let mut token = format!(
            "{}.{}",
            string_to_b64url_string(&header_json)?,
            string_to_b64url_string(&payload_json)?,
        );

        let signature = signer
            .sign(token.as_bytes(), key)
            .map_err(|e| TokenError::Signing(e.to_string()))?;

        token.push('.');
        token.push_str(
            &bin_to_b64url_string(&signature).map_err(|e| TokenError::Signing(e.to_string()))?,
        );

        Ok(token)
    }

    pub fn decompose(token: &str) -> Result<DecomposedToken, TokenError> {
        let token = token.trim_matches(|c: char| c == '.' || c.is_whitespace());
        let mut jwt_parts = token.splitn(3, '.');

        let (Some(header), Some(payload), Some(signature)) =
            (jwt_parts.next(), jwt_parts.next(), jwt_parts.next())
        else {
            return Err(TokenError::Decoding("Missing token part".to_owned()));
        };

        let header_json = b64url_to_json(header)?;
        let header: JWTHeader = serde_json::from_str(&header_json)
            .map_err(|e| TokenError::Decoding(e.to_string()))?;

        let payload_json = b64url_to_json(payload)?;
        let payload: JWTPayload = serde_json::from_str(&payload_json)
            .map_err(|e| TokenError::Decoding(e.to_string()))?;

        let signing_input = token
            .rsplit_once('.')
            .map(|(signing_input, _)| signing_input.to_owned())
            .unwrap_or_default();

        Ok(DecomposedToken {
            header,
            header_json,
            payload,
            payload_json,
            signature: b64url_string_to_bin(signature)
                .map_err(|e| TokenError::Decoding(e.to_string()))?,
            signing_input,
        })
    }
}

impl DecomposedToken {
    /// Checks the signature against `jwk` using the algorithm named in the header.
    pub fn verify(
        &self,
        jwk: &Jwk,
        key_algorithm_provider: &dyn KeyAlgorithmProvider,
    ) -> Result<(), TokenError> {
        if jwk
            .alg
            .as_ref()
            .is_some_and(|alg| *alg != self.header.algorithm)
        {
            return Err(TokenError::Verification(format!(
                "key is not meant for `{}`",
                self.header.algorithm
            )));
        }

        let algorithm = SignatureAlgorithm::from_jwa(&self.header.algorithm)?;
        let signer = key_algorithm_provider.get_signer(&algorithm)?;
        let public_key =
            jwk_to_public_key(&jwk.key).map_err(|e| TokenError::Verification(e.to_string()))?;

        signer
            .verify(self.signing_input.as_bytes(), &self.signature, &public_key)
            .map_err(|e| TokenError::Verification(e.to_string()))
    }

    pub fn into_jwt(self) -> Jwt {
        Jwt::new(self.header, self.payload)
    }
}

fn string_to_b64url_string(string: &str) -> Result<String, TokenError> {
    bin_to_b64url_string(string.as_bytes()).map_err(|e| TokenError::Signing(e.to_string()))
}

fn b64url_to_json(part: &str) -> Result<String, TokenError> {
    let decoded = b64url_string_to_bin(part).map_err(|e| TokenError::Decoding(e.to_string()))?;
    String::from_utf8(decoded).map_err(|e| TokenError::Decoding(e.to_string()))
}
