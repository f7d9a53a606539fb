use serde_json::{Map, Value};
use time::OffsetDateTime;

use super::model::{JWTHeader, JWTPayload};
use crate::token::error::TokenError;

pub const DEFAULT_TOKEN_TYPE: &str = "JWT";

fn claim_error(name: &str, expected: &str) -> TokenError {
    TokenError::ClaimEncoding(format!("invalid value for `{name}` claim: expected {expected}"))
}

fn header_error(name: &str, expected: &str) -> TokenError {
    TokenError::HeaderEncoding(format!("invalid value for `{name}` header: expected {expected}"))
}

fn string_claim(name: &str, value: &Value) -> Result<String, TokenError> {
    value
        .as_str()
        .map(ToOwned::to_owned)
        .ok_or_else(|| claim_error(name, "a string"))
}

// Fractional seconds are truncated.
fn numeric_date_claim(name: &str, value: &Value) -> Result<OffsetDateTime, TokenError> {
    let seconds = match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|seconds| seconds.trunc() as i64)),
        _ => None,
    }
    .ok_or_else(|| claim_error(name, "a numeric date"))?;

    OffsetDateTime::from_unix_timestamp(seconds)
        .map_err(|_| claim_error(name, "a representable numeric date"))
}

fn audience_claim(value: &Value) -> Result<Vec<String>, TokenError> {
    match value {
        Value::String(audience) => Ok(vec![audience.to_owned()]),
        Value::Array(values) => values
            .iter()
            .map(|value| {
                value
                    .as_str()
                    .map(ToOwned::to_owned)
                    .ok_or_else(|| claim_error("aud", "a string or an array of strings"))
            })
            .collect(),
        _ => Err(claim_error("aud", "a string or an array of strings")),
    }
}

fn is_string_array(value: &Value) -> bool {
    value
        .as_array()
        .is_some_and(|values| values.iter().all(Value::is_string))
}

impl JWTPayload {
    /// Type checks the registered claims; everything else is carried as is.
    pub fn from_claims(claims: &Map<String, Value>) -> Result<Self, TokenError> {
        let mut payload = JWTPayload::default();

        for (name, value) in claims {
            match name.as_str() {
                "iss" => payload.issuer = Some(string_claim(name, value)?),
                "sub" => payload.subject = Some(string_claim(name, value)?),
                "jti" => payload.jwt_id = Some(string_claim(name, value)?),
                "aud" => payload.audience = Some(audience_claim(value)?),
                "exp" => payload.expires_at = Some(numeric_date_claim(name, value)?),
                "nbf" => payload.invalid_before = Some(numeric_date_claim(name, value)?),
                "iat" => payload.issued_at = Some(numeric_date_claim(name, value)?),
                _ => {
                    payload.custom.insert(name.to_owned(), value.to_owned());
                }
            }
        }

        Ok(payload)
    }

    /// With `flatten_audience`, a single audience is written as a bare string.
    pub fn to_json(&self, flatten_audience: bool) -> Result<String, TokenError> {
        let mut payload =
            serde_json::to_value(self).map_err(|e| TokenError::ClaimEncoding(e.to_string()))?;

        if flatten_audience {
            if let Some(audience) = payload.get_mut("aud") {
                let single = match audience.as_array().map(Vec::as_slice) {
                    Some([single]) => Some(single.to_owned()),
                    _ => None,
                };
                if let Some(single) = single {
                    *audience = single;
                }
            }
        }

        serde_json::to_string(&payload).map_err(|e| TokenError::ClaimEncoding(e.to_string()))
    }
}

impl JWTHeader {
    /// `alg` and `kid` always come from the signing key and replace caller values.
    pub fn from_headers(
        algorithm: String,
        key_id: Option<String>,
        headers: &Map<String, Value>,
    ) -> Result<Self, TokenError> {
        let mut header = JWTHeader {
            algorithm,
            key_id,
            signature_type: Some(DEFAULT_TOKEN_TYPE.to_string()),
            custom: Map::new(),
        };

        for (name, value) in headers {
            match name.as_str() {
                "alg" | "kid" => {}
                "typ" => {
                    header.signature_type = Some(
                        value
                            .as_str()
                            .map(ToOwned::to_owned)
                            .ok_or_else(|| header_error(name, "a string"))?,
                    );
                }
                "cty" | "jku" | "x5u" | "x5t" | "x5t#S256" if !value.is_string() => {
                    return Err(header_error(name, "a string"));
                }
                "crit" | "x5c" if !is_string_array(value) => {
                    return Err(header_error(name, "an array of strings"));
                }
                "jwk" if !value.is_object() => {
                    return Err(header_error(name, "an object"));
                }
                _ => {
                    header.custom.insert(name.to_owned(), value.to_owned());
                }
            }
        }

        Ok(header)
    }
}
