use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::{formats::PreferMany, serde_as, OneOrMany};
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JWTHeader {
    #[serde(rename = "alg")]
    pub algorithm: String,

    #[serde(rename = "kid", default, skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,

    #[serde(rename = "typ", default, skip_serializing_if = "Option::is_none")]
    pub signature_type: Option<String>,

    #[serde(flatten)]
    pub custom: Map<String, Value>,
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct JWTPayload {
    #[serde(rename = "iss", default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,

    #[serde(rename = "sub", default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// Accepts a bare string on input, serializes as an array.
    #[serde_as(as = "Option<OneOrMany<_, PreferMany>>")]
    #[serde(rename = "aud", skip_serializing_if = "Option::is_none")]
    pub audience: Option<Vec<String>>,

    #[serde(
        rename = "exp",
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::timestamp::option"
    )]
    pub expires_at: Option<OffsetDateTime>,

    #[serde(
        rename = "nbf",
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::timestamp::option"
    )]
    pub invalid_before: Option<OffsetDateTime>,

    #[serde(
        rename = "iat",
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::timestamp::option"
    )]
    pub issued_at: Option<OffsetDateTime>,

    #[serde(rename = "jti", default, skip_serializing_if = "Option::is_none")]
    pub jwt_id: Option<String>,

    #[serde(flatten)]
    pub custom: Map<String, Value>,
}

impl JWTPayload {
    /// Audience as a list, whatever its wire form.
    pub fn audience(&self) -> &[String] {
        self.audience.as_deref().unwrap_or_default()
    }
}

#[derive(Debug)]
pub struct DecomposedToken {
    pub header: JWTHeader,
    pub header_json: String,
    pub payload: JWTPayload,
    pub payload_json: String,
    pub signature: Vec<u8>,
    /// `<header>.<payload>` exactly as received.
    pub signing_input: String,
}
