use jwks_crypto::{EllipticCurve, KeyMaterial, MockSigner, SignerError};
use serde_json::{json, Map};
use time::{macros::datetime, OffsetDateTime};

use super::{
    model::{JWTHeader, JWTPayload},
    Jwt,
};
use crate::{
    common_models::mapper::public_key_to_jwk,
    common_models::Jwk,
    token::{error::TokenError, test::key_algorithm_provider},
};

const TOKEN: &str = "eyJhbGciOiJFUzI1NiIsImtpZCI6ImtleS0xIiwidHlwIjoiSldUIn0.eyJhdWQiOlsic2VydmljZSJdLCJleHAiOjExMTI0NzQyMjAsImlzcyI6Imlzc3VlciIsInN1YiI6ImpvaG4uZG9lIn0.AQID";

fn get_dummy_date() -> OffsetDateTime {
    datetime!(2005-04-02 21:37 +1)
}

fn prepare_jwt() -> Jwt {
    let header = JWTHeader {
        algorithm: "ES256".to_owned(),
        key_id: Some("key-1".to_owned()),
        signature_type: Some("JWT".to_owned()),
        custom: Map::new(),
    };

    let payload = JWTPayload {
        issuer: Some("issuer".to_owned()),
        subject: Some("john.doe".to_owned()),
        audience: Some(vec!["service".to_owned()]),
        expires_at: Some(get_dummy_date()),
        ..Default::default()
    };

    Jwt::new(header, payload)
}

fn any_key() -> KeyMaterial {
    KeyMaterial::generate_ec(EllipticCurve::P256)
}

#[test]
fn test_tokenize() {
    let mut signer = MockSigner::default();
    signer
        .expect_sign()
        .withf(|input, _| input == TOKEN.rsplit_once('.').unwrap().0.as_bytes())
        .times(1)
        .returning(|_, _| Ok(vec![1u8, 2, 3]));

    let token = prepare_jwt().tokenize(&signer, &any_key(), false).unwrap();

    assert_eq!(TOKEN, token);
}

#[test]
fn test_tokenize_flattens_single_audience() {
    let mut signer = MockSigner::default();
    signer.expect_sign().returning(|_, _| Ok(vec![1u8, 2, 3]));

    let token = prepare_jwt().tokenize(&signer, &any_key(), true).unwrap();
    let payload = token.split('.').nth(1).unwrap();

    assert_eq!(
        "eyJhdWQiOiJzZXJ2aWNlIiwiZXhwIjoxMTEyNDc0MjIwLCJpc3MiOiJpc3N1ZXIiLCJzdWIiOiJqb2huLmRvZSJ9",
        payload
    );
}

#[test]
fn test_tokenize_signing_failure() {
    let mut signer = MockSigner::default();
    signer
        .expect_sign()
        .returning(|_, _| Err(SignerError::CouldNotSign("boom".to_owned())));

    let result = prepare_jwt().tokenize(&signer, &any_key(), false);

    assert!(matches!(result, Err(TokenError::Signing(_))));
}

#[test]
fn test_decompose() {
    let decomposed = Jwt::decompose(TOKEN).unwrap();

    assert_eq!(vec![1u8, 2, 3], decomposed.signature);
    assert_eq!(
        r#"{"alg":"ES256","kid":"key-1","typ":"JWT"}"#,
        decomposed.header_json
    );
    assert_eq!(TOKEN.rsplit_once('.').unwrap().0, decomposed.signing_input);
    assert_eq!(prepare_jwt(), decomposed.into_jwt());
}

#[test]
fn test_decompose_reads_bare_string_audience() {
    let flattened = "eyJhbGciOiJFUzI1NiJ9.eyJhdWQiOiJzZXJ2aWNlIiwiZXhwIjoxMTEyNDc0MjIwLCJpc3MiOiJpc3N1ZXIiLCJzdWIiOiJqb2huLmRvZSJ9.AQID";

    let decomposed = Jwt::decompose(flattened).unwrap();

    assert_eq!(["service".to_owned()], decomposed.payload.audience());
    assert_eq!(Some(get_dummy_date()), decomposed.payload.expires_at);
}

#[test]
fn test_decompose_errors() {
    assert!(matches!(
        Jwt::decompose("abc.def"),
        Err(TokenError::Decoding(_))
    ));
    assert!(matches!(
        Jwt::decompose("!!!.e30.AQID"),
        Err(TokenError::Decoding(_))
    ));
    // header without alg
    assert!(matches!(
        Jwt::decompose("e30.e30.AQID"),
        Err(TokenError::Decoding(_))
    ));
}

#[test]
fn test_verify_rejects_foreign_key() {
    let provider = key_algorithm_provider();
    let signer = jwks_crypto::imp::signer::ecdsa::ECDSASigner::new(EllipticCurve::P256);
    let key = any_key();
    let other = any_key();

    let token = prepare_jwt().tokenize(&signer, &key, false).unwrap();
    let decomposed = Jwt::decompose(&token).unwrap();

    let jwk_for = |key: &KeyMaterial| Jwk {
        key: public_key_to_jwk(&key.public_key()).unwrap(),
        r#use: None,
        key_ops: vec![],
        alg: None,
        kid: None,
    };

    decomposed.verify(&jwk_for(&key), &provider).unwrap();
    assert!(matches!(
        decomposed.verify(&jwk_for(&other), &provider),
        Err(TokenError::Verification(_))
    ));

    let mut restricted = jwk_for(&key);
    restricted.alg = Some("ES384".to_owned());
    assert!(matches!(
        decomposed.verify(&restricted, &provider),
        Err(TokenError::Verification(_))
    ));
}

#[test]
fn test_payload_from_claims_keeps_custom_claims() {
    let claims = json!({
        "sub": "john.doe",
        "admin": true,
        "roles": ["a", "b"],
        "profile": { "age": 42 },
        "nothing": null,
    });

    let payload = JWTPayload::from_claims(claims.as_object().unwrap()).unwrap();

    assert_eq!(Some("john.doe".to_owned()), payload.subject);
    assert_eq!(4, payload.custom.len());
    assert_eq!(json!({ "age": 42 }), payload.custom["profile"]);
}

#[test]
fn test_payload_numeric_dates() {
    let claims = json!({ "exp": 1112474220.75, "nbf": 1112474220, "iat": -1 });

    let payload = JWTPayload::from_claims(claims.as_object().unwrap()).unwrap();

    assert_eq!(Some(get_dummy_date()), payload.expires_at);
    assert_eq!(Some(get_dummy_date()), payload.invalid_before);
    assert_eq!(
        r#"{"exp":1112474220,"iat":-1,"nbf":1112474220}"#,
        payload.to_json(false).unwrap()
    );
}

#[test]
fn test_payload_rejects_mistyped_claims() {
    for claims in [
        json!({ "iat": "invalid" }),
        json!({ "exp": true }),
        json!({ "nbf": 1e300 }),
        json!({ "sub": 1 }),
        json!({ "iss": null }),
        json!({ "jti": ["id"] }),
        json!({ "aud": 1 }),
        json!({ "aud": ["ok", 2] }),
    ] {
        let result = JWTPayload::from_claims(claims.as_object().unwrap());
        assert!(
            matches!(result, Err(TokenError::ClaimEncoding(_))),
            "{claims}"
        );
    }
}

#[test]
fn test_payload_audience_forms() {
    let single = JWTPayload::from_claims(json!({ "aud": "one" }).as_object().unwrap()).unwrap();
    assert_eq!(["one".to_owned()], single.audience());
    assert_eq!(r#"{"aud":["one"]}"#, single.to_json(false).unwrap());
    assert_eq!(r#"{"aud":"one"}"#, single.to_json(true).unwrap());

    let many =
        JWTPayload::from_claims(json!({ "aud": ["one", "two"] }).as_object().unwrap()).unwrap();
    assert_eq!(r#"{"aud":["one","two"]}"#, many.to_json(true).unwrap());

    let empty = JWTPayload::from_claims(json!({ "aud": [] }).as_object().unwrap()).unwrap();
    assert_eq!(r#"{"aud":[]}"#, empty.to_json(true).unwrap());
    assert!(empty.audience().is_empty());
}

#[test]
fn test_header_overrides_alg_and_kid() {
    let headers = json!({
        "alg": "none",
        "kid": "attacker",
        "typ": "at+jwt",
        "cty": "example",
        "x5c": ["MIIB"],
        "jwk": { "kty": "EC" },
        "custom": 1,
    });

    let header =
        JWTHeader::from_headers("ES256".to_owned(), Some("key-1".to_owned()), headers.as_object().unwrap())
            .unwrap();

    assert_eq!("ES256", header.algorithm);
    assert_eq!(Some("key-1".to_owned()), header.key_id);
    assert_eq!(Some("at+jwt".to_owned()), header.signature_type);
    assert_eq!(4, header.custom.len());
    assert!(!header.custom.contains_key("alg"));
}

#[test]
fn test_header_defaults_typ() {
    let header = JWTHeader::from_headers("RS256".to_owned(), None, &Map::new()).unwrap();

    assert_eq!(Some("JWT".to_owned()), header.signature_type);
    assert_eq!(
        r#"{"alg":"RS256","typ":"JWT"}"#,
        serde_json::to_string(&header).unwrap()
    );
}

#[test]
fn test_header_rejects_mistyped_members() {
    for headers in [
        json!({ "typ": 1 }),
        json!({ "cty": false }),
        json!({ "x5t#S256": [] }),
        json!({ "crit": "exp" }),
        json!({ "x5c": [1] }),
        json!({ "jwk": "key" }),
    ] {
        let result = JWTHeader::from_headers("ES256".to_owned(), None, headers.as_object().unwrap());
        assert!(
            matches!(result, Err(TokenError::HeaderEncoding(_))),
            "{headers}"
        );
    }
}
