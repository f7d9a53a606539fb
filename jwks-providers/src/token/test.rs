use std::{collections::HashMap, sync::Arc, thread};

use jwks_crypto::{
    imp::{hasher::sha256::SHA256, signer::jws_signers, CryptoProviderImpl},
    EllipticCurve, KeyMaterial,
};
use serde_json::{json, Value};

use super::{
    error::TokenError, jwt::Jwt, thumbprint, ClaimSet, ProtectedHeaderSet, TokenService,
    TokenServiceImpl,
};
use crate::{
    common_models::{JwkKey, JwkRsaData, KeyConfig, KeyOperation},
    key_algorithm::{
        error::KeyAlgorithmError,
        imp::{provider::KeyAlgorithmProviderImpl, supported_key_algorithms},
        model::SignatureAlgorithm,
    },
    key_storage::imp::internal::decode_private_key,
};

pub(crate) fn crypto_provider() -> Arc<CryptoProviderImpl> {
    Arc::new(CryptoProviderImpl::new(
        HashMap::from_iter([("sha-256".to_string(), Arc::new(SHA256 {}) as _)]),
        jws_signers(),
    ))
}

pub(crate) fn key_algorithm_provider() -> KeyAlgorithmProviderImpl {
    KeyAlgorithmProviderImpl::new(supported_key_algorithms(), crypto_provider())
}

fn config(algorithm: SignatureAlgorithm) -> KeyConfig {
    KeyConfig {
        algorithm,
        ..Default::default()
    }
}

fn service(key: KeyMaterial, config: &KeyConfig) -> TokenServiceImpl {
    TokenServiceImpl::from_private_key(
        key,
        config,
        &key_algorithm_provider(),
        crypto_provider().as_ref(),
    )
    .unwrap()
}

fn ec_service(flatten_audience: bool) -> TokenServiceImpl {
    let config = KeyConfig {
        flatten_audience,
        ..config(SignatureAlgorithm::Es256)
    };
    service(KeyMaterial::generate_ec(EllipticCurve::P256), &config)
}

fn object(value: Value) -> ClaimSet {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected a JSON object"),
    }
}

fn no_headers() -> ProtectedHeaderSet {
    ProtectedHeaderSet::new()
}

const PRIVATE_MEMBERS: [&str; 6] = ["d", "p", "q", "dp", "dq", "qi"];

#[test]
fn test_key_set_is_public_and_stable() {
    let rsa = service(
        KeyMaterial::generate_rsa(2048).unwrap(),
        &config(SignatureAlgorithm::Rs256),
    );
    let ec = ec_service(false);

    for service in [&rsa as &dyn TokenService, &ec] {
        let first = service.key_set().unwrap();
        let second = service.key_set().unwrap();

        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
        assert_eq!(1, first.keys.len());

        let key = &first.keys[0];
        assert!(!key.is_private());
        assert!(key.kid.as_ref().is_some_and(|kid| !kid.is_empty()));
        assert_eq!(service.private_jwk().kid, key.kid);

        let json = serde_json::to_value(key).unwrap();
        for member in ["kty", "use", "alg", "kid"] {
            assert!(json.get(member).is_some(), "missing {member}");
        }
        for member in PRIVATE_MEMBERS {
            assert!(json.get(member).is_none(), "leaked {member}");
        }
    }
}

#[test]
fn test_key_set_json_shape() {
    let service = ec_service(false);

    let json = serde_json::to_value(service.key_set().unwrap()).unwrap();
    let key = &json["keys"][0];

    assert_eq!("EC", key["kty"]);
    assert_eq!("P-256", key["crv"]);
    assert_eq!("sig", key["use"]);
    assert_eq!("ES256", key["alg"]);
    assert_eq!(43, key["x"].as_str().unwrap().len());
    assert_eq!(43, key["y"].as_str().unwrap().len());
    assert!(key.get("key_ops").is_none());
}

#[test]
fn test_private_jwk_contains_private_members() {
    let service = service(
        KeyMaterial::generate_rsa(2048).unwrap(),
        &config(SignatureAlgorithm::Ps256),
    );

    let jwk = service.private_jwk();
    assert!(jwk.is_private());

    let json = serde_json::to_value(&jwk).unwrap();
    assert_eq!("RSA", json["kty"]);
    for member in PRIVATE_MEMBERS {
        assert!(json.get(member).is_some(), "missing {member}");
    }
    assert_eq!(jwk.to_public(), service.key_set().unwrap().keys[0]);
}

#[test]
fn test_key_ops_from_config() {
    let config = KeyConfig {
        key_ops: vec![KeyOperation::Sign, KeyOperation::Verify],
        ..config(SignatureAlgorithm::Es384)
    };
    let service = service(KeyMaterial::generate_ec(EllipticCurve::P384), &config);

    let json = serde_json::to_value(service.key_set().unwrap()).unwrap();

    assert_eq!(json!(["sign", "verify"]), json["keys"][0]["key_ops"]);
}

#[test]
fn test_thumbprint_matches_rfc7638_example() {
    let key = JwkKey::Rsa(JwkRsaData {
        n: "0vx7agoebGcQSuuPiLJXZptN9nndrQmbXEps2aiAFbWhM78LhWx4cbbfAAtVT86zwu1RK7aPFFxuhDR1L6tSoc_BJECPebWKRXjBZCiFV4n3oknjhMstn64tZ_2W-5JsGY4Hc5n9yBXArwl93lqt7_RN5w6Cf0h4QyQ5v-65YGjQR0_FDW2QvzqY368QQMicAtaSqzs8KJZgnYb9c7d0zgdAZHzu6qMQvRL5hajrn1n91CbOpbISD08qNLyrdkt-bFTWhAI4vMQFh6WeZu0fM4lFd2NcRwr3XPksINHaQ-G_xBniIqbw0Ls1jF44-csFCur-kEgU8awapJzKnqDKgw".to_string(),
        e: "AQAB".to_string(),
        d: None,
        p: None,
        q: None,
        dp: None,
        dq: None,
        qi: None,
    });

    assert_eq!(
        "NzbLsXh8uDCcd-6MNwXF4W_7noWXFZAfHkxZsRGC9Xs",
        thumbprint(&key, &SHA256 {}).unwrap()
    );
}

#[test]
fn test_kid_depends_only_on_key() {
    let pkcs1 = include_bytes!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/test-data/rsa2048_pkcs1.pem"
    ));
    let pkcs8 = include_bytes!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/test-data/rsa2048_pkcs8.pem"
    ));

    let first = service(
        decode_private_key(pkcs1).unwrap(),
        &config(SignatureAlgorithm::Rs256),
    );
    let second = service(
        decode_private_key(pkcs8).unwrap(),
        &config(SignatureAlgorithm::Ps512),
    );

    assert_eq!(first.private_jwk().kid, second.private_jwk().kid);
}

#[test]
fn test_from_private_key_wrong_key_type() {
    let result = TokenServiceImpl::from_private_key(
        KeyMaterial::generate_ec(EllipticCurve::P256),
        &config(SignatureAlgorithm::Es512),
        &key_algorithm_provider(),
        crypto_provider().as_ref(),
    );

    assert_eq!(
        TokenError::KeyAlgorithm(KeyAlgorithmError::WrongKeyType(
            "expected ES512 curve".to_string()
        )),
        result.err().unwrap()
    );
}

#[test]
fn test_from_private_key_unsupported_algorithm() {
    let result = TokenServiceImpl::from_private_key(
        KeyMaterial::generate_ec(EllipticCurve::P256),
        &config(SignatureAlgorithm::Hs256),
        &key_algorithm_provider(),
        crypto_provider().as_ref(),
    );

    assert!(matches!(
        result,
        Err(TokenError::KeyAlgorithm(
            KeyAlgorithmError::UnsupportedAlgorithm(_)
        ))
    ));
}

#[test]
fn test_sign_and_verify_every_algorithm() {
    let provider = key_algorithm_provider();
    let rsa = KeyMaterial::generate_rsa(2048).unwrap();

    for algorithm in supported_key_algorithms().into_keys() {
        let key = match curve_of(algorithm) {
            Some(curve) => KeyMaterial::generate_ec(curve),
            None => rsa.clone(),
        };
        let service = service(key, &config(algorithm));

        let token = service
            .sign_token(&object(json!({ "sub": "john.doe" })), &no_headers())
            .unwrap();
        assert_eq!(3, token.split('.').count());

        let decomposed = Jwt::decompose(&token).unwrap();
        decomposed
            .verify(&service.key_set().unwrap().keys[0], &provider)
            .unwrap();

        assert_eq!(Some("john.doe".to_owned()), decomposed.payload.subject);
        assert_eq!(algorithm.to_string(), decomposed.header.algorithm);
        assert_eq!(service.private_jwk().kid, decomposed.header.key_id);
        assert_eq!(Some("JWT".to_owned()), decomposed.header.signature_type);
    }
}

fn curve_of(algorithm: SignatureAlgorithm) -> Option<EllipticCurve> {
    crate::key_algorithm::curve_for(algorithm).ok()
}

#[test]
fn test_sign_rejects_invalid_time_claim() {
    let service = ec_service(false);

    let result = service.sign_token(&object(json!({ "iat": "invalid" })), &no_headers());

    assert!(matches!(result, Err(TokenError::ClaimEncoding(_))));
}

#[test]
fn test_sign_rejects_invalid_header() {
    let service = ec_service(false);

    let result = service.sign_token(
        &object(json!({ "sub": "john.doe" })),
        &object(json!({ "crit": "exp" })),
    );

    assert!(matches!(result, Err(TokenError::HeaderEncoding(_))));
}

#[test]
fn test_sign_merges_headers() {
    let service = ec_service(false);

    let token = service
        .sign_token(
            &object(json!({ "sub": "john.doe" })),
            &object(json!({ "alg": "none", "kid": "other", "cty": "example" })),
        )
        .unwrap();
    let header = Jwt::decompose(&token).unwrap().header;

    assert_eq!("ES256", header.algorithm);
    assert_eq!(service.private_jwk().kid, header.key_id);
    assert_eq!(json!("example"), header.custom["cty"]);
}

#[test]
fn test_flatten_single_audience() {
    let service = ec_service(true);

    let token = service
        .sign_token(
            &object(json!({ "aud": ["single-audience"] })),
            &no_headers(),
        )
        .unwrap();
    let decomposed = Jwt::decompose(&token).unwrap();

    let payload: Value = serde_json::from_str(&decomposed.payload_json).unwrap();
    assert_eq!(json!("single-audience"), payload["aud"]);
    assert_eq!(
        ["single-audience".to_owned()],
        decomposed.payload.audience()
    );
}

#[test]
fn test_audience_stays_array_without_flattening() {
    let service = ec_service(false);

    let token = service
        .sign_token(
            &object(json!({ "aud": ["single-audience"] })),
            &no_headers(),
        )
        .unwrap();
    let decomposed = Jwt::decompose(&token).unwrap();

    let payload: Value = serde_json::from_str(&decomposed.payload_json).unwrap();
    assert_eq!(json!(["single-audience"]), payload["aud"]);
}

#[test]
fn test_flatten_ignores_multiple_audiences() {
    let service = ec_service(true);

    let token = service
        .sign_token(&object(json!({ "aud": ["a", "b"] })), &no_headers())
        .unwrap();
    let decomposed = Jwt::decompose(&token).unwrap();

    let payload: Value = serde_json::from_str(&decomposed.payload_json).unwrap();
    assert_eq!(json!(["a", "b"]), payload["aud"]);
}

#[test]
fn test_concurrent_signing() {
    let service = Arc::new(ec_service(false));
    let provider = key_algorithm_provider();
    let jwk = service.key_set().unwrap().keys.remove(0);

    let tokens: Vec<String> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|index| {
                let service = service.clone();
                scope.spawn(move || {
                    service
                        .sign_token(&object(json!({ "jti": index.to_string() })), &no_headers())
                        .unwrap()
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    for (index, token) in tokens.iter().enumerate() {
        let decomposed = Jwt::decompose(token).unwrap();
        decomposed.verify(&jwk, &provider).unwrap();
        assert_eq!(Some(index.to_string()), decomposed.payload.jwt_id);
    }
}
