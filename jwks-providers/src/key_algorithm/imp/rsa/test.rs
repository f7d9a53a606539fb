use super::*;

#[test]
fn test_generate_key_uses_configured_size() {
    let algorithm = Rsa::new(SignatureAlgorithm::Ps384).unwrap();

    let key = algorithm.generate_key(3072).unwrap();

    assert_eq!(Some(3072), key.rsa_bits());
    algorithm.validate_key(&key).unwrap();
}

#[test]
fn test_signer_id_is_jwa_name() {
    let algorithm = Rsa::new(SignatureAlgorithm::Rs512).unwrap();

    assert_eq!("RS512", algorithm.get_signer_algorithm_id());
    assert_eq!(KeyFamily::Rsa, algorithm.family());
}

#[test]
fn test_rejects_non_rsa_algorithm() {
    assert_eq!(
        KeyAlgorithmError::UnsupportedAlgorithm("ES256".to_string()),
        Rsa::new(SignatureAlgorithm::Es256).err().unwrap()
    );
}

#[test]
fn test_validate_rejects_ec_key() {
    let algorithm = Rsa::new(SignatureAlgorithm::Rs256).unwrap();
    let key = KeyMaterial::generate_ec(jwks_crypto::EllipticCurve::P256);

    assert_eq!(
        KeyAlgorithmError::WrongKeyType("expected RSA private key".to_string()),
        algorithm.validate_key(&key).unwrap_err()
    );
}

#[test]
fn test_generate_rejects_tiny_key_size() {
    let algorithm = Rsa::new(SignatureAlgorithm::Rs256).unwrap();

    assert!(matches!(
        algorithm.generate_key(0),
        Err(KeyAlgorithmError::KeyGeneration(_))
    ));
}
