//! ECDSA (`ES*`) signatures in the fixed-width `r || s` encoding JWS requires.

use p256::ecdsa::signature::{Signer as _, Verifier as _};

use crate::{
    EcKeyMaterial, EcPublicKeyMaterial, EllipticCurve, KeyMaterial, PublicKeyMaterial, Signer,
    SignerError,
};

pub struct ECDSASigner {
    curve: EllipticCurve,
}

impl ECDSASigner {
    pub fn new(curve: EllipticCurve) -> Self {
        Self { curve }
    }

    fn key_mismatch(&self) -> SignerError {
        SignerError::KeyMismatch {
            expected: format!("ECDSA {}", self.curve),
        }
    }
}

impl Signer for ECDSASigner {
    fn sign(&self, input: &[u8], key: &KeyMaterial) -> Result<Vec<u8>, SignerError> {
        let key = match key {
            KeyMaterial::Ec(key) if key.curve() == self.curve => key,
            _ => return Err(self.key_mismatch()),
        };

        let could_not_sign = |err: p256::ecdsa::Error| SignerError::CouldNotSign(err.to_string());

        match key {
            EcKeyMaterial::P256(secret_key) => {
                let signature: p256::ecdsa::Signature = p256::ecdsa::SigningKey::from(secret_key)
                    .try_sign(input)
                    .map_err(could_not_sign)?;
                Ok(signature.to_bytes().to_vec())
            }
            EcKeyMaterial::P384(secret_key) => {
                let signature: p384::ecdsa::Signature = p384::ecdsa::SigningKey::from(secret_key)
                    .try_sign(input)
                    .map_err(could_not_sign)?;
                Ok(signature.to_bytes().to_vec())
            }
            EcKeyMaterial::P521(secret_key) => {
                let signing_key = p521::ecdsa::SigningKey::from_bytes(&secret_key.to_bytes())
                    .map_err(could_not_sign)?;
                let signature: p521::ecdsa::Signature =
                    signing_key.try_sign(input).map_err(could_not_sign)?;
                Ok(signature.to_bytes().to_vec())
            }
        }
    }

    fn verify(
        &self,
        input: &[u8],
        signature: &[u8],
        public_key: &PublicKeyMaterial,
    ) -> Result<(), SignerError> {
        let public_key = match public_key {
            PublicKeyMaterial::Ec(key) if key.curve() == self.curve => key,
            _ => return Err(self.key_mismatch()),
        };

        let could_not_verify =
            |err: p256::ecdsa::Error| SignerError::CouldNotVerify(format!("couldn't verify: {err}"));

        match public_key {
            EcPublicKeyMaterial::P256(key) => {
                let signature = p256::ecdsa::Signature::from_slice(signature)
                    .map_err(|_| SignerError::InvalidSignature)?;
                p256::ecdsa::VerifyingKey::from(key)
                    .verify(input, &signature)
                    .map_err(could_not_verify)
            }
            EcPublicKeyMaterial::P384(key) => {
                let signature = p384::ecdsa::Signature::from_slice(signature)
                    .map_err(|_| SignerError::InvalidSignature)?;
                p384::ecdsa::VerifyingKey::from(key)
                    .verify(input, &signature)
                    .map_err(could_not_verify)
            }
            EcPublicKeyMaterial::P521(key) => {
                let signature = p521::ecdsa::Signature::from_slice(signature)
                    .map_err(|_| SignerError::InvalidSignature)?;
                p521::ecdsa::VerifyingKey::from_sec1_bytes(&key.to_sec1_bytes())
                    .map_err(|err| SignerError::CouldNotExtractPublicKey(err.to_string()))?
                    .verify(input, &signature)
                    .map_err(could_not_verify)
            }
        }
    }
}
