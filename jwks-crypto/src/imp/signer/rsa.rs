//! RSASSA-PKCS1-v1_5 (`RS*`) and RSASSA-PSS (`PS*`) signatures.

use rand::rngs::OsRng;
use rsa::{
    pkcs1v15, pss,
    sha2::{Sha256, Sha384, Sha512},
    signature::{RandomizedSigner, SignatureEncoding, Signer as _, Verifier},
    RsaPrivateKey, RsaPublicKey,
};

use crate::{KeyMaterial, PublicKeyMaterial, Signer, SignerError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RsaPadding {
    Pkcs1v15,
    /// Salt length equals the digest length.
    Pss,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShaVariant {
    Sha256,
    Sha384,
    Sha512,
}

pub struct RSASigner {
    padding: RsaPadding,
    digest: ShaVariant,
}

impl RSASigner {
    pub fn new(padding: RsaPadding, digest: ShaVariant) -> Self {
        Self { padding, digest }
    }

    fn private_key(key: &KeyMaterial) -> Result<RsaPrivateKey, SignerError> {
        match key {
            KeyMaterial::Rsa(key) => Ok(key.as_ref().clone()),
            KeyMaterial::Ec(_) => Err(SignerError::KeyMismatch {
                expected: "RSA".to_string(),
            }),
        }
    }

    fn public_key(key: &PublicKeyMaterial) -> Result<RsaPublicKey, SignerError> {
        match key {
            PublicKeyMaterial::Rsa(key) => Ok(key.clone()),
            PublicKeyMaterial::Ec(_) => Err(SignerError::KeyMismatch {
                expected: "RSA".to_string(),
            }),
        }
    }
}

impl Signer for RSASigner {
    fn sign(&self, input: &[u8], key: &KeyMaterial) -> Result<Vec<u8>, SignerError> {
        let key = Self::private_key(key)?;

        let signature = match (self.padding, self.digest) {
            (RsaPadding::Pkcs1v15, ShaVariant::Sha256) => pkcs1v15::SigningKey::<Sha256>::new(key)
                .try_sign(input)
                .map(|signature| signature.to_vec()),
            (RsaPadding::Pkcs1v15, ShaVariant::Sha384) => pkcs1v15::SigningKey::<Sha384>::new(key)
                .try_sign(input)
                .map(|signature| signature.to_vec()),
            (RsaPadding::Pkcs1v15, ShaVariant::Sha512) => pkcs1v15::SigningKey::<Sha512>::new(key)
                .try_sign(input)
                .map(|signature| signature.to_vec()),
            (RsaPadding::Pss, ShaVariant::Sha256) => pss::BlindedSigningKey::<Sha256>::new(key)
                .try_sign_with_rng(&mut OsRng, input)
                .map(|signature| signature.to_vec()),
            (RsaPadding::Pss, ShaVariant::Sha384) => pss::BlindedSigningKey::<Sha384>::new(key)
                .try_sign_with_rng(&mut OsRng, input)
                .map(|signature| signature.to_vec()),
            (RsaPadding::Pss, ShaVariant::Sha512) => pss::BlindedSigningKey::<Sha512>::new(key)
                .try_sign_with_rng(&mut OsRng, input)
                .map(|signature| signature.to_vec()),
        };

        signature.map_err(|err| SignerError::CouldNotSign(err.to_string()))
    }

    fn verify(
        &self,
        input: &[u8],
        signature: &[u8],
        public_key: &PublicKeyMaterial,
    ) -> Result<(), SignerError> {
        let key = Self::public_key(public_key)?;

        let result = match self.padding {
            RsaPadding::Pkcs1v15 => {
                let signature = pkcs1v15::Signature::try_from(signature)
                    .map_err(|_| SignerError::InvalidSignature)?;
                match self.digest {
                    ShaVariant::Sha256 => {
                        pkcs1v15::VerifyingKey::<Sha256>::new(key).verify(input, &signature)
                    }
                    ShaVariant::Sha384 => {
                        pkcs1v15::VerifyingKey::<Sha384>::new(key).verify(input, &signature)
                    }
                    ShaVariant::Sha512 => {
                        pkcs1v15::VerifyingKey::<Sha512>::new(key).verify(input, &signature)
                    }
                }
            }
            RsaPadding::Pss => {
                let signature =
                    pss::Signature::try_from(signature).map_err(|_| SignerError::InvalidSignature)?;
                match self.digest {
                    ShaVariant::Sha256 => {
                        pss::VerifyingKey::<Sha256>::new(key).verify(input, &signature)
                    }
                    ShaVariant::Sha384 => {
                        pss::VerifyingKey::<Sha384>::new(key).verify(input, &signature)
                    }
                    ShaVariant::Sha512 => {
                        pss::VerifyingKey::<Sha512>::new(key).verify(input, &signature)
                    }
                }
            }
        };

        result.map_err(|err| SignerError::CouldNotVerify(format!("couldn't verify: {err}")))
    }
}
