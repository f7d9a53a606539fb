use std::{collections::HashMap, sync::Arc};

use self::{
    ecdsa::ECDSASigner,
    rsa::{RSASigner, RsaPadding, ShaVariant},
};
use crate::{EllipticCurve, Signer};

pub mod ecdsa;
pub mod rsa;


/// Every JWS signer, keyed by JWA identifier.
pub fn jws_signers() -> HashMap<String, Arc<dyn Signer>> {
    let rsa = [
        ("RS256", RsaPadding::Pkcs1v15, ShaVariant::Sha256),
        ("RS384", RsaPadding::Pkcs1v15, ShaVariant::Sha384),
        ("RS512", RsaPadding::Pkcs1v15, ShaVariant::Sha512),
        ("PS256", RsaPadding::Pss, ShaVariant::Sha256),
        ("PS384", RsaPadding::Pss, ShaVariant::Sha384),
        ("PS512", RsaPadding::Pss, ShaVariant::Sha512),
    ]
    .into_iter()
    .map(|(id, padding, digest)| {
        (
            id.to_string(),
            Arc::new(RSASigner::new(padding, digest)) as Arc<dyn Signer>,
        )
    });

    let ecdsa = [
        ("ES256", EllipticCurve::P256),
        ("ES384", EllipticCurve::P384),
        ("ES512", EllipticCurve::P521),
    ]
    .into_iter()
    .map(|(id, curve)| {
        (
            id.to_string(),
            Arc::new(ECDSASigner::new(curve)) as Arc<dyn Signer>,
        )
    });

    rsa.chain(ecdsa).collect()
}
