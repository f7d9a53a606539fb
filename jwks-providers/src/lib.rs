//! Algorithm registry, key acquisition and token signing for the local JWKS server.
//!
//! * [`key_algorithm`] maps JWA algorithms to key families and validates keys
//! * [`key_storage`] generates keys or imports them from PEM
//! * [`token`] publishes the JWK Set and signs claim sets into JWTs
//!
//! Raw key material and signatures come from `jwks-crypto`.

pub mod common_models;
pub mod key_algorithm;
pub mod key_storage;
pub mod token;
