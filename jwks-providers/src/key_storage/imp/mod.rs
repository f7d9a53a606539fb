//! Implementations of key storage.

pub mod internal;
