pub mod error;
pub mod key_service;
