//! Security utilities: API key storage

pub mod keyring;

pub use keyring::{delete_api_key, get_api_key, has_api_key, set_api_key};
