//! Credential and session token adapters.

mod argon2_hasher;
mod token_codec;

pub use argon2_hasher::Argon2PasswordHasher;
pub use token_codec::HmacSessionTokenCodec;
