//! Argon2id password hashing adapter.
//!
//! Hashes are stored as PHC strings so parameters and salt travel with the
//! digest. Both operations run on the blocking pool.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    PasswordHash as PhcString, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use async_trait::async_trait;
use tokio::task;
use zeroize::Zeroizing;

use crate::domain::ports::{PasswordHasher, PasswordHasherError};
use crate::domain::PasswordHash;

/// PHC string with `Argon2::default()` parameters whose digest belongs to no
/// password.
const DECOY_PHC: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$9k0a3eduwVuxKE9GbfwJZQ$vw5TuJW3FHzimtMmHE7dhANjj/SvVPWnNxTQrYmxfJU";

/// [`PasswordHasher`] backed by Argon2id with the crate's default parameters.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self
    }
}

fn hash_blocking(password: &str) -> Result<PasswordHash, PasswordHasherError> {
    let salt = SaltString::generate(&mut OsRng);
    let phc = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| PasswordHasherError::hash(err.to_string()))?;
    Ok(PasswordHash::new(phc.to_string()))
}

fn verify_blocking(password: &str, hash: &str) -> Result<bool, PasswordHasherError> {
    let parsed =
        PhcString::new(hash).map_err(|err| PasswordHasherError::malformed_hash(err.to_string()))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(err) => Err(PasswordHasherError::malformed_hash(err.to_string())),
    }
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHasherError> {
        let password = Zeroizing::new(password.to_owned());
        task::spawn_blocking(move || hash_blocking(password.as_str()))
            .await
            .map_err(|err| PasswordHasherError::hash(format!("hashing task failed: {err}")))?
    }

    async fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHasherError> {
        let password = Zeroizing::new(password.to_owned());
        let hash = hash.as_str().to_owned();
        task::spawn_blocking(move || verify_blocking(password.as_str(), &hash))
            .await
            .map_err(|err| {
                PasswordHasherError::hash(format!("verification task failed: {err}"))
            })?
    }

    fn decoy_hash(&self) -> PasswordHash {
        PasswordHash::new(DECOY_PHC)
    }
}
