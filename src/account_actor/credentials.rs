//! Argon2id hashing for passwords and recovery answers.
//!
//! Hashes are PHC strings with the salt and parameters embedded, so verification does not
//! depend on the hasher's current settings.

use super::AccountError;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};

#[derive(Debug, Clone)]
pub struct CredentialHasher {
    params: Params,
}

impl CredentialHasher {
    /// `memory_kib` and `iterations` are the argon2 m and t costs.
    pub fn new(memory_kib: u32, iterations: u32) -> Result<Self, AccountError> {
        let params = Params::new(memory_kib, iterations, Params::DEFAULT_P_COST, None)
            .map_err(|e| AccountError::Hashing(e.to_string()))?;
        Ok(Self { params })
    }

    pub fn hash(&self, secret: &str) -> Result<String, AccountError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone());
        let hash = argon2
            .hash_password(secret.as_bytes(), &salt)
            .map_err(|e| AccountError::Hashing(e.to_string()))?;
        Ok(hash.to_string())
    }
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}

/// False for a wrong secret and for an unparsable or empty hash.
pub fn verify(secret: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(secret.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = CredentialHasher::new(8, 1).unwrap();
        let hash = hasher.hash("customer123").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify("customer123", &hash));
        assert!(!verify("customer124", &hash));

        // Fresh salt every time.
        assert_ne!(hash, hasher.hash("customer123").unwrap());
    }

    #[test]
    fn test_garbage_hash_never_verifies() {
        assert!(!verify("anything", ""));
        assert!(!verify("anything", "plaintext"));
    }

    #[test]
    fn test_rejects_bad_params() {
        assert!(matches!(
            CredentialHasher::new(0, 1),
            Err(AccountError::Hashing(_))
        ));
    }
}
