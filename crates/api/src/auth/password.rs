//! Staff password hashing.
//!
//! Passwords are stored as Argon2id PHC strings (`$argon2id$v=19$...`), which
//! carry their own salt and cost parameters. Verification reads the
//! parameters back out of the stored string.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

fn hasher() -> Argon2<'static> {
    Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::default())
}

/// Hash `plaintext` with a fresh random salt.
pub fn hash_password(plaintext: &str) -> Result<String, password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    hasher()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|phc| phc.to_string())
}

/// `Ok(false)` on a wrong password. `Err` means `stored` is not a PHC string.
pub fn verify_password(plaintext: &str, stored: &str) -> Result<bool, password_hash::Error> {
    let stored = PasswordHash::new(stored)?;
    match hasher().verify_password(plaintext.as_bytes(), &stored) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_password_round_trip() {
        let stored = hash_password("password").unwrap();
        assert!(stored.starts_with("$argon2id$v=19$"));
        assert!(verify_password("password", &stored).unwrap());
        assert!(!verify_password("Password", &stored).unwrap());
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        assert_ne!(hash_password("password").unwrap(), hash_password("password").unwrap());
    }

    #[test]
    fn corrupt_stored_hash_is_an_error() {
        assert!(verify_password("password", "plaintext-password").is_err());
    }
}
