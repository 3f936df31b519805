//! Credential hashing. bcrypt, cost per library default.

use bcrypt::DEFAULT_COST;

#[derive(Debug, thiserror::Error)]
#[error("password hashing failed: {0}")]
pub struct PasswordError(#[from] bcrypt::BcryptError);

pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    Ok(bcrypt::hash(password, DEFAULT_COST)?)
}

pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
    Ok(bcrypt::verify(password, stored_hash)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        // low cost keeps the test fast; the hash format is identical
        let hash = bcrypt::hash("hunter2", 4).unwrap();
        assert!(verify_password("hunter2", &hash).unwrap());
        assert!(!verify_password("hunter3", &hash).unwrap());
    }

    #[test]
    fn garbage_hash_is_an_error_not_a_match() {
        assert!(verify_password("hunter2", "not-a-bcrypt-hash").is_err());
    }
}
