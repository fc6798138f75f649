// Password digest service

use sha2::{Digest, Sha256};

/// Password service for one-way credential digests
pub struct PasswordService;

impl PasswordService {
    /// Hash a password with SHA-256 into 64 lower-case hex characters
    ///
    /// The digest is unsalted and deterministic: logins are checked by
    /// hashing the attempt and matching it against the stored value.
    pub fn hash_password(password: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(password.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}
