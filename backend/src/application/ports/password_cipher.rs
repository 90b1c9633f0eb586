// Driven port - reversible password encryption

use thiserror::Error;

use crate::domain::EncryptedPassword;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("encryption failed")]
    Encrypt,

    #[error("decryption failed: {0}")]
    Decrypt(String),
}

#[cfg_attr(test, mockall::automock)]
pub trait PasswordCipher: Send + Sync {
    /// Seals `plain` under a fresh random IV.
    fn encrypt(&self, plain: &str) -> Result<EncryptedPassword, CryptoError>;

    fn decrypt(&self, stored: &EncryptedPassword) -> Result<String, CryptoError>;

    /// Opens a legacy `base64(iv || ciphertext)` value.
    fn decrypt_combined(&self, stored: &str) -> Result<String, CryptoError>;

    /// Checks a candidate password against a stored one.
    ///
    /// Legacy rows that fail to decode are compared as plain text. A modern
    /// row that fails to decrypt never matches.
    fn matches(&self, candidate: &str, stored: &EncryptedPassword) -> bool {
        if stored.is_legacy() {
            return match self.decrypt_combined(stored.cipher_text()) {
                Ok(plain) => constant_time_eq(candidate.as_bytes(), plain.as_bytes()),
                Err(_) => constant_time_eq(candidate.as_bytes(), stored.cipher_text().as_bytes()),
            };
        }

        match self.decrypt(stored) {
            Ok(plain) => constant_time_eq(candidate.as_bytes(), plain.as_bytes()),
            Err(e) => {
                tracing::warn!(error = %e, "stored password could not be decrypted");
                false
            }
        }
    }
}

/// Constant-time comparison to prevent timing attacks.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Cipher that only knows how to fail, so `matches` takes its fallbacks.
    struct BrokenCipher;

    impl PasswordCipher for BrokenCipher {
        fn encrypt(&self, _plain: &str) -> Result<EncryptedPassword, CryptoError> {
            Err(CryptoError::Encrypt)
        }

        fn decrypt(&self, _stored: &EncryptedPassword) -> Result<String, CryptoError> {
            Err(CryptoError::Decrypt("tag mismatch".to_string()))
        }

        fn decrypt_combined(&self, _stored: &str) -> Result<String, CryptoError> {
            Err(CryptoError::Decrypt("not base64".to_string()))
        }
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"123456", b"123456"));
        assert!(!constant_time_eq(b"123456", b"123457"));
        assert!(!constant_time_eq(b"123456", b"12345"));
    }

    #[test]
    fn test_legacy_plain_text_fallback() {
        let stored = EncryptedPassword::legacy("admin".to_string());
        assert!(BrokenCipher.matches("admin", &stored));
        assert!(!BrokenCipher.matches("Admin", &stored));
    }

    #[test]
    fn test_modern_row_that_fails_to_decrypt_never_matches() {
        let stored = EncryptedPassword::new("admin".to_string(), "AAAAAAAAAAAAAAAA".to_string());
        assert!(!BrokenCipher.matches("admin", &stored));
    }
}
