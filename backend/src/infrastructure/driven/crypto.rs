//! AES-GCM password sealing.
//!
//! 96-bit random IV per value, 128-bit tag. The key size picks the AES
//! variant, so existing deployments keep whatever key length they started
//! with.

use aes_gcm::aead::consts::U12;
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::aes::Aes192;
use aes_gcm::{Aes128Gcm, Aes256Gcm, AesGcm, Nonce};
use base64::{engine::general_purpose::STANDARD, Engine};
use rand::{rngs::OsRng, RngCore};

use crate::application::ports::{CryptoError, PasswordCipher};
use crate::domain::EncryptedPassword;

pub const IV_LENGTH: usize = 12;

type Aes192Gcm = AesGcm<Aes192, U12>;

enum Variant {
    Aes128(Aes128Gcm),
    Aes192(Aes192Gcm),
    Aes256(Aes256Gcm),
}

impl Variant {
    fn from_key(key: &[u8]) -> Result<Self, CryptoError> {
        let invalid = |_| CryptoError::InvalidKey("invalid key length".to_string());
        match key.len() {
            16 => Ok(Self::Aes128(Aes128Gcm::new_from_slice(key).map_err(invalid)?)),
            24 => Ok(Self::Aes192(Aes192Gcm::new_from_slice(key).map_err(invalid)?)),
            32 => Ok(Self::Aes256(Aes256Gcm::new_from_slice(key).map_err(invalid)?)),
            n => Err(CryptoError::InvalidKey(format!(
                "AES key must be 16, 24 or 32 bytes, got {}",
                n
            ))),
        }
    }

    fn seal(&self, iv: &[u8; IV_LENGTH], plain: &[u8]) -> Result<Vec<u8>, aes_gcm::Error> {
        let nonce = Nonce::from_slice(iv);
        match self {
            Self::Aes128(c) => c.encrypt(nonce, plain),
            Self::Aes192(c) => c.encrypt(nonce, plain),
            Self::Aes256(c) => c.encrypt(nonce, plain),
        }
    }

    fn open(&self, iv: &[u8], sealed: &[u8]) -> Result<Vec<u8>, CryptoError> {
        if iv.len() != IV_LENGTH {
            return Err(CryptoError::Decrypt(format!("IV must be {} bytes", IV_LENGTH)));
        }
        let nonce = Nonce::from_slice(iv);
        let opened = match self {
            Self::Aes128(c) => c.decrypt(nonce, sealed),
            Self::Aes192(c) => c.decrypt(nonce, sealed),
            Self::Aes256(c) => c.decrypt(nonce, sealed),
        };
        opened.map_err(|_| CryptoError::Decrypt("authentication tag mismatch".to_string()))
    }
}

pub struct AesGcmCipher {
    variant: Variant,
}

impl AesGcmCipher {
    pub fn new(key: &[u8]) -> Result<Self, CryptoError> {
        Ok(Self {
            variant: Variant::from_key(key)?,
        })
    }

    pub fn from_base64_key(encoded: &str) -> Result<Self, CryptoError> {
        let key = STANDARD
            .decode(encoded.trim())
            .map_err(|e| CryptoError::InvalidKey(format!("key is not valid base64: {}", e)))?;
        Self::new(&key)
    }

    fn utf8(bytes: Vec<u8>) -> Result<String, CryptoError> {
        String::from_utf8(bytes).map_err(|_| CryptoError::Decrypt("plain text is not UTF-8".to_string()))
    }
}

impl PasswordCipher for AesGcmCipher {
    fn encrypt(&self, plain: &str) -> Result<EncryptedPassword, CryptoError> {
        let mut iv = [0u8; IV_LENGTH];
        OsRng.fill_bytes(&mut iv);

        let sealed = self
            .variant
            .seal(&iv, plain.as_bytes())
            .map_err(|_| CryptoError::Encrypt)?;

        Ok(EncryptedPassword::new(STANDARD.encode(sealed), STANDARD.encode(iv)))
    }

    fn decrypt(&self, stored: &EncryptedPassword) -> Result<String, CryptoError> {
        let iv = STANDARD
            .decode(stored.iv())
            .map_err(|e| CryptoError::Decrypt(format!("IV is not valid base64: {}", e)))?;
        let sealed = STANDARD
            .decode(stored.cipher_text())
            .map_err(|e| CryptoError::Decrypt(format!("cipher text is not valid base64: {}", e)))?;

        Self::utf8(self.variant.open(&iv, &sealed)?)
    }

    fn decrypt_combined(&self, stored: &str) -> Result<String, CryptoError> {
        let message = STANDARD
            .decode(stored)
            .map_err(|e| CryptoError::Decrypt(format!("not valid base64: {}", e)))?;
        if message.len() <= IV_LENGTH {
            return Err(CryptoError::Decrypt("message shorter than IV".to_string()));
        }

        let (iv, sealed) = message.split_at(IV_LENGTH);
        Self::utf8(self.variant.open(iv, sealed)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // "AESDemoSecretKey"
    const DEMO_KEY: &str = "QUVTRGVtb1NlY3JldEtleQ==";

    fn cipher() -> AesGcmCipher {
        AesGcmCipher::from_base64_key(DEMO_KEY).unwrap()
    }

    /// Builds a legacy `base64(iv || ciphertext)` value.
    fn combined(cipher: &AesGcmCipher, plain: &str) -> String {
        let sealed = cipher.encrypt(plain).unwrap();
        let mut message = STANDARD.decode(sealed.iv()).unwrap();
        message.extend(STANDARD.decode(sealed.cipher_text()).unwrap());
        STANDARD.encode(message)
    }

    #[test]
    fn test_accepts_all_aes_key_sizes() {
        for len in [16usize, 24, 32] {
            let key = vec![7u8; len];
            let cipher = AesGcmCipher::new(&key).unwrap();
            let sealed = cipher.encrypt("123456").unwrap();
            assert_eq!(cipher.decrypt(&sealed).unwrap(), "123456");
        }
    }

    #[test]
    fn test_rejects_bad_key_sizes() {
        assert!(matches!(AesGcmCipher::new(&[0u8; 20]), Err(CryptoError::InvalidKey(_))));
        assert!(matches!(
            AesGcmCipher::from_base64_key("not base64!"),
            Err(CryptoError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_fresh_iv_per_encryption() {
        let cipher = cipher();
        let a = cipher.encrypt("admin").unwrap();
        let b = cipher.encrypt("admin").unwrap();

        assert_ne!(a.iv(), b.iv());
        assert_ne!(a.cipher_text(), b.cipher_text());
        assert_eq!(STANDARD.decode(a.iv()).unwrap().len(), IV_LENGTH);
    }

    #[test]
    fn test_wrong_key_fails_to_decrypt() {
        let sealed = cipher().encrypt("123456").unwrap();
        let other = AesGcmCipher::new(&[1u8; 16]).unwrap();

        assert!(other.decrypt(&sealed).is_err());
        assert!(!other.matches("123456", &sealed));
    }

    #[test]
    fn test_tampered_cipher_text_is_rejected() {
        let cipher = cipher();
        let sealed = cipher.encrypt("123456").unwrap();
        let mut bytes = STANDARD.decode(sealed.cipher_text()).unwrap();
        bytes[0] ^= 0xff;
        let tampered = EncryptedPassword::new(STANDARD.encode(bytes), sealed.iv().to_string());

        assert!(cipher.decrypt(&tampered).is_err());
    }

    #[test]
    fn test_matches_modern_value() {
        let cipher = cipher();
        let sealed = cipher.encrypt("123456").unwrap();

        assert!(cipher.matches("123456", &sealed));
        assert!(!cipher.matches("1234567", &sealed));
    }

    #[test]
    fn test_matches_legacy_combined_value() {
        let cipher = cipher();
        let stored = EncryptedPassword::legacy(combined(&cipher, "admin"));

        assert_eq!(cipher.decrypt_combined(stored.cipher_text()).unwrap(), "admin");
        assert!(cipher.matches("admin", &stored));
        assert!(!cipher.matches("nimda", &stored));
    }

    #[test]
    fn test_matches_legacy_plain_text_value() {
        let stored = EncryptedPassword::legacy("admin".to_string());
        assert!(cipher().matches("admin", &stored));
        assert!(!cipher().matches("other", &stored));
    }
}
