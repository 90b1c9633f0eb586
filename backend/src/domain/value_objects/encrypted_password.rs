/// Password as stored: base64 cipher text plus the base64 IV it was sealed
/// with. An empty `iv` marks a legacy row, where `cipher_text` is either
/// `base64(iv || ciphertext)` or the password in plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedPassword {
    cipher_text: String,
    iv: String,
}

impl EncryptedPassword {
    pub fn new(cipher_text: String, iv: String) -> Self {
        Self { cipher_text, iv }
    }

    pub fn legacy(stored: String) -> Self {
        Self {
            cipher_text: stored,
            iv: String::new(),
        }
    }

    pub fn cipher_text(&self) -> &str {
        &self.cipher_text
    }

    pub fn iv(&self) -> &str {
        &self.iv
    }

    pub fn is_legacy(&self) -> bool {
        self.iv.is_empty()
    }
}
