use serde::{Deserialize, Serialize};
use std::fmt;

/// Matches the width of the `users.email` column.
pub const MAX_EMAIL_LEN: usize = 150;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    pub fn new(email: String) -> Result<Self, String> {
        let email = email.trim().to_lowercase();
        if email.is_empty() {
            return Err("Email cannot be empty".to_string());
        }
        if !email.contains('@') {
            return Err("Invalid email format".to_string());
        }
        // The column limit is in characters, not bytes.
        if email.chars().count() > MAX_EMAIL_LEN {
            return Err("Email too long".to_string());
        }
        Ok(Self(email))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_is_normalized() {
        let email = Email::new("  Alumno@UPT.edu.pe ".to_string()).unwrap();
        assert_eq!(email.as_str(), "alumno@upt.edu.pe");
    }

    #[test]
    fn test_email_rejects_missing_at() {
        assert!(Email::new("2023077282".to_string()).is_err());
        assert!(Email::new("   ".to_string()).is_err());
    }

    #[test]
    fn test_email_rejects_overlong() {
        let local = "a".repeat(MAX_EMAIL_LEN);
        assert!(Email::new(format!("{}@upt.edu.pe", local)).is_err());
    }

    #[test]
    fn test_email_length_counts_characters() {
        let local = "ñ".repeat(MAX_EMAIL_LEN - "@upt.edu.pe".len());
        let email = Email::new(format!("{}@upt.edu.pe", local)).unwrap();
        assert_eq!(email.as_str().chars().count(), MAX_EMAIL_LEN);
        assert!(email.as_str().len() > MAX_EMAIL_LEN);
    }
}
