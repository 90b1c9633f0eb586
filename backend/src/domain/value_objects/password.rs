use std::fmt;

pub const MAX_PASSWORD_LEN: usize = 128;

/// Plain-text password as received from a client. Lives only for the
/// duration of a request.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn new(password: String) -> Result<Self, String> {
        if password.trim().is_empty() {
            return Err("Password cannot be empty".to_string());
        }
        if password.len() > MAX_PASSWORD_LEN {
            return Err("Password too long".to_string());
        }
        Ok(Self(password))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_debug_is_redacted() {
        let password = Password::new("123456".to_string()).unwrap();
        assert_eq!(format!("{:?}", password), "Password(<redacted>)");
        assert_eq!(password.expose(), "123456");
    }

    #[test]
    fn test_password_rejects_blank() {
        assert!(Password::new(String::new()).is_err());
        assert!(Password::new("   ".to_string()).is_err());
        assert!(Password::new("x".repeat(MAX_PASSWORD_LEN + 1)).is_err());
    }
}
