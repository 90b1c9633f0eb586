use chrono::{DateTime, Utc};
use crate::domain::value_objects::*;

#[derive(Debug, Clone)]
pub struct User {
    id: UserId,
    email: Email,
    password: EncryptedPassword,
    created_at: DateTime<Utc>,
}

impl User {
    pub fn from_persistence(
        id: UserId,
        email: Email,
        password: EncryptedPassword,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            password,
            created_at,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> &EncryptedPassword {
        &self.password
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A user that has not been assigned an id yet.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: Email,
    pub password: EncryptedPassword,
}
