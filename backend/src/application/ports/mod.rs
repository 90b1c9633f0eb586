// Application ports - Driven ports (output ports implemented by infrastructure)

pub mod user_repository;
pub mod password_cipher;

pub use user_repository::{RepositoryError, UserRepository};
pub use password_cipher::{constant_time_eq, CryptoError, PasswordCipher};

#[cfg(test)]
pub use user_repository::MockUserRepository;
#[cfg(test)]
pub use password_cipher::MockPasswordCipher;
