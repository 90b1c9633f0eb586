pub mod user_id;
pub mod email;
pub mod password;
pub mod encrypted_password;

pub use user_id::UserId;
pub use email::Email;
pub use password::Password;
pub use encrypted_password::EncryptedPassword;
