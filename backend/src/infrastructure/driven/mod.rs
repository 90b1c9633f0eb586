pub mod crypto;
pub mod persistence;

pub use crypto::AesGcmCipher;
pub use persistence::*;
