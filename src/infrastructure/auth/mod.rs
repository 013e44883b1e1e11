//! Authentication infrastructure - hashing, token codec and the auth service

pub mod password;
pub mod service;
pub mod token;

pub use password::{Argon2Hasher, PasswordHasher};
pub use service::{AuthService, TokenPair};
pub use token::{AccessClaims, RefreshClaims, TokenClass, TokenCodec, VerifiedClaims};
