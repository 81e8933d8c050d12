//! # foodhub-adapter-auth-jwt
//!
//! Credentials adapter implementing the password and token ports of
//! `foodhub-app`.
//!
//! ## Responsibilities
//! - Hash and verify passwords with bcrypt, off the async executor
//! - Sign and verify HS256 access/refresh tokens with `jsonwebtoken`
//!
//! ## Dependency rule
//! Depends on `foodhub-app` (for port traits) and `foodhub-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod error;
mod password;
mod token;

pub use error::CredentialsError;
pub use password::BcryptHasher;
pub use token::{Claims, JwtConfig, JwtTokenIssuer, TokenKind};
