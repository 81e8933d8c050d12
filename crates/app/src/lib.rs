//! # foodhub-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `Repository<T>`: CRUD for any catalogue resource
//!   - `UserRepository`: account storage and lookup by username
//!   - `PasswordHasher`: one-way password hashing
//!   - `TokenIssuer`: access/refresh token issuance and verification
//! - Define **driving/inbound ports** as use-case structs:
//!   - `ResourceService`: the collection (list, create) and detail
//!     (retrieve, update, delete) operations, gated by a permission predicate
//!   - `AuthService`: registration, token issuance, request authentication
//! - Orchestrate domain objects without knowing *how* persistence or IO works
//!
//! ## Dependency rule
//! Depends on `foodhub-domain` and `tokio` sync primitives only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod memory;
