//! # foodhub-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `foodhub-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//! - Turn constraint violations into field validation errors
//!
//! ## Dependency rule
//! Depends on `foodhub-app` (for port traits) and `foodhub-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod comment_repo;
mod error;
mod food_repo;
mod food_type_repo;
mod pool;
mod user_repo;

pub use comment_repo::SqliteCommentRepository;
pub use error::StorageError;
pub use food_repo::SqliteFoodRepository;
pub use food_type_repo::SqliteFoodTypeRepository;
pub use pool::{Config, Database};
pub use user_repo::SqliteUserRepository;
