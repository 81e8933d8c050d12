//! Storage-specific error type wrapping sqlx errors.

use foodhub_domain::error::{FoodHubError, NotFoundError, ValidationError};
use foodhub_domain::resource::Resource;
use sqlx::sqlite::SqliteQueryResult;

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// Failed to run migrations.
    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<StorageError> for FoodHubError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}

/// Which constraint violation should surface as a field error.
#[derive(Clone, Copy)]
pub(crate) enum Constraint {
    ForeignKey,
    Unique,
}

/// Map a violation of `constraint` to `field_error`, anything else to a
/// storage error.
pub(crate) fn violation_as(
    err: sqlx::Error,
    constraint: Constraint,
    field_error: ValidationError,
) -> FoodHubError {
    let violated = match (&err, constraint) {
        (sqlx::Error::Database(db), Constraint::ForeignKey) => db.is_foreign_key_violation(),
        (sqlx::Error::Database(db), Constraint::Unique) => db.is_unique_violation(),
        _ => false,
    };
    if violated {
        field_error.into()
    } else {
        StorageError::from(err).into()
    }
}

/// Fail with not-found for `T` when the statement touched no row.
pub(crate) fn expect_row<T: Resource>(
    result: &SqliteQueryResult,
    id: T::Id,
) -> Result<(), FoodHubError> {
    if result.rows_affected() == 0 {
        return Err(NotFoundError {
            entity: T::NAME,
            id: id.to_string(),
        }
        .into());
    }
    Ok(())
}
