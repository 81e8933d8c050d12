//! `SQLite` implementation of [`Repository<FoodType>`].

use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use foodhub_app::ports::Repository;
use foodhub_domain::error::FoodHubError;
use foodhub_domain::food_type::FoodType;
use foodhub_domain::id::FoodTypeId;

use crate::error::{StorageError, expect_row};

/// Wrapper for converting database rows into domain [`FoodType`].
struct Wrapper(FoodType);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<FoodType> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let name: String = row.try_get("name")?;

        let id = FoodTypeId::from_str(&id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(FoodType { id, name }))
    }
}

const INSERT: &str = "INSERT INTO food_types (id, name) VALUES (?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM food_types WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM food_types ORDER BY rowid";
const UPDATE: &str = "UPDATE food_types SET name = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM food_types WHERE id = ?";

/// `SQLite`-backed food type repository.
pub struct SqliteFoodTypeRepository {
    pool: SqlitePool,
}

impl SqliteFoodTypeRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl Repository<FoodType> for SqliteFoodTypeRepository {
    fn create(
        &self,
        item: FoodType,
    ) -> impl Future<Output = Result<FoodType, FoodHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(item.id.to_string())
                .bind(&item.name)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(item)
        }
    }

    fn get_by_id(
        &self,
        id: FoodTypeId,
    ) -> impl Future<Output = Result<Option<FoodType>, FoodHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<FoodType>, FoodHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update(
        &self,
        item: FoodType,
    ) -> impl Future<Output = Result<FoodType, FoodHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(UPDATE)
                .bind(&item.name)
                .bind(item.id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;
            expect_row::<FoodType>(&result, item.id)?;

            Ok(item)
        }
    }

    fn delete(&self, id: FoodTypeId) -> impl Future<Output = Result<(), FoodHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(DELETE_BY_ID)
                .bind(id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;
            expect_row::<FoodType>(&result, id)?;

            Ok(())
        }
    }
}
