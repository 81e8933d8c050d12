//! `SQLite` implementation of [`Repository<Food>`].

use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use foodhub_app::ports::Repository;
use foodhub_domain::error::{FoodHubError, ValidationError};
use foodhub_domain::food::Food;
use foodhub_domain::id::{FoodId, FoodTypeId};

use crate::error::{Constraint, StorageError, expect_row, violation_as};

/// Wrapper for converting database rows into domain [`Food`].
struct Wrapper(Food);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Food> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let description: Option<String> = row.try_get("description")?;
        let price: f64 = row.try_get("price")?;
        let food_type: String = row.try_get("food_type_id")?;

        let id = FoodId::from_str(&id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let food_type =
            FoodTypeId::from_str(&food_type).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Food {
            id,
            name,
            description,
            price,
            food_type,
        }))
    }
}

const INSERT: &str =
    "INSERT INTO foods (id, name, description, price, food_type_id) VALUES (?, ?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM foods WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM foods ORDER BY rowid";
const UPDATE: &str =
    "UPDATE foods SET name = ?, description = ?, price = ?, food_type_id = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM foods WHERE id = ?";

/// `SQLite`-backed food repository.
///
/// A food pointing at a missing food type is rejected by the foreign key and
/// reported as [`ValidationError::UnknownFoodType`].
pub struct SqliteFoodRepository {
    pool: SqlitePool,
}

impl SqliteFoodRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl Repository<Food> for SqliteFoodRepository {
    fn create(&self, item: Food) -> impl Future<Output = Result<Food, FoodHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(item.id.to_string())
                .bind(&item.name)
                .bind(&item.description)
                .bind(item.price)
                .bind(item.food_type.to_string())
                .execute(&pool)
                .await
                .map_err(|err| {
                    violation_as(err, Constraint::ForeignKey, ValidationError::UnknownFoodType)
                })?;

            Ok(item)
        }
    }

    fn get_by_id(
        &self,
        id: FoodId,
    ) -> impl Future<Output = Result<Option<Food>, FoodHubError>> + Send {
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

    fn get_all(&self) -> impl Future<Output = Result<Vec<Food>, FoodHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update(&self, item: Food) -> impl Future<Output = Result<Food, FoodHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(UPDATE)
                .bind(&item.name)
                .bind(&item.description)
                .bind(item.price)
                .bind(item.food_type.to_string())
                .bind(item.id.to_string())
                .execute(&pool)
                .await
                .map_err(|err| {
                    violation_as(err, Constraint::ForeignKey, ValidationError::UnknownFoodType)
                })?;
            expect_row::<Food>(&result, item.id)?;

            Ok(item)
        }
    }

    fn delete(&self, id: FoodId) -> impl Future<Output = Result<(), FoodHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(DELETE_BY_ID)
                .bind(id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;
            expect_row::<Food>(&result, id)?;

            Ok(())
        }
    }
}
