//! `SQLite` implementation of [`Repository<Comment>`].

use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use foodhub_app::ports::Repository;
use foodhub_domain::comment::Comment;
use foodhub_domain::error::FoodHubError;
use foodhub_domain::id::{CommentId, UserId};
use foodhub_domain::time::{parse_canonical, to_canonical};

use crate::error::{StorageError, expect_row};

/// Wrapper for converting database rows into domain [`Comment`].
struct Wrapper(Comment);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Comment> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let body: String = row.try_get("body")?;
        let author: String = row.try_get("author_id")?;
        let created_at: String = row.try_get("created_at")?;

        let id = CommentId::from_str(&id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let author = UserId::from_str(&author).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let created_at =
            parse_canonical(&created_at).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Comment {
            id,
            body,
            author,
            created_at,
        }))
    }
}

const INSERT: &str = "INSERT INTO comments (id, body, author_id, created_at) VALUES (?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM comments WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM comments ORDER BY created_at, rowid";
const UPDATE: &str = "UPDATE comments SET body = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM comments WHERE id = ?";

/// `SQLite`-backed comment repository.
///
/// Author and creation time are written once on insert and never updated.
pub struct SqliteCommentRepository {
    pool: SqlitePool,
}

impl SqliteCommentRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl Repository<Comment> for SqliteCommentRepository {
    fn create(&self, item: Comment) -> impl Future<Output = Result<Comment, FoodHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(item.id.to_string())
                .bind(&item.body)
                .bind(item.author.to_string())
                .bind(to_canonical(item.created_at))
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(item)
        }
    }

    fn get_by_id(
        &self,
        id: CommentId,
    ) -> impl Future<Output = Result<Option<Comment>, FoodHubError>> + Send {
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

    fn get_all(&self) -> impl Future<Output = Result<Vec<Comment>, FoodHubError>> + Send {
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
        item: Comment,
    ) -> impl Future<Output = Result<Comment, FoodHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(UPDATE)
                .bind(&item.body)
                .bind(item.id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;
            expect_row::<Comment>(&result, item.id)?;

            Ok(item)
        }
    }

    fn delete(&self, id: CommentId) -> impl Future<Output = Result<(), FoodHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(DELETE_BY_ID)
                .bind(id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;
            expect_row::<Comment>(&result, id)?;

            Ok(())
        }
    }
}
