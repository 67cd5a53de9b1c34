//! SQLite persistence for book reviews.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;
use std::path::Path;
use std::str::FromStr;

/// A persisted book review.
///
/// Also doubles as the summary projection: `summary()` returns synthetic
/// records whose ids are reassigned sequentially and whose rating is a
/// per-title average.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct BookReview {
    pub id: i64,
    pub title: String,
    pub rating: f64,
}

pub struct ReviewStore {
    pool: SqlitePool,
}

impl ReviewStore {
    /// Open (or create) the database file and ensure the schema exists.
    pub async fn connect(path: &Path) -> Result<Self> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                tokio::fs::create_dir_all(dir).await?;
            }
        }

        let opts = SqliteConnectOptions::from_str(&format!("sqlite://{}", path.display()))?
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(opts).await?;

        let store = Self { pool };
        store.initialize().await?;
        Ok(store)
    }

    /// Wrap an existing pool. The caller is responsible for `initialize()`.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn initialize(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS book_reviews (
                 id INTEGER PRIMARY KEY AUTOINCREMENT,
                 title TEXT NOT NULL,
                 rating REAL NOT NULL
             )",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// All reviews in store order.
    pub async fn list(&self) -> Result<Vec<BookReview>> {
        Ok(sqlx::query_as("SELECT id, title, rating FROM book_reviews")
            .fetch_all(&self.pool)
            .await?)
    }

    pub async fn find(&self, id: i64) -> Result<Option<BookReview>> {
        Ok(
            sqlx::query_as("SELECT id, title, rating FROM book_reviews WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    /// Insert a review and return the stored row with its assigned id.
    pub async fn insert(&self, title: &str, rating: f64) -> Result<BookReview> {
        Ok(sqlx::query_as(
            "INSERT INTO book_reviews (title, rating) VALUES (?, ?) \
             RETURNING id, title, rating",
        )
        .bind(title)
        .bind(rating)
        .fetch_one(&self.pool)
        .await?)
    }

    /// Overwrite title and rating in place, keeping the id.
    ///
    /// Returns `false` when no row has this id.
    pub async fn update(&self, id: i64, title: &str, rating: f64) -> Result<bool> {
        let result = sqlx::query("UPDATE book_reviews SET title = ?, rating = ? WHERE id = ?")
            .bind(title)
            .bind(rating)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Returns `false` when no row has this id.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM book_reviews WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Per-title average ratings, rounded to two decimal places.
    ///
    /// Groups are ordered alphabetically by title so the output is
    /// reproducible. Ids are reassigned 1..N on every call and have no
    /// relation to the underlying row ids.
    pub async fn summary(&self) -> Result<Vec<BookReview>> {
        let rows: Vec<(String, f64)> = sqlx::query_as(
            "SELECT title, AVG(rating) FROM book_reviews GROUP BY title ORDER BY title",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .zip(1..)
            .map(|((title, avg), id)| BookReview {
                id,
                title,
                rating: (avg * 100.0).round() / 100.0,
            })
            .collect())
    }

    pub async fn count(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM book_reviews")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
