//! # Article Repository
//!
//! Database operations for purchase lots.
//!
//! An article row stores what was paid for the whole lot
//! (`purchase_price_total`) and how many units it holds. Unit cost is
//! derived later by the adapter.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Sqlite, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};

// =============================================================================
// Row Type
// =============================================================================

/// One row of the `articles` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ArticleRow {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub purchase_price_total: f64,
    pub quantity: i64,
    pub purchase_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl ArticleRow {
    /// Creates a row with a fresh v4 id, stamped now.
    pub fn new(
        user_id: impl Into<String>,
        name: impl Into<String>,
        purchase_price_total: f64,
        quantity: i64,
        purchase_date: Option<NaiveDate>,
    ) -> Self {
        ArticleRow {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            name: name.into(),
            purchase_price_total,
            quantity,
            purchase_date,
            created_at: Utc::now(),
        }
    }
}

const SELECT_ARTICLE: &str = r#"
    SELECT id, user_id, name, purchase_price_total, quantity, purchase_date, created_at
    FROM articles
"#;

// =============================================================================
// Repository
// =============================================================================

/// Repository for article database operations.
#[derive(Debug, Clone)]
pub struct ArticleRepository {
    pool: SqlitePool,
}

impl ArticleRepository {
    /// Creates a new ArticleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ArticleRepository { pool }
    }

    /// Inserts an article row.
    ///
    /// ## Errors
    /// - `UniqueViolation` when the id already exists
    /// - `QueryFailed` when a CHECK constraint rejects the amounts
    pub async fn insert(&self, article: &ArticleRow) -> DbResult<()> {
        debug!(id = %article.id, user_id = %article.user_id, "Inserting article");

        sqlx::query(
            r#"
            INSERT INTO articles (
                id, user_id, name, purchase_price_total, quantity, purchase_date, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&article.id)
        .bind(&article.user_id)
        .bind(&article.name)
        .bind(article.purchase_price_total)
        .bind(article.quantity)
        .bind(article.purchase_date)
        .bind(article.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets an article by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<ArticleRow>> {
        let row = sqlx::query_as::<_, ArticleRow>(&format!("{SELECT_ARTICLE} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    /// Lists every article owned by `user_id`, oldest first.
    pub async fn list_for_user(&self, user_id: &str) -> DbResult<Vec<ArticleRow>> {
        Self::fetch_for_user(&self.pool, user_id).await
    }

    /// Same query as [`Self::list_for_user`] on any executor, so it can run
    /// inside a caller's transaction.
    pub(crate) async fn fetch_for_user<'e, E>(executor: E, user_id: &str) -> DbResult<Vec<ArticleRow>>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        let rows = sqlx::query_as::<_, ArticleRow>(&format!(
            "{SELECT_ARTICLE} WHERE user_id = ?1 ORDER BY created_at, id"
        ))
        .bind(user_id)
        .fetch_all(executor)
        .await?;

        Ok(rows)
    }

    /// Counts all articles.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM articles")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Deletes an article and, through the foreign key, its sales.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting article");

        let result = sqlx::query("DELETE FROM articles WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Article", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = db().await;
        let row = ArticleRow::new(
            "user-1",
            "Levi's 501",
            30.0,
            3,
            NaiveDate::from_ymd_opt(2026, 2, 1),
        );

        db.articles().insert(&row).await.unwrap();

        let loaded = db.articles().get_by_id(&row.id).await.unwrap().unwrap();
        assert_eq!(loaded.name, "Levi's 501");
        assert_eq!(loaded.purchase_price_total, 30.0);
        assert_eq!(loaded.quantity, 3);
        assert_eq!(loaded.purchase_date, row.purchase_date);
        assert!(db.articles().get_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_id_is_rejected() {
        let db = db().await;
        let row = ArticleRow::new("user-1", "Scarf", 5.0, 1, None);

        db.articles().insert(&row).await.unwrap();
        let err = db.articles().insert(&row).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_negative_quantity_is_rejected() {
        let db = db().await;
        let row = ArticleRow::new("user-1", "Broken", 5.0, -1, None);

        let err = db.articles().insert(&row).await.unwrap_err();
        assert!(matches!(err, DbError::QueryFailed(_)));
    }

    #[tokio::test]
    async fn test_list_for_user_filters_owner() {
        let db = db().await;
        let mine = ArticleRow::new("user-1", "Mine", 10.0, 1, None);
        let theirs = ArticleRow::new("user-2", "Theirs", 10.0, 1, None);
        db.articles().insert(&mine).await.unwrap();
        db.articles().insert(&theirs).await.unwrap();

        let rows = db.articles().list_for_user("user-1").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, mine.id);
        assert_eq!(db.articles().count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_delete() {
        let db = db().await;
        let row = ArticleRow::new("user-1", "Gone", 1.0, 1, None);
        db.articles().insert(&row).await.unwrap();

        db.articles().delete(&row.id).await.unwrap();
        assert_eq!(db.articles().count().await.unwrap(), 0);

        let err = db.articles().delete(&row.id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
