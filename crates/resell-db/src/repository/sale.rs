//! # Sale Repository
//!
//! Database operations for sold units. Every sale belongs to one article;
//! deleting the article removes its sales.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Sqlite, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;

/// One row of the `sales` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct SaleRow {
    pub id: String,
    pub article_id: String,
    pub user_id: String,
    pub sale_price: f64,
    pub sale_date: DateTime<Utc>,
    pub ads_cost: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl SaleRow {
    /// Creates a row with a fresh v4 id, stamped now.
    pub fn new(
        article_id: impl Into<String>,
        user_id: impl Into<String>,
        sale_price: f64,
        sale_date: DateTime<Utc>,
        ads_cost: Option<f64>,
    ) -> Self {
        SaleRow {
            id: Uuid::new_v4().to_string(),
            article_id: article_id.into(),
            user_id: user_id.into(),
            sale_price,
            sale_date,
            ads_cost,
            created_at: Utc::now(),
        }
    }
}

const SELECT_SALE: &str = r#"
    SELECT id, article_id, user_id, sale_price, sale_date, ads_cost, created_at
    FROM sales
"#;

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Inserts a sale row.
    ///
    /// ## Errors
    /// `ForeignKeyViolation` when `article_id` does not exist.
    pub async fn insert(&self, sale: &SaleRow) -> DbResult<()> {
        debug!(id = %sale.id, article_id = %sale.article_id, "Inserting sale");

        sqlx::query(
            r#"
            INSERT INTO sales (
                id, article_id, user_id, sale_price, sale_date, ads_cost, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&sale.id)
        .bind(&sale.article_id)
        .bind(&sale.user_id)
        .bind(sale.sale_price)
        .bind(sale.sale_date)
        .bind(sale.ads_cost)
        .bind(sale.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Sales of one article, oldest first.
    pub async fn list_for_article(&self, article_id: &str) -> DbResult<Vec<SaleRow>> {
        let rows = sqlx::query_as::<_, SaleRow>(&format!(
            "{SELECT_SALE} WHERE article_id = ?1 ORDER BY sale_date, id"
        ))
        .bind(article_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Every sale of an article owned by `user_id`, oldest first.
    ///
    /// Ownership follows the article, not the sale row's own `user_id`.
    pub async fn list_for_user(&self, user_id: &str) -> DbResult<Vec<SaleRow>> {
        Self::fetch_for_user(&self.pool, user_id).await
    }

    pub(crate) async fn fetch_for_user<'e, E>(executor: E, user_id: &str) -> DbResult<Vec<SaleRow>>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        let rows = sqlx::query_as::<_, SaleRow>(
            r#"
            SELECT s.id, s.article_id, s.user_id, s.sale_price, s.sale_date, s.ads_cost, s.created_at
            FROM sales s
            JOIN articles a ON a.id = s.article_id
            WHERE a.user_id = ?1
            ORDER BY s.sale_date, s.id
            "#,
        )
        .bind(user_id)
        .fetch_all(executor)
        .await?;

        Ok(rows)
    }

    /// Counts all sales.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
