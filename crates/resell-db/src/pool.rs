//! # Database Pool Management
//!
//! Connection pool creation and the snapshot loader that feeds the engine.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Database Connection Pool                           │
//! │                                                                         │
//! │  report / seed binary                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbConfig::new(path) ← Configure pool settings                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config).await ← Create pool + run migrations            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │            SqlitePool                    │                           │
//! │  │  ┌─────┐ ┌─────┐ ┌─────┐ ┌─────┐       │                           │
//! │  │  │Conn1│ │Conn2│ │Conn3│ │Conn4│ ...   │  (max_connections)        │
//! │  │  └─────┘ └─────┘ └─────┘ └─────┘       │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  load_snapshot(user) ──► one read transaction ──► Vec<Article>         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## WAL Mode
//! SQLite WAL (Write-Ahead Logging) mode is enabled so a snapshot read never
//! blocks a concurrent writer, and the other way round.

use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use resell_core::Article;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::adapter::article_from_row;
use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::{ArticleRepository, SaleRepository, SaleRow};

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ## Example
/// ```rust
/// use resell_db::DbConfig;
///
/// let config = DbConfig::new("/path/to/resell.db")
///     .max_connections(5)
///     .min_connections(1);
/// assert_eq!(config.max_connections, 5);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 5
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// Connection timeout duration.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection.
    /// Default: 10 minutes
    pub idle_timeout: Duration,

    /// Whether to run migrations on connect.
    /// Default: true
    pub run_migrations: bool,
}

impl DbConfig {
    /// Creates a configuration for the database file at `path`. The file is
    /// created if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            run_migrations: true,
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets whether to run migrations on connect.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Creates an in-memory database configuration (for testing).
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1, // In-memory requires single connection
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
            run_migrations: true,
        }
    }
}

// =============================================================================
// Database
// =============================================================================

/// Main database handle providing repository access.
#[derive(Debug, Clone)]
pub struct Database {
    /// The SQLite connection pool.
    pool: SqlitePool,
}

impl Database {
    /// Creates a new database connection pool.
    ///
    /// ## What This Does
    /// 1. Creates the database file if it doesn't exist
    /// 2. Configures SQLite:
    ///    - WAL mode for concurrent reads
    ///    - NORMAL synchronous
    ///    - Foreign keys enabled (sales cascade with their article)
    /// 3. Creates the connection pool
    /// 4. Runs migrations (if enabled)
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Initializing database connection"
        );

        let connect_url = format!("sqlite://{}?mode=rwc", config.database_path.display());

        let connect_options = SqliteConnectOptions::from_str(&connect_url)
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            // SQLite has them disabled by default
            .foreign_keys(true)
            .create_if_missing(true);

        debug!("Connection options configured");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Database pool created"
        );

        let db = Database { pool };

        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Runs database migrations. Called by `new()` unless disabled.
    pub async fn run_migrations(&self) -> DbResult<()> {
        info!("Running database migrations");
        migrations::run_migrations(&self.pool).await?;
        info!("Migrations complete");
        Ok(())
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the article repository.
    pub fn articles(&self) -> ArticleRepository {
        ArticleRepository::new(self.pool.clone())
    }

    /// Returns the sale repository.
    pub fn sales(&self) -> SaleRepository {
        SaleRepository::new(self.pool.clone())
    }

    /// Loads every article of `user_id` with its sales, as engine values.
    ///
    /// Articles and sales are read inside one transaction, so a sale
    /// recorded concurrently is either fully in the snapshot or not at all.
    /// Articles keep their creation order; sales are ordered by date.
    /// A sale belongs to the snapshot of its article's owner, whatever
    /// `user_id` the sale row itself carries.
    ///
    /// ## Errors
    /// `DbError::InvalidRecord` when a stored row fails engine validation.
    pub async fn load_snapshot(&self, user_id: &str) -> DbResult<Vec<Article>> {
        let mut tx = self.pool.begin().await?;

        let article_rows = ArticleRepository::fetch_for_user(&mut *tx, user_id).await?;
        let sale_rows = SaleRepository::fetch_for_user(&mut *tx, user_id).await?;

        tx.commit().await?;

        let mut sales_by_article: HashMap<String, Vec<SaleRow>> = HashMap::new();
        for sale in sale_rows {
            sales_by_article
                .entry(sale.article_id.clone())
                .or_default()
                .push(sale);
        }

        let mut articles = Vec::with_capacity(article_rows.len());
        for row in &article_rows {
            let sales = sales_by_article.remove(&row.id).unwrap_or_default();
            articles.push(article_from_row(row, &sales)?);
        }

        // Sales whose article belongs to someone else.
        for (article_id, sales) in &sales_by_article {
            warn!(
                user_id = %user_id,
                article_id = %article_id,
                count = sales.len(),
                "Ignoring sales of an article outside the snapshot"
            );
        }

        info!(
            user_id = %user_id,
            articles = articles.len(),
            "Snapshot loaded"
        );

        Ok(articles)
    }

    /// Closes the database connection pool. Repository calls fail afterwards.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }

    /// Checks if the database can execute queries.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::ArticleRow;
    use chrono::{NaiveDate, TimeZone, Utc};

    #[tokio::test]
    async fn test_in_memory_database() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.health_check().await);
    }

    #[tokio::test]
    async fn test_config_builder() {
        let config = DbConfig::new("/tmp/test.db")
            .max_connections(10)
            .min_connections(2)
            .run_migrations(false);

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
        assert!(!config.run_migrations);
    }

    #[tokio::test]
    async fn test_closed_database_is_unhealthy() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.close().await;

        assert!(!db.health_check().await);
        let err = db.articles().count().await.unwrap_err();
        assert!(matches!(err, DbError::ConnectionFailed(_)));
    }

    #[tokio::test]
    async fn test_load_snapshot_groups_sales() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let when = |day| Utc.with_ymd_and_hms(2026, 4, day, 10, 0, 0).unwrap();

        let jacket = ArticleRow::new(
            "user-1",
            "Jacket",
            30.0,
            3,
            NaiveDate::from_ymd_opt(2026, 4, 1),
        );
        let boots = ArticleRow::new("user-1", "Boots", 0.0, 0, None);
        let foreign = ArticleRow::new("user-2", "Foreign", 10.0, 1, None);
        for row in [&jacket, &boots, &foreign] {
            db.articles().insert(row).await.unwrap();
        }

        for (price, day) in [(25.0, 9), (22.0, 3)] {
            db.sales()
                .insert(&SaleRow::new(&jacket.id, "user-1", price, when(day), None))
                .await
                .unwrap();
        }
        db.sales()
            .insert(&SaleRow::new(&foreign.id, "user-2", 12.0, when(5), None))
            .await
            .unwrap();

        let articles = db.load_snapshot("user-1").await.unwrap();
        assert_eq!(articles.len(), 2);

        let loaded = articles
            .iter()
            .find(|article| article.id() == jacket.id)
            .unwrap();
        assert_eq!(loaded.unit_cost().amount(), 10.0);
        assert_eq!(loaded.purchase_date(), jacket.purchase_date);
        let prices: Vec<f64> = loaded
            .sales()
            .iter()
            .map(|sale| sale.sale_price().amount())
            .collect();
        assert_eq!(prices, vec![22.0, 25.0]);

        let empty_lot = articles
            .iter()
            .find(|article| article.id() == boots.id)
            .unwrap();
        assert!(empty_lot.unit_cost().is_zero());
        assert!(empty_lot.sales().is_empty());
    }

    #[tokio::test]
    async fn test_load_snapshot_keeps_sales_recorded_under_another_user() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let when = Utc.with_ymd_and_hms(2026, 4, 12, 10, 0, 0).unwrap();

        let coat = ArticleRow::new("user-1", "Coat", 40.0, 2, None);
        db.articles().insert(&coat).await.unwrap();
        db.sales()
            .insert(&SaleRow::new(&coat.id, "user-2", 35.0, when, None))
            .await
            .unwrap();

        let articles = db.load_snapshot("user-1").await.unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].sales().len(), 1);
        assert_eq!(articles[0].sales()[0].sale_price().amount(), 35.0);

        assert!(db.load_snapshot("user-2").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_load_snapshot_for_unknown_user() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.load_snapshot("nobody").await.unwrap().is_empty());
    }
}
