//! # resell-db: Data Provider for Resell Desk
//!
//! This crate stores articles and sales in SQLite and hands them to the
//! analytics engine as validated [`resell_core::Article`] values.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Resell Desk Data Flow                            │
//! │                                                                         │
//! │  report binary (user, plan, date)                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    resell-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │   Adapter    │  │   │
//! │  │   │   (pool.rs)   │    │ ArticleRepo   │    │ rows / JSON  │  │   │
//! │  │   │ load_snapshot │◄───│ SaleRepo      │───►│  ──► Article │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐                       │   │
//! │  │   │  Migrations   │    │   AppConfig   │                       │   │
//! │  │   │  (embedded)   │    │ TOML + env    │                       │   │
//! │  │   └───────────────┘    └───────────────┘                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  resell_core::build_dashboard(articles, today, config, plan)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool and snapshot loading
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database and config error types
//! - [`repository`] - Article and sale repositories
//! - [`adapter`] - Row and payload normalization into engine values
//! - [`config`] - Application configuration
//!
//! ## Usage
//!
//! ```rust,ignore
//! use resell_core::{build_dashboard, Plan};
//! use resell_db::{AppConfig, Database};
//!
//! let config = AppConfig::load(None)?;
//! let db = Database::new(config.database.db_config()).await?;
//!
//! let articles = db.load_snapshot("user-1").await?;
//! let today = chrono::Utc::now().date_naive();
//! let dashboard = build_dashboard(&articles, today, &config.analytics, Plan::Pro)?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod adapter;
pub mod config;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{AppConfig, DatabaseSettings};
pub use error::{ConfigError, DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::{ArticleRepository, ArticleRow, SaleRepository, SaleRow};
