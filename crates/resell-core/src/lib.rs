//! # resell-core: Pure Analytics Engine for Resell Desk
//!
//! This crate computes everything a reseller sees on their dashboard:
//! per-article profitability, composite scores, portfolio totals, period
//! comparisons and badges. Every function is pure and takes the reference
//! date (`today`) as an argument.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Resell Desk Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Presentation (web / CLI report)                 │   │
//! │  │        Summary cards ──► Rankings ──► Article badges           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Dashboard (serde JSON)                 │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ resell-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  metrics  │  │ aggregate │  │ temporal  │  │ classify  │  │   │
//! │  │   │  margins  │  │  totals   │  │  growth   │  │  badges   │  │   │
//! │  │   │  scores   │  │  rankings │  │  weekday  │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CLOCK • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────▲───────────────────────────────────┘   │
//! │                                │ Vec<Article>                           │
//! │  ┌─────────────────────────────┴───────────────────────────────────┐   │
//! │  │                  resell-db (Data Provider)                      │   │
//! │  │        SQLite rows, JSON payloads, normalization, config        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Articles, sales and the computed output records
//! - [`money`] - Finite monetary amount
//! - [`error`] - Domain error types
//! - [`validation`] - Input checks shared by constructors
//! - [`config`] - Thresholds, weights and score bands
//! - [`metrics`] - Per-article computations and scores
//! - [`aggregate`] - Portfolio totals, rankings and partitions
//! - [`temporal`] - Period comparisons and best weekday
//! - [`classify`] - Badge rules
//! - [`dashboard`] - Plan-gated assembly of all of the above
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same articles and same `today` give the same output
//! 2. **No I/O**: loading data is the provider's job
//! 3. **Full Precision**: amounts are rounded for display only
//! 4. **Validated Inputs**: articles and sales are checked on construction
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::{NaiveDate, TimeZone, Utc};
//! use resell_core::{metrics, AnalyticsConfig, Article, Sale};
//!
//! let today = NaiveDate::from_ymd_opt(2026, 3, 31).unwrap();
//! let sold_at = Utc.with_ymd_and_hms(2026, 3, 2, 14, 0, 0).unwrap();
//!
//! let article = Article::new("denim-jacket", 10.0, 3)
//!     .unwrap()
//!     .with_sale(Sale::new("s-1", 25.0, sold_at).unwrap());
//!
//! assert_eq!(metrics::remaining_stock(&article), 2);
//! assert_eq!(metrics::total_benefit(&article).amount(), 15.0);
//!
//! let evaluated = metrics::evaluate_article(&article, today, &AnalyticsConfig::default());
//! assert_eq!(evaluated.margin_score, 100.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod aggregate;
pub mod classify;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod metrics;
pub mod money;
pub mod temporal;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use config::AnalyticsConfig;
pub use dashboard::{build_dashboard, ArticleInsight, Dashboard, InventoryCounts, Plan};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use temporal::{WeekdayLocale, ZeroBaseline};
pub use types::*;
