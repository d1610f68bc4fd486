//! # Repository Module
//!
//! Row-level access to the `articles` and `sales` tables.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  report binary / Database::load_snapshot                               │
//! │       │                                                                 │
//! │       │  db.articles().list_for_user("u-1")                            │
//! │       ▼                                                                 │
//! │  ArticleRepository              SaleRepository                         │
//! │  ├── insert                     ├── insert                             │
//! │  ├── get_by_id                  ├── list_for_article                   │
//! │  ├── list_for_user              ├── list_for_user                      │
//! │  ├── count                      └── count                              │
//! │  └── delete                                                            │
//! │       │                                                                 │
//! │       │  ArticleRow / SaleRow (storage shape)                          │
//! │       ▼                                                                 │
//! │  adapter ──► resell_core::Article (engine shape)                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Repositories return rows exactly as stored. Turning them into engine
//! values is the [`crate::adapter`]'s job.

pub mod article;
pub mod sale;

pub use article::{ArticleRepository, ArticleRow};
pub use sale::{SaleRepository, SaleRow};
