//! # Domain Types
//!
//! Input records and derived outputs of the analytics engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  INPUTS (validated on construction, read-only afterwards)              │
//! │  ┌─────────────────┐  1 ──── *  ┌─────────────────┐                    │
//! │  │    Article      │───────────►│      Sale       │                    │
//! │  │  ─────────────  │            │  ─────────────  │                    │
//! │  │  id             │            │  id             │                    │
//! │  │  unit_cost      │            │  sale_price     │                    │
//! │  │  quantity       │            │  sale_date      │                    │
//! │  │  purchase_date? │            │  ads_cost?      │                    │
//! │  └─────────────────┘            └─────────────────┘                    │
//! │                                                                         │
//! │  OUTPUTS (recomputed on every call, never cached)                      │
//! │  ArticleMetrics · PortfolioSummary · GrowthComparison · ArticleBadges  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Inputs keep their fields private: once an [`Article`] exists it is
//! structurally valid, so the engine functions never have to re-check it.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::{validate_id, validate_quantity};

// =============================================================================
// Sale
// =============================================================================

/// One unit of an article sold to a buyer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SaleRecord")]
pub struct Sale {
    id: String,
    sale_price: Money,
    sale_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ads_cost: Option<Money>,
}

impl Sale {
    /// Creates a sale without ad spend.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::{TimeZone, Utc};
    /// use resell_core::Sale;
    ///
    /// let when = Utc.with_ymd_and_hms(2026, 3, 14, 10, 0, 0).unwrap();
    /// let sale = Sale::new("s-1", 25.0, when).unwrap();
    /// assert_eq!(sale.sale_price().amount(), 25.0);
    /// assert!(sale.ads_cost().is_zero());
    ///
    /// assert!(Sale::new("s-2", f64::NAN, when).is_err());
    /// ```
    pub fn new(
        id: impl Into<String>,
        sale_price: f64,
        sale_date: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let id = id.into();
        validate_id("sale", &id)?;

        Ok(Sale {
            id,
            sale_price: Money::non_negative("sale_price", sale_price)?,
            sale_date,
            ads_cost: None,
        })
    }

    /// Attaches the advertising spend attributed to this sale.
    pub fn with_ads_cost(mut self, ads_cost: f64) -> Result<Self, ValidationError> {
        self.ads_cost = Some(Money::non_negative("ads_cost", ads_cost)?);
        Ok(self)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn sale_price(&self) -> Money {
        self.sale_price
    }

    pub fn sale_date(&self) -> DateTime<Utc> {
        self.sale_date
    }

    /// Calendar day (UTC) the sale happened on.
    pub fn sale_day(&self) -> NaiveDate {
        self.sale_date.date_naive()
    }

    /// Ad spend for this sale; zero when none was recorded.
    pub fn ads_cost(&self) -> Money {
        self.ads_cost.unwrap_or_default()
    }
}

/// Unvalidated wire shape of a [`Sale`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleRecord {
    pub id: String,
    pub sale_price: f64,
    pub sale_date: DateTime<Utc>,
    #[serde(default)]
    pub ads_cost: Option<f64>,
}

impl TryFrom<SaleRecord> for Sale {
    type Error = ValidationError;

    fn try_from(record: SaleRecord) -> Result<Self, Self::Error> {
        let sale = Sale::new(record.id, record.sale_price, record.sale_date)?;
        match record.ads_cost {
            Some(cost) => sale.with_ads_cost(cost),
            None => Ok(sale),
        }
    }
}

// =============================================================================
// Article
// =============================================================================

/// A purchased lot of identical units, together with the sales drawn from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ArticleRecord")]
pub struct Article {
    id: String,
    unit_cost: Money,
    quantity: i64,
    purchase_date: Option<NaiveDate>,
    sales: Vec<Sale>,
}

impl Article {
    /// Creates an article with no purchase date and no sales.
    ///
    /// ## Example
    /// ```rust
    /// use resell_core::Article;
    ///
    /// let article = Article::new("a-1", 10.0, 5).unwrap();
    /// assert_eq!(article.quantity(), 5);
    ///
    /// assert!(Article::new("a-2", 10.0, -1).is_err());
    /// assert!(Article::new("a-3", -4.0, 1).is_err());
    /// ```
    pub fn new(
        id: impl Into<String>,
        unit_cost: f64,
        quantity: i64,
    ) -> Result<Self, ValidationError> {
        let id = id.into();
        validate_id("article", &id)?;
        validate_quantity(quantity)?;

        Ok(Article {
            id,
            unit_cost: Money::non_negative("unit_cost", unit_cost)?,
            quantity,
            purchase_date: None,
            sales: Vec::new(),
        })
    }

    pub fn with_purchase_date(mut self, date: NaiveDate) -> Self {
        self.purchase_date = Some(date);
        self
    }

    pub fn with_sale(mut self, sale: Sale) -> Self {
        self.sales.push(sale);
        self
    }

    pub fn with_sales(mut self, sales: impl IntoIterator<Item = Sale>) -> Self {
        self.sales.extend(sales);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn unit_cost(&self) -> Money {
        self.unit_cost
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn purchase_date(&self) -> Option<NaiveDate> {
        self.purchase_date
    }

    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }
}

/// Unvalidated wire shape of an [`Article`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub id: String,
    pub unit_cost: f64,
    pub quantity: i64,
    #[serde(default)]
    pub purchase_date: Option<NaiveDate>,
    #[serde(default)]
    pub sales: Vec<Sale>,
}

impl TryFrom<ArticleRecord> for Article {
    type Error = ValidationError;

    fn try_from(record: ArticleRecord) -> Result<Self, Self::Error> {
        let mut article = Article::new(record.id, record.unit_cost, record.quantity)?
            .with_sales(record.sales);
        article.purchase_date = record.purchase_date;
        Ok(article)
    }
}

// =============================================================================
// Derived: Article Metrics
// =============================================================================

/// Everything the engine derives for a single article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ArticleMetrics {
    pub article_id: String,
    /// Units acquired minus units sold. Negative when oversold.
    pub remaining: i64,
    /// `remaining` clamped at zero, for display.
    pub display_remaining: i64,
    /// Margin of the most recent sale; zero with no sales.
    pub unit_margin: Money,
    /// Sum of every sale's margin.
    pub total_benefit: Money,
    /// Mean sale margin; zero with no sales.
    pub average_margin: Money,
    /// 0..=100
    pub margin_score: f64,
    /// 0..=100
    pub speed_score: u8,
    /// 0..=100
    pub rentability_score: u8,
    /// Weighted composite, 0..=100.
    pub overall_score: u8,
    pub suggested_price: Money,
}

// =============================================================================
// Derived: Portfolio Summary
// =============================================================================

/// An article running low on stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StockAlert {
    pub article_id: String,
    pub remaining: i64,
}

/// Totals across every article in scope (typically one user's inventory).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PortfolioSummary {
    pub article_count: usize,
    pub units_sold: usize,
    /// Sum of raw remaining stock; oversold articles pull it down.
    pub units_remaining: i64,
    pub total_revenue: Money,
    pub total_ads_cost: Money,
    pub total_profit: Money,
    /// Σ remaining × unit cost, unclamped.
    pub total_stock_value: Money,
    /// Mean per-sale margin percentage; sales of zero-cost articles are
    /// left out. Zero when no sale qualifies.
    pub average_margin_percent: f64,
    pub top_by_profit: Vec<ArticleMetrics>,
    pub critical_stock: Vec<StockAlert>,
}

// =============================================================================
// Derived: Growth Comparison
// =============================================================================

/// The same aggregate evaluated over two periods.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GrowthComparison {
    pub current_value: Money,
    pub previous_value: Money,
    /// `None` when the previous period gives no usable baseline.
    pub percent_change: Option<f64>,
}

// =============================================================================
// Derived: Inventory Partition
// =============================================================================

/// Articles split by stock state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryPartition<'a> {
    /// Still has units to sell.
    pub active: Vec<&'a Article>,
    /// Sold out exactly.
    pub archived: Vec<&'a Article>,
    /// Recorded more sales than units acquired.
    pub oversold: Vec<&'a Article>,
}

// =============================================================================
// Derived: Badges
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ArticleBadges {
    pub top_seller: bool,
    pub flash_sale: bool,
}

// =============================================================================
// Unit Tests
// =============================================================================
