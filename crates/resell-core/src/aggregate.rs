//! # Aggregation Functions
//!
//! Folds the metric primitives across a collection of articles.
//!
//! ## Portfolio Fold
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  for each article                                                       │
//! │      remaining × unit_cost ───────────────► total_stock_value          │
//! │      for each sale                                                      │
//! │          sale_price ──────────────────────► total_revenue              │
//! │          ads_cost ────────────────────────► total_ads_cost             │
//! │          unit_margin ─────────────────────► total_profit               │
//! │          unit_margin / unit_cost × 100 ───► average_margin_percent     │
//! │                       (skipped when unit_cost == 0)                     │
//! │                                                                         │
//! │  top_n_by_profit ──► evaluate_article ────► top_by_profit              │
//! │  critical_stock ───────────────────────────► critical_stock            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Inputs are never reordered or mutated; rankings and partitions return
//! borrowed views in new vectors.

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::config::AnalyticsConfig;
use crate::metrics::{evaluate_article, remaining_stock, total_benefit, unit_margin};
use crate::money::Money;
use crate::types::{Article, InventoryPartition, PortfolioSummary, Sale, StockAlert};

// =============================================================================
// Portfolio Summary
// =============================================================================

/// Totals, rankings and alerts over every article in scope.
///
/// An empty slice is valid input and yields an all-zero summary.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use resell_core::{aggregate, AnalyticsConfig};
///
/// let today = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
/// let summary = aggregate::portfolio_summary(&[], today, &AnalyticsConfig::default());
/// assert!(summary.total_revenue.is_zero());
/// assert!(summary.total_profit.is_zero());
/// ```
pub fn portfolio_summary(
    articles: &[Article],
    today: NaiveDate,
    config: &AnalyticsConfig,
) -> PortfolioSummary {
    let mut units_sold = 0;
    let mut units_remaining = 0;
    let mut total_revenue = Money::zero();
    let mut total_ads_cost = Money::zero();
    let mut total_profit = Money::zero();
    let mut margin_percent_sum = 0.0;
    let mut margin_percent_count = 0usize;

    for article in articles {
        units_sold += article.sales().len();
        units_remaining += remaining_stock(article);

        for sale in article.sales() {
            let margin = unit_margin(article, sale);
            total_revenue += sale.sale_price();
            total_ads_cost += sale.ads_cost();
            total_profit += margin;

            if let Some(ratio) = margin.ratio_to(article.unit_cost()) {
                margin_percent_sum += ratio * 100.0;
                margin_percent_count += 1;
            }
        }
    }

    let average_margin_percent = if margin_percent_count == 0 {
        0.0
    } else {
        margin_percent_sum / margin_percent_count as f64
    };

    PortfolioSummary {
        article_count: articles.len(),
        units_sold,
        units_remaining,
        total_revenue,
        total_ads_cost,
        total_profit,
        total_stock_value: total_stock_value(articles),
        average_margin_percent,
        top_by_profit: top_n_by_profit(articles, config.top_n)
            .into_iter()
            .map(|article| evaluate_article(article, today, config))
            .collect(),
        critical_stock: critical_stock(articles, config.critical_stock_threshold)
            .into_iter()
            .map(|article| StockAlert {
                article_id: article.id().to_string(),
                remaining: remaining_stock(article),
            })
            .collect(),
    }
}

// =============================================================================
// Stock Value
// =============================================================================

/// Σ remaining × unit cost. Oversold articles contribute negatively.
pub fn total_stock_value(articles: &[Article]) -> Money {
    stock_value_counting(articles, |_| true)
}

/// Stock value when only the sales accepted by `counted` are treated as
/// having happened. Used to rebuild past stock states.
pub fn stock_value_counting(articles: &[Article], counted: impl Fn(&Sale) -> bool) -> Money {
    articles
        .iter()
        .map(|article| {
            let sold = article.sales().iter().filter(|sale| counted(sale)).count() as i64;
            article.unit_cost() * (article.quantity() - sold)
        })
        .sum()
}

/// Every sale of every article, in article order then sale order.
pub fn all_sales(articles: &[Article]) -> Vec<&Sale> {
    articles.iter().flat_map(|article| article.sales()).collect()
}

// =============================================================================
// Rankings & Filters
// =============================================================================

/// The `n` articles with the highest total benefit, best first.
///
/// Stable: articles with equal benefit keep their input order.
pub fn top_n_by_profit(articles: &[Article], n: usize) -> Vec<&Article> {
    let mut ranked: Vec<(&Article, Money)> = articles
        .iter()
        .map(|article| (article, total_benefit(article)))
        .collect();

    // Money is always finite, so partial_cmp never falls through.
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    ranked.into_iter().take(n).map(|(article, _)| article).collect()
}

/// Articles whose remaining stock is below `threshold`, in input order.
pub fn critical_stock(articles: &[Article], threshold: i64) -> Vec<&Article> {
    articles
        .iter()
        .filter(|article| remaining_stock(article) < threshold)
        .collect()
}

/// Splits articles into active (stock left), archived (sold out) and
/// oversold (negative stock).
///
/// Active and archived lists are ordered by purchase date, newest first.
/// Undated articles stay in the positions they held; dated articles are
/// reordered among the remaining positions.
///
/// This differs from a stable sort whose comparator reports "equal" as soon
/// as either date is missing: such a comparator is not a total order, and
/// with it `[old, undated, new]` would come back unchanged. Here it becomes
/// `[new, undated, old]`.
pub fn active_vs_archived(articles: &[Article]) -> InventoryPartition<'_> {
    let mut partition = InventoryPartition::default();

    for article in articles {
        match remaining_stock(article).cmp(&0) {
            Ordering::Greater => partition.active.push(article),
            Ordering::Equal => partition.archived.push(article),
            Ordering::Less => partition.oversold.push(article),
        }
    }

    order_by_purchase_desc(&mut partition.active);
    order_by_purchase_desc(&mut partition.archived);
    partition
}

fn order_by_purchase_desc(articles: &mut [&Article]) {
    let slots: Vec<usize> = articles
        .iter()
        .enumerate()
        .filter(|(_, article)| article.purchase_date().is_some())
        .map(|(index, _)| index)
        .collect();

    let mut dated: Vec<&Article> = slots.iter().map(|&index| articles[index]).collect();
    dated.sort_by(|a, b| b.purchase_date().cmp(&a.purchase_date()));

    for (slot, article) in slots.into_iter().zip(dated) {
        articles[slot] = article;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
