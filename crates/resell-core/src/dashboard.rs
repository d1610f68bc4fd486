//! # Dashboard
//!
//! Assembles metrics, aggregates, comparisons and badges into the single
//! value the presentation layer renders.
//!
//! ## Plan Gating
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       What each plan receives                           │
//! │                                                                         │
//! │                               FREE        PRO                           │
//! │  portfolio summary             ✓           ✓                            │
//! │  active / archived counts      ✓           ✓                            │
//! │  best weekday                  ✓           ✓                            │
//! │  stock value growth            -           ✓                            │
//! │  revenue growth (MoM)          -           ✓                            │
//! │  per-article insights          -           ✓                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The plan is an explicit argument. Nothing here reads ambient session or
//! subscription state.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::aggregate::{active_vs_archived, all_sales, portfolio_summary};
use crate::classify::badges;
use crate::config::AnalyticsConfig;
use crate::error::CoreResult;
use crate::metrics::evaluate_article;
use crate::temporal::{
    best_active_weekday, revenue_growth_month_over_month, stock_value_growth, weekday_label,
};
use crate::types::{Article, ArticleBadges, ArticleMetrics, GrowthComparison, PortfolioSummary};

// =============================================================================
// Plan
// =============================================================================

/// Subscription plan of the account the dashboard is built for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Plan {
    #[default]
    Free,
    Pro,
}

impl Plan {
    pub fn from_pro_flag(is_pro: bool) -> Self {
        if is_pro {
            Plan::Pro
        } else {
            Plan::Free
        }
    }

    pub fn is_pro(&self) -> bool {
        matches!(self, Plan::Pro)
    }
}

// =============================================================================
// Dashboard
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InventoryCounts {
    pub active: usize,
    pub archived: usize,
    pub oversold: usize,
}

/// Metrics and badges of one article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ArticleInsight {
    pub metrics: ArticleMetrics,
    pub badges: ArticleBadges,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Dashboard {
    #[ts(as = "String")]
    pub generated_for: NaiveDate,
    pub plan: Plan,
    pub summary: PortfolioSummary,
    pub inventory: InventoryCounts,
    /// Localized weekday name, `"-"` without sales.
    pub best_weekday: String,
    pub stock_growth: Option<GrowthComparison>,
    pub revenue_growth: Option<GrowthComparison>,
    /// Input order. Empty on the free plan.
    pub insights: Vec<ArticleInsight>,
}

/// Builds the dashboard for one snapshot of a user's articles.
///
/// ## Errors
/// `CoreError::InvalidConfig` when `config` fails validation.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use resell_core::{build_dashboard, AnalyticsConfig, Plan};
///
/// let today = NaiveDate::from_ymd_opt(2026, 10, 1).unwrap();
/// let free = build_dashboard(&[], today, &AnalyticsConfig::default(), Plan::Free).unwrap();
/// assert_eq!(free.best_weekday, "-");
/// assert!(free.stock_growth.is_none());
/// ```
pub fn build_dashboard(
    articles: &[Article],
    today: NaiveDate,
    config: &AnalyticsConfig,
    plan: Plan,
) -> CoreResult<Dashboard> {
    config.validate()?;

    let partition = active_vs_archived(articles);
    let sales = all_sales(articles);
    let best_weekday = weekday_label(
        best_active_weekday(sales.iter().copied()),
        config.weekday_locale,
    );

    let mut dashboard = Dashboard {
        generated_for: today,
        plan,
        summary: portfolio_summary(articles, today, config),
        inventory: InventoryCounts {
            active: partition.active.len(),
            archived: partition.archived.len(),
            oversold: partition.oversold.len(),
        },
        best_weekday: best_weekday.to_string(),
        stock_growth: None,
        revenue_growth: None,
        insights: Vec::new(),
    };

    if plan.is_pro() {
        dashboard.stock_growth = Some(stock_value_growth(
            articles,
            today,
            config.stock_growth_lookback_days,
        ));
        dashboard.revenue_growth = Some(revenue_growth_month_over_month(
            sales.iter().copied(),
            today,
            config.revenue_zero_baseline,
        ));
        dashboard.insights = articles
            .iter()
            .map(|article| ArticleInsight {
                metrics: evaluate_article(article, today, config),
                badges: badges(article, config),
            })
            .collect();
    }

    Ok(dashboard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::types::Sale;
    use chrono::{TimeZone, Utc};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 15).unwrap()
    }

    fn articles() -> Vec<Article> {
        let sold = |id: &str, day: u32| {
            Sale::new(id, 40.0, Utc.with_ymd_and_hms(2026, 6, day, 10, 0, 0).unwrap()).unwrap()
        };
        vec![
            Article::new("jacket", 10.0, 3)
                .unwrap()
                .with_purchase_date(NaiveDate::from_ymd_opt(2026, 6, 1).unwrap())
                .with_sales([sold("s1", 3), sold("s2", 10)]),
            Article::new("sneakers", 50.0, 1)
                .unwrap()
                .with_sale(sold("s3", 12)),
        ]
    }

    #[test]
    fn test_free_plan_hides_pro_sections() {
        let dashboard =
            build_dashboard(&articles(), today(), &AnalyticsConfig::default(), Plan::Free).unwrap();

        assert_eq!(dashboard.plan, Plan::Free);
        assert_eq!(dashboard.summary.article_count, 2);
        assert_eq!(
            dashboard.inventory,
            InventoryCounts {
                active: 1,
                archived: 1,
                oversold: 0
            }
        );
        assert!(dashboard.stock_growth.is_none());
        assert!(dashboard.revenue_growth.is_none());
        assert!(dashboard.insights.is_empty());
    }

    #[test]
    fn test_pro_plan_includes_insights() {
        let dashboard =
            build_dashboard(&articles(), today(), &AnalyticsConfig::default(), Plan::Pro).unwrap();

        assert!(dashboard.stock_growth.is_some());
        // Nothing sold in May: the default zero-baseline policy divides by one.
        let revenue = dashboard.revenue_growth.unwrap();
        assert_eq!(revenue.current_value.amount(), 120.0);
        assert_eq!(revenue.percent_change, Some(12_000.0));

        assert_eq!(dashboard.insights.len(), 2);
        let jacket = &dashboard.insights[0];
        assert_eq!(jacket.metrics.article_id, "jacket");
        assert!(jacket.badges.top_seller);
        assert!(jacket.badges.flash_sale);
    }

    #[test]
    fn test_best_weekday_label() {
        // 2026-06-03, 06-10 are Wednesdays; 06-12 a Friday.
        let dashboard =
            build_dashboard(&articles(), today(), &AnalyticsConfig::default(), Plan::Free).unwrap();
        assert_eq!(dashboard.best_weekday, "Wednesday");
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = AnalyticsConfig::default();
        config.flash_sale_window_days = 0;
        let err = build_dashboard(&articles(), today(), &config, Plan::Pro).unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfig(_)));
    }

    #[test]
    fn test_plan_flag() {
        assert!(Plan::from_pro_flag(true).is_pro());
        assert!(!Plan::from_pro_flag(false).is_pro());
    }
}
