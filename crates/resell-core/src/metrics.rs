//! # Metric Primitives
//!
//! Per-article derived values. Every function here reads one [`Article`]
//! (and, where time matters, the evaluation date) and returns a fresh value.
//!
//! ## Score Composition
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Profitability Score                                 │
//! │                                                                         │
//! │  margin_score       average margin / unit cost, capped at 100     ×0.3 │
//! │  speed_score        how fast units leave the shelf                ×0.3 │
//! │  rentability_score  benefit earned per day since purchase         ×0.4 │
//! │                     ────────────────────────────────────────────────── │
//! │  overall_score      rounded weighted sum, 0..=100                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use chrono::{NaiveDate, TimeZone, Utc};
//! use resell_core::{metrics, Article, Sale};
//!
//! let sold = Utc.with_ymd_and_hms(2026, 6, 2, 9, 0, 0).unwrap();
//! let article = Article::new("a-1", 10.0, 5)
//!     .unwrap()
//!     .with_sale(Sale::new("s-1", 25.0, sold).unwrap());
//!
//! assert_eq!(metrics::remaining_stock(&article), 4);
//! assert_eq!(metrics::total_benefit(&article).amount(), 15.0);
//! assert_eq!(metrics::margin_score(&article), 100.0);
//! ```

use chrono::NaiveDate;

use crate::config::{AnalyticsConfig, PricingRules, RentabilityScoring, ScoreWeights, SpeedScoring};
use crate::money::Money;
use crate::types::{Article, ArticleMetrics, Sale};

const SECONDS_PER_DAY: f64 = 86_400.0;

// =============================================================================
// Stock
// =============================================================================

/// Units acquired minus units sold.
///
/// Not floored: an oversold article reports a negative value, and totals
/// built on it keep that sign. Use [`display_stock`] for presentation.
pub fn remaining_stock(article: &Article) -> i64 {
    article.quantity() - article.sales().len() as i64
}

/// [`remaining_stock`] clamped at zero.
pub fn display_stock(article: &Article) -> i64 {
    remaining_stock(article).max(0)
}

// =============================================================================
// Margins
// =============================================================================

/// Profit attributable to one sale: price minus unit cost minus ad spend.
pub fn unit_margin(article: &Article, sale: &Sale) -> Money {
    sale.sale_price() - article.unit_cost() - sale.ads_cost()
}

/// Sum of [`unit_margin`] over every sale of the article.
pub fn total_benefit(article: &Article) -> Money {
    article
        .sales()
        .iter()
        .map(|sale| unit_margin(article, sale))
        .sum()
}

/// Mean [`unit_margin`]; zero when the article has no sales.
pub fn average_margin(article: &Article) -> Money {
    total_benefit(article).mean_over(article.sales().len())
}

/// Margin of the most recent sale; zero when the article has no sales.
pub fn latest_unit_margin(article: &Article) -> Money {
    article
        .sales()
        .iter()
        .max_by_key(|sale| sale.sale_date())
        .map(|sale| unit_margin(article, sale))
        .unwrap_or_default()
}

/// Average margin as a percentage of unit cost, within `0..=100`.
///
/// Zero when the unit cost is zero: a free article has no meaningful ratio.
pub fn margin_score(article: &Article) -> f64 {
    let unit_cost = article.unit_cost();
    if !unit_cost.is_positive() {
        return 0.0;
    }

    average_margin(article)
        .ratio_to(unit_cost)
        .map(|ratio| (ratio * 100.0).clamp(0.0, 100.0))
        .unwrap_or(0.0)
}

// =============================================================================
// Time-based Scores
// =============================================================================

/// Whole days between the purchase date and `today`, if a purchase date
/// is known. Negative for purchases dated in the future.
pub fn days_since_purchase(article: &Article, today: NaiveDate) -> Option<i64> {
    article
        .purchase_date()
        .map(|purchased| (today - purchased).num_days())
}

/// Mean gap in (fractional) days between consecutive sales, sorted by date.
/// `None` with fewer than two sales.
pub fn mean_sale_gap_days(article: &Article) -> Option<f64> {
    let sales = article.sales();
    if sales.len() < 2 {
        return None;
    }

    let mut dates: Vec<_> = sales.iter().map(Sale::sale_date).collect();
    dates.sort_unstable();

    let total_seconds: i64 = dates
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).num_seconds())
        .sum();

    Some(total_seconds as f64 / SECONDS_PER_DAY / (dates.len() - 1) as f64)
}

/// How quickly the article sells.
///
/// ## Rules
/// ```text
/// 2+ sales              → band of the mean gap between sales
/// 0 sales, dated        → band of the days since purchase
/// 1 sale, or undated    → 0
/// ```
pub fn speed_score(article: &Article, today: NaiveDate, rules: &SpeedScoring) -> u8 {
    if let Some(gap) = mean_sale_gap_days(article) {
        return rules
            .gap_bands
            .iter()
            .find(|band| gap <= band.limit)
            .map_or(rules.slow_seller_score, |band| band.score);
    }

    if !article.sales().is_empty() {
        return 0;
    }

    match days_since_purchase(article, today) {
        Some(elapsed) => rules
            .idle_bands
            .iter()
            .find(|band| elapsed > band.limit)
            .map_or(rules.fresh_stock_score, |band| band.score),
        None => 0,
    }
}

/// Benefit earned per day since purchase; zero when undated or bought today
/// (or later).
pub fn benefit_per_day(article: &Article, today: NaiveDate) -> f64 {
    match days_since_purchase(article, today) {
        Some(days) if days > 0 => total_benefit(article).amount() / days as f64,
        _ => 0.0,
    }
}

/// Scores [`benefit_per_day`] against the rentability tiers.
pub fn rentability_score(article: &Article, today: NaiveDate, rules: &RentabilityScoring) -> u8 {
    let per_day = benefit_per_day(article, today);

    if let Some(tier) = rules.tiers.iter().find(|tier| per_day >= tier.limit) {
        return tier.score;
    }
    if per_day > 0.0 {
        return rules.profitable_score;
    }
    0
}

/// Rounded weighted sum of the three sub-scores, clamped to `0..=100`.
pub fn combine_scores(margin: f64, speed: u8, rentability: u8, weights: &ScoreWeights) -> u8 {
    let weighted = margin * weights.margin
        + f64::from(speed) * weights.speed
        + f64::from(rentability) * weights.rentability;

    weighted.round().clamp(0.0, 100.0) as u8
}

/// Overall profitability score of one article.
pub fn overall_score(article: &Article, today: NaiveDate, config: &AnalyticsConfig) -> u8 {
    combine_scores(
        margin_score(article),
        speed_score(article, today, &config.speed),
        rentability_score(article, today, &config.rentability),
        &config.weights,
    )
}

// =============================================================================
// Pricing
// =============================================================================

/// Price to ask for the next unit.
///
/// ## Rules
/// - With sales: the mean price already obtained
/// - Without sales: unit cost × markup, or × stale markup once the stock
///   is older than `stale_after_days`
pub fn suggested_price(article: &Article, today: NaiveDate, rules: &PricingRules) -> Money {
    let sales = article.sales();
    if !sales.is_empty() {
        let revenue: Money = sales.iter().map(Sale::sale_price).sum();
        return revenue.mean_over(sales.len());
    }

    let stale = days_since_purchase(article, today)
        .is_some_and(|days| days > rules.stale_after_days);
    let markup = if stale { rules.stale_markup } else { rules.markup };

    article.unit_cost() * markup
}

// =============================================================================
// Evaluation
// =============================================================================

/// Computes every per-article metric in one pass.
pub fn evaluate_article(
    article: &Article,
    today: NaiveDate,
    config: &AnalyticsConfig,
) -> ArticleMetrics {
    let margin = margin_score(article);
    let speed = speed_score(article, today, &config.speed);
    let rentability = rentability_score(article, today, &config.rentability);

    ArticleMetrics {
        article_id: article.id().to_string(),
        remaining: remaining_stock(article),
        display_remaining: display_stock(article),
        unit_margin: latest_unit_margin(article),
        total_benefit: total_benefit(article),
        average_margin: average_margin(article),
        margin_score: margin,
        speed_score: speed,
        rentability_score: rentability,
        overall_score: combine_scores(margin, speed, rentability, &config.weights),
        suggested_price: suggested_price(article, today, &config.pricing),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 30).unwrap()
    }

    fn days_ago(days: i64) -> NaiveDate {
        today() - Duration::days(days)
    }

    fn sold_days_ago(id: &str, price: f64, days: i64) -> Sale {
        let when: DateTime<Utc> = Utc
            .from_utc_datetime(&days_ago(days).and_hms_opt(12, 0, 0).unwrap());
        Sale::new(id, price, when).unwrap()
    }

    #[test]
    fn test_remaining_stock_is_not_floored() {
        let article = Article::new("a", 5.0, 1)
            .unwrap()
            .with_sale(sold_days_ago("s1", 10.0, 3))
            .with_sale(sold_days_ago("s2", 10.0, 2));

        assert_eq!(remaining_stock(&article), -1);
        assert_eq!(display_stock(&article), 0);
    }

    #[test]
    fn test_unit_margin_subtracts_ads_cost() {
        let article = Article::new("a", 10.0, 2).unwrap();
        let sale = sold_days_ago("s", 25.0, 1).with_ads_cost(2.0).unwrap();
        assert_eq!(unit_margin(&article, &sale).amount(), 13.0);
    }

    #[test]
    fn test_no_sales_guards() {
        let article = Article::new("a", 10.0, 3).unwrap();
        assert!(average_margin(&article).is_zero());
        assert!(latest_unit_margin(&article).is_zero());
        assert_eq!(margin_score(&article), 0.0);
        assert_eq!(mean_sale_gap_days(&article), None);
    }

    #[test]
    fn test_margin_score_zero_cost_is_zero() {
        let article = Article::new("free", 0.0, 3)
            .unwrap()
            .with_sale(sold_days_ago("s", 12.0, 1));
        assert_eq!(margin_score(&article), 0.0);
    }

    #[test]
    fn test_margin_score_partial_and_negative() {
        let half = Article::new("a", 20.0, 3)
            .unwrap()
            .with_sale(sold_days_ago("s", 30.0, 1));
        assert_eq!(margin_score(&half), 50.0);

        let loss = Article::new("b", 20.0, 3)
            .unwrap()
            .with_sale(sold_days_ago("s", 5.0, 1));
        assert_eq!(margin_score(&loss), 0.0);
    }

    #[test]
    fn test_speed_score_from_sale_gaps() {
        let rules = SpeedScoring::default();
        let base = Article::new("a", 1.0, 10).unwrap();

        let fast = base.clone().with_sales([
            sold_days_ago("s1", 2.0, 10),
            sold_days_ago("s2", 2.0, 6),
            sold_days_ago("s3", 2.0, 8),
        ]);
        assert_eq!(mean_sale_gap_days(&fast), Some(2.0));
        assert_eq!(speed_score(&fast, today(), &rules), 100);

        let weekly = base
            .clone()
            .with_sales([sold_days_ago("s1", 2.0, 14), sold_days_ago("s2", 2.0, 7)]);
        assert_eq!(speed_score(&weekly, today(), &rules), 60);

        let slow = base
            .clone()
            .with_sales([sold_days_ago("s1", 2.0, 60), sold_days_ago("s2", 2.0, 1)]);
        assert_eq!(speed_score(&slow, today(), &rules), 20);
    }

    #[test]
    fn test_speed_score_without_enough_sales() {
        let rules = SpeedScoring::default();

        let single = Article::new("a", 1.0, 2)
            .unwrap()
            .with_purchase_date(days_ago(100))
            .with_sale(sold_days_ago("s", 2.0, 1));
        assert_eq!(speed_score(&single, today(), &rules), 0);

        let undated = Article::new("b", 1.0, 2).unwrap();
        assert_eq!(speed_score(&undated, today(), &rules), 0);

        let stale = Article::new("c", 1.0, 2)
            .unwrap()
            .with_purchase_date(days_ago(91));
        assert_eq!(speed_score(&stale, today(), &rules), 10);

        let idle = Article::new("d", 1.0, 2)
            .unwrap()
            .with_purchase_date(days_ago(45));
        assert_eq!(speed_score(&idle, today(), &rules), 30);

        let fresh = Article::new("e", 1.0, 2)
            .unwrap()
            .with_purchase_date(days_ago(30));
        assert_eq!(speed_score(&fresh, today(), &rules), 50);
    }

    #[test]
    fn test_rentability_score_tiers() {
        let rules = RentabilityScoring::default();
        let bought = Article::new("a", 10.0, 5)
            .unwrap()
            .with_purchase_date(days_ago(10));

        // 30 benefit over 10 days = 3/day
        let top = bought.clone().with_sales([
            sold_days_ago("s1", 25.0, 2),
            sold_days_ago("s2", 25.0, 1),
        ]);
        assert_eq!(rentability_score(&top, today(), &rules), 100);

        // 25 over 10 days = 2.5/day
        let strong = bought.clone().with_sale(sold_days_ago("s1", 35.0, 2));
        assert_eq!(rentability_score(&strong, today(), &rules), 80);

        // 20 over 10 days = 2/day, on the tier boundary
        let boundary = bought.clone().with_sale(sold_days_ago("s1", 30.0, 2));
        assert_eq!(rentability_score(&boundary, today(), &rules), 80);

        // 15 over 10 days = 1.5/day
        let mid = bought.clone().with_sale(sold_days_ago("s1", 25.0, 2));
        assert_eq!(rentability_score(&mid, today(), &rules), 60);

        // 2 over 10 days = 0.2/day
        let thin = bought.clone().with_sale(sold_days_ago("s1", 12.0, 2));
        assert_eq!(rentability_score(&thin, today(), &rules), 40);

        let loss = bought.with_sale(sold_days_ago("s1", 2.0, 2));
        assert_eq!(rentability_score(&loss, today(), &rules), 0);
    }

    #[test]
    fn test_rentability_needs_elapsed_days() {
        let rules = RentabilityScoring::default();
        let same_day = Article::new("a", 1.0, 5)
            .unwrap()
            .with_purchase_date(today())
            .with_sale(sold_days_ago("s", 50.0, 0));
        assert_eq!(benefit_per_day(&same_day, today()), 0.0);
        assert_eq!(rentability_score(&same_day, today(), &rules), 0);
    }

    #[test]
    fn test_combine_scores_weights_and_rounding() {
        let weights = ScoreWeights::default();
        // 50*0.3 + 40*0.3 + 60*0.4 = 51
        assert_eq!(combine_scores(50.0, 40, 60, &weights), 51);
        // 33.3*0.3 + 0 + 0 = 9.99 → 10
        assert_eq!(combine_scores(33.3, 0, 0, &weights), 10);
        assert_eq!(combine_scores(100.0, 100, 100, &weights), 100);
    }

    #[test]
    fn test_suggested_price() {
        let rules = PricingRules::default();

        let with_sales = Article::new("a", 10.0, 5)
            .unwrap()
            .with_sales([sold_days_ago("s1", 20.0, 3), sold_days_ago("s2", 30.0, 1)]);
        assert_eq!(suggested_price(&with_sales, today(), &rules).amount(), 25.0);

        let recent = Article::new("b", 20.0, 3)
            .unwrap()
            .with_purchase_date(days_ago(90));
        assert_eq!(suggested_price(&recent, today(), &rules).amount(), 60.0);

        let stale = Article::new("c", 20.0, 3)
            .unwrap()
            .with_purchase_date(days_ago(91));
        assert_eq!(suggested_price(&stale, today(), &rules).amount(), 30.0);

        let undated = Article::new("d", 20.0, 3).unwrap();
        assert_eq!(suggested_price(&undated, today(), &rules).amount(), 60.0);
    }

    #[test]
    fn test_evaluate_article_matches_primitives() {
        let config = AnalyticsConfig::default();
        let article = Article::new("a", 10.0, 4)
            .unwrap()
            .with_purchase_date(days_ago(20))
            .with_sales([sold_days_ago("s1", 20.0, 12), sold_days_ago("s2", 16.0, 8)]);

        let metrics = evaluate_article(&article, today(), &config);
        assert_eq!(metrics.article_id, "a");
        assert_eq!(metrics.remaining, 2);
        assert_eq!(metrics.unit_margin.amount(), 6.0);
        assert_eq!(metrics.total_benefit.amount(), 16.0);
        assert_eq!(metrics.average_margin.amount(), 8.0);
        assert_eq!(metrics.margin_score, 80.0);
        assert_eq!(metrics.speed_score, 80);
        assert_eq!(metrics.rentability_score, 40);
        assert_eq!(metrics.overall_score, overall_score(&article, today(), &config));
        assert_eq!(metrics.suggested_price.amount(), 18.0);
    }
}
