//! # Badge Rules
//!
//! Boolean classifications shown next to an article.
//!
//! ```text
//! TOP SELLER   total benefit > 30
//! FLASH SALE   some sale landed 0..=7 days after the purchase date
//! ```
//!
//! Both thresholds come from [`AnalyticsConfig`]; the numbers above are the
//! defaults.

use crate::config::AnalyticsConfig;
use crate::metrics::total_benefit;
use crate::types::{Article, ArticleBadges};

/// True when the article's cumulative benefit is strictly above `min_benefit`.
pub fn is_top_seller(article: &Article, min_benefit: f64) -> bool {
    total_benefit(article).amount() > min_benefit
}

/// True when the article has a purchase date and at least one sale whose
/// UTC day is between 0 and `window_days` days after it, both ends included.
///
/// ## Example
/// ```rust
/// use chrono::{NaiveDate, TimeZone, Utc};
/// use resell_core::{classify, Article, Sale};
///
/// let bought = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
/// let quick = Utc.with_ymd_and_hms(2026, 9, 4, 18, 0, 0).unwrap();
/// let article = Article::new("a", 5.0, 2)
///     .unwrap()
///     .with_purchase_date(bought)
///     .with_sale(Sale::new("s", 9.0, quick).unwrap());
///
/// assert!(classify::is_flash_sale(&article, 7));
/// ```
pub fn is_flash_sale(article: &Article, window_days: u32) -> bool {
    let Some(purchased) = article.purchase_date() else {
        return false;
    };

    article.sales().iter().any(|sale| {
        let days = (sale.sale_day() - purchased).num_days();
        (0..=i64::from(window_days)).contains(&days)
    })
}

/// Evaluates every badge for one article.
pub fn badges(article: &Article, config: &AnalyticsConfig) -> ArticleBadges {
    ArticleBadges {
        top_seller: is_top_seller(article, config.top_seller_min_benefit),
        flash_sale: is_flash_sale(article, config.flash_sale_window_days),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Sale;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn purchased() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 7, 10).unwrap()
    }

    fn sale_on(id: &str, price: f64, day: u32) -> Sale {
        Sale::new(id, price, Utc.with_ymd_and_hms(2026, 7, day, 9, 0, 0).unwrap()).unwrap()
    }

    #[test]
    fn test_top_seller_threshold_is_strict() {
        let exactly = Article::new("a", 10.0, 3)
            .unwrap()
            .with_sales([sale_on("s1", 25.0, 11), sale_on("s2", 25.0, 12)]);
        assert!(!is_top_seller(&exactly, 30.0));

        let above = exactly.with_sale(sale_on("s3", 10.5, 13));
        assert!(is_top_seller(&above, 30.0));
    }

    #[test]
    fn test_flash_sale_window_bounds() {
        let base = Article::new("a", 1.0, 3).unwrap().with_purchase_date(purchased());

        let same_day = base.clone().with_sale(sale_on("s", 2.0, 10));
        assert!(is_flash_sale(&same_day, 7));

        let last_day = base.clone().with_sale(sale_on("s", 2.0, 17));
        assert!(is_flash_sale(&last_day, 7));

        let too_late = base.clone().with_sale(sale_on("s", 2.0, 18));
        assert!(!is_flash_sale(&too_late, 7));

        let before_purchase = base.with_sale(sale_on("s", 2.0, 9));
        assert!(!is_flash_sale(&before_purchase, 7));
    }

    #[test]
    fn test_flash_sale_needs_purchase_date() {
        let undated = Article::new("a", 1.0, 3)
            .unwrap()
            .with_sale(sale_on("s", 2.0, 10));
        assert!(!is_flash_sale(&undated, 7));
    }

    #[test]
    fn test_badges_use_config() {
        let article = Article::new("a", 1.0, 3)
            .unwrap()
            .with_purchase_date(purchased())
            .with_sale(sale_on("s", 12.0, 20));

        let defaults = badges(&article, &AnalyticsConfig::default());
        assert_eq!(defaults, ArticleBadges::default());

        let config = AnalyticsConfig {
            top_seller_min_benefit: 10.0,
            flash_sale_window_days: 14,
            ..AnalyticsConfig::default()
        };
        let relaxed = badges(&article, &config);
        assert!(relaxed.top_seller);
        assert!(relaxed.flash_sale);
    }
}
