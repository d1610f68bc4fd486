//! # Temporal Comparisons
//!
//! Period-over-period deltas, computed by re-running an aggregate over a
//! time-shifted slice of the same snapshot.
//!
//! ## Stock Value Growth
//! ```text
//!   past stock state = "un-sell" every sale from the lookback window
//!
//!   ──────────────┬───────────────────────┬──────►  time
//!                 │◄──── lookback_days ──►│
//!              cutoff                   today
//!   sales before cutoff: counted in both values
//!   sales on/after cutoff: counted only in the current value
//! ```
//!
//! ## Undefined results
//! A growth percentage needs a non-zero baseline. When the baseline is zero
//! the result is `None`, never `0`, `NaN` or `Infinity`. Month-over-month
//! revenue can opt back into the historical "divide by one" behavior via
//! [`ZeroBaseline::SubstituteOne`].

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::aggregate::{stock_value_counting, total_stock_value};
use crate::money::Money;
use crate::types::{Article, GrowthComparison, Sale};

/// Label shown when there is no best weekday to report.
pub const NO_WEEKDAY_LABEL: &str = "-";

// =============================================================================
// Policies
// =============================================================================

/// What month-over-month growth does when the previous month earned nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroBaseline {
    /// Divide by 1 instead of 0: 0 → 50 reports +5000%.
    #[default]
    SubstituteOne,
    /// Report no percentage at all.
    Undefined,
}

/// Language of weekday labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekdayLocale {
    #[default]
    English,
    French,
}

// =============================================================================
// Stock Value Growth
// =============================================================================

/// Current stock value against the stock value `lookback_days` ago.
///
/// The past value counts only sales whose UTC day falls before
/// `today - lookback_days`. `percent_change` is relative to `|past|` and is
/// `None` when the past value is zero.
///
/// ## Example
/// ```rust
/// use chrono::{NaiveDate, TimeZone, Utc};
/// use resell_core::{temporal, Article, Sale};
///
/// let today = NaiveDate::from_ymd_opt(2026, 2, 20).unwrap();
/// let yesterday = Utc.with_ymd_and_hms(2026, 2, 19, 15, 0, 0).unwrap();
/// let articles = vec![Article::new("a", 10.0, 4)
///     .unwrap()
///     .with_sale(Sale::new("s", 30.0, yesterday).unwrap())];
///
/// let growth = temporal::stock_value_growth(&articles, today, 7);
/// assert_eq!(growth.current_value.amount(), 30.0);
/// assert_eq!(growth.previous_value.amount(), 40.0);
/// assert_eq!(growth.percent_change, Some(-25.0));
/// ```
pub fn stock_value_growth(
    articles: &[Article],
    today: NaiveDate,
    lookback_days: u32,
) -> GrowthComparison {
    let cutoff = today - Duration::days(i64::from(lookback_days));

    let current = total_stock_value(articles);
    let past = stock_value_counting(articles, |sale| sale.sale_day() < cutoff);

    GrowthComparison {
        current_value: current,
        previous_value: past,
        percent_change: (current - past)
            .ratio_to(past.abs())
            .map(|ratio| ratio * 100.0),
    }
}

// =============================================================================
// Revenue Growth
// =============================================================================

/// Revenue per calendar month `(year, month)`, oldest first.
pub fn monthly_revenue<'a>(sales: impl IntoIterator<Item = &'a Sale>) -> BTreeMap<(i32, u32), Money> {
    let mut months = BTreeMap::new();
    for sale in sales {
        let day = sale.sale_day();
        *months
            .entry((day.year(), day.month()))
            .or_insert_with(Money::zero) += sale.sale_price();
    }
    months
}

/// Revenue of the month containing `today` against the month before.
///
/// ## Zero baseline
/// ```text
/// previous > 0          → (current - previous) / previous × 100
/// previous == 0, SubstituteOne → (current - 0) / 1 × 100
/// previous == 0, Undefined     → None
/// ```
pub fn revenue_growth_month_over_month<'a>(
    sales: impl IntoIterator<Item = &'a Sale>,
    today: NaiveDate,
    zero_baseline: ZeroBaseline,
) -> GrowthComparison {
    let months = monthly_revenue(sales);
    let current_key = (today.year(), today.month());
    let previous_key = previous_month(current_key);

    let current = months.get(&current_key).copied().unwrap_or_default();
    let previous = months.get(&previous_key).copied().unwrap_or_default();

    let percent_change = match (previous.is_zero(), zero_baseline) {
        (false, _) => (current - previous).ratio_to(previous).map(|r| r * 100.0),
        (true, ZeroBaseline::SubstituteOne) => Some((current - previous).amount() * 100.0),
        (true, ZeroBaseline::Undefined) => None,
    };

    GrowthComparison {
        current_value: current,
        previous_value: previous,
        percent_change,
    }
}

fn previous_month((year, month): (i32, u32)) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

// =============================================================================
// Weekday Activity
// =============================================================================

/// Weekday with the most sales. Ties go to the weekday met first in
/// iteration order; `None` when there are no sales.
pub fn best_active_weekday<'a>(sales: impl IntoIterator<Item = &'a Sale>) -> Option<Weekday> {
    let mut counts: Vec<(Weekday, usize)> = Vec::with_capacity(7);
    for sale in sales {
        let weekday = sale.sale_day().weekday();
        match counts.iter_mut().find(|(day, _)| *day == weekday) {
            Some((_, count)) => *count += 1,
            None => counts.push((weekday, 1)),
        }
    }

    let mut best: Option<(Weekday, usize)> = None;
    for (weekday, count) in counts {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((weekday, count));
        }
    }
    best.map(|(weekday, _)| weekday)
}

/// Localized weekday name, or [`NO_WEEKDAY_LABEL`] for `None`.
pub fn weekday_label(weekday: Option<Weekday>, locale: WeekdayLocale) -> &'static str {
    const ENGLISH: [&str; 7] = [
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
        "Sunday",
    ];
    const FRENCH: [&str; 7] = [
        "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi", "dimanche",
    ];

    let Some(weekday) = weekday else {
        return NO_WEEKDAY_LABEL;
    };
    let index = weekday.num_days_from_monday() as usize;
    match locale {
        WeekdayLocale::English => ENGLISH[index],
        WeekdayLocale::French => FRENCH[index],
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sale_on(id: &str, price: f64, y: i32, m: u32, d: u32) -> Sale {
        Sale::new(id, price, Utc.with_ymd_and_hms(y, m, d, 14, 30, 0).unwrap()).unwrap()
    }

    #[test]
    fn test_stock_growth_cutoff_is_inclusive() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        let articles = vec![Article::new("a", 10.0, 5).unwrap().with_sales([
            sale_on("before", 20.0, 2026, 3, 7), // stays sold in the past state
            sale_on("on-cutoff", 20.0, 2026, 3, 8),
            sale_on("recent", 20.0, 2026, 3, 14),
        ])];

        let growth = stock_value_growth(&articles, today, 7);
        assert_eq!(growth.current_value.amount(), 20.0);
        assert_eq!(growth.previous_value.amount(), 40.0);
        assert_eq!(growth.percent_change, Some(-50.0));
    }

    #[test]
    fn test_stock_growth_zero_past_is_undefined() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        assert_eq!(stock_value_growth(&[], today, 7).percent_change, None);

        let free = vec![Article::new("free", 0.0, 4).unwrap()];
        let growth = stock_value_growth(&free, today, 7);
        assert!(growth.previous_value.is_zero());
        assert_eq!(growth.percent_change, None);
    }

    #[test]
    fn test_stock_growth_uses_absolute_past_value() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        // Oversold by one before the window, by two now.
        let articles = vec![Article::new("over", 10.0, 1).unwrap().with_sales([
            sale_on("s1", 5.0, 2026, 3, 1),
            sale_on("s2", 5.0, 2026, 3, 2),
            sale_on("s3", 5.0, 2026, 3, 14),
        ])];

        let growth = stock_value_growth(&articles, today, 7);
        assert_eq!(growth.previous_value.amount(), -10.0);
        assert_eq!(growth.current_value.amount(), -20.0);
        assert_eq!(growth.percent_change, Some(-100.0));
    }

    #[test]
    fn test_revenue_growth_regular() {
        let today = NaiveDate::from_ymd_opt(2026, 5, 18).unwrap();
        let sales = [
            sale_on("apr-1", 40.0, 2026, 4, 2),
            sale_on("apr-2", 60.0, 2026, 4, 29),
            sale_on("may-1", 150.0, 2026, 5, 3),
            sale_on("mar-1", 999.0, 2026, 3, 3),
        ];

        let growth = revenue_growth_month_over_month(&sales, today, ZeroBaseline::Undefined);
        assert_eq!(growth.previous_value.amount(), 100.0);
        assert_eq!(growth.current_value.amount(), 150.0);
        assert_eq!(growth.percent_change, Some(50.0));
    }

    #[test]
    fn test_revenue_growth_crosses_year_boundary() {
        let today = NaiveDate::from_ymd_opt(2027, 1, 10).unwrap();
        let sales = [
            sale_on("dec", 80.0, 2026, 12, 31),
            sale_on("jan", 40.0, 2027, 1, 2),
        ];

        let growth = revenue_growth_month_over_month(&sales, today, ZeroBaseline::SubstituteOne);
        assert_eq!(growth.percent_change, Some(-50.0));
    }

    #[test]
    fn test_revenue_growth_zero_baseline_policies() {
        let today = NaiveDate::from_ymd_opt(2026, 5, 18).unwrap();
        let sales = [sale_on("may", 50.0, 2026, 5, 2)];

        let quirk = revenue_growth_month_over_month(&sales, today, ZeroBaseline::SubstituteOne);
        assert_eq!(quirk.percent_change, Some(5000.0));

        let strict = revenue_growth_month_over_month(&sales, today, ZeroBaseline::Undefined);
        assert_eq!(strict.percent_change, None);
    }

    #[test]
    fn test_monthly_revenue_buckets() {
        let sales = [
            sale_on("a", 10.0, 2026, 1, 31),
            sale_on("b", 5.0, 2026, 1, 1),
            sale_on("c", 7.0, 2026, 2, 1),
        ];
        let months = monthly_revenue(&sales);
        assert_eq!(months.len(), 2);
        assert_eq!(months[&(2026, 1)].amount(), 15.0);
        assert_eq!(months[&(2026, 2)].amount(), 7.0);
    }

    #[test]
    fn test_best_weekday() {
        // 2026-06-01 is a Monday.
        let sales = [
            sale_on("tue-1", 1.0, 2026, 6, 2),
            sale_on("mon-1", 1.0, 2026, 6, 1),
            sale_on("mon-2", 1.0, 2026, 6, 8),
            sale_on("tue-2", 1.0, 2026, 6, 9),
            sale_on("fri", 1.0, 2026, 6, 5),
        ];
        // Monday and Tuesday tie at two; Tuesday was seen first.
        assert_eq!(best_active_weekday(&sales), Some(Weekday::Tue));

        let no_sales: [Sale; 0] = [];
        assert_eq!(best_active_weekday(&no_sales), None);
    }

    #[test]
    fn test_weekday_label() {
        assert_eq!(weekday_label(Some(Weekday::Sat), WeekdayLocale::English), "Saturday");
        assert_eq!(weekday_label(Some(Weekday::Wed), WeekdayLocale::French), "mercredi");
        assert_eq!(weekday_label(None, WeekdayLocale::French), NO_WEEKDAY_LABEL);
    }
}
