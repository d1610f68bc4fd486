//! # Analytics Configuration
//!
//! Every business threshold used by the engine, with named defaults.
//!
//! ## Configuration File Format
//! The data layer loads this struct from the `[analytics]` table of
//! `resell.toml`; every key is optional and falls back to the constant
//! documented below.
//! ```toml
//! [analytics]
//! top_seller_min_benefit = 30.0
//! critical_stock_threshold = 3
//! top_n = 5
//! flash_sale_window_days = 7
//! stock_growth_lookback_days = 7
//! revenue_zero_baseline = "substitute_one"   # or "undefined"
//! weekday_locale = "english"                  # or "french"
//!
//! [analytics.weights]
//! margin = 0.3
//! speed = 0.3
//! rentability = 0.4
//!
//! [analytics.pricing]
//! markup = 3.0
//! stale_markup = 1.5
//! stale_after_days = 90
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::temporal::{WeekdayLocale, ZeroBaseline};

// =============================================================================
// Named Defaults
// =============================================================================

/// Cumulative benefit an article must exceed to earn the top-seller badge.
pub const TOP_SELLER_MIN_BENEFIT: f64 = 30.0;

/// Articles with fewer remaining units than this are critical.
pub const CRITICAL_STOCK_THRESHOLD: i64 = 3;

/// Size of the top-by-profit ranking.
pub const TOP_N_DEFAULT: usize = 5;

/// A sale within this many days of purchase (inclusive) is a flash sale.
pub const FLASH_SALE_WINDOW_DAYS: u32 = 7;

/// How far back the stock value growth comparison looks.
pub const STOCK_GROWTH_LOOKBACK_DAYS: u32 = 7;

/// Unsold stock older than this is priced with the stale markup.
pub const STALE_STOCK_DAYS: i64 = 90;

/// Suggested price multiplier for unsold stock.
pub const SUGGESTED_MARKUP: f64 = 3.0;

/// Suggested price multiplier once unsold stock is stale.
pub const STALE_MARKUP: f64 = 1.5;

pub const MARGIN_WEIGHT: f64 = 0.3;
pub const SPEED_WEIGHT: f64 = 0.3;
pub const RENTABILITY_WEIGHT: f64 = 0.4;

// =============================================================================
// Score Bands
// =============================================================================

/// One step of a threshold table: `score` applies when the measured value
/// crosses `limit`. The direction of the comparison belongs to the table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBand<T> {
    pub limit: T,
    pub score: u8,
}

impl<T> ScoreBand<T> {
    pub const fn new(limit: T, score: u8) -> Self {
        ScoreBand { limit, score }
    }
}

/// Sale-speed scoring.
///
/// ```text
/// 2+ sales   mean gap between sales (days)
///            <=2 → 100   <=5 → 80   <=10 → 60   <=30 → 40   else → 20
///
/// 0 sales    days since purchase
///            >90 → 10    >30 → 30   else → 50
///
/// otherwise  0 (no signal)
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedScoring {
    /// Ascending limits; first band with `mean_gap <= limit` wins.
    pub gap_bands: Vec<ScoreBand<f64>>,
    /// Mean gap above every band.
    pub slow_seller_score: u8,
    /// Descending limits; first band with `elapsed > limit` wins.
    pub idle_bands: Vec<ScoreBand<i64>>,
    /// Unsold but recently bought.
    pub fresh_stock_score: u8,
}

impl Default for SpeedScoring {
    fn default() -> Self {
        SpeedScoring {
            gap_bands: vec![
                ScoreBand::new(2.0, 100),
                ScoreBand::new(5.0, 80),
                ScoreBand::new(10.0, 60),
                ScoreBand::new(30.0, 40),
            ],
            slow_seller_score: 20,
            idle_bands: vec![ScoreBand::new(90, 10), ScoreBand::new(30, 30)],
            fresh_stock_score: 50,
        }
    }
}

/// Benefit-per-day scoring.
///
/// ```text
/// >=3 → 100   >=2 → 80   >=1 → 60   >0 → 40   else → 0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RentabilityScoring {
    /// Descending limits; first tier with `per_day >= limit` wins.
    pub tiers: Vec<ScoreBand<f64>>,
    /// Any positive benefit per day below every tier.
    pub profitable_score: u8,
}

impl Default for RentabilityScoring {
    fn default() -> Self {
        RentabilityScoring {
            tiers: vec![
                ScoreBand::new(3.0, 100),
                ScoreBand::new(2.0, 80),
                ScoreBand::new(1.0, 60),
            ],
            profitable_score: 40,
        }
    }
}

/// Weights of the overall profitability score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub margin: f64,
    pub speed: f64,
    pub rentability: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        ScoreWeights {
            margin: MARGIN_WEIGHT,
            speed: SPEED_WEIGHT,
            rentability: RENTABILITY_WEIGHT,
        }
    }
}

/// Suggested-price rules for articles without sales.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingRules {
    pub markup: f64,
    pub stale_markup: f64,
    pub stale_after_days: i64,
}

impl Default for PricingRules {
    fn default() -> Self {
        PricingRules {
            markup: SUGGESTED_MARKUP,
            stale_markup: STALE_MARKUP,
            stale_after_days: STALE_STOCK_DAYS,
        }
    }
}

// =============================================================================
// Analytics Configuration
// =============================================================================

/// Complete set of tunable engine thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub top_seller_min_benefit: f64,
    pub critical_stock_threshold: i64,
    pub top_n: usize,
    pub flash_sale_window_days: u32,
    pub stock_growth_lookback_days: u32,
    pub revenue_zero_baseline: ZeroBaseline,
    pub weekday_locale: WeekdayLocale,
    pub weights: ScoreWeights,
    pub speed: SpeedScoring,
    pub rentability: RentabilityScoring,
    pub pricing: PricingRules,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        AnalyticsConfig {
            top_seller_min_benefit: TOP_SELLER_MIN_BENEFIT,
            critical_stock_threshold: CRITICAL_STOCK_THRESHOLD,
            top_n: TOP_N_DEFAULT,
            flash_sale_window_days: FLASH_SALE_WINDOW_DAYS,
            stock_growth_lookback_days: STOCK_GROWTH_LOOKBACK_DAYS,
            revenue_zero_baseline: ZeroBaseline::default(),
            weekday_locale: WeekdayLocale::default(),
            weights: ScoreWeights::default(),
            speed: SpeedScoring::default(),
            rentability: RentabilityScoring::default(),
            pricing: PricingRules::default(),
        }
    }
}

impl AnalyticsConfig {
    /// Checks that every threshold is usable.
    ///
    /// ## Rules
    /// - weights, markups and benefit threshold are finite, non-negative
    /// - band tables are non-empty, correctly ordered, scores within 0..=100
    /// - window and lookback day counts are positive
    pub fn validate(&self) -> CoreResult<()> {
        let w = &self.weights;
        for (name, value) in [
            ("weights.margin", w.margin),
            ("weights.speed", w.speed),
            ("weights.rentability", w.rentability),
            ("pricing.markup", self.pricing.markup),
            ("pricing.stale_markup", self.pricing.stale_markup),
            ("top_seller_min_benefit", self.top_seller_min_benefit),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(format!(
                    "{name} must be a finite non-negative number, got {value}"
                )));
            }
        }

        if self.flash_sale_window_days == 0 {
            return Err(invalid("flash_sale_window_days must be positive"));
        }
        if self.stock_growth_lookback_days == 0 {
            return Err(invalid("stock_growth_lookback_days must be positive"));
        }
        if self.pricing.stale_after_days < 0 {
            return Err(invalid("pricing.stale_after_days must not be negative"));
        }

        check_bands(
            "speed.gap_bands",
            &self.speed.gap_bands,
            |prev, next| prev < next,
        )?;
        check_bands(
            "speed.idle_bands",
            &self.speed.idle_bands,
            |prev, next| prev > next,
        )?;
        check_bands(
            "rentability.tiers",
            &self.rentability.tiers,
            |prev, next| prev > next,
        )?;

        for (name, score) in [
            ("speed.slow_seller_score", self.speed.slow_seller_score),
            ("speed.fresh_stock_score", self.speed.fresh_stock_score),
            (
                "rentability.profitable_score",
                self.rentability.profitable_score,
            ),
        ] {
            check_score(name, score)?;
        }

        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> CoreError {
    CoreError::InvalidConfig(message.into())
}

fn check_score(name: &str, score: u8) -> CoreResult<()> {
    if score > 100 {
        return Err(invalid(format!("{name} must be at most 100, got {score}")));
    }
    Ok(())
}

fn check_bands<T>(
    name: &str,
    bands: &[ScoreBand<T>],
    ordered: impl Fn(&T, &T) -> bool,
) -> CoreResult<()>
where
    T: PartialOrd + std::fmt::Debug,
{
    if bands.is_empty() {
        return Err(invalid(format!("{name} must not be empty")));
    }

    for band in bands {
        // NaN limits fail their own comparison.
        if band.limit.partial_cmp(&band.limit).is_none() {
            return Err(invalid(format!("{name} contains a non-finite limit")));
        }
        check_score(name, band.score)?;
    }

    for pair in bands.windows(2) {
        if !ordered(&pair[0].limit, &pair[1].limit) {
            return Err(invalid(format!(
                "{name} limits out of order: {:?} then {:?}",
                pair[0].limit, pair[1].limit
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AnalyticsConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.top_seller_min_benefit, 30.0);
        assert_eq!(config.critical_stock_threshold, 3);
        assert_eq!(config.top_n, 5);
        assert_eq!(config.revenue_zero_baseline, ZeroBaseline::SubstituteOne);
    }

    #[test]
    fn test_rejects_negative_weight() {
        let mut config = AnalyticsConfig::default();
        config.weights.speed = -0.1;
        assert!(matches!(
            config.validate(),
            Err(CoreError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_unordered_bands() {
        let mut config = AnalyticsConfig::default();
        config.speed.gap_bands = vec![ScoreBand::new(5.0, 80), ScoreBand::new(2.0, 100)];
        assert!(config.validate().is_err());

        let mut config = AnalyticsConfig::default();
        config.rentability.tiers = vec![];
        assert!(config.validate().is_err());

        let mut config = AnalyticsConfig::default();
        config.rentability.tiers = vec![ScoreBand::new(f64::NAN, 100)];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_windows() {
        let mut config = AnalyticsConfig::default();
        config.stock_growth_lookback_days = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config: AnalyticsConfig = toml::from_str(
            r#"
            top_n = 10
            revenue_zero_baseline = "undefined"

            [weights]
            margin = 0.5
            "#,
        )
        .unwrap();

        assert_eq!(config.top_n, 10);
        assert_eq!(config.revenue_zero_baseline, ZeroBaseline::Undefined);
        assert_eq!(config.weights.margin, 0.5);
        assert_eq!(config.weights.rentability, RENTABILITY_WEIGHT);
        assert_eq!(config.speed, SpeedScoring::default());
    }
}
