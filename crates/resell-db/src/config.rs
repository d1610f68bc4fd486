//! # Application Configuration
//!
//! Settings shared by the `seed` and `report` binaries: where the database
//! lives, which plan the dashboard is built for, and the analytics
//! thresholds.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     RESELL_DATABASE_PATH=./dev.db                                      │
//! │     RESELL_PLAN=pro                                                    │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/resell-desk/resell.toml (Linux)                          │
//! │     ~/Library/Application Support/com.resell.desk/resell.toml (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! plan = "pro"
//!
//! [database]
//! path = "./resell.db"
//! max_connections = 5
//!
//! [analytics]
//! top_seller_min_benefit = 30.0
//! critical_stock_threshold = 3
//! revenue_zero_baseline = "substitute_one"   # or "undefined"
//! weekday_locale = "french"
//!
//! [analytics.weights]
//! margin = 0.3
//! speed = 0.3
//! rentability = 0.4
//! ```
//!
//! ## Environment Overrides
//! | Variable                      | Field                              |
//! |-------------------------------|------------------------------------|
//! | `RESELL_DATABASE_PATH`        | `database.path`                    |
//! | `RESELL_MAX_CONNECTIONS`      | `database.max_connections`         |
//! | `RESELL_PLAN`                 | `plan` (`free` / `pro`)            |
//! | `RESELL_TOP_N`                | `analytics.top_n`                  |
//! | `RESELL_CRITICAL_STOCK`       | `analytics.critical_stock_threshold` |
//! | `RESELL_ZERO_BASELINE`        | `analytics.revenue_zero_baseline`  |
//! | `RESELL_WEEKDAY_LOCALE`       | `analytics.weekday_locale`         |

use std::path::PathBuf;

use resell_core::{AnalyticsConfig, Plan, WeekdayLocale, ZeroBaseline};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ConfigError, ConfigResult};
use crate::pool::DbConfig;

// =============================================================================
// Database Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// SQLite file path.
    #[serde(default = "default_database_path")]
    pub path: PathBuf,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_database_path() -> PathBuf {
    directories::ProjectDirs::from("com", "resell", "desk")
        .map(|dirs| dirs.data_dir().join("resell.db"))
        .unwrap_or_else(|| PathBuf::from("./resell.db"))
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            path: default_database_path(),
            max_connections: default_max_connections(),
        }
    }
}

impl DatabaseSettings {
    /// Pool configuration for these settings.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.path).max_connections(self.max_connections)
    }
}

// =============================================================================
// Application Config
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseSettings,

    /// Plan used when none is given on the command line.
    #[serde(default)]
    pub plan: Plan,

    #[serde(default)]
    pub analytics: AnalyticsConfig,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, or the platform default location)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns the defaults if loading fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a TOML document. Missing sections and keys keep their defaults.
    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.database.path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("database.path must not be empty".into()));
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "database.max_connections must be greater than 0".into(),
            ));
        }

        self.analytics.validate()?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `RESELL_*` overrides read through `lookup`. Unparseable values
    /// are logged and ignored.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("RESELL_DATABASE_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database.path = PathBuf::from(path);
        }

        if let Some(max) = lookup("RESELL_MAX_CONNECTIONS") {
            match max.parse() {
                Ok(max) => self.database.max_connections = max,
                Err(_) => warn!(value = %max, "Invalid RESELL_MAX_CONNECTIONS"),
            }
        }

        if let Some(plan) = lookup("RESELL_PLAN") {
            match plan.to_lowercase().as_str() {
                "free" => self.plan = Plan::Free,
                "pro" => self.plan = Plan::Pro,
                _ => warn!(plan = %plan, "Unknown plan in environment"),
            }
        }

        if let Some(top_n) = lookup("RESELL_TOP_N") {
            match top_n.parse() {
                Ok(n) => self.analytics.top_n = n,
                Err(_) => warn!(value = %top_n, "Invalid RESELL_TOP_N"),
            }
        }

        if let Some(threshold) = lookup("RESELL_CRITICAL_STOCK") {
            match threshold.parse() {
                Ok(t) => self.analytics.critical_stock_threshold = t,
                Err(_) => warn!(value = %threshold, "Invalid RESELL_CRITICAL_STOCK"),
            }
        }

        if let Some(policy) = lookup("RESELL_ZERO_BASELINE") {
            match policy.to_lowercase().as_str() {
                "substitute_one" => {
                    self.analytics.revenue_zero_baseline = ZeroBaseline::SubstituteOne
                }
                "undefined" => self.analytics.revenue_zero_baseline = ZeroBaseline::Undefined,
                _ => warn!(policy = %policy, "Unknown zero-baseline policy in environment"),
            }
        }

        if let Some(locale) = lookup("RESELL_WEEKDAY_LOCALE") {
            match locale.to_lowercase().as_str() {
                "english" | "en" => self.analytics.weekday_locale = WeekdayLocale::English,
                "french" | "fr" => self.analytics.weekday_locale = WeekdayLocale::French,
                _ => warn!(locale = %locale, "Unknown weekday locale in environment"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "resell", "desk")
            .map(|dirs| dirs.config_dir().join("resell.toml"))
    }
}
