//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SHELF_PAGE_SIZE` - Products per list page (default: 10)
//! - `SHELF_URGENT_DAYS` - Last day of the urgent tier (default: 3)
//! - `SHELF_WARNING_DAYS` - Last day of the warning tier (default: 7)
//! - `SHELF_EXPIRING_SOON_DAYS` - Last day of the expiring-soon status (default: 7)
//! - `SHELF_BUSINESS_NAME` - Name used in email headings (default: "Your business")

use shelf_life_core::{ThresholdError, Thresholds};
use thiserror::Error;

const DEFAULT_PAGE_SIZE: usize = 10;
const DEFAULT_BUSINESS_NAME: &str = "Your business";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Invalid thresholds: {0}")]
    Thresholds(#[from] ThresholdError),
}

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Default page size for `list`
    pub page_size: usize,
    /// Freshness thresholds for both conventions
    pub thresholds: Thresholds,
    /// Business name shown in emails
    pub business_name: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            thresholds: Thresholds::default(),
            business_name: DEFAULT_BUSINESS_NAME.to_string(),
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but can't be parsed, or if
    /// the thresholds are inconsistent.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`CliConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let page_size: usize = parse_or_default(&lookup, "SHELF_PAGE_SIZE", DEFAULT_PAGE_SIZE)?;
        if page_size == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "SHELF_PAGE_SIZE".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        let thresholds = Thresholds::new(
            parse_or_default(&lookup, "SHELF_URGENT_DAYS", Thresholds::DEFAULT_URGENT_DAYS)?,
            parse_or_default(&lookup, "SHELF_WARNING_DAYS", Thresholds::DEFAULT_WARNING_DAYS)?,
            parse_or_default(
                &lookup,
                "SHELF_EXPIRING_SOON_DAYS",
                Thresholds::DEFAULT_EXPIRING_SOON_DAYS,
            )?,
        )?;

        let business_name = lookup("SHELF_BUSINESS_NAME")
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_BUSINESS_NAME.to_string());

        Ok(Self {
            page_size,
            thresholds,
            business_name,
        })
    }
}

/// Parse an optional variable, falling back to `default` when unset.
fn parse_or_default<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        None => Ok(default),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<CliConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        CliConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.page_size, 10);
        assert_eq!(config.thresholds.urgent_days(), 3);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("SHELF_PAGE_SIZE", "25"),
            ("SHELF_URGENT_DAYS", "1"),
            ("SHELF_WARNING_DAYS", "5"),
            ("SHELF_EXPIRING_SOON_DAYS", " 14 "),
            ("SHELF_BUSINESS_NAME", "Corner Deli"),
        ])
        .unwrap();
        assert_eq!(config.page_size, 25);
        assert_eq!(config.thresholds.warning_days(), 5);
        assert_eq!(config.thresholds.expiring_soon_days(), 14);
        assert_eq!(config.business_name, "Corner Deli");
    }

    #[test]
    fn test_invalid_number() {
        let err = load(&[("SHELF_PAGE_SIZE", "ten")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "SHELF_PAGE_SIZE"));
    }

    #[test]
    fn test_zero_page_size() {
        assert!(matches!(
            load(&[("SHELF_PAGE_SIZE", "0")]),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
    }

    #[test]
    fn test_inconsistent_thresholds() {
        let err = load(&[("SHELF_URGENT_DAYS", "9")]).unwrap_err();
        assert!(matches!(err, ConfigError::Thresholds(_)));
    }

    #[test]
    fn test_blank_business_name_uses_default() {
        let config = load(&[("SHELF_BUSINESS_NAME", "   ")]).unwrap();
        assert_eq!(config.business_name, "Your business");
    }
}
