//! Display configuration and logging setup.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Default tracing filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "dental_chart_core=info";

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Locale-dependent formatting for costs and dates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    /// BCP 47 tag the other fields were derived from
    pub locale: String,
    /// Prefix for cost amounts
    pub currency_symbol: String,
    /// Digit group separator (e.g. "," or ".")
    pub thousands_separator: String,
    /// Decimal separator
    pub decimal_separator: String,
    /// chrono strftime pattern for calendar dates
    pub date_format: String,
    /// Maximum fractional digits shown for costs
    pub max_fraction_digits: u32,
    /// Tracing filter used by [`init_logging_from`] when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::for_locale("en-US")
    }
}

impl DisplayConfig {
    /// Preset for a locale tag. Unknown tags get the en-US preset.
    pub fn for_locale(locale: &str) -> Self {
        let (tag, thousands, decimal, date_format) = match locale {
            "en-GB" => ("en-GB", ",", ".", "%d/%m/%Y"),
            "de-DE" => ("de-DE", ".", ",", "%d.%m.%Y"),
            "fr-FR" => ("fr-FR", "\u{202f}", ",", "%d/%m/%Y"),
            _ => ("en-US", ",", ".", "%-m/%-d/%Y"),
        };
        Self {
            locale: tag.to_string(),
            currency_symbol: "$".to_string(),
            thousands_separator: thousands.to_string(),
            decimal_separator: decimal.to_string(),
            date_format: date_format.to_string(),
            max_fraction_digits: 3,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

/// Load a display config from a JSON file. Missing fields take en-US defaults.
pub fn load_config<P: AsRef<Path>>(path: P) -> ConfigResult<DisplayConfig> {
    let contents = std::fs::read_to_string(path)?;
    let config = serde_json::from_str(&contents)?;
    Ok(config)
}

/// Install the global tracing subscriber with the config's `log_filter`.
pub fn init_logging_from(config: &DisplayConfig) {
    init_logging(&config.log_filter);
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over `filter`. Calling this more than once is harmless.
pub fn init_logging(filter: &str) {
    let result = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .try_init();

    if result.is_ok() {
        tracing::debug!(filter, "logging initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_is_en_us() {
        let config = DisplayConfig::default();
        assert_eq!(config.locale, "en-US");
        assert_eq!(config.thousands_separator, ",");
        assert_eq!(config.max_fraction_digits, 3);
    }

    #[test]
    fn test_unknown_locale_falls_back() {
        assert_eq!(DisplayConfig::for_locale("xx-YY").locale, "en-US");
        assert_eq!(DisplayConfig::for_locale("de-DE").decimal_separator, ",");
    }

    #[test]
    fn test_load_partial_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"currency_symbol": "€", "date_format": "%Y-%m-%d"}}"#).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.currency_symbol, "€");
        assert_eq!(config.date_format, "%Y-%m-%d");
        assert_eq!(config.thousands_separator, ",");
    }

    #[test]
    fn test_load_config_log_filter() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"log_filter": "dental_chart_core=debug"}}"#).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.log_filter, "dental_chart_core=debug");
        assert_eq!(config.locale, "en-US");
        assert!(config.log_filter.parse::<EnvFilter>().is_ok());
        init_logging_from(&config);
    }

    #[test]
    fn test_load_invalid_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(load_config(file.path()), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_init_logging_twice() {
        init_logging(DEFAULT_LOG_FILTER);
        init_logging("debug");
    }
}
