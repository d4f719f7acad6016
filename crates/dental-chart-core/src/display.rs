//! Derived display values: badge tones, cost and date strings.

use std::fmt::Write;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::DisplayConfig;
use crate::models::{HealthLevel, Stage};

/// Badge color keyed by a health level or stage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Green,
    Blue,
    Yellow,
    Purple,
    Red,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Green => "green",
            Tone::Blue => "blue",
            Tone::Yellow => "yellow",
            Tone::Purple => "purple",
            Tone::Red => "red",
        }
    }
}

impl HealthLevel {
    pub fn tone(&self) -> Tone {
        match self {
            HealthLevel::Excellent => Tone::Green,
            HealthLevel::Good => Tone::Blue,
            HealthLevel::Fair => Tone::Yellow,
            HealthLevel::Poor => Tone::Red,
        }
    }
}

impl Stage {
    pub fn tone(&self) -> Tone {
        match self {
            Stage::PreOp => Tone::Yellow,
            Stage::Procedure => Tone::Blue,
            Stage::FollowUp => Tone::Purple,
            Stage::Completed => Tone::Green,
        }
    }
}

/// Format a cost with the currency symbol and digit grouping.
///
/// Fractional digits are rounded to `max_fraction_digits` and trailing zeros
/// are dropped, so `1234.5` renders as `$1,234.5` and `1500.0` as `$1,500`.
pub fn format_cost(amount: f64, config: &DisplayConfig) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let digits = config.max_fraction_digits.min(9);
    let scale = 10u128.pow(digits);
    let scaled = (amount.abs() * scale as f64).round() as u128;

    let int_part = scaled / scale;
    let frac_part = scaled % scale;

    let mut out = String::new();
    out.push_str(&config.currency_symbol);
    if amount < 0.0 && scaled > 0 {
        out.push('-');
    }
    out.push_str(&group_digits(int_part, &config.thousands_separator));

    if digits > 0 && frac_part > 0 {
        let frac = format!("{:0width$}", frac_part, width = digits as usize);
        out.push_str(&config.decimal_separator);
        out.push_str(frac.trim_end_matches('0'));
    }
    out
}

fn group_digits(value: u128, separator: &str) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(ch);
    }
    grouped
}

/// Parse a record date: `YYYY-MM-DD`, or an RFC 3339 timestamp's calendar date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

/// Format a record date with the locale pattern. Unparseable input is
/// returned verbatim.
pub fn format_date(value: &str, config: &DisplayConfig) -> String {
    let Some(date) = parse_date(value) else {
        tracing::debug!(value, "unparseable date shown verbatim");
        return value.to_string();
    };

    let mut out = String::new();
    if write!(out, "{}", date.format(&config.date_format)).is_err() {
        tracing::warn!(pattern = %config.date_format, "invalid date pattern, using ISO format");
        return date.format("%Y-%m-%d").to_string();
    }
    out
}
