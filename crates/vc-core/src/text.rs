//! # Text Formatting
//!
//! Display helpers shared by invoices, notifications, and listings.
//! Currency and date output is driven by [`LocaleSettings`] rather than a
//! hardcoded locale; [`LocaleSettings::en_au()`] is the marketplace default.

use std::fmt::Write as _;

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Locale-specific formatting rules for money and dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocaleSettings {
    /// BCP 47 tag, informational (e.g. `en-AU`).
    pub locale: String,
    /// ISO 4217 currency code (e.g. `AUD`).
    pub currency_code: String,
    /// Symbol printed before the amount.
    pub currency_symbol: String,
    /// Separator between groups of three integer digits.
    pub thousands_separator: String,
    /// Separator before the cents.
    pub decimal_separator: String,
    /// `strftime`-style pattern for dates.
    pub date_format: String,
}

impl LocaleSettings {
    /// Australian English with Australian dollars.
    pub fn en_au() -> Self {
        Self {
            locale: "en-AU".to_string(),
            currency_code: "AUD".to_string(),
            currency_symbol: "$".to_string(),
            thousands_separator: ",".to_string(),
            decimal_separator: ".".to_string(),
            date_format: "%-d %b %Y".to_string(),
        }
    }

    /// Reject date patterns chrono cannot render.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(ValidationError::InvalidPolicy(format!(
                "date_format {:?} is not a valid strftime pattern",
                self.date_format
            )));
        }
        Ok(())
    }
}

impl Default for LocaleSettings {
    fn default() -> Self {
        Self::en_au()
    }
}

/// Format `amount` as money with two decimal places, e.g. `$1,234.50`.
///
/// Negative amounts carry a leading minus: `-$12.00`. Non-finite amounts
/// keep the same sign placement: `-$inf`, `$NaN`.
pub fn format_currency(amount: f64, locale: &LocaleSettings) -> String {
    if !amount.is_finite() {
        let sign = if amount < 0.0 { "-" } else { "" };
        return format!("{sign}{}{}", locale.currency_symbol, amount.abs());
    }

    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push_str(&locale.thousands_separator);
        }
        grouped.push(ch);
    }

    let negative = amount < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0');
    format!(
        "{}{}{}{}{}",
        if negative { "-" } else { "" },
        locale.currency_symbol,
        grouped,
        locale.decimal_separator,
        cents
    )
}

/// Format `date` with the locale's pattern, e.g. `5 Mar 2026` for en-AU.
///
/// Falls back to ISO 8601 if the pattern cannot be rendered.
pub fn format_date(date: NaiveDate, locale: &LocaleSettings) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(&locale.date_format)).is_err() {
        tracing::warn!(pattern = %locale.date_format, "unrenderable date pattern, using ISO 8601");
        return date.format("%Y-%m-%d").to_string();
    }
    out
}

/// URL-safe slug: `"Hello, World!  Test_Case"` becomes `hello-world-test-case`.
///
/// Lowercases, drops everything except ASCII word characters, whitespace,
/// and hyphens, collapses runs of whitespace, underscores, and hyphens into
/// one hyphen, and trims hyphens from both ends.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut pending_separator = false;

    for ch in lowered.chars() {
        if ch.is_whitespace() || ch == '_' || ch == '-' {
            pending_separator = true;
        } else if ch.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(ch);
        }
    }
    slug
}

/// Cut `text` to at most `length` characters, appending `...` if cut.
///
/// Whitespace left dangling at the cut point is trimmed before the ellipsis.
pub fn truncate(text: &str, length: usize) -> String {
    if text.chars().count() <= length {
        return text.to_string();
    }
    let cut: String = text.chars().take(length).collect();
    format!("{}...", cut.trim_end())
}

/// Uppercased first letter of each name: `("jane", "citizen")` gives `JC`.
pub fn initials(first_name: &str, last_name: &str) -> String {
    first_name
        .chars()
        .take(1)
        .chain(last_name.chars().take(1))
        .flat_map(char::to_uppercase)
        .collect()
}
