//! Phone number normalization
//!
//! Turns free-text input into the canonical `+<countrycode><digits>` key used
//! to store phone records. This is a mechanical heuristic: there is no
//! carrier lookup, checksum, or per-country length validation.
//!
//! Normalization is not idempotent: `09876543210` becomes `+9876543210`,
//! which a second pass turns into `+919876543210`. Store the output and never
//! re-normalize it.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Country code applied to bare 10-digit numbers
pub const DEFAULT_COUNTRY_CODE: &str = "91";

/// Optional `+`, a digit, six or more digits/spaces/hyphens, then a digit.
/// Digits are ASCII only so every matched digit survives into the key.
const PHONE_PATTERN: &str = r"\+?[0-9][0-9\s\-]{6,}[0-9]";

static PHONE_RE: OnceLock<Option<Regex>> = OnceLock::new();

fn phone_re() -> Option<&'static Regex> {
    PHONE_RE
        .get_or_init(|| match Regex::new(PHONE_PATTERN) {
            Ok(re) => Some(re),
            Err(e) => {
                warn!(error = %e, "Failed to compile phone regex");
                None
            }
        })
        .as_ref()
}

/// A normalized phone number, always `+` followed by digits
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalPhone(String);

impl CanonicalPhone {
    /// Wrap a value previously produced by [`normalize`] (e.g. read back from
    /// the database). No re-normalization is applied.
    pub fn from_stored(value: impl Into<String>) -> Self {
        CanonicalPhone(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalPhone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalPhone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalize with the default country code
pub fn normalize(raw: &str) -> Option<CanonicalPhone> {
    normalize_with(raw, DEFAULT_COUNTRY_CODE)
}

/// Normalize `raw`, prefixing bare 10-digit numbers with `country_code`
/// (given without the `+`).
///
/// Returns `None` for empty input or when no phone-like substring is found.
pub fn normalize_with(raw: &str, country_code: &str) -> Option<CanonicalPhone> {
    if raw.is_empty() {
        return None;
    }

    let found = phone_re()?.find(raw)?;
    let digits: String = found
        .as_str()
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();

    let digits = if digits.len() == 10 {
        format!("{}{}", country_code.trim_start_matches('+'), digits)
    } else if digits.len() > 10 && digits.starts_with('0') {
        digits.trim_start_matches('0').to_string()
    } else {
        // Covers both explicit `+` input and the bare fallback
        digits
    };

    if digits.is_empty() {
        return None;
    }
    Some(CanonicalPhone(format!("+{}", digits)))
}
