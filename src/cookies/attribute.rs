//! Attribute names, loosely-typed attribute values, and expiry inputs.

use crate::base::cookieerror::CookieError;
use crate::cookies::cookiedate::{clamp_timestamp, parse_cookie_date};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::format_description::well_known::Rfc2822;
use time::OffsetDateTime;

/// Attributes readable through keyed access on a cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Name,
    Value,
    Expires,
    Domain,
    Path,
    Secure,
    HttpOnly,
    SameSite,
}

impl Attribute {
    pub const ALL: [Attribute; 8] = [
        Attribute::Name,
        Attribute::Value,
        Attribute::Expires,
        Attribute::Domain,
        Attribute::Path,
        Attribute::Secure,
        Attribute::HttpOnly,
        Attribute::SameSite,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::Name => "name",
            Attribute::Value => "value",
            Attribute::Expires => "expires",
            Attribute::Domain => "domain",
            Attribute::Path => "path",
            Attribute::Secure => "secure",
            Attribute::HttpOnly => "httponly",
            Attribute::SameSite => "samesite",
        }
    }
}

impl FromStr for Attribute {
    type Err = CookieError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let attribute = match key.to_ascii_lowercase().as_str() {
            "name" => Attribute::Name,
            "value" => Attribute::Value,
            // Legacy alias kept for array-style access.
            "expires" | "expire" => Attribute::Expires,
            "domain" => Attribute::Domain,
            "path" => Attribute::Path,
            "secure" => Attribute::Secure,
            "httponly" => Attribute::HttpOnly,
            "samesite" => Attribute::SameSite,
            _ => return Err(CookieError::undefined_attribute(key)),
        };
        Ok(attribute)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A loosely-typed attribute value, as found in header attribute maps and
/// key/value configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl AttributeValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttributeValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Interpret the value as a flag.
    ///
    /// `""`, `"0"`, `"false"` and `"off"` (any case) are false; any other
    /// string is true.
    pub fn to_flag(&self) -> bool {
        match self {
            AttributeValue::Bool(b) => *b,
            AttributeValue::Int(i) => *i != 0,
            AttributeValue::Str(s) => {
                let s = s.trim();
                !(s.is_empty()
                    || s == "0"
                    || s.eq_ignore_ascii_case("false")
                    || s.eq_ignore_ascii_case("off"))
            }
        }
    }

    /// Interpret the value as text. Flags carry no text.
    pub fn to_text(&self) -> Option<String> {
        match self {
            AttributeValue::Str(s) => Some(s.clone()),
            AttributeValue::Int(i) => Some(i.to_string()),
            AttributeValue::Bool(_) => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Bool(b) => write!(f, "{}", b),
            AttributeValue::Int(i) => write!(f, "{}", i),
            AttributeValue::Str(s) => f.write_str(s),
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        AttributeValue::Bool(b)
    }
}

impl From<i64> for AttributeValue {
    fn from(i: i64) -> Self {
        AttributeValue::Int(i)
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::Str(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::Str(s)
    }
}

/// An expiry as supplied by a caller, normalized to a Unix timestamp at
/// construction time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Expires {
    Timestamp(i64),
    DateTime(#[serde(with = "time::serde::timestamp")] OffsetDateTime),
    /// Numeric string, RFC 2822 date, or any RFC 6265 cookie date.
    Text(String),
}

impl Default for Expires {
    fn default() -> Self {
        Expires::Timestamp(0)
    }
}

impl Expires {
    /// Convert to a Unix timestamp clamped to `0..=MAX_TIMESTAMP`. Anything
    /// at or before the epoch, or any text that is not a date, becomes `0`,
    /// the session-cookie marker.
    pub fn to_timestamp(&self) -> i64 {
        let timestamp = match self {
            Expires::Timestamp(ts) => *ts,
            Expires::DateTime(dt) => dt.unix_timestamp(),
            Expires::Text(text) => parse_expires_text(text),
        };
        clamp_timestamp(timestamp)
    }
}

fn parse_expires_text(text: &str) -> i64 {
    let text = text.trim();

    if let Ok(ts) = text.parse::<i64>() {
        return ts;
    }

    // Numeric zone offsets are only honored here; cookie dates are always UTC.
    if let Ok(dt) = OffsetDateTime::parse(text, &Rfc2822) {
        return dt.unix_timestamp();
    }

    parse_cookie_date(text).unwrap_or_else(|| {
        tracing::debug!(value = %text, "unrecognized cookie expiry, treating as session cookie");
        0
    })
}

impl From<i64> for Expires {
    fn from(ts: i64) -> Self {
        Expires::Timestamp(ts)
    }
}

impl From<OffsetDateTime> for Expires {
    fn from(dt: OffsetDateTime) -> Self {
        Expires::DateTime(dt)
    }
}

impl From<&str> for Expires {
    fn from(text: &str) -> Self {
        Expires::Text(text.to_string())
    }
}

impl From<String> for Expires {
    fn from(text: String) -> Self {
        Expires::Text(text)
    }
}
