//! Explicit attribute options supplied when building a cookie.

use crate::cookies::attribute::{AttributeValue, Expires};

/// Explicit cookie attributes. Unset fields fall back to the
/// [defaults](crate::cookies::defaults).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieOptions {
    pub prefix: Option<String>,
    pub expires: Option<Expires>,
    /// Seconds from construction time. Takes precedence over `expires`.
    pub max_age: Option<i64>,
    pub path: Option<String>,
    pub domain: Option<String>,
    pub secure: Option<bool>,
    pub httponly: Option<bool>,
    pub samesite: Option<String>,
    pub raw: Option<bool>,
}

impl CookieOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build options from an attribute map, such as the one produced by
    /// [`parse_header`](crate::cookies::parser::parse_header).
    ///
    /// Keys are matched case-insensitively. Unknown attributes and values of
    /// the wrong shape are ignored.
    pub fn from_attributes<I, K>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, AttributeValue)>,
        K: AsRef<str>,
    {
        let mut options = Self::default();
        for (key, value) in attributes {
            let key = key.as_ref().to_ascii_lowercase();
            match key.as_str() {
                "prefix" => options.prefix = value.to_text(),
                "expires" => match value {
                    AttributeValue::Int(ts) => options.expires = Some(Expires::Timestamp(ts)),
                    AttributeValue::Str(text) => options.expires = Some(Expires::Text(text)),
                    AttributeValue::Bool(_) => {
                        tracing::debug!("ignoring Expires attribute without a value")
                    }
                },
                "max-age" => match parse_max_age(&value) {
                    Some(secs) => options.max_age = Some(secs),
                    None => tracing::debug!(value = %value, "ignoring non-numeric Max-Age"),
                },
                "path" => options.path = value.to_text(),
                "domain" => options.domain = value.to_text(),
                "secure" => options.secure = Some(value.to_flag()),
                "httponly" => options.httponly = Some(value.to_flag()),
                "samesite" => options.samesite = value.to_text(),
                "raw" => options.raw = Some(value.to_flag()),
                _ => tracing::trace!(attribute = %key, "ignoring unknown cookie attribute"),
            }
        }
        options
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn expires(mut self, expires: impl Into<Expires>) -> Self {
        self.expires = Some(expires.into());
        self
    }

    pub fn max_age(mut self, seconds: i64) -> Self {
        self.max_age = Some(seconds);
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = Some(secure);
        self
    }

    pub fn http_only(mut self, httponly: bool) -> Self {
        self.httponly = Some(httponly);
        self
    }

    pub fn same_site(mut self, samesite: impl Into<String>) -> Self {
        self.samesite = Some(samesite.into());
        self
    }

    pub fn raw(mut self, raw: bool) -> Self {
        self.raw = Some(raw);
        self
    }
}

fn parse_max_age(value: &AttributeValue) -> Option<i64> {
    match value {
        AttributeValue::Int(secs) => Some(*secs),
        AttributeValue::Str(text) => text.trim().parse().ok(),
        AttributeValue::Bool(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let options = CookieOptions::new()
            .path("/x")
            .secure(true)
            .same_site("Strict")
            .max_age(60);

        assert_eq!(options.path.as_deref(), Some("/x"));
        assert_eq!(options.secure, Some(true));
        assert_eq!(options.samesite.as_deref(), Some("Strict"));
        assert_eq!(options.max_age, Some(60));
        assert_eq!(options.domain, None);
    }

    #[test]
    fn test_from_header_attributes() {
        let options = CookieOptions::from_attributes([
            ("path", AttributeValue::from("/x")),
            ("secure", AttributeValue::Bool(true)),
            ("samesite", AttributeValue::from("Strict")),
            ("max-age", AttributeValue::from("3600")),
            ("expires", AttributeValue::from("Wed, 21 Oct 2015 07:28:00 GMT")),
        ]);

        assert_eq!(options.path.as_deref(), Some("/x"));
        assert_eq!(options.secure, Some(true));
        assert_eq!(options.samesite.as_deref(), Some("Strict"));
        assert_eq!(options.max_age, Some(3600));
        assert_eq!(
            options.expires,
            Some(Expires::Text("Wed, 21 Oct 2015 07:28:00 GMT".to_string()))
        );
    }

    #[test]
    fn test_non_numeric_max_age_ignored() {
        let options = CookieOptions::from_attributes([("max-age", AttributeValue::from("soon"))]);
        assert_eq!(options.max_age, None);
    }

    #[test]
    fn test_unknown_attributes_ignored() {
        let options = CookieOptions::from_attributes([
            ("priority", AttributeValue::from("High")),
            ("partitioned", AttributeValue::Bool(true)),
        ]);
        assert_eq!(options, CookieOptions::default());
    }

    #[test]
    fn test_flag_values() {
        let options = CookieOptions::from_attributes([
            ("HttpOnly", AttributeValue::from("false")),
            ("Secure", AttributeValue::from("1")),
        ]);
        assert_eq!(options.httponly, Some(false));
        assert_eq!(options.secure, Some(true));
    }
}
