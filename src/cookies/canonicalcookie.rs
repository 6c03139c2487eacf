use crate::base::clock::{Clock, SystemClock};
use crate::base::cookieerror::CookieError;
use crate::cookies::attribute::{Attribute, AttributeValue, Expires};
use crate::cookies::cookiedate::clamp_timestamp;
use crate::cookies::defaults::{self, AttributeDefaults, DEFAULT_PATH};
use crate::cookies::options::CookieOptions;
use crate::cookies::parser;
use crate::cookies::serializer::{self, SetCookieOptions};
use crate::cookies::validator::{validate_name, validate_prefix, validate_same_site};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Lifetime applied by [`CanonicalCookie::with_never_expiring`].
const NEVER_EXPIRING_SECS: i64 = 5 * 365 * 24 * 60 * 60;

/// An immutable, validated cookie.
/// Modeled after Chromium's `net::CanonicalCookie`.
///
/// Every attribute change goes through a `with_*` method that re-validates
/// the affected invariants and returns a new cookie:
/// - `__Secure-` implies `secure`
/// - `__Host-` implies `secure`, `path == "/"` and an empty domain
/// - `SameSite=None` implies `secure`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalCookie {
    prefix: CookiePrefix,
    name: String,
    value: String,
    expires: i64,
    path: String,
    domain: String,
    secure: bool,
    http_only: bool,
    same_site: SameSite,
    raw: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum SameSite {
    #[default]
    Lax,
    Strict,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Lax => "Lax",
            SameSite::Strict => "Strict",
            SameSite::None => "None",
        }
    }
}

impl FromStr for SameSite {
    type Err = CookieError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lax" => Ok(SameSite::Lax),
            "strict" => Ok(SameSite::Strict),
            "none" => Ok(SameSite::None),
            _ => Err(CookieError::invalid_same_site(
                s,
                "expected Lax, Strict or None",
            )),
        }
    }
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name prefixes that browsers treat as proof of attribute constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CookiePrefix {
    #[default]
    None,
    Secure,
    Host,
}

impl CookiePrefix {
    pub fn as_str(&self) -> &'static str {
        match self {
            CookiePrefix::None => "",
            CookiePrefix::Secure => "__Secure-",
            CookiePrefix::Host => "__Host-",
        }
    }
}

impl FromStr for CookiePrefix {
    type Err = CookieError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(CookiePrefix::None),
            "__Secure-" => Ok(CookiePrefix::Secure),
            "__Host-" => Ok(CookiePrefix::Host),
            _ => Err(CookieError::invalid_prefix(
                s,
                "expected __Secure- or __Host-",
            )),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl CanonicalCookie {
    /// Build a cookie over the process-wide defaults.
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        options: CookieOptions,
    ) -> Result<Self, CookieError> {
        Self::with_defaults(name, value, options, &defaults::current(), &SystemClock)
    }

    /// Build a cookie over explicit defaults.
    ///
    /// Each attribute resolves as: explicit option, then default, then the
    /// built-in fallback. Empty `prefix`, `path` and `samesite` options count
    /// as unset. `max_age` overrides `expires` with `now + max_age`. The
    /// resulting expiry is clamped to `0..=MAX_TIMESTAMP`.
    pub fn with_defaults(
        name: impl Into<String>,
        value: impl Into<String>,
        options: CookieOptions,
        defaults: &AttributeDefaults,
        clock: &dyn Clock,
    ) -> Result<Self, CookieError> {
        let name = name.into();

        let expires = match (options.max_age, &options.expires) {
            (Some(max_age), _) => clamp_timestamp(clock.now().saturating_add(max_age)),
            (None, Some(expires)) => expires.to_timestamp(),
            (None, None) => defaults.expires.to_timestamp(),
        };

        let prefix = non_empty(options.prefix).unwrap_or_else(|| defaults.prefix.clone());
        let path = non_empty(options.path)
            .or_else(|| non_empty(Some(defaults.path.clone())))
            .unwrap_or_else(|| DEFAULT_PATH.to_string());
        let domain = options.domain.unwrap_or_else(|| defaults.domain.clone());
        let samesite = non_empty(options.samesite).unwrap_or_else(|| defaults.samesite.clone());
        let secure = options.secure.unwrap_or(defaults.secure);
        let http_only = options.httponly.unwrap_or(defaults.httponly);
        let raw = options.raw.unwrap_or(defaults.raw);

        validate_name(&name, raw)?;
        let prefix = validate_prefix(&prefix, secure, &path, &domain)?;
        let same_site = validate_same_site(&samesite, secure)?;

        Ok(Self {
            prefix,
            name,
            value: value.into(),
            expires,
            path,
            domain,
            secure,
            http_only,
            same_site,
            raw,
        })
    }

    /// Parse a `Set-Cookie` or `Cookie` header line over the process-wide
    /// defaults.
    ///
    /// A name starting with `__Secure-` or `__Host-` (case-sensitive) is
    /// split into prefix and name, and the prefix constraints are enforced,
    /// so `to_header_string` output parses back to an equal cookie. An
    /// unparseable `Expires` yields a session cookie.
    pub fn from_header_string(header: &str, is_raw: bool) -> Result<Self, CookieError> {
        Self::from_header_string_with(header, is_raw, &defaults::current(), &SystemClock)
    }

    pub fn from_header_string_with(
        header: &str,
        is_raw: bool,
        defaults: &AttributeDefaults,
        clock: &dyn Clock,
    ) -> Result<Self, CookieError> {
        let parsed = parser::parse_header(header, is_raw)?;
        let mut options = CookieOptions::from_attributes(parsed.attributes).raw(is_raw);

        let mut name = parsed.name;
        for prefix in [CookiePrefix::Secure, CookiePrefix::Host] {
            if let Some(stripped) = name.strip_prefix(prefix.as_str()) {
                name = stripped.to_string();
                options = options.prefix(prefix.as_str());
                break;
            }
        }

        Self::with_defaults(name, parsed.value, options, defaults, clock)
    }

    // ===== accessors =====

    /// Identity key `prefixedName;path;domain`. Cookies sharing a name but
    /// scoped differently get different ids.
    pub fn id(&self) -> String {
        format!("{};{};{}", self.prefixed_name(), self.path, self.domain)
    }

    pub fn prefix(&self) -> &'static str {
        self.prefix.as_str()
    }

    pub fn cookie_prefix(&self) -> CookiePrefix {
        self.prefix
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Prefix plus name, with reserved characters percent-encoded unless raw.
    pub fn prefixed_name(&self) -> String {
        if self.raw {
            format!("{}{}", self.prefix(), self.name)
        } else {
            format!("{}{}", self.prefix(), serializer::percent_encode_name(&self.name))
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Unix timestamp, `0` for a session cookie.
    pub fn expires_timestamp(&self) -> i64 {
        self.expires
    }

    /// Expiry as a cookie date, e.g. `Wed, 21-Oct-2015 07:28:00 GMT`.
    pub fn expires_string(&self) -> String {
        serializer::format_cookie_date(self.expires)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_with(&SystemClock)
    }

    pub fn is_expired_with(&self, clock: &dyn Clock) -> bool {
        self.expires == 0 || self.expires < clock.now()
    }

    /// Seconds until expiry, never negative.
    pub fn max_age(&self) -> i64 {
        self.max_age_with(&SystemClock)
    }

    pub fn max_age_with(&self, clock: &dyn Clock) -> i64 {
        self.expires.saturating_sub(clock.now()).max(0)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn is_secure(&self) -> bool {
        self.secure
    }

    pub fn is_http_only(&self) -> bool {
        self.http_only
    }

    pub fn same_site(&self) -> SameSite {
        self.same_site
    }

    pub fn is_raw(&self) -> bool {
        self.raw
    }

    /// Attributes in `Set-Cookie` order: expires, path, domain, secure,
    /// httponly, samesite.
    pub fn options(&self) -> SetCookieOptions {
        SetCookieOptions::from(self)
    }

    /// Same as [`options`](Self::options); named for header-emission callers.
    pub fn to_options_tuple(&self) -> SetCookieOptions {
        self.options()
    }

    /// The rendered `Set-Cookie` header value.
    pub fn to_header_string(&self) -> String {
        serializer::render_header(self, &SystemClock)
    }

    pub fn to_header_value(&self) -> Result<http::HeaderValue, CookieError> {
        Ok(http::HeaderValue::from_str(&self.to_header_string())?)
    }

    // ===== keyed access =====

    pub fn get(&self, attribute: Attribute) -> AttributeValue {
        match attribute {
            Attribute::Name => AttributeValue::Str(self.name.clone()),
            Attribute::Value => AttributeValue::Str(self.value.clone()),
            Attribute::Expires => AttributeValue::Int(self.expires),
            Attribute::Domain => AttributeValue::Str(self.domain.clone()),
            Attribute::Path => AttributeValue::Str(self.path.clone()),
            Attribute::Secure => AttributeValue::Bool(self.secure),
            Attribute::HttpOnly => AttributeValue::Bool(self.http_only),
            Attribute::SameSite => AttributeValue::Str(self.same_site.as_str().to_string()),
        }
    }

    /// Look up an attribute by name; unknown names fail with `UndefinedAttribute`.
    pub fn get_by_name(&self, key: &str) -> Result<AttributeValue, CookieError> {
        Ok(self.get(key.parse::<Attribute>()?))
    }

    /// Always fails: use the `with_*` methods.
    pub fn set_attribute(
        &self,
        key: &str,
        _value: impl Into<AttributeValue>,
    ) -> Result<(), CookieError> {
        Err(CookieError::immutable_write(key))
    }

    /// Always fails: use the `with_*` methods.
    pub fn unset_attribute(&self, key: &str) -> Result<(), CookieError> {
        Err(CookieError::immutable_write(key))
    }

    // ===== transformations =====

    pub fn with_name(&self, name: impl Into<String>) -> Result<Self, CookieError> {
        let name = name.into();
        validate_name(&name, self.raw)?;
        Ok(Self {
            name,
            ..self.clone()
        })
    }

    pub fn with_value(&self, value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..self.clone()
        }
    }

    pub fn with_raw(&self, raw: bool) -> Result<Self, CookieError> {
        validate_name(&self.name, raw)?;
        Ok(Self { raw, ..self.clone() })
    }

    pub fn with_prefix(&self, prefix: &str) -> Result<Self, CookieError> {
        let prefix = validate_prefix(prefix, self.secure, &self.path, &self.domain)?;
        Ok(Self {
            prefix,
            ..self.clone()
        })
    }

    /// Change the expiry. Unparseable text makes this a session cookie.
    pub fn with_expires(&self, expires: impl Into<Expires>) -> Self {
        Self {
            expires: expires.into().to_timestamp(),
            ..self.clone()
        }
    }

    /// Mark the cookie as expired (timestamp `0`).
    pub fn with_expired(&self) -> Self {
        Self {
            expires: 0,
            ..self.clone()
        }
    }

    /// Expire five years from now.
    #[deprecated(note = "Set an explicit expiry with with_expires instead")]
    pub fn with_never_expiring(&self) -> Self {
        self.never_expiring_with(&SystemClock)
    }

    fn never_expiring_with(&self, clock: &dyn Clock) -> Self {
        Self {
            expires: clamp_timestamp(clock.now().saturating_add(NEVER_EXPIRING_SECS)),
            ..self.clone()
        }
    }

    /// Change the path. An empty path falls back to the process-wide
    /// default path.
    pub fn with_path(&self, path: &str) -> Result<Self, CookieError> {
        self.with_path_over(path, &defaults::current())
    }

    /// Like [`with_path`](Self::with_path), with an empty path falling back
    /// to `defaults` instead of the process-wide defaults.
    pub fn with_path_over(
        &self,
        path: &str,
        defaults: &AttributeDefaults,
    ) -> Result<Self, CookieError> {
        let path = if path.is_empty() {
            non_empty(Some(defaults.path.clone())).unwrap_or_else(|| DEFAULT_PATH.to_string())
        } else {
            path.to_string()
        };
        validate_prefix(self.prefix(), self.secure, &path, &self.domain)?;
        Ok(Self {
            path,
            ..self.clone()
        })
    }

    pub fn with_domain(&self, domain: &str) -> Result<Self, CookieError> {
        validate_prefix(self.prefix(), self.secure, &self.path, domain)?;
        Ok(Self {
            domain: domain.to_string(),
            ..self.clone()
        })
    }

    pub fn with_secure(&self, secure: bool) -> Result<Self, CookieError> {
        validate_prefix(self.prefix(), secure, &self.path, &self.domain)?;
        validate_same_site(self.same_site.as_str(), secure)?;
        Ok(Self {
            secure,
            ..self.clone()
        })
    }

    pub fn with_http_only(&self, http_only: bool) -> Self {
        Self {
            http_only,
            ..self.clone()
        }
    }

    /// Change SameSite. An empty value falls back to the process-wide
    /// default.
    pub fn with_same_site(&self, samesite: &str) -> Result<Self, CookieError> {
        self.with_same_site_over(samesite, &defaults::current())
    }

    /// Like [`with_same_site`](Self::with_same_site), with an empty value
    /// falling back to `defaults`.
    pub fn with_same_site_over(
        &self,
        samesite: &str,
        defaults: &AttributeDefaults,
    ) -> Result<Self, CookieError> {
        let samesite = if samesite.is_empty() {
            defaults.samesite.clone()
        } else {
            samesite.to_string()
        };
        let same_site = validate_same_site(&samesite, self.secure)?;
        Ok(Self {
            same_site,
            ..self.clone()
        })
    }
}

impl fmt::Display for CanonicalCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_header_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::clock::FixedClock;
    use crate::cookies::cookiedate::MAX_TIMESTAMP;

    const NOW: i64 = 1_700_000_000;

    fn build(name: &str, options: CookieOptions) -> Result<CanonicalCookie, CookieError> {
        CanonicalCookie::with_defaults(
            name,
            "value",
            options,
            &AttributeDefaults::default(),
            &FixedClock(NOW),
        )
    }

    fn parse(header: &str) -> Result<CanonicalCookie, CookieError> {
        CanonicalCookie::from_header_string_with(
            header,
            false,
            &AttributeDefaults::default(),
            &FixedClock(NOW),
        )
    }

    #[test]
    fn test_builtin_fallbacks() {
        let cookie = build("id", CookieOptions::new()).unwrap();

        assert_eq!(cookie.prefix(), "");
        assert_eq!(cookie.expires_timestamp(), 0);
        assert_eq!(cookie.path(), "/");
        assert_eq!(cookie.domain(), "");
        assert!(!cookie.is_secure());
        assert!(cookie.is_http_only());
        assert_eq!(cookie.same_site(), SameSite::Lax);
        assert!(!cookie.is_raw());
    }

    #[test]
    fn test_explicit_defaults_layer() {
        let defaults = AttributeDefaults {
            path: "/app".to_string(),
            secure: true,
            samesite: "Strict".to_string(),
            ..AttributeDefaults::default()
        };
        let cookie = CanonicalCookie::with_defaults(
            "id",
            "v",
            CookieOptions::new().path(""),
            &defaults,
            &FixedClock(NOW),
        )
        .unwrap();

        assert_eq!(cookie.path(), "/app");
        assert!(cookie.is_secure());
        assert_eq!(cookie.same_site(), SameSite::Strict);
    }

    #[test]
    fn test_empty_default_path_uses_root() {
        let defaults = AttributeDefaults {
            path: String::new(),
            ..AttributeDefaults::default()
        };
        let cookie = CanonicalCookie::with_defaults(
            "id",
            "v",
            CookieOptions::new(),
            &defaults,
            &FixedClock(NOW),
        )
        .unwrap();
        assert_eq!(cookie.path(), "/");
    }

    #[test]
    fn test_same_site_is_capitalized() {
        let cookie = build("id", CookieOptions::new().same_site("sTrIcT")).unwrap();
        assert_eq!(cookie.same_site(), SameSite::Strict);
        assert_eq!(cookie.get(Attribute::SameSite), AttributeValue::from("Strict"));
    }

    #[test]
    fn test_max_age_wins_over_expires() {
        let cookie = build("id", CookieOptions::new().expires(NOW + 10).max_age(3600)).unwrap();
        assert_eq!(cookie.expires_timestamp(), NOW + 3600);
        assert_eq!(cookie.max_age_with(&FixedClock(NOW)), 3600);
    }

    #[test]
    fn test_max_age_overrides_unparseable_expires() {
        let cookie = build("id", CookieOptions::new().expires("garbage").max_age(60)).unwrap();
        assert_eq!(cookie.expires_timestamp(), NOW + 60);
    }

    #[test]
    fn test_unparseable_expires_is_session() {
        let cookie = build("id", CookieOptions::new().expires("garbage")).unwrap();
        assert_eq!(cookie.expires_timestamp(), 0);
        assert!(cookie.is_expired_with(&FixedClock(NOW)));
    }

    #[test]
    fn test_far_future_expiry_is_clamped() {
        let cookie = build("id", CookieOptions::new().expires(300_000_000_000i64)).unwrap();
        assert_eq!(cookie.expires_timestamp(), MAX_TIMESTAMP);
        assert_eq!(cookie.expires_string(), "Fri, 31-Dec-9999 23:59:59 GMT");
        assert!(!cookie.is_expired_with(&FixedClock(NOW)));

        let cookie = build("id", CookieOptions::new().max_age(i64::MAX)).unwrap();
        assert_eq!(cookie.expires_timestamp(), MAX_TIMESTAMP);
        assert_eq!(cookie.max_age_with(&FixedClock(NOW)), MAX_TIMESTAMP - NOW);
    }

    #[test]
    fn test_header_with_legacy_expires_forms() {
        for header in [
            "id=1; Expires=Wed, 21-Oct-15 07:28:00 GMT",
            "id=1; Expires=Wednesday, 21-Oct-15 07:28:00 GMT",
            "id=1; Expires=Wed Oct 21 07:28:00 2015",
            "id=1; Expires=Wed, 21 Oct 2015 07:28:00 UTC",
        ] {
            let cookie = parse(header).unwrap();
            assert_eq!(cookie.expires_timestamp(), 1_445_412_480, "{}", header);
        }
    }

    #[test]
    fn test_header_with_unparseable_expires() {
        let cookie = parse("id=1; Expires=soon; Path=/x").unwrap();
        assert_eq!(cookie.expires_timestamp(), 0);
        assert_eq!(cookie.path(), "/x");
    }

    #[test]
    fn test_header_prefix_is_recognized() {
        let cookie = parse("__Secure-id=1; Secure").unwrap();
        assert_eq!(cookie.cookie_prefix(), CookiePrefix::Secure);
        assert_eq!(cookie.name(), "id");
        assert_eq!(cookie.prefixed_name(), "__Secure-id");

        let cookie = parse("__Host-id=1; Secure; Path=/").unwrap();
        assert_eq!(cookie.cookie_prefix(), CookiePrefix::Host);
    }

    #[test]
    fn test_header_prefix_constraints_enforced() {
        assert!(matches!(
            parse("__Secure-id=1"),
            Err(CookieError::InvalidPrefix { .. })
        ));
        assert!(matches!(
            parse("__Host-id=1; Secure; Domain=example.com"),
            Err(CookieError::InvalidPrefix { .. })
        ));
        // Only the exact spelling is a prefix.
        let cookie = parse("__secure-id=1").unwrap();
        assert_eq!(cookie.cookie_prefix(), CookiePrefix::None);
        assert_eq!(cookie.name(), "__secure-id");
    }

    #[test]
    fn test_header_prefix_only_name_rejected() {
        assert!(matches!(
            parse("__Secure-=1; Secure"),
            Err(CookieError::InvalidName { .. })
        ));
    }

    #[test]
    fn test_host_prefix_rejects_domain() {
        let err = build(
            "id",
            CookieOptions::new()
                .prefix("__Host-")
                .secure(true)
                .domain("example.com"),
        )
        .unwrap_err();
        assert!(matches!(err, CookieError::InvalidPrefix { .. }));
    }

    #[test]
    fn test_same_site_none_requires_secure() {
        assert!(matches!(
            build("id", CookieOptions::new().same_site("None")),
            Err(CookieError::InvalidSameSite { .. })
        ));
        assert!(build("id", CookieOptions::new().same_site("None").secure(true)).is_ok());
    }

    #[test]
    fn test_id_distinguishes_scope() {
        let a = build("id", CookieOptions::new().path("/a")).unwrap();
        let b = build("id", CookieOptions::new().path("/b").domain("example.com")).unwrap();

        assert_eq!(a.id(), "id;/a;");
        assert_eq!(b.id(), "id;/b;example.com");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_prefixed_name() {
        let cookie = build("a b", CookieOptions::new().prefix("__Secure-").secure(true)).unwrap();
        assert_eq!(cookie.prefixed_name(), "__Secure-a%20b");

        let raw = build("ab", CookieOptions::new().raw(true)).unwrap();
        assert_eq!(raw.prefixed_name(), "ab");
    }

    #[test]
    fn test_raw_name_rejects_reserved() {
        assert!(matches!(
            build("a b", CookieOptions::new().raw(true)),
            Err(CookieError::InvalidName { .. })
        ));
    }

    #[test]
    fn test_expiry_checks() {
        let clock = FixedClock(NOW);
        let session = build("id", CookieOptions::new()).unwrap();
        assert!(session.is_expired_with(&clock));

        let future = build("id", CookieOptions::new().expires(NOW + 100)).unwrap();
        assert!(!future.is_expired_with(&clock));
        assert_eq!(future.max_age_with(&clock), 100);

        let past = build("id", CookieOptions::new().expires(NOW - 100)).unwrap();
        assert!(past.is_expired_with(&clock));
        assert_eq!(past.max_age_with(&clock), 0);
    }

    #[test]
    fn test_with_expired() {
        let cookie = build("id", CookieOptions::new().expires(NOW + 100))
            .unwrap()
            .with_expired();
        assert_eq!(cookie.expires_timestamp(), 0);
        assert!(cookie.is_expired_with(&FixedClock(NOW)));
    }

    #[test]
    fn test_never_expiring() {
        let cookie = build("id", CookieOptions::new())
            .unwrap()
            .never_expiring_with(&FixedClock(NOW));
        assert_eq!(cookie.expires_timestamp(), NOW + NEVER_EXPIRING_SECS);
    }

    #[test]
    fn test_empty_path_and_same_site_use_given_defaults() {
        let defaults = AttributeDefaults {
            path: "/app".to_string(),
            samesite: "Strict".to_string(),
            ..AttributeDefaults::default()
        };
        let cookie = CanonicalCookie::with_defaults(
            "id",
            "v",
            CookieOptions::new().path("/other").same_site("Lax"),
            &defaults,
            &FixedClock(NOW),
        )
        .unwrap();

        let reset = cookie
            .with_path_over("", &defaults)
            .unwrap()
            .with_same_site_over("", &defaults)
            .unwrap();
        assert_eq!(reset.path(), "/app");
        assert_eq!(reset.same_site(), SameSite::Strict);

        let bare = AttributeDefaults {
            path: String::new(),
            ..AttributeDefaults::default()
        };
        assert_eq!(cookie.with_path_over("", &bare).unwrap().path(), "/");
    }

    #[test]
    fn test_with_path_revalidates_host_prefix() {
        let cookie = build("id", CookieOptions::new().prefix("__Host-").secure(true)).unwrap();
        assert!(matches!(
            cookie.with_path("/app"),
            Err(CookieError::InvalidPrefix { .. })
        ));
        assert!(matches!(
            cookie.with_domain("example.com"),
            Err(CookieError::InvalidPrefix { .. })
        ));
        assert!(matches!(
            cookie.with_secure(false),
            Err(CookieError::InvalidPrefix { .. })
        ));
    }

    #[test]
    fn test_with_secure_revalidates_same_site() {
        let cookie = build("id", CookieOptions::new().secure(true).same_site("None")).unwrap();
        assert!(matches!(
            cookie.with_secure(false),
            Err(CookieError::InvalidSameSite { .. })
        ));
    }

    #[test]
    fn test_with_methods_leave_original_untouched() {
        let original = build("id", CookieOptions::new()).unwrap();
        let changed = original
            .with_name("other")
            .unwrap()
            .with_value("v2")
            .with_http_only(false)
            .with_same_site("strict")
            .unwrap();

        assert_eq!(original.name(), "id");
        assert_eq!(original.value(), "value");
        assert!(original.is_http_only());
        assert_eq!(changed.name(), "other");
        assert_eq!(changed.value(), "v2");
        assert!(!changed.is_http_only());
        assert_eq!(changed.same_site(), SameSite::Strict);
    }

    #[test]
    fn test_with_prefix() {
        let cookie = build("id", CookieOptions::new()).unwrap();
        assert!(cookie.with_prefix("__Secure-").is_err());

        let secured = cookie.with_secure(true).unwrap().with_prefix("__Secure-").unwrap();
        assert_eq!(secured.prefixed_name(), "__Secure-id");
        assert!(cookie.with_prefix("__Bogus-").is_err());
    }

    #[test]
    fn test_with_raw_revalidates_name() {
        let cookie = build("a:b", CookieOptions::new()).unwrap();
        assert!(cookie.with_raw(true).is_err());
        assert!(cookie.with_raw(false).is_ok());
    }

    #[test]
    fn test_with_expires_accepts_text() {
        let cookie = build("id", CookieOptions::new())
            .unwrap()
            .with_expires("Wed, 21 Oct 2015 07:28:00 GMT");
        assert_eq!(cookie.expires_timestamp(), 1_445_412_480);
    }

    #[test]
    fn test_keyed_access() {
        let cookie = build("id", CookieOptions::new().domain("example.com")).unwrap();

        assert_eq!(cookie.get(Attribute::Name), AttributeValue::from("id"));
        assert_eq!(
            cookie.get_by_name("domain").unwrap(),
            AttributeValue::from("example.com")
        );
        assert_eq!(cookie.get_by_name("expire").unwrap(), AttributeValue::Int(0));
        assert_eq!(cookie.get_by_name("httponly").unwrap(), AttributeValue::Bool(true));
        assert!(matches!(
            cookie.get_by_name("priority"),
            Err(CookieError::UndefinedAttribute { .. })
        ));
    }

    #[test]
    fn test_keyed_writes_rejected() {
        let cookie = build("id", CookieOptions::new()).unwrap();
        assert_eq!(
            cookie.set_attribute("path", "/x"),
            Err(CookieError::immutable_write("path"))
        );
        assert_eq!(
            cookie.unset_attribute("value"),
            Err(CookieError::immutable_write("value"))
        );
        assert_eq!(cookie.path(), "/");
    }

    #[test]
    fn test_cookie_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CanonicalCookie>();
    }
}
