//! Header emission: name/value encoding, the ordered options tuple, and the
//! rendered `Set-Cookie` line.

use crate::base::clock::Clock;
use crate::cookies::attribute::AttributeValue;
use crate::cookies::canonicalcookie::{CanonicalCookie, SameSite};
use crate::cookies::cookiedate::clamp_timestamp;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;
use time::macros::format_description;
use time::OffsetDateTime;

/// Reserved cookie-name characters, the same table as
/// [`RESERVED_CHARS`](crate::cookies::validator::RESERVED_CHARS).
const NAME_ENCODE_SET: &AsciiSet = &AsciiSet::EMPTY
    .add(b'=')
    .add(b',')
    .add(b';')
    .add(b' ')
    .add(b'\t')
    .add(b'\r')
    .add(b'\n')
    .add(0x0B)
    .add(0x0C)
    .add(b'(')
    .add(b')')
    .add(b'<')
    .add(b'>')
    .add(b'@')
    .add(b':')
    .add(b'\\')
    .add(b'"')
    .add(b'/')
    .add(b'[')
    .add(b']')
    .add(b'?')
    .add(b'{')
    .add(b'}');

/// Everything except RFC 3986 unreserved characters.
const VALUE_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode the reserved characters of a cookie name.
///
/// Only the reserved table is encoded. `%`, other control characters and
/// non-ASCII text pass through unchanged, so a name that already contains
/// `%XX` sequences does not survive a decode round-trip.
pub fn percent_encode_name(name: &str) -> String {
    let mut encoded = String::with_capacity(name.len());
    let mut rest = name;

    while !rest.is_empty() {
        // `utf8_percent_encode` would escape every non-ASCII byte, so feed it
        // ASCII runs only.
        let ascii_len = rest.find(|c: char| !c.is_ascii()).unwrap_or(rest.len());
        let (ascii, tail) = rest.split_at(ascii_len);
        encoded.extend(utf8_percent_encode(ascii, NAME_ENCODE_SET));

        let other_len = tail.find(|c: char| c.is_ascii()).unwrap_or(tail.len());
        let (other, tail) = tail.split_at(other_len);
        encoded.push_str(other);
        rest = tail;
    }

    encoded
}

/// Percent-encode a cookie value for the `Set-Cookie` line.
pub fn percent_encode_value(value: &str) -> String {
    utf8_percent_encode(value, VALUE_ENCODE_SET).to_string()
}

/// Decode `%XX` sequences. Invalid UTF-8 is replaced rather than rejected.
pub fn percent_decode(input: &str) -> String {
    percent_decode_str(input).decode_utf8_lossy().into_owned()
}

/// Format a timestamp as a cookie date: `Wed, 21-Oct-2015 07:28:00 GMT`.
///
/// Timestamps outside `0..=MAX_TIMESTAMP` are clamped to the nearest end.
pub fn format_cookie_date(timestamp: i64) -> String {
    let datetime = OffsetDateTime::from_unix_timestamp(clamp_timestamp(timestamp))
        .unwrap_or(OffsetDateTime::UNIX_EPOCH);
    datetime
        .format(format_description!(
            "[weekday repr:short], [day]-[month repr:short]-[year] [hour]:[minute]:[second] GMT"
        ))
        .unwrap_or_default()
}

/// Cookie attributes in `Set-Cookie` emission order.
///
/// Field order is part of the wire contract and is preserved by both
/// [`entries`](Self::entries) and `Serialize`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetCookieOptions {
    pub expires: i64,
    pub path: String,
    pub domain: String,
    pub secure: bool,
    pub httponly: bool,
    pub samesite: SameSite,
}

impl SetCookieOptions {
    pub const KEYS: [&'static str; 6] = [
        "expires", "path", "domain", "secure", "httponly", "samesite",
    ];

    pub fn entries(&self) -> [(&'static str, AttributeValue); 6] {
        [
            ("expires", AttributeValue::Int(self.expires)),
            ("path", AttributeValue::Str(self.path.clone())),
            ("domain", AttributeValue::Str(self.domain.clone())),
            ("secure", AttributeValue::Bool(self.secure)),
            ("httponly", AttributeValue::Bool(self.httponly)),
            ("samesite", AttributeValue::Str(self.samesite.as_str().to_string())),
        ]
    }
}

impl From<&CanonicalCookie> for SetCookieOptions {
    fn from(cookie: &CanonicalCookie) -> Self {
        Self {
            expires: cookie.expires_timestamp(),
            path: cookie.path().to_string(),
            domain: cookie.domain().to_string(),
            secure: cookie.is_secure(),
            httponly: cookie.is_http_only(),
            samesite: cookie.same_site(),
        }
    }
}

/// Render the full `Set-Cookie` header value.
///
/// A cookie with an empty value renders as a deletion
/// (`name=deleted; Expires=<epoch>; Max-Age=0`).
pub fn render_header(cookie: &CanonicalCookie, clock: &dyn Clock) -> String {
    let mut parts = Vec::with_capacity(8);
    let name = cookie.prefixed_name();

    if cookie.value().is_empty() {
        parts.push(format!("{}=deleted", name));
        parts.push(format!("Expires={}", format_cookie_date(0)));
        parts.push("Max-Age=0".to_string());
    } else {
        let value = if cookie.is_raw() {
            cookie.value().to_string()
        } else {
            percent_encode_value(cookie.value())
        };
        parts.push(format!("{}={}", name, value));

        if cookie.expires_timestamp() != 0 {
            parts.push(format!("Expires={}", cookie.expires_string()));
            parts.push(format!("Max-Age={}", cookie.max_age_with(clock)));
        }
    }

    if !cookie.path().is_empty() {
        parts.push(format!("Path={}", cookie.path()));
    }
    if !cookie.domain().is_empty() {
        parts.push(format!("Domain={}", cookie.domain()));
    }
    if cookie.is_secure() {
        parts.push("Secure".to_string());
    }
    if cookie.is_http_only() {
        parts.push("HttpOnly".to_string());
    }
    parts.push(format!("SameSite={}", cookie.same_site()));

    parts.join("; ")
}

/// Hand the cookie to code built on the `cookie` crate.
///
/// The name and value are passed through unencoded.
impl From<&CanonicalCookie> for cookie::Cookie<'static> {
    fn from(source: &CanonicalCookie) -> Self {
        let same_site = match source.same_site() {
            SameSite::Lax => cookie::SameSite::Lax,
            SameSite::Strict => cookie::SameSite::Strict,
            SameSite::None => cookie::SameSite::None,
        };

        let mut builder = cookie::Cookie::build((
            format!("{}{}", source.prefix(), source.name()),
            source.value().to_string(),
        ))
        .path(source.path().to_string())
        .secure(source.is_secure())
        .http_only(source.is_http_only())
        .same_site(same_site);

        if !source.domain().is_empty() {
            builder = builder.domain(source.domain().to_string());
        }

        if source.expires_timestamp() != 0 {
            if let Ok(expires) = OffsetDateTime::from_unix_timestamp(source.expires_timestamp()) {
                builder = builder.expires(expires);
            }
        }

        builder.build()
    }
}
