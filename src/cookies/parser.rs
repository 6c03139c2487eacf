//! `Set-Cookie` / `Cookie` header parsing.

use crate::base::cookieerror::CookieError;
use crate::cookies::attribute::AttributeValue;
use crate::cookies::canonicalcookie::CanonicalCookie;
use crate::cookies::options::CookieOptions;
use crate::cookies::serializer::percent_decode;
use std::collections::BTreeMap;

/// A header split into its name, value, and lower-cased attribute map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedHeader {
    pub name: String,
    pub value: String,
    pub attributes: BTreeMap<String, AttributeValue>,
}

/// Parse a cookie header line.
///
/// Format: `name=value; Attr1=Val1; Flag; ...`
///
/// The name/value pair is split on the first `=` only; a segment without `=`
/// is a name with an empty value. Attribute segments are either `attr=val`
/// or a bare flag, which maps to `true`. Attribute keys are lower-cased and
/// the last occurrence wins. Unless `is_raw`, the name and value are
/// percent-decoded.
pub fn parse_header(header: &str, is_raw: bool) -> Result<ParsedHeader, CookieError> {
    let header = header.trim();
    if header.is_empty() {
        return Err(CookieError::malformed_header("header is empty"));
    }

    let mut segments = header
        .split(';')
        .map(|segment| segment.trim_start_matches([' ', '\t']));

    let pair = segments.next().unwrap_or_default();
    if pair.is_empty() {
        tracing::debug!(header = %header, "cookie header has no name/value pair");
        return Err(CookieError::malformed_header("missing name/value pair"));
    }

    let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
    let (name, value) = if is_raw {
        (name.to_string(), value.to_string())
    } else {
        (percent_decode(name), percent_decode(value))
    };

    let mut attributes = BTreeMap::new();
    for segment in segments {
        if segment.is_empty() {
            continue;
        }

        let (key, value) = match segment.split_once('=') {
            Some((key, value)) => (key, AttributeValue::Str(value.to_string())),
            None => (segment, AttributeValue::Bool(true)),
        };

        attributes.insert(key.trim_end().to_ascii_lowercase(), value);
    }

    Ok(ParsedHeader {
        name,
        value,
        attributes,
    })
}

/// Adopt a cookie parsed by the `cookie` crate.
impl TryFrom<&cookie::Cookie<'_>> for CanonicalCookie {
    type Error = CookieError;

    fn try_from(parsed: &cookie::Cookie<'_>) -> Result<Self, Self::Error> {
        let mut options = CookieOptions::new();

        if let Some(path) = parsed.path() {
            options = options.path(path);
        }
        if let Some(domain) = parsed.domain() {
            options = options.domain(domain);
        }
        if let Some(secure) = parsed.secure() {
            options = options.secure(secure);
        }
        if let Some(http_only) = parsed.http_only() {
            options = options.http_only(http_only);
        }
        if let Some(same_site) = parsed.same_site() {
            options = options.same_site(same_site.to_string());
        }
        if let Some(expires) = parsed.expires_datetime() {
            options = options.expires(expires);
        }
        if let Some(max_age) = parsed.max_age() {
            options = options.max_age(max_age.whole_seconds());
        }

        CanonicalCookie::new(parsed.name(), parsed.value(), options)
    }
}
