//! Attribute validation.
//!
//! Pure functions shared by cookie construction and every `with_*`
//! transformation. Each mutator re-runs the checks whose invariant involves
//! the attribute it changes.

use crate::base::cookieerror::CookieError;
use crate::cookies::canonicalcookie::{CookiePrefix, SameSite};

/// Characters that may not appear verbatim in a cookie name.
pub const RESERVED_CHARS: &str = "=,; \t\r\n\x0B\x0C()<>@:\\\"/[]?{}";

/// Returns true if `c` belongs to [`RESERVED_CHARS`].
pub fn is_reserved(c: char) -> bool {
    RESERVED_CHARS.contains(c)
}

/// Validate a cookie name.
///
/// Names must be non-empty. Raw names are emitted verbatim and so must not
/// contain reserved characters; other names are percent-encoded on output.
pub fn validate_name(name: &str, raw: bool) -> Result<(), CookieError> {
    if name.is_empty() {
        return Err(CookieError::invalid_name(name, "name must not be empty"));
    }

    if raw && name.chars().any(is_reserved) {
        tracing::debug!(name = %name, "raw cookie name contains a reserved character");
        return Err(CookieError::invalid_name(
            name,
            "raw name contains a reserved character",
        ));
    }

    Ok(())
}

/// Validate `__Secure-` and `__Host-` prefixes per RFC 6265bis.
/// - __Secure- cookies MUST have the Secure attribute
/// - __Host- cookies MUST have Secure, Path="/", and no Domain attribute
pub fn validate_prefix(
    prefix: &str,
    secure: bool,
    path: &str,
    domain: &str,
) -> Result<CookiePrefix, CookieError> {
    let parsed: CookiePrefix = prefix.parse()?;

    match parsed {
        CookiePrefix::Secure if !secure => Err(CookieError::invalid_prefix(
            prefix,
            "__Secure- requires the Secure attribute",
        )),
        CookiePrefix::Host if !secure => Err(CookieError::invalid_prefix(
            prefix,
            "__Host- requires the Secure attribute",
        )),
        CookiePrefix::Host if path != "/" => Err(CookieError::invalid_prefix(
            prefix,
            "__Host- requires Path=/",
        )),
        CookiePrefix::Host if !domain.is_empty() => Err(CookieError::invalid_prefix(
            prefix,
            "__Host- forbids the Domain attribute",
        )),
        _ => Ok(parsed),
    }
}

/// Validate and normalize a SameSite value.
///
/// Matching is case-insensitive and an empty value means `Lax`. `None` is
/// only allowed on secure cookies.
pub fn validate_same_site(samesite: &str, secure: bool) -> Result<SameSite, CookieError> {
    let parsed = if samesite.is_empty() {
        SameSite::Lax
    } else {
        samesite.parse()?
    };

    if parsed == SameSite::None && !secure {
        return Err(CookieError::invalid_same_site(
            samesite,
            "SameSite=None requires the Secure attribute",
        ));
    }

    Ok(parsed)
}
