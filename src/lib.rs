//! # setcookie
//!
//! An immutable HTTP cookie value object.
//!
//! `setcookie` parses `Set-Cookie`/`Cookie` header strings, validates every
//! attribute against RFC 6265 grammar and the `__Secure-`/`__Host-` prefix
//! rules, and serializes attributes in `Set-Cookie` emission order.
//!
//! ## Features
//!
//! - **Immutable cookies**: every `with_*` change returns a new, re-validated value
//! - **Prefix rules**: `__Secure-` and `__Host-` constraints per RFC 6265bis
//! - **SameSite**: normalized `Lax`/`Strict`/`None`, with `None` requiring `Secure`
//! - **Expiry**: timestamps, dates and `Max-Age` normalized once at construction
//! - **Defaults**: process-wide fallback attributes with snapshot/restore
//! - **Interop**: conversions to `cookie::Cookie` and `http::HeaderValue`
//!
//! ## Quick Start
//!
//! ```rust
//! use setcookie::cookies::canonicalcookie::CanonicalCookie;
//! use setcookie::cookies::options::CookieOptions;
//!
//! let cookie = CanonicalCookie::new(
//!     "theme",
//!     "dark",
//!     CookieOptions::new().path("/app").same_site("strict"),
//! )?;
//! assert_eq!(cookie.to_header_string(), "theme=dark; Path=/app; HttpOnly; SameSite=Strict");
//! # Ok::<(), setcookie::base::cookieerror::CookieError>(())
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error taxonomy and clock abstraction
//! - [`cookies`] - Defaults, validation, parsing, the cookie value object, serialization

pub mod base;
pub mod cookies;

pub use base::cookieerror::CookieError;
pub use cookies::canonicalcookie::{CanonicalCookie, CookiePrefix, SameSite};
pub use cookies::options::CookieOptions;
