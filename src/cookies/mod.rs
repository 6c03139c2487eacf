//! Cookie parsing, validation, and serialization.
//!
//! # Architecture
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`defaults`] | Process-wide default attributes |
//! | [`validator`] | Name, prefix and SameSite rules |
//! | [`parser`] | Header string to attribute map |
//! | [`cookiedate`] | Lenient `Expires` date parsing |
//! | [`canonicalcookie`] | The immutable [`CanonicalCookie`](canonicalcookie::CanonicalCookie) |
//! | [`serializer`] | Encoded names, ordered options, `Set-Cookie` rendering |
//!
//! # Parsing a header
//!
//! ```rust
//! use setcookie::cookies::canonicalcookie::{CanonicalCookie, SameSite};
//!
//! let cookie = CanonicalCookie::from_header_string("id=abc; Path=/x; Secure; SameSite=Strict", false)?;
//! assert_eq!(cookie.name(), "id");
//! assert_eq!(cookie.path(), "/x");
//! assert_eq!(cookie.same_site(), SameSite::Strict);
//! # Ok::<(), setcookie::base::cookieerror::CookieError>(())
//! ```
//!
//! # Building and transforming
//!
//! ```rust
//! use setcookie::cookies::canonicalcookie::CanonicalCookie;
//! use setcookie::cookies::options::CookieOptions;
//!
//! let cookie = CanonicalCookie::new(
//!     "session",
//!     "s3cr3t",
//!     CookieOptions::new().prefix("__Host-").secure(true),
//! )?;
//! assert_eq!(cookie.prefixed_name(), "__Host-session");
//!
//! // __Host- cookies cannot be scoped to a sub-path.
//! assert!(cookie.with_path("/admin").is_err());
//! # Ok::<(), setcookie::base::cookieerror::CookieError>(())
//! ```

pub mod attribute;
pub mod canonicalcookie;
pub mod cookiedate;
pub mod defaults;
pub mod options;
pub mod parser;
pub mod serializer;
pub mod validator;
