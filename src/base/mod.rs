//! Base types and error handling.
//!
//! - [`CookieError`](cookieerror::CookieError): error taxonomy for cookie parsing and validation
//! - [`Clock`](clock::Clock): source of the current Unix timestamp

pub mod clock;
pub mod cookieerror;
