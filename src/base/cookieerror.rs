use thiserror::Error;

/// Errors raised while parsing, building, or transforming a cookie.
///
/// All variants are deterministic input errors: the same input fails the
/// same way every time, so callers fix the input instead of retrying.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum CookieError {
    #[error("Malformed cookie header: {reason}")]
    MalformedHeader { reason: &'static str },

    #[error("Invalid cookie name {name:?}: {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("Invalid cookie prefix {prefix:?}: {reason}")]
    InvalidPrefix { prefix: String, reason: &'static str },

    #[error("Invalid SameSite value {value:?}: {reason}")]
    InvalidSameSite { value: String, reason: &'static str },

    #[error("Undefined cookie attribute {attribute:?}")]
    UndefinedAttribute { attribute: String },

    #[error("Cannot write cookie attribute {attribute:?}: cookies are immutable")]
    ImmutableWrite { attribute: String },

    #[error("Invalid cookie configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Cookie cannot be represented as a header value: {message}")]
    InvalidHeaderValue { message: String },
}

impl CookieError {
    pub fn malformed_header(reason: &'static str) -> Self {
        CookieError::MalformedHeader { reason }
    }

    pub fn invalid_name(name: impl Into<String>, reason: &'static str) -> Self {
        CookieError::InvalidName {
            name: name.into(),
            reason,
        }
    }

    pub fn invalid_prefix(prefix: impl Into<String>, reason: &'static str) -> Self {
        CookieError::InvalidPrefix {
            prefix: prefix.into(),
            reason,
        }
    }

    pub fn invalid_same_site(value: impl Into<String>, reason: &'static str) -> Self {
        CookieError::InvalidSameSite {
            value: value.into(),
            reason,
        }
    }

    pub fn undefined_attribute(attribute: impl Into<String>) -> Self {
        CookieError::UndefinedAttribute {
            attribute: attribute.into(),
        }
    }

    pub fn immutable_write(attribute: impl Into<String>) -> Self {
        CookieError::ImmutableWrite {
            attribute: attribute.into(),
        }
    }

    /// True for errors produced by the attribute validators.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            CookieError::InvalidName { .. }
                | CookieError::InvalidPrefix { .. }
                | CookieError::InvalidSameSite { .. }
        )
    }
}

impl From<serde_json::Error> for CookieError {
    fn from(err: serde_json::Error) -> Self {
        CookieError::InvalidConfig {
            message: err.to_string(),
        }
    }
}

impl From<http::header::InvalidHeaderValue> for CookieError {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        CookieError::InvalidHeaderValue {
            message: err.to_string(),
        }
    }
}
