//! Process-wide default cookie attributes.
//!
//! Defaults sit beneath explicit [`CookieOptions`](crate::cookies::options::CookieOptions)
//! when a cookie is built. They are trusted configuration: nothing is
//! validated here, a bad default surfaces when a cookie using it is built.
//!
//! Callers that want to avoid global state pass an [`AttributeDefaults`]
//! directly to [`CanonicalCookie::with_defaults`](crate::cookies::canonicalcookie::CanonicalCookie::with_defaults).

use crate::base::cookieerror::CookieError;
use crate::cookies::attribute::{AttributeValue, Expires};
use serde::{Deserialize, Serialize};
use std::sync::{LazyLock, PoisonError, RwLock};

pub const DEFAULT_PATH: &str = "/";
pub const DEFAULT_SAME_SITE: &str = "Lax";

/// The full set of default attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeDefaults {
    pub prefix: String,
    pub expires: Expires,
    pub path: String,
    pub domain: String,
    pub secure: bool,
    pub httponly: bool,
    pub samesite: String,
    pub raw: bool,
}

impl Default for AttributeDefaults {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            expires: Expires::Timestamp(0),
            path: DEFAULT_PATH.to_string(),
            domain: String::new(),
            secure: false,
            httponly: true,
            samesite: DEFAULT_SAME_SITE.to_string(),
            raw: false,
        }
    }
}

impl AttributeDefaults {
    /// Load a complete defaults document. Missing keys take the built-in
    /// fallbacks.
    pub fn from_json(json: &str) -> Result<Self, CookieError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Overlay `update` on these defaults. Keys present in `update` win.
    pub fn merged(&self, update: &DefaultsUpdate) -> Self {
        Self {
            prefix: update.prefix.clone().unwrap_or_else(|| self.prefix.clone()),
            expires: update.expires.clone().unwrap_or_else(|| self.expires.clone()),
            path: update.path.clone().unwrap_or_else(|| self.path.clone()),
            domain: update.domain.clone().unwrap_or_else(|| self.domain.clone()),
            secure: update.secure.unwrap_or(self.secure),
            httponly: update.httponly.unwrap_or(self.httponly),
            samesite: update
                .samesite
                .clone()
                .unwrap_or_else(|| self.samesite.clone()),
            raw: update.raw.unwrap_or(self.raw),
        }
    }
}

/// A partial set of defaults. Unset keys keep their previous value when
/// applied with [`set_defaults`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsUpdate {
    pub prefix: Option<String>,
    pub expires: Option<Expires>,
    pub path: Option<String>,
    pub domain: Option<String>,
    pub secure: Option<bool>,
    pub httponly: Option<bool>,
    pub samesite: Option<String>,
    pub raw: Option<bool>,
}

impl DefaultsUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a partial defaults document.
    pub fn from_json(json: &str) -> Result<Self, CookieError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build an update from a raw key/value mapping. Unknown keys are ignored.
    pub fn from_attributes<I, K>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, AttributeValue)>,
        K: AsRef<str>,
    {
        let mut update = Self::default();
        for (key, value) in attributes {
            match key.as_ref().to_ascii_lowercase().as_str() {
                "prefix" => update.prefix = value.to_text(),
                "expires" => {
                    update.expires = match value {
                        AttributeValue::Int(ts) => Some(Expires::Timestamp(ts)),
                        AttributeValue::Str(text) => Some(Expires::Text(text)),
                        AttributeValue::Bool(_) => None,
                    }
                }
                "path" => update.path = value.to_text(),
                "domain" => update.domain = value.to_text(),
                "secure" => update.secure = Some(value.to_flag()),
                "httponly" => update.httponly = Some(value.to_flag()),
                "samesite" => update.samesite = value.to_text(),
                "raw" => update.raw = Some(value.to_flag()),
                other => tracing::trace!(key = %other, "ignoring unknown cookie default"),
            }
        }
        update
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn expires(mut self, expires: impl Into<Expires>) -> Self {
        self.expires = Some(expires.into());
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

impl From<AttributeDefaults> for DefaultsUpdate {
    fn from(defaults: AttributeDefaults) -> Self {
        Self {
            prefix: Some(defaults.prefix),
            expires: Some(defaults.expires),
            path: Some(defaults.path),
            domain: Some(defaults.domain),
            secure: Some(defaults.secure),
            httponly: Some(defaults.httponly),
            samesite: Some(defaults.samesite),
            raw: Some(defaults.raw),
        }
    }
}

static DEFAULTS: LazyLock<RwLock<AttributeDefaults>> =
    LazyLock::new(|| RwLock::new(AttributeDefaults::default()));

/// Snapshot of the current process-wide defaults.
pub fn current() -> AttributeDefaults {
    // The lock only ever holds a complete snapshot, so a poisoned lock is still usable.
    DEFAULTS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Merge `update` over the process-wide defaults and return the previous
/// snapshot. The merge and swap happen under one write lock.
pub fn set_defaults(update: impl Into<DefaultsUpdate>) -> AttributeDefaults {
    let update = update.into();
    let mut guard = DEFAULTS.write().unwrap_or_else(PoisonError::into_inner);
    let merged = guard.merged(&update);
    let previous = std::mem::replace(&mut *guard, merged);
    tracing::debug!(update = ?update, "cookie defaults replaced");
    previous
}

/// Restore the built-in defaults, returning the previous snapshot.
pub fn reset_defaults() -> AttributeDefaults {
    set_defaults(AttributeDefaults::default())
}

/// Apply `update` until the returned guard is dropped.
pub fn scoped(update: impl Into<DefaultsUpdate>) -> DefaultsGuard {
    DefaultsGuard {
        previous: Some(set_defaults(update)),
    }
}

/// Restores the defaults that were active when it was created.
#[must_use = "dropping the guard immediately restores the previous defaults"]
pub struct DefaultsGuard {
    previous: Option<AttributeDefaults>,
}

impl DefaultsGuard {
    /// The defaults that will be restored on drop.
    pub fn previous(&self) -> Option<&AttributeDefaults> {
        self.previous.as_ref()
    }
}

impl Drop for DefaultsGuard {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            set_defaults(previous);
        }
    }
}
