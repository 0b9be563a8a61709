//! Sessions - the per-browser identity that scopes flash notices.
//!
//! A session is nothing more than an opaque id carried in the
//! `mahasiswa.sid` cookie. Requests without a usable cookie get a fresh id,
//! and the response that first needs it sets the cookie.

mod flash;

use uuid::Uuid;

pub use flash::{FlashStore, DEFAULT_FLASH_TTL};

/// Cookie carrying the session id.
pub const SESSION_COOKIE: &str = "mahasiswa.sid";

/// Session identity resolved from the request cookies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    id: String,
    fresh: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create a session with a new random id.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().simple().to_string(),
            fresh: true,
        }
    }

    /// Resolve the session from a `Cookie` header value, falling back to a
    /// fresh session when the cookie is absent or malformed.
    pub fn from_cookie_header(header: Option<&str>) -> Self {
        header
            .and_then(|h| cookie_value(h, SESSION_COOKIE))
            .filter(|id| is_valid_id(id))
            .map(|id| Self {
                id: id.to_string(),
                fresh: false,
            })
            .unwrap_or_default()
    }

    /// Get the session id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// True when the client does not hold this id yet.
    pub fn is_fresh(&self) -> bool {
        self.fresh
    }

    /// `Set-Cookie` value to send when the session is fresh.
    pub fn set_cookie(&self) -> Option<String> {
        self.fresh.then(|| {
            format!(
                "{}={}; Path=/; HttpOnly; SameSite=Lax",
                SESSION_COOKIE, self.id
            )
        })
    }
}

/// Find `name` among the `; `-separated pairs of a `Cookie` header.
fn cookie_value<'h>(header: &'h str, name: &str) -> Option<&'h str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"'))
}

fn is_valid_id(id: &str) -> bool {
    !id.is_empty() && id.len() <= 64 && id.chars().all(|c| c.is_ascii_alphanumeric())
}
