//! Token types produced by the login handshake.

use std::fmt;

use crate::types::BaseUrl;

/// A one-time authorization code produced by the first handshake stage.
///
/// The code is read out of the query string of the URL the authorization
/// server redirects to, and is exchanged for an [`AccessToken`] in the
/// second stage.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone)]
pub struct AuthorizationCode(pub(crate) String);

impl AuthorizationCode {
    /// Create a new authorization code.
    pub(crate) fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the code value.
    ///
    /// # Security
    ///
    /// Handle the returned value securely; it can be exchanged for an
    /// access token. Never log or display it.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the redirect carried no code.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Hide code value in Debug output
impl fmt::Debug for AuthorizationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AuthorizationCode")
            .field(&"[REDACTED]")
            .finish()
    }
}

/// An OAuth access token produced by the second handshake stage.
///
/// Access tokens are short-lived and are spent in the third stage to
/// open a REST session.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone)]
pub struct AccessToken(pub(crate) String);

impl AccessToken {
    /// Create a new access token.
    pub(crate) fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token value.
    ///
    /// # Security
    ///
    /// Handle the returned value securely; it grants a REST session.
    /// Never log or display it.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the token endpoint returned no token.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Hide token value in Debug output
impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&"[REDACTED]").finish()
    }
}

/// An authenticated REST session produced by the third handshake stage.
///
/// Holds the instance-specific base URL that all entity requests are
/// issued against, and the `BhRestToken` key that authenticates them.
///
/// # Security
///
/// The session key is never exposed in Debug output.
#[derive(Clone)]
pub struct SessionToken {
    pub(crate) rest_url: BaseUrl,
    pub(crate) key: String,
}

impl SessionToken {
    /// Create a new session token.
    pub(crate) fn new(rest_url: BaseUrl, key: impl Into<String>) -> Self {
        Self {
            rest_url,
            key: key.into(),
        }
    }

    /// Returns the instance-specific REST base URL for this session.
    pub fn rest_url(&self) -> &BaseUrl {
        &self.rest_url
    }

    /// Returns the `BhRestToken` session key.
    ///
    /// # Security
    ///
    /// Handle the returned value securely; it authenticates every entity
    /// request for this session. Never log or display it.
    pub fn key(&self) -> &str {
        &self.key
    }
}

// Hide session key in Debug output
impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionToken")
            .field("rest_url", &self.rest_url)
            .field("key", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorization_code_hides_value_in_debug() {
        let code = AuthorizationCode::new("4%2FAAAcode-value");
        let debug = format!("{:?}", code);
        assert!(!debug.contains("AAAcode"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn access_token_hides_value_in_debug() {
        let token = AccessToken::new("42:1234abcd-ffff-0000-9999-deadbeef0000");
        let debug = format!("{:?}", token);
        assert!(!debug.contains("1234abcd"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn session_token_hides_key_but_shows_rest_url() {
        let rest_url: BaseUrl = "https://rest123.bullhornstaffing.com/rest-services/e999/"
            .parse()
            .unwrap();
        let session = SessionToken::new(rest_url, "sess789-key");
        let debug = format!("{:?}", session);
        assert!(debug.contains("rest123.bullhornstaffing.com"));
        assert!(!debug.contains("sess789"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn empty_markers() {
        assert!(AuthorizationCode::new("").is_empty());
        assert!(!AuthorizationCode::new("abc123").is_empty());
        assert!(AccessToken::new("").is_empty());
        assert!(!AccessToken::new("tok456").is_empty());
    }
}
