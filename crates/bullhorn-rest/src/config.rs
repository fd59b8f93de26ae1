//! Client configuration.

use std::fmt;
use std::time::Duration;

use crate::error::{Error, InvalidInputError};
use crate::retry::RetryPolicy;
use crate::types::BaseUrl;

/// Environment variable holding the Bullhorn cluster domain,
/// e.g. `bullhornstaffing.com`.
pub const ENV_DOMAIN: &str = "BULLHORN_DOMAIN";

/// Environment variable holding the OAuth client id.
pub const ENV_CLIENT_ID: &str = "BULLHORN_CLIENT_ID";

/// Environment variable holding the OAuth client secret.
pub const ENV_CLIENT_SECRET: &str = "BULLHORN_CLIENT_SECRET";

/// Configuration for a [`BullhornClient`](crate::BullhornClient).
///
/// The two base URLs cover the handshake: the auth base serves the
/// authorization and token endpoints, the rest base serves the REST
/// login. Entity requests use neither; they go to the session-specific
/// URL the login handshake hands back.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use bullhorn_rest::{ClientConfig, RetryPolicy};
///
/// # fn example() -> Result<(), bullhorn_rest::Error> {
/// let config = ClientConfig::for_domain("bullhornstaffing.com", "client-id", "client-secret")?
///     .timeout(Duration::from_secs(30))
///     .retry(RetryPolicy::default());
/// # let _ = config;
/// # Ok(())
/// # }
/// ```
pub struct ClientConfig {
    pub(crate) auth_base: BaseUrl,
    pub(crate) rest_base: BaseUrl,
    pub(crate) client_id: String,
    pub(crate) client_secret: String,
    pub(crate) retry: RetryPolicy,
    pub(crate) timeout: Option<Duration>,
    pub(crate) danger_accept_invalid_certs: bool,
}

impl ClientConfig {
    /// Create a configuration from explicit base URLs.
    ///
    /// # Arguments
    ///
    /// * `auth_base` - Base URL of the authorization host
    /// * `rest_base` - Base URL of the REST login host
    /// * `client_id` - OAuth client id issued for the integration
    /// * `client_secret` - OAuth client secret issued for the integration
    pub fn new(
        auth_base: BaseUrl,
        rest_base: BaseUrl,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            auth_base,
            rest_base,
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            retry: RetryPolicy::default(),
            timeout: None,
            danger_accept_invalid_certs: false,
        }
    }

    /// Create a configuration from a bare cluster domain, deriving the
    /// conventional `https://auth.{domain}` and `https://rest.{domain}`
    /// hosts.
    ///
    /// # Errors
    ///
    /// Returns an error if the domain does not form valid URLs.
    pub fn for_domain(
        domain: &str,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self, Error> {
        let auth_base = BaseUrl::new(format!("https://auth.{}", domain))?;
        let rest_base = BaseUrl::new(format!("https://rest.{}", domain))?;
        Ok(Self::new(auth_base, rest_base, client_id, client_secret))
    }

    /// Create a configuration from the `BULLHORN_DOMAIN`,
    /// `BULLHORN_CLIENT_ID`, and `BULLHORN_CLIENT_SECRET` environment
    /// variables.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first variable that is unset or
    /// blank, or if the domain does not form valid URLs.
    pub fn from_env() -> Result<Self, Error> {
        let domain = require_env(ENV_DOMAIN)?;
        let client_id = require_env(ENV_CLIENT_ID)?;
        let client_secret = require_env(ENV_CLIENT_SECRET)?;
        Self::for_domain(&domain, client_id, client_secret)
    }

    /// Replace the retry policy. Defaults to [`RetryPolicy::default()`].
    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Set a per-request timeout. No timeout is applied by default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Disable TLS certificate verification.
    ///
    /// Some legacy Bullhorn clusters terminate TLS in ways modern stacks
    /// reject. Leave this off unless requests to your cluster fail at
    /// the TLS layer.
    ///
    /// # Security
    ///
    /// This makes the connection vulnerable to interception. Never
    /// enable it outside of controlled environments.
    pub fn danger_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.danger_accept_invalid_certs = accept;
        self
    }
}

// Intentionally hide client secret in Debug output
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("auth_base", &self.auth_base)
            .field("rest_base", &self.rest_base)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("retry", &self.retry)
            .field("timeout", &self.timeout)
            .field(
                "danger_accept_invalid_certs",
                &self.danger_accept_invalid_certs,
            )
            .finish()
    }
}

fn require_env(name: &'static str) -> Result<String, Error> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(InvalidInputError::Environment { name }.into()),
    }
}
