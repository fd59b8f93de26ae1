//! HTTP transport shared by the handshake and entity layers.

use serde::{Serialize, de::DeserializeOwned};
use tokio_retry::RetryIf;
use tracing::{debug, instrument, trace};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{Error, ServerError, TransportError};
use crate::retry::RetryPolicy;

use super::endpoints::RestErrorBody;

/// HTTP transport with status-based retry.
///
/// Every request goes through [`Transport::execute`], which re-sends
/// while the response status is one the [`RetryPolicy`] marks transient
/// and delay budget remains. Transport failures and all other statuses
/// surface on the first attempt; an exhausted budget surfaces the last
/// transient status unchanged.
#[derive(Debug, Clone)]
pub(crate) struct Transport {
    client: reqwest::Client,
    retry: RetryPolicy,
}

impl Transport {
    /// Build a transport from the client configuration.
    pub(crate) fn new(config: &ClientConfig) -> Result<Self, Error> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("bullhorn-rest/", env!("CARGO_PKG_VERSION")));

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if config.danger_accept_invalid_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            retry: config.retry.clone(),
        })
    }

    /// POST with query parameters, following the redirect chain, and
    /// return the URL the chain settled on.
    ///
    /// The settled URL is where the authorization server parks its
    /// one-time code; it is returned without logging.
    #[instrument(skip(self, params))]
    pub(crate) async fn post_redirect<Q>(&self, url: &str, params: &Q) -> Result<Url, Error>
    where
        Q: Serialize,
    {
        debug!("POST (redirect)");

        let builder = self.client.post(url).query(params);
        let response = self.execute(builder).await?;

        let status = response.status();
        trace!(status = %status, "redirect chain settled");
        if !status.is_success() {
            return Err(Error::Server(self.parse_error_response(response).await));
        }

        Ok(response.url().clone())
    }

    /// POST with query parameters, decoding the JSON response body.
    #[instrument(skip(self, params))]
    pub(crate) async fn post<Q, R>(&self, url: &str, params: &Q) -> Result<R, Error>
    where
        Q: Serialize,
        R: DeserializeOwned,
    {
        debug!("POST");

        let builder = self.client.post(url).query(params);
        let response = self.execute(builder).await?;

        self.handle_response(response).await
    }

    /// Authenticated GET; the session key rides along as the
    /// `BhRestToken` query parameter.
    #[instrument(skip(self, params, session_key))]
    pub(crate) async fn get_authed<Q, R>(
        &self,
        url: &str,
        params: &Q,
        session_key: &str,
    ) -> Result<R, Error>
    where
        Q: Serialize + std::fmt::Debug,
        R: DeserializeOwned,
    {
        debug!("GET (authenticated)");
        trace!(?params, "query parameters");

        let builder = self
            .client
            .get(url)
            .query(params)
            .query(&[("BhRestToken", session_key)]);
        let response = self.execute(builder).await?;

        self.handle_response(response).await
    }

    /// Authenticated POST carrying no parameters beyond the session key.
    /// Returns the status code of a successful response.
    #[instrument(skip(self, session_key))]
    pub(crate) async fn post_authed_status(
        &self,
        url: &str,
        session_key: &str,
    ) -> Result<u16, Error> {
        debug!("POST (authenticated)");

        let builder = self.client.post(url).query(&[("BhRestToken", session_key)]);
        let response = self.execute(builder).await?;

        let status = response.status();
        if status.is_success() {
            Ok(status.as_u16())
        } else {
            Err(Error::Server(self.parse_error_response(response).await))
        }
    }

    /// Send a request, re-sending while the retry policy allows.
    async fn execute(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::Response, Error> {
        RetryIf::spawn(
            self.retry.strategy(),
            || self.attempt(&builder),
            |err: &Error| {
                matches!(err, Error::Server(server) if self.retry.should_retry(server.status))
            },
        )
        .await
    }

    /// One send attempt. Transient statuses are converted to errors here
    /// so the retry loop can see them; every other response is handed
    /// back for the caller to classify.
    async fn attempt(&self, builder: &reqwest::RequestBuilder) -> Result<reqwest::Response, Error> {
        let request = builder.try_clone().ok_or_else(|| TransportError::Builder {
            message: "request cannot be cloned for retry".to_string(),
        })?;

        let response = request.send().await?;

        let status = response.status().as_u16();
        if self.retry.should_retry(status) {
            debug!(status, "transient status");
            return Err(Error::Server(self.parse_error_response(response).await));
        }

        Ok(response)
    }

    /// Handle a response, parsing the body or error.
    async fn handle_response<R: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<R, Error> {
        let status = response.status();
        trace!(status = %status, "REST response");

        if status.is_success() {
            let body = response.json::<R>().await?;
            Ok(body)
        } else {
            Err(Error::Server(self.parse_error_response(response).await))
        }
    }

    /// Parse an error response body into a status error.
    async fn parse_error_response(&self, response: reqwest::Response) -> ServerError {
        let status = response.status().as_u16();

        // Both the OAuth and REST services answer errors as JSON
        match response.json::<RestErrorBody>().await {
            Ok(body) => ServerError::new(status, body.error, body.message),
            Err(_) => ServerError::new(status, None, None),
        }
    }
}
