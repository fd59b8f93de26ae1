//! The Bullhorn client and its staged login handshake.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, instrument};
use url::Url;

use crate::auth::{AccessToken, AuthorizationCode, Credentials, HandshakeState, SessionToken};
use crate::config::ClientConfig;
use crate::error::{AuthError, Error, TransportError};
use crate::rest::{
    AuthorizeParams, CANDIDATE, CANDIDATE_EDUCATION, CANDIDATE_FIELDS, CANDIDATE_VITALS_FIELDS,
    CANDIDATE_WORK_HISTORY, CORPORATE_USER, CORPORATE_USER_FIELDS, EDUCATION_FIELDS, EntityParams,
    Envelope, LOGOUT, LoginParams, LoginResponse, OAUTH_AUTHORIZE, OAUTH_TOKEN, QueryParams,
    REST_LOGIN, TokenParams, TokenResponse, Transport, WORK_HISTORY_FIELDS, entity_path,
    query_path,
};
use crate::types::BaseUrl;

/// A Bullhorn REST client with a staged login handshake.
///
/// The handshake runs three stages, each gated on the artifact of the
/// stage before it:
///
/// 1. [`authorize`](Self::authorize) submits credentials and captures
///    the one-time code from the authorization redirect.
/// 2. [`exchange_code`](Self::exchange_code) trades the code for an
///    OAuth access token.
/// 3. [`login`](Self::login) spends the access token to open a REST
///    session.
///
/// [`connect`](Self::connect) runs all three in order. Stages take
/// `&mut self`, so the borrow checker rules out interleaved handshakes
/// on one client; entity reads take `&self` and run freely once a
/// session exists.
///
/// # Example
///
/// ```no_run
/// use bullhorn_rest::{BullhornClient, ClientConfig, Credentials};
///
/// # async fn example() -> Result<(), bullhorn_rest::Error> {
/// let config = ClientConfig::from_env()?;
/// let mut client = BullhornClient::new(config)?;
///
/// client.connect(&Credentials::new("api.agency", "hunter2")).await?;
///
/// let candidate = client.candidate(505).await?;
/// println!("{}", candidate["firstName"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct BullhornClient {
    config: ClientConfig,
    transport: Transport,
    state: HandshakeState,
}

impl BullhornClient {
    /// Create a client from a configuration.
    ///
    /// No network traffic is issued until a handshake stage runs.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built
    /// from the configuration.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let transport = Transport::new(&config)?;
        Ok(Self {
            config,
            transport,
            state: HandshakeState::default(),
        })
    }

    // ========================================================================
    // Login Handshake
    // ========================================================================

    /// Stage one: submit credentials and capture the authorization code.
    ///
    /// The authorization server answers with a redirect chain; the code
    /// is read from the `code` query parameter of the URL the chain
    /// settles on. A chain that settles without a code is not an error
    /// here, but the held code is unusable and stage two will refuse to
    /// run.
    ///
    /// A successful run replaces any code, token, or session from an
    /// earlier handshake; a failed run leaves held state untouched, so
    /// a live session survives a rejected re-authorization.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Rejected`] if the authorization server
    /// answers with a non-transient error status, and
    /// [`AuthError::Redirect`] if the redirect chain never terminates.
    #[instrument(skip(self, credentials), fields(username = %credentials.username()))]
    pub async fn authorize(
        &mut self,
        credentials: &Credentials,
    ) -> Result<AuthorizationCode, Error> {
        info!("Requesting authorization code");

        let url = self.config.auth_base.endpoint(OAUTH_AUTHORIZE);
        let params = AuthorizeParams {
            response_type: "code",
            action: "Login",
            username: credentials.username(),
            password: credentials.password(),
            client_id: &self.config.client_id,
        };

        let landed = self
            .transport
            .post_redirect(&url, &params)
            .await
            .map_err(|e| self.auth_stage_error(e))?;

        let code = AuthorizationCode::new(extract_code(&landed));
        debug!(found = !code.is_empty(), "authorization redirect settled");

        // A fresh code invalidates whatever an earlier handshake produced
        self.state = HandshakeState::HasCode(code.clone());
        Ok(code)
    }

    /// Stage two: exchange the held authorization code for an access
    /// token.
    ///
    /// A 2xx answer without an `access_token` field is stored as-is;
    /// stage three will refuse to spend it.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::MissingAuthCode`] without touching
    /// the network if stage one has not produced a usable code, and
    /// [`AuthError::Rejected`] if the token endpoint answers with a
    /// non-transient error status.
    ///
    /// [`PreconditionError::MissingAuthCode`]: crate::error::PreconditionError::MissingAuthCode
    #[instrument(skip(self))]
    pub async fn exchange_code(&mut self) -> Result<AccessToken, Error> {
        let code = self.state.auth_code()?.clone();

        info!("Exchanging authorization code for access token");

        let url = self.config.auth_base.endpoint(OAUTH_TOKEN);
        let params = TokenParams {
            grant_type: "authorization_code",
            code: code.as_str(),
            client_id: &self.config.client_id,
            client_secret: &self.config.client_secret,
        };

        let response: TokenResponse = self
            .transport
            .post(&url, &params)
            .await
            .map_err(|e| self.auth_stage_error(e))?;

        let token = AccessToken::new(response.access_token.unwrap_or_default());
        debug!(present = !token.is_empty(), "token endpoint answered");

        self.state = HandshakeState::HasAccessToken(token.clone());
        Ok(token)
    }

    /// Stage three: spend the access token to open a REST session.
    ///
    /// The response carries the instance-specific REST base URL and the
    /// `BhRestToken` session key; entity requests go to that URL, not to
    /// the configured rest base.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::MissingAccessToken`] without touching
    /// the network if stage two has not produced a usable token, and
    /// [`AuthError::IncompleteSession`] if the login answers 2xx with
    /// either session field absent or empty.
    ///
    /// [`PreconditionError::MissingAccessToken`]: crate::error::PreconditionError::MissingAccessToken
    #[instrument(skip(self))]
    pub async fn login(&mut self) -> Result<SessionToken, Error> {
        let token = self.state.access_token()?.clone();

        info!("Opening REST session");

        let url = self.config.rest_base.endpoint(REST_LOGIN);
        let params = LoginParams {
            version: "*",
            access_token: token.as_str(),
        };

        let response: LoginResponse = self
            .transport
            .post(&url, &params)
            .await
            .map_err(|e| self.auth_stage_error(e))?;

        let rest_url = response
            .rest_url
            .filter(|value| !value.is_empty())
            .ok_or(AuthError::IncompleteSession { field: "restUrl" })?;
        let key = response
            .session_key
            .filter(|value| !value.is_empty())
            .ok_or(AuthError::IncompleteSession {
                field: "BhRestToken",
            })?;

        let session = SessionToken::new(BaseUrl::new(rest_url)?, key);
        debug!(rest_url = %session.rest_url(), "REST session opened");

        self.state = HandshakeState::HasSession(session.clone());
        Ok(session)
    }

    /// Run the full three-stage handshake.
    ///
    /// Equivalent to [`authorize`](Self::authorize),
    /// [`exchange_code`](Self::exchange_code), and
    /// [`login`](Self::login) in sequence, stopping at the first
    /// failure.
    #[instrument(skip(self, credentials), fields(username = %credentials.username()))]
    pub async fn connect(&mut self, credentials: &Credentials) -> Result<SessionToken, Error> {
        self.authorize(credentials).await?;
        self.exchange_code().await?;
        self.login().await
    }

    /// Returns the live session, if the handshake has completed.
    pub fn session(&self) -> Option<&SessionToken> {
        self.state.session().ok()
    }

    /// Returns `true` if the handshake has completed.
    pub fn has_session(&self) -> bool {
        self.state.has_session()
    }

    /// Close the session on the server.
    ///
    /// Local session state is cleared only once the server confirms with
    /// a success status; a failed logout leaves the session usable.
    ///
    /// # Returns
    ///
    /// The confirming HTTP status code.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::MissingSession`] without touching
    /// the network if no session is held.
    ///
    /// [`PreconditionError::MissingSession`]: crate::error::PreconditionError::MissingSession
    #[instrument(skip(self))]
    pub async fn logout(&mut self) -> Result<u16, Error> {
        let session = self.state.session()?;

        info!("Closing REST session");

        let url = session.rest_url().endpoint(LOGOUT);
        let status = self
            .transport
            .post_authed_status(&url, session.key())
            .await?;

        self.state = HandshakeState::Uninitialized;
        debug!(status, "REST session closed");
        Ok(status)
    }

    // ========================================================================
    // Entity Operations
    // ========================================================================

    /// Fetch one entity by id, returning the requested fields.
    ///
    /// The one level of `data` wrapping Bullhorn puts around every
    /// payload is stripped before the body is decoded into `R`.
    ///
    /// # Arguments
    ///
    /// * `entity` - Entity name, e.g. `"Candidate"`
    /// * `id` - Entity id
    /// * `fields` - Comma-separated field selection
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::MissingSession`] without touching
    /// the network if no session is held.
    ///
    /// [`PreconditionError::MissingSession`]: crate::error::PreconditionError::MissingSession
    #[instrument(skip(self))]
    pub async fn fetch_entity<R>(&self, entity: &str, id: u64, fields: &str) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        let session = self.state.session()?;

        debug!("Fetching entity");

        let url = session.rest_url().endpoint(&entity_path(entity, id));
        let params = EntityParams { fields };

        let envelope: Envelope<R> = self
            .transport
            .get_authed(&url, &params, session.key())
            .await?;
        Ok(envelope.data)
    }

    /// Run a `where`-filtered query against an entity, returning the
    /// matching rows.
    ///
    /// # Arguments
    ///
    /// * `entity` - Entity name, e.g. `"CandidateWorkHistory"`
    /// * `filter` - Filter expression, e.g. `"candidate.id=505"`
    /// * `fields` - Comma-separated field selection
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::MissingSession`] without touching
    /// the network if no session is held.
    ///
    /// [`PreconditionError::MissingSession`]: crate::error::PreconditionError::MissingSession
    #[instrument(skip(self))]
    pub async fn run_query<R>(
        &self,
        entity: &str,
        filter: &str,
        fields: &str,
    ) -> Result<Vec<R>, Error>
    where
        R: DeserializeOwned,
    {
        let session = self.state.session()?;

        debug!("Running query");

        let url = session.rest_url().endpoint(&query_path(entity));
        let params = QueryParams { filter, fields };

        let envelope: Envelope<Vec<R>> = self
            .transport
            .get_authed(&url, &params, session.key())
            .await?;
        Ok(envelope.data)
    }

    /// Fetch a candidate's general profile fields.
    #[instrument(skip(self))]
    pub async fn candidate(&self, id: u64) -> Result<Value, Error> {
        self.fetch_entity(CANDIDATE, id, CANDIDATE_FIELDS).await
    }

    /// Fetch a candidate's contact and identity fields, including SSN
    /// and date of birth.
    #[instrument(skip(self))]
    pub async fn candidate_vitals(&self, id: u64) -> Result<Value, Error> {
        self.fetch_entity(CANDIDATE, id, CANDIDATE_VITALS_FIELDS)
            .await
    }

    /// Fetch a corporate user's profile fields.
    #[instrument(skip(self))]
    pub async fn corporate_user(&self, id: u64) -> Result<Value, Error> {
        self.fetch_entity(CORPORATE_USER, id, CORPORATE_USER_FIELDS)
            .await
    }

    /// Fetch the work history rows attached to a candidate.
    #[instrument(skip(self))]
    pub async fn candidate_work_history(&self, candidate_id: u64) -> Result<Vec<Value>, Error> {
        self.run_query(
            CANDIDATE_WORK_HISTORY,
            &format!("candidate.id={}", candidate_id),
            WORK_HISTORY_FIELDS,
        )
        .await
    }

    /// Fetch the education rows attached to a candidate.
    #[instrument(skip(self))]
    pub async fn candidate_education_history(
        &self,
        candidate_id: u64,
    ) -> Result<Vec<Value>, Error> {
        self.run_query(
            CANDIDATE_EDUCATION,
            &format!("candidate.id={}", candidate_id),
            EDUCATION_FIELDS,
        )
        .await
    }

    /// Classify a handshake stage failure.
    ///
    /// Statuses the retry policy treats as transient keep their
    /// server-error shape after the retry budget runs out; any other
    /// error status is a rejection by the identity provider. Redirect
    /// failures fold into the auth taxonomy as well.
    fn auth_stage_error(&self, err: Error) -> Error {
        match err {
            Error::Server(server) if !self.config.retry.should_retry(server.status) => {
                Error::Auth(AuthError::Rejected(server))
            }
            Error::Transport(TransportError::Redirect { message }) => {
                Error::Auth(AuthError::Redirect { message })
            }
            other => other,
        }
    }
}

/// Pull the `code` query parameter out of the settled redirect URL.
fn extract_code(url: &Url) -> String {
    url.query_pairs()
        .find(|(key, _)| key == "code")
        .map(|(_, value)| value.into_owned())
        .unwrap_or_default()
}
