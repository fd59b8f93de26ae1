//! Handshake progress tracking.

use crate::error::PreconditionError;

use super::tokens::{AccessToken, AuthorizationCode, SessionToken};

/// Where the client currently sits in the three-stage login handshake.
///
/// The handshake is strictly linear: each stage consumes the artifact of
/// the stage before it, and completing an earlier stage again discards
/// whatever the later stages had produced. A stage that fails leaves the
/// held state as it was. Each accessor returns the precondition error for
/// its stage when the required artifact is not held.
#[derive(Debug, Default)]
pub(crate) enum HandshakeState {
    /// No handshake stage has completed.
    #[default]
    Uninitialized,
    /// Stage one completed; holds the authorization code.
    HasCode(AuthorizationCode),
    /// Stage two completed; holds the access token.
    HasAccessToken(AccessToken),
    /// Stage three completed; holds the live REST session.
    HasSession(SessionToken),
}

impl HandshakeState {
    /// Returns the authorization code required by the token exchange.
    ///
    /// An empty code, stored when the authorization redirect carried no
    /// `code` parameter, counts as no code at all.
    pub(crate) fn auth_code(&self) -> Result<&AuthorizationCode, PreconditionError> {
        match self {
            Self::HasCode(code) if !code.is_empty() => Ok(code),
            _ => Err(PreconditionError::MissingAuthCode),
        }
    }

    /// Returns the access token required by the REST login.
    ///
    /// An empty token, stored when the token endpoint answered without
    /// one, counts as no token at all.
    pub(crate) fn access_token(&self) -> Result<&AccessToken, PreconditionError> {
        match self {
            Self::HasAccessToken(token) if !token.is_empty() => Ok(token),
            _ => Err(PreconditionError::MissingAccessToken),
        }
    }

    /// Returns the live session required by entity requests and logout.
    pub(crate) fn session(&self) -> Result<&SessionToken, PreconditionError> {
        match self {
            Self::HasSession(session) => Ok(session),
            _ => Err(PreconditionError::MissingSession),
        }
    }

    /// Returns `true` if the full handshake has completed.
    pub(crate) fn has_session(&self) -> bool {
        matches!(self, Self::HasSession(_))
    }
}
