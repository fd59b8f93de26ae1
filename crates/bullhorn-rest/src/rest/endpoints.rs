//! Bullhorn endpoint definitions and request/response types.

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Endpoint Paths
// ============================================================================

/// Authorization endpoint, relative to the auth base URL.
pub const OAUTH_AUTHORIZE: &str = "oauth/authorize";

/// Token exchange endpoint, relative to the auth base URL.
pub const OAUTH_TOKEN: &str = "oauth/token";

/// REST login endpoint, relative to the rest base URL.
pub const REST_LOGIN: &str = "rest-services/login";

/// Logout endpoint, relative to the session REST base URL.
pub const LOGOUT: &str = "logout";

/// Path for a single-entity fetch, relative to the session REST base URL.
pub fn entity_path(entity: &str, id: u64) -> String {
    format!("entity/{}/{}", entity, id)
}

/// Path for a `where`-filtered query, relative to the session REST base URL.
pub fn query_path(entity: &str) -> String {
    format!("query/{}", entity)
}

// ============================================================================
// Entities and Field Selections
// ============================================================================

/// Candidate entity name.
pub const CANDIDATE: &str = "Candidate";

/// CorporateUser entity name.
pub const CORPORATE_USER: &str = "CorporateUser";

/// CandidateWorkHistory entity name.
pub const CANDIDATE_WORK_HISTORY: &str = "CandidateWorkHistory";

/// CandidateEducation entity name.
pub const CANDIDATE_EDUCATION: &str = "CandidateEducation";

/// Contact and identity fields for candidate vitals lookups.
pub const CANDIDATE_VITALS_FIELDS: &str = "email,firstName,lastName,ssn,dateOfBirth";

/// General profile fields for candidate lookups.
pub const CANDIDATE_FIELDS: &str =
    "firstName,lastName,email,address,id,phone,phone2,phone3,mobile";

/// Profile fields for corporate user lookups.
pub const CORPORATE_USER_FIELDS: &str = "email,firstName,lastName,userType";

/// Fields returned for each work history row.
pub const WORK_HISTORY_FIELDS: &str = "id,title,salaryType,salary1,salary2,startDate,endDate,\
                                       bonus,commission,companyName,comments,isDeleted";

/// Fields returned for each education row.
pub const EDUCATION_FIELDS: &str = "id,city,degree,major,gpa,state,school,endDate,\
                                    graduationDate,startDate,comments,expirationDate,\
                                    certification,isDeleted";

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for the authorization request.
#[derive(Serialize)]
pub struct AuthorizeParams<'a> {
    pub response_type: &'a str,
    pub action: &'a str,
    pub username: &'a str,
    pub password: &'a str,
    pub client_id: &'a str,
}

// Intentionally hide password in Debug output
impl fmt::Debug for AuthorizeParams<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthorizeParams")
            .field("response_type", &self.response_type)
            .field("action", &self.action)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("client_id", &self.client_id)
            .finish()
    }
}

/// Query parameters for the token exchange.
#[derive(Serialize)]
pub struct TokenParams<'a> {
    pub grant_type: &'a str,
    pub code: &'a str,
    pub client_id: &'a str,
    pub client_secret: &'a str,
}

// Intentionally hide code and client secret in Debug output
impl fmt::Debug for TokenParams<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenParams")
            .field("grant_type", &self.grant_type)
            .field("code", &"[REDACTED]")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

/// Query parameters for the REST login.
#[derive(Serialize)]
pub struct LoginParams<'a> {
    pub version: &'a str,
    pub access_token: &'a str,
}

// Intentionally hide access token in Debug output
impl fmt::Debug for LoginParams<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginParams")
            .field("version", &self.version)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

/// Query parameters for a single-entity fetch.
#[derive(Debug, Serialize)]
pub struct EntityParams<'a> {
    pub fields: &'a str,
}

/// Query parameters for a `where`-filtered query.
#[derive(Debug, Serialize)]
pub struct QueryParams<'a> {
    #[serde(rename = "where")]
    pub filter: &'a str,
    pub fields: &'a str,
}

/// Response from the token exchange.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
}

/// Response from the REST login.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(default, rename = "restUrl")]
    pub rest_url: Option<String>,
    #[serde(default, rename = "BhRestToken")]
    pub session_key: Option<String>,
}

/// One level of `data` wrapping around every entity payload.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// Error response format shared by the OAuth and REST services.
///
/// The OAuth endpoints answer with `error`/`error_description`; the REST
/// endpoints answer with `errorMessage`. Both collapse into one shape.
#[derive(Debug, Deserialize)]
pub struct RestErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default, alias = "error_description", alias = "errorMessage")]
    pub message: Option<String>,
}
