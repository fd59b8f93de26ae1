//! bullhorn-rest - Bullhorn REST API client
//!
//! This library drives Bullhorn's three-stage login handshake and the
//! entity reads that follow it. All authenticated operations flow
//! through a [`BullhornClient`], which will not issue an entity request
//! until the handshake has produced a session.
//!
//! # Example
//!
//! ```no_run
//! use bullhorn_rest::{BullhornClient, ClientConfig, Credentials};
//!
//! # async fn example() -> Result<(), bullhorn_rest::Error> {
//! let config = ClientConfig::from_env()?;
//! let mut client = BullhornClient::new(config)?;
//!
//! let session = client
//!     .connect(&Credentials::new("api.agency", "hunter2"))
//!     .await?;
//! println!("REST session at {}", session.rest_url());
//!
//! let history = client.candidate_work_history(505).await?;
//! for row in &history {
//!     println!("{} at {}", row["title"], row["companyName"]);
//! }
//!
//! client.logout().await?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
mod rest;
pub mod retry;
pub mod types;

// Re-export primary types at crate root for convenience
pub use auth::{AccessToken, AuthorizationCode, Credentials, SessionToken};
pub use client::BullhornClient;
pub use config::ClientConfig;
pub use error::Error;
pub use retry::RetryPolicy;
pub use types::BaseUrl;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
