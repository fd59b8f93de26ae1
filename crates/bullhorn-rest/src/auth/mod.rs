//! Credentials, tokens, and handshake state for the Bullhorn login flow.
//!
//! The three-stage handshake itself is driven from
//! [`BullhornClient`](crate::BullhornClient); the types here are what it
//! consumes and produces along the way.

mod credentials;
mod state;
mod tokens;

pub use credentials::Credentials;
pub use tokens::{AccessToken, AuthorizationCode, SessionToken};

pub(crate) use state::HandshakeState;
