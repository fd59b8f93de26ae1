//! REST wire layer.
//!
//! This module provides the endpoint definitions and the retrying
//! HTTP transport the client drives.

mod endpoints;
mod transport;

pub(crate) use endpoints::*;
pub(crate) use transport::Transport;
