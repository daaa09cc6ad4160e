//! Remote Meridian Lab API client.
//!
//! The portal talks to exactly one upstream: the lab's REST API. This module
//! provides the authenticated request gateway ([`ApiClient`]) and typed
//! wrappers for every endpoint the views consume, one submodule per
//! resource. All business decisions happen on the other side of this
//! boundary.

pub mod audit;
pub mod auth;
pub mod bookings;
pub mod branches;
pub mod catalog;
pub mod client;
pub mod customers;
pub mod payments;
pub mod reports;
pub mod technicians;
pub mod types;

pub use client::{ApiClient, Credential};

use thiserror::Error;

/// Errors from the remote API boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connection refused, timeout, bad JSON).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server rejected the bearer token (HTTP 401).
    #[error("not authenticated")]
    Unauthorized,

    /// The requested resource does not exist (HTTP 404).
    #[error("not found")]
    NotFound,

    /// Any other non-success status, with the server's message if it sent one.
    #[error("server returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the response body.
        message: String,
    },

    /// A path could not be joined onto the configured base URL.
    #[error("invalid API endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
}
