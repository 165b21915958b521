//! Error types for the Encore client.

use thiserror::Error;

/// Errors that can occur when talking to the streaming service.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Service returned an error response
    #[error("Service error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Authentication required but no access token available
    #[error("Authentication required")]
    AuthRequired,

    /// Authorization-code exchange rejected by the service
    #[error("Authorization failed: {0}")]
    AuthFailed(String),

    /// Refresh-token grant rejected by the service
    #[error("Token refresh failed: {0}")]
    TokenRefreshFailed(String),

    /// Redirect URL did not carry an authorization code
    #[error("No authorization code in redirect URL: {0}")]
    AuthorizationCodeMissing(String),

    /// Invalid service URL
    #[error("Invalid service URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse a service response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Service is offline or unreachable
    #[error("Service unreachable: {0}")]
    ServiceUnreachable(String),

    /// Rate limited by the service
    #[error("Rate limited, retry after {retry_after_secs} seconds")]
    RateLimited { retry_after_secs: u64 },
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
