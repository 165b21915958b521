//! Main streaming-service client.

use crate::auth::AuthClient;
use crate::error::{ClientError, Result};
use crate::playlists::PlaylistClient;
use crate::types::ServiceConfig;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

/// Client for the streaming service's playlist and authorization API.
///
/// Owns the HTTP connection pool and the service configuration. Call
/// [`authenticate`](EncoreClient::authenticate) to trade the configured
/// refresh credential for an access token, then use
/// [`playlists`](EncoreClient::playlists) for API operations.
///
/// # Example
///
/// ```ignore
/// use encore_client::{EncoreClient, ServiceConfig};
///
/// let config = ServiceConfig::new(client_id, client_secret, redirect_uri, scopes)
///     .with_refresh_token(refresh_token);
/// let mut client = EncoreClient::new(config)?;
///
/// client.authenticate().await?;
/// let results = client.playlists()?.search_playlists("Discover Weekly").await?;
/// ```
pub struct EncoreClient {
    http: Client,
    config: ServiceConfig,
    access_token: Option<String>,
}

impl EncoreClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ServiceConfig) -> Result<Self> {
        let api_base_url = normalize_url(&config.api_base_url)?;
        let accounts_base_url = normalize_url(&config.accounts_base_url)?;

        let normalized_config = ServiceConfig {
            api_base_url,
            accounts_base_url,
            ..config
        };

        // HTTP client with reasonable defaults
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Encore/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Request)?;

        Ok(Self {
            http,
            config: normalized_config,
            access_token: None,
        })
    }

    /// Get the API base URL.
    pub fn api_base_url(&self) -> &str {
        &self.config.api_base_url
    }

    /// Check if the client holds an access token.
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    /// Get the authorization sub-client (does not require a token).
    pub fn auth(&self) -> AuthClient<'_> {
        AuthClient::new(&self.http, &self.config)
    }

    /// Exchange the configured refresh credential for an access token.
    ///
    /// Fails with [`ClientError::AuthRequired`] if no refresh token was
    /// configured, or [`ClientError::TokenRefreshFailed`] if the service
    /// rejects the credential. The caller decides whether a failed
    /// authentication aborts the run.
    pub async fn authenticate(&mut self) -> Result<()> {
        let refresh_token = self
            .config
            .refresh_token
            .clone()
            .ok_or(ClientError::AuthRequired)?;

        let tokens = self.auth().refresh_access_token(&refresh_token).await?;

        // The service may rotate the refresh token on use
        if let Some(rotated) = tokens.refresh_token {
            self.config.refresh_token = Some(rotated);
        }
        self.access_token = Some(tokens.access_token);

        info!("Authenticated with the streaming service");
        Ok(())
    }

    /// Set the access token directly (e.g., from a completed bootstrap).
    pub fn set_access_token(&mut self, access_token: impl Into<String>) {
        self.access_token = Some(access_token.into());
    }

    /// Get a playlist client for API operations.
    ///
    /// Returns an error if not authenticated.
    pub fn playlists(&self) -> Result<PlaylistClient<'_>> {
        let access_token = self
            .access_token
            .as_deref()
            .ok_or(ClientError::AuthRequired)?;

        Ok(PlaylistClient::new(
            &self.http,
            &self.config.api_base_url,
            access_token,
        ))
    }
}

/// Validate a base URL and strip trailing slashes.
fn normalize_url(url: &str) -> Result<String> {
    if url.is_empty() {
        return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
    }

    let url = url.trim_end_matches('/').to_string();
    if !url.starts_with("http://") && !url.starts_with("https://") {
        debug!(url = %url, "Rejected base URL without http(s) scheme");
        return Err(ClientError::InvalidUrl(
            "URL must start with http:// or https://".into(),
        ));
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(api: &str) -> ServiceConfig {
        ServiceConfig::new("id", "secret", "http://localhost/callback", Vec::new())
            .with_base_urls(api, "https://accounts.example.com")
    }

    #[test]
    fn test_url_validation() {
        assert!(EncoreClient::new(config_for("https://example.com")).is_ok());
        assert!(EncoreClient::new(config_for("http://localhost:8080")).is_ok());

        assert!(EncoreClient::new(config_for("")).is_err());
        assert!(EncoreClient::new(config_for("not-a-url")).is_err());
        assert!(EncoreClient::new(config_for("ftp://example.com")).is_err());
    }

    #[test]
    fn test_url_normalization() {
        let client = EncoreClient::new(config_for("https://example.com/")).expect("valid url");
        assert_eq!(client.api_base_url(), "https://example.com");
    }

    #[test]
    fn test_playlists_requires_token() {
        let client = EncoreClient::new(config_for("https://example.com")).unwrap();
        assert!(!client.is_authenticated());
        assert!(matches!(
            client.playlists(),
            Err(ClientError::AuthRequired)
        ));
    }
}
