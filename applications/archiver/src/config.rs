/// Archiver configuration
///
/// All settings come from the environment; every variable except the
/// endpoint overrides is required and has no default. The config is an
/// explicit value passed to the components that need it rather than a
/// process-global.
use crate::error::{ArchiverError, Result};
use encore_client::ServiceConfig;
use std::env;

/// Permission scopes the archiver needs: read and modify private playlists.
pub const SCOPES: [&str; 2] = ["playlist-read-private", "playlist-modify-private"];

pub const ENV_CLIENT_ID: &str = "ENCORE_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "ENCORE_CLIENT_SECRET";
pub const ENV_REDIRECT_URI: &str = "ENCORE_REDIRECT_URI";
pub const ENV_USERNAME: &str = "ENCORE_USERNAME";
pub const ENV_REFRESH_TOKEN: &str = "ENCORE_REFRESH_TOKEN";
pub const ENV_API_BASE_URL: &str = "ENCORE_API_BASE_URL";
pub const ENV_ACCOUNTS_BASE_URL: &str = "ENCORE_ACCOUNTS_BASE_URL";

#[derive(Debug, Clone)]
pub struct ArchiverConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub username: String,
    /// Required for `run`; the `authorize` command mints it
    pub refresh_token: Option<String>,
    pub scopes: Vec<String>,
    /// Endpoint overrides, absent in normal operation
    pub api_base_url: Option<String>,
    pub accounts_base_url: Option<String>,
}

impl ArchiverConfig {
    /// Read configuration from the environment.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            client_id: required(ENV_CLIENT_ID)?,
            client_secret: required(ENV_CLIENT_SECRET)?,
            redirect_uri: required(ENV_REDIRECT_URI)?,
            username: required(ENV_USERNAME)?,
            refresh_token: env::var(ENV_REFRESH_TOKEN).ok(),
            scopes: SCOPES.iter().map(ToString::to_string).collect(),
            api_base_url: env::var(ENV_API_BASE_URL).ok(),
            accounts_base_url: env::var(ENV_ACCOUNTS_BASE_URL).ok(),
        })
    }

    /// The refresh credential, which the unattended `run` path requires.
    pub fn require_refresh_token(&self) -> Result<&str> {
        self.refresh_token
            .as_deref()
            .ok_or(ArchiverError::MissingEnv(ENV_REFRESH_TOKEN))
    }

    /// Build the service client configuration.
    pub fn service_config(&self) -> ServiceConfig {
        let mut config = ServiceConfig::new(
            &self.client_id,
            &self.client_secret,
            &self.redirect_uri,
            self.scopes.clone(),
        );

        if let (Some(api), Some(accounts)) = (&self.api_base_url, &self.accounts_base_url) {
            config = config.with_base_urls(api, accounts);
        }

        if let Some(refresh_token) = &self.refresh_token {
            config = config.with_refresh_token(refresh_token);
        }

        config
    }
}

fn required(name: &'static str) -> Result<String> {
    env::var(name).map_err(|_| ArchiverError::MissingEnv(name))
}
