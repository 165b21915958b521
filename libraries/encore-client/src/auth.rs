//! Authorization flows for the streaming service.
//!
//! Covers the two OAuth grants Encore needs: the one-time
//! authorization-code exchange (credential bootstrap) and the
//! refresh-token grant used on every unattended run.

use crate::error::{ClientError, Result};
use crate::types::{ServiceConfig, TokenResponse};
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

/// Authorization client for the streaming service accounts endpoint.
pub struct AuthClient<'a> {
    http: &'a Client,
    config: &'a ServiceConfig,
}

impl<'a> AuthClient<'a> {
    pub(crate) fn new(http: &'a Client, config: &'a ServiceConfig) -> Self {
        Self { http, config }
    }

    /// Build the authorization URL the operator opens in a browser.
    pub fn authorize_url(&self) -> Result<String> {
        let url = Url::parse_with_params(
            &format!("{}/authorize", self.config.accounts_base_url),
            &[
                ("client_id", self.config.client_id.as_str()),
                ("response_type", "code"),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("scope", &self.config.scopes.join(" ")),
            ],
        )
        .map_err(|e| ClientError::InvalidUrl(e.to_string()))?;

        Ok(url.into())
    }

    /// Extract the authorization code from the post-consent redirect URL.
    pub fn parse_redirect_code(&self, redirect_url: &str) -> Result<String> {
        let url = Url::parse(redirect_url.trim())
            .map_err(|e| ClientError::InvalidUrl(format!("{redirect_url}: {e}")))?;

        url.query_pairs()
            .find(|(key, _)| key == "code")
            .map(|(_, value)| value.into_owned())
            .ok_or_else(|| ClientError::AuthorizationCodeMissing(redirect_url.trim().to_string()))
    }

    /// Exchange an authorization code for an access/refresh token pair.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse> {
        let url = format!("{}/api/token", self.config.accounts_base_url);
        debug!(url = %url, "Exchanging authorization code");

        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.config.redirect_uri.as_str()),
        ];

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    ClientError::ServiceUnreachable(e.to_string())
                } else {
                    ClientError::Request(e)
                }
            })?;

        let status = response.status();

        if status.is_success() {
            let tokens: TokenResponse = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse token response: {}", e))
            })?;

            debug!("Authorization code exchange successful");
            Ok(tokens)
        } else if status.as_u16() == 400 || status.as_u16() == 401 {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Authorization code rejected");
            Err(ClientError::AuthFailed(error_text))
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(ClientError::Api {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }

    /// Obtain a fresh access token from a long-lived refresh token.
    pub async fn refresh_access_token(&self, refresh_token: &str) -> Result<TokenResponse> {
        let url = format!("{}/api/token", self.config.accounts_base_url);
        debug!(url = %url, "Refreshing access token");

        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ];

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    ClientError::ServiceUnreachable(e.to_string())
                } else {
                    ClientError::Request(e)
                }
            })?;

        let status = response.status();

        if status.is_success() {
            let tokens: TokenResponse = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse refresh response: {}", e))
            })?;

            debug!("Token refresh successful");
            Ok(tokens)
        } else if status.as_u16() == 400 || status.as_u16() == 401 {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, "Token refresh failed: refresh token rejected");
            Err(ClientError::TokenRefreshFailed(error_text))
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(ClientError::Api {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ServiceConfig {
        ServiceConfig::new(
            "client123",
            "secret456",
            "http://localhost:8888/callback",
            vec![
                "playlist-read-private".to_string(),
                "playlist-modify-private".to_string(),
            ],
        )
    }

    #[test]
    fn authorize_url_carries_identity_and_scopes() {
        let http = Client::new();
        let config = config();
        let auth = AuthClient::new(&http, &config);

        let url = auth.authorize_url().unwrap();
        let parsed = Url::parse(&url).unwrap();

        assert!(url.starts_with("https://accounts.spotify.com/authorize?"));
        let pairs: Vec<(String, String)> = parsed
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("client_id".into(), "client123".into())));
        assert!(pairs.contains(&("response_type".into(), "code".into())));
        assert!(pairs.contains(&(
            "scope".into(),
            "playlist-read-private playlist-modify-private".into()
        )));
    }

    #[test]
    fn redirect_code_is_extracted() {
        let http = Client::new();
        let config = config();
        let auth = AuthClient::new(&http, &config);

        let code = auth
            .parse_redirect_code("http://localhost:8888/callback?code=AQDtok3n&state=x")
            .unwrap();
        assert_eq!(code, "AQDtok3n");
    }

    #[test]
    fn redirect_without_code_is_rejected() {
        let http = Client::new();
        let config = config();
        let auth = AuthClient::new(&http, &config);

        let result = auth.parse_redirect_code("http://localhost:8888/callback?error=denied");
        assert!(matches!(
            result,
            Err(ClientError::AuthorizationCodeMissing(_))
        ));
    }

    #[test]
    fn redirect_url_is_trimmed_before_parsing() {
        let http = Client::new();
        let config = config();
        let auth = AuthClient::new(&http, &config);

        // Terminal paste commonly carries a trailing newline
        let code = auth
            .parse_redirect_code("http://localhost:8888/callback?code=abc\n")
            .unwrap();
        assert_eq!(code, "abc");
    }
}
