/// One-time interactive credential bootstrap.
///
/// Drives the authorization-code flow by hand: the operator opens the
/// printed URL in a browser, approves the requested scopes, and pastes the
/// redirect URL back. The resulting refresh token is printed for the
/// operator to store in the archiver's environment. Not part of the
/// unattended path.
use crate::config::{ArchiverConfig, ENV_REFRESH_TOKEN};
use crate::error::{ArchiverError, Result};
use encore_client::EncoreClient;
use std::io::{self, BufRead, Write};

pub async fn run_authorize(config: &ArchiverConfig) -> Result<()> {
    let client = EncoreClient::new(config.service_config())?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    let refresh_token = authorize_with(&client, &mut input, &mut output).await?;

    println!("\nYour refresh token is:\n{refresh_token}\n");
    println!("Store it in {ENV_REFRESH_TOKEN} for unattended runs.");
    Ok(())
}

/// The flow proper, generic over IO so tests can drive it.
async fn authorize_with(
    client: &EncoreClient,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<String> {
    let auth = client.auth();

    let url = auth.authorize_url()?;
    writeln!(output, "1. Open the link in your browser:\n\n{url}\n")?;
    writeln!(
        output,
        "2. Enter the URL that you've been redirected to after accepting the authorization:"
    )?;
    output.flush()?;

    let mut redirect_url = String::new();
    input.read_line(&mut redirect_url)?;

    let code = auth.parse_redirect_code(&redirect_url)?;
    let tokens = auth.exchange_code(&code).await?;

    tokens
        .refresh_token
        .ok_or(ArchiverError::RefreshTokenMissing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SCOPES;
    use encore_client::ServiceConfig;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(accounts_url: &str) -> EncoreClient {
        let config = ServiceConfig::new(
            "client123",
            "secret456",
            "http://localhost:8888/callback",
            SCOPES.iter().map(ToString::to_string).collect(),
        )
        .with_base_urls("http://api.unused.local", accounts_url);
        EncoreClient::new(config).unwrap()
    }

    #[tokio::test]
    async fn bootstrap_prints_url_and_returns_refresh_token() {
        let accounts = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/token"))
            .and(body_string_contains("grant_type=authorization_code"))
            .and(body_string_contains("code=AQDcode"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "access_abc",
                "refresh_token": "refresh_xyz",
                "expires_in": 3600
            })))
            .mount(&accounts)
            .await;

        let client = client_for(&accounts.uri());
        let mut input =
            "http://localhost:8888/callback?code=AQDcode\n".as_bytes();
        let mut output = Vec::new();

        let refresh_token = authorize_with(&client, &mut input, &mut output)
            .await
            .unwrap();

        assert_eq!(refresh_token, "refresh_xyz");
        let printed = String::from_utf8(output).unwrap();
        assert!(printed.contains("/authorize?"));
        assert!(printed.contains("client_id=client123"));
    }

    #[tokio::test]
    async fn bootstrap_fails_when_refresh_token_absent() {
        let accounts = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "access_abc",
                "expires_in": 3600
            })))
            .mount(&accounts)
            .await;

        let client = client_for(&accounts.uri());
        let mut input = "http://localhost:8888/callback?code=AQDcode\n".as_bytes();
        let mut output = Vec::new();

        let result = authorize_with(&client, &mut input, &mut output).await;
        assert!(matches!(result, Err(ArchiverError::RefreshTokenMissing)));
    }
}
