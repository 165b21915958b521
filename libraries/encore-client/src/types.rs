//! Types for streaming-service API requests and responses.

use serde::{Deserialize, Serialize};

/// Default API endpoint for playlist operations.
pub const DEFAULT_API_BASE_URL: &str = "https://api.spotify.com";

/// Default accounts endpoint for authorization and token grants.
pub const DEFAULT_ACCOUNTS_BASE_URL: &str = "https://accounts.spotify.com";

/// Configuration for connecting to the streaming service.
///
/// Holds the application identity registered with the service plus the
/// optional long-lived refresh credential used for unattended runs.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Base URL for playlist API calls
    pub api_base_url: String,
    /// Base URL for the authorization/token endpoints
    pub accounts_base_url: String,
    /// Application client identifier
    pub client_id: String,
    /// Application client secret
    pub client_secret: String,
    /// Redirect URI registered for the application
    pub redirect_uri: String,
    /// Permission scopes to request
    pub scopes: Vec<String>,
    /// Long-lived refresh credential (absent during bootstrap)
    pub refresh_token: Option<String>,
}

impl ServiceConfig {
    /// Create a config for the default service endpoints.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
        scopes: Vec<String>,
    ) -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            accounts_base_url: DEFAULT_ACCOUNTS_BASE_URL.to_string(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            scopes,
            refresh_token: None,
        }
    }

    /// Attach a previously bootstrapped refresh credential.
    #[must_use]
    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = Some(refresh_token.into());
        self
    }

    /// Point the client at non-default endpoints (self-hosted or test server).
    #[must_use]
    pub fn with_base_urls(
        mut self,
        api_base_url: impl Into<String>,
        accounts_base_url: impl Into<String>,
    ) -> Self {
        self.api_base_url = api_base_url.into();
        self.accounts_base_url = accounts_base_url.into();
        self
    }
}

// =============================================================================
// Authorization Types
// =============================================================================

/// Response from the token endpoint (both grant types).
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Present on authorization-code grants; refresh grants may omit it
    pub refresh_token: Option<String>,
    /// Token validity in seconds
    pub expires_in: u64,
    pub token_type: Option<String>,
    pub scope: Option<String>,
}

// =============================================================================
// Playlist Types
// =============================================================================

/// A playlist as listed in search results or the user's library.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
}

/// Search response envelope for `type=playlist` queries.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub playlists: SearchPlaylists,
}

/// The playlist portion of a search response.
#[derive(Debug, Deserialize)]
pub struct SearchPlaylists {
    pub items: Vec<PlaylistSummary>,
}

/// A full playlist with its (first page of) tracks embedded.
#[derive(Debug, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub tracks: TrackPage,
}

/// One page of playlist tracks.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrackPage {
    pub items: Vec<PlaylistTrack>,
    /// Absolute URL of the next page, or null on the last page
    #[serde(default)]
    pub next: Option<String>,
}

/// A track entry inside a playlist, with its insertion timestamp.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaylistTrack {
    /// ISO-8601 UTC timestamp of when the track was added
    pub added_at: String,
    pub track: TrackRef,
}

/// Reference to a playable track. Equality is exact URI match.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrackRef {
    pub uri: String,
}

/// One page of the user's playlists.
#[derive(Debug, Deserialize)]
pub struct UserPlaylistsPage {
    pub items: Vec<PlaylistSummary>,
    #[serde(default)]
    pub next: Option<String>,
}

/// Request body for playlist creation.
#[derive(Debug, Serialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub public: bool,
}

/// Response from playlist creation.
#[derive(Debug, Deserialize)]
pub struct CreatedPlaylist {
    pub id: String,
}

/// Request body for batch track addition.
#[derive(Debug, Serialize)]
pub struct AddTracksRequest {
    pub uris: Vec<String>,
}
