//! Playlist operations for the streaming service.

use crate::error::{ClientError, Result};
use crate::types::{
    AddTracksRequest, CreatePlaylistRequest, CreatedPlaylist, Playlist, PlaylistSummary,
    SearchResponse, TrackPage, UserPlaylistsPage,
};
use reqwest::Client;
use tracing::debug;

/// Playlist client for the streaming service API.
pub struct PlaylistClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    access_token: &'a str,
}

impl<'a> PlaylistClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, access_token: &'a str) -> Self {
        Self {
            http,
            base_url,
            access_token,
        }
    }

    /// Search the catalog for playlists matching a query.
    ///
    /// Returns the first result page in service relevance order.
    pub async fn search_playlists(&self, query: &str) -> Result<Vec<PlaylistSummary>> {
        let url = format!(
            "{}/v1/search?q={}&type=playlist",
            self.base_url,
            urlencoding::encode(query)
        );
        debug!(url = %url, query = %query, "Searching playlists");

        let response = self
            .http
            .get(&url)
            .bearer_auth(self.access_token)
            .send()
            .await?;

        let status = response.status();

        if status.is_success() {
            let results: SearchResponse = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse search response: {}", e))
            })?;

            debug!(results = results.playlists.items.len(), "Search complete");
            Ok(results.playlists.items)
        } else {
            Err(error_from_response(response).await)
        }
    }

    /// Get a playlist with its first page of tracks embedded.
    pub async fn get_playlist(&self, playlist_id: &str) -> Result<Playlist> {
        let url = format!("{}/v1/playlists/{}", self.base_url, playlist_id);
        debug!(url = %url, playlist_id = %playlist_id, "Fetching playlist");

        let response = self
            .http
            .get(&url)
            .bearer_auth(self.access_token)
            .send()
            .await?;

        let status = response.status();

        if status.is_success() {
            let playlist: Playlist = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse playlist response: {}", e))
            })?;

            debug!(
                name = %playlist.name,
                tracks = playlist.tracks.items.len(),
                "Fetched playlist"
            );
            Ok(playlist)
        } else {
            Err(error_from_response(response).await)
        }
    }

    /// List the user's playlists (first page).
    pub async fn user_playlists(&self, username: &str) -> Result<UserPlaylistsPage> {
        let url = format!(
            "{}/v1/users/{}/playlists",
            self.base_url,
            urlencoding::encode(username)
        );
        debug!(url = %url, username = %username, "Listing user playlists");

        let response = self
            .http
            .get(&url)
            .bearer_auth(self.access_token)
            .send()
            .await?;

        let status = response.status();

        if status.is_success() {
            let page: UserPlaylistsPage = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse playlists response: {}", e))
            })?;

            debug!(playlists = page.items.len(), "Listed user playlists");
            Ok(page)
        } else {
            Err(error_from_response(response).await)
        }
    }

    /// Create a playlist owned by the user.
    pub async fn create_playlist(
        &self,
        username: &str,
        name: &str,
        public: bool,
    ) -> Result<CreatedPlaylist> {
        let url = format!(
            "{}/v1/users/{}/playlists",
            self.base_url,
            urlencoding::encode(username)
        );
        debug!(url = %url, name = %name, public = public, "Creating playlist");

        let request = CreatePlaylistRequest {
            name: name.to_string(),
            public,
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(self.access_token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();

        if status.is_success() {
            let created: CreatedPlaylist = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse create response: {}", e))
            })?;

            debug!(playlist_id = %created.id, "Playlist created");
            Ok(created)
        } else {
            Err(error_from_response(response).await)
        }
    }

    /// Fetch one page of a playlist's tracks.
    pub async fn playlist_tracks(
        &self,
        playlist_id: &str,
        offset: u32,
        limit: u32,
    ) -> Result<TrackPage> {
        let url = format!(
            "{}/v1/playlists/{}/tracks?offset={}&limit={}",
            self.base_url, playlist_id, offset, limit
        );
        debug!(url = %url, playlist_id = %playlist_id, "Fetching playlist tracks");

        let response = self
            .http
            .get(&url)
            .bearer_auth(self.access_token)
            .send()
            .await?;

        let status = response.status();

        if status.is_success() {
            let page: TrackPage = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse tracks response: {}", e))
            })?;

            debug!(tracks = page.items.len(), has_next = page.next.is_some(), "Fetched track page");
            Ok(page)
        } else {
            Err(error_from_response(response).await)
        }
    }

    /// Follow a page cursor returned in a previous response.
    ///
    /// The service hands back absolute URLs in the `next` field.
    pub async fn next_page(&self, next_url: &str) -> Result<TrackPage> {
        debug!(url = %next_url, "Following next-page cursor");

        let response = self
            .http
            .get(next_url)
            .bearer_auth(self.access_token)
            .send()
            .await?;

        let status = response.status();

        if status.is_success() {
            let page: TrackPage = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse tracks response: {}", e))
            })?;

            debug!(tracks = page.items.len(), has_next = page.next.is_some(), "Fetched track page");
            Ok(page)
        } else {
            Err(error_from_response(response).await)
        }
    }

    /// Append tracks to a playlist in a single batch, preserving order.
    pub async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<()> {
        let url = format!("{}/v1/playlists/{}/tracks", self.base_url, playlist_id);
        debug!(url = %url, playlist_id = %playlist_id, count = uris.len(), "Adding tracks");

        let request = AddTracksRequest {
            uris: uris.to_vec(),
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(self.access_token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();

        if status.is_success() {
            debug!(playlist_id = %playlist_id, count = uris.len(), "Tracks added");
            Ok(())
        } else {
            Err(error_from_response(response).await)
        }
    }
}

/// Map a non-2xx response to a typed error.
///
/// 401 means the access token is missing or expired; 429 carries the
/// service's Retry-After header. No retry is performed at this layer.
async fn error_from_response(response: reqwest::Response) -> ClientError {
    let status = response.status().as_u16();

    if status == 401 {
        return ClientError::AuthRequired;
    }

    if status == 429 {
        let retry_after_secs = response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or(1);
        return ClientError::RateLimited { retry_after_secs };
    }

    let message = response.text().await.unwrap_or_default();
    ClientError::Api { status, message }
}

// URL encoding helper
mod urlencoding {
    pub fn encode(s: &str) -> String {
        url::form_urlencoded::byte_serialize(s.as_bytes()).collect()
    }
}
