//! Encore Streaming Service Client
//!
//! HTTP client library for the streaming service's playlist and
//! authorization API.
//!
//! # Features
//!
//! - **Authorization**: authorization-code bootstrap, refresh-token grant
//! - **Playlists**: search, fetch, create, list, page through tracks,
//!   batch track addition
//!
//! # Example
//!
//! ```ignore
//! use encore_client::{EncoreClient, ServiceConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServiceConfig::new(client_id, client_secret, redirect_uri, scopes)
//!         .with_refresh_token(refresh_token);
//!     let mut client = EncoreClient::new(config)?;
//!
//!     client.authenticate().await?;
//!
//!     let playlists = client.playlists()?;
//!     let results = playlists.search_playlists("Discover Weekly").await?;
//!     println!("Found {} playlists", results.len());
//!
//!     Ok(())
//! }
//! ```

mod auth;
mod client;
mod error;
mod playlists;
mod types;

// Re-export main types
pub use client::EncoreClient;
pub use error::{ClientError, Result};
pub use types::{
    CreatedPlaylist, Playlist, PlaylistSummary, PlaylistTrack, ServiceConfig, TokenResponse,
    TrackPage, TrackRef, UserPlaylistsPage, DEFAULT_ACCOUNTS_BASE_URL, DEFAULT_API_BASE_URL,
};

// Re-export sub-clients for direct use if needed
pub use auth::AuthClient;
pub use playlists::PlaylistClient;
