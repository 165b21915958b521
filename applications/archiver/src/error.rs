/// Archiver error types
use encore_client::ClientError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ArchiverError>;

#[derive(Debug, Error)]
pub enum ArchiverError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("No playlist named \"Discover Weekly\" found in catalog search")]
    WeeklyPlaylistNotFound,

    #[error("Weekly playlist has no tracks")]
    EmptyWeeklyPlaylist,

    #[error("Invalid added_at timestamp '{value}': {source}")]
    InvalidTimestamp {
        value: String,
        source: chrono::ParseError,
    },

    #[error("Token response did not include a refresh token")]
    RefreshTokenMissing,

    #[error("Service client error: {0}")]
    Client(#[from] ClientError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
