/// Weekly archival: locate the service-curated weekly playlist, derive the
/// week label, and merge its tracks into a permanent week-named playlist.
use crate::error::{ArchiverError, Result};
use chrono::NaiveDateTime;
use encore_client::PlaylistClient;
use std::collections::HashSet;
use tracing::info;

/// Name of the service-curated weekly recommendation playlist.
pub const WEEKLY_PLAYLIST_NAME: &str = "Discover Weekly";

/// Timestamp format of the `added_at` field (ISO-8601 UTC).
const ADDED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Page size used when walking the archive playlist's tracks.
const TRACK_PAGE_LIMIT: u32 = 50;

/// The weekly playlist's current track set plus its calendar label.
#[derive(Debug, Clone)]
pub struct CurrentWeek {
    /// `YYYY-MM-DD`, from the first track's `added_at`
    pub week_label: String,
    /// Track URIs in playlist order
    pub track_uris: Vec<String>,
}

/// Result of one merge pass, for logging and tests.
#[derive(Debug)]
pub struct MergeOutcome {
    pub playlist_id: String,
    /// Whether the archive playlist was created on this run
    pub created: bool,
    /// Number of tracks appended (zero for an idempotent re-run)
    pub added: usize,
}

/// Deterministic archive playlist name for a week label.
pub fn archive_playlist_name(week_label: &str) -> String {
    format!("Discover Weekly from {week_label}")
}

/// Find the weekly playlist in the catalog search results.
///
/// The search ranks by relevance, so several results can carry the literal
/// name. The full page is scanned and the last exact-name match wins;
/// that is long-standing behavior and is kept as-is.
pub async fn find_weekly_playlist(playlists: &PlaylistClient<'_>) -> Result<String> {
    let results = playlists.search_playlists(WEEKLY_PLAYLIST_NAME).await?;

    let mut weekly_id = None;
    for playlist in &results {
        if playlist.name == WEEKLY_PLAYLIST_NAME {
            weekly_id = Some(playlist.id.clone());
        }
    }

    weekly_id.ok_or(ArchiverError::WeeklyPlaylistNotFound)
}

/// Fetch the weekly playlist and derive this week's label and track list.
///
/// Reads a single page only: the weekly playlist is small by construction,
/// and anything past the first page is dropped. The merger, by contrast,
/// paginates fully; keep the asymmetry.
pub async fn parse_current_week(
    playlists: &PlaylistClient<'_>,
    weekly_playlist_id: &str,
) -> Result<CurrentWeek> {
    let playlist = playlists.get_playlist(weekly_playlist_id).await?;

    let first = playlist
        .tracks
        .items
        .first()
        .ok_or(ArchiverError::EmptyWeeklyPlaylist)?;
    let week_label = week_label_from_added_at(&first.added_at)?;

    let track_uris = playlist
        .tracks
        .items
        .iter()
        .map(|item| item.track.uri.clone())
        .collect();

    Ok(CurrentWeek {
        week_label,
        track_uris,
    })
}

/// Idempotently merge the weekly tracks into the week's archive playlist.
///
/// Finds or creates the private archive playlist, walks its full track
/// list page by page, and appends only the weekly tracks not already
/// present, in weekly order, as one batch. A re-run within the same week
/// performs no mutating call.
pub async fn merge_into_archive(
    playlists: &PlaylistClient<'_>,
    username: &str,
    week: &CurrentWeek,
) -> Result<MergeOutcome> {
    let archive_name = archive_playlist_name(&week.week_label);

    let user_playlists = playlists.user_playlists(username).await?;
    let existing_id = user_playlists
        .items
        .iter()
        .find(|playlist| playlist.name == archive_name)
        .map(|playlist| playlist.id.clone());

    let (playlist_id, created) = match existing_id {
        Some(id) => (id, false),
        None => {
            info!(name = %archive_name, "Creating this week's archive playlist");
            let created = playlists.create_playlist(username, &archive_name, false).await?;
            (created.id, true)
        }
    };

    // Walk every page: the whole archive must be seen before diffing.
    let mut permanent_uris = Vec::new();
    let mut page = playlists
        .playlist_tracks(&playlist_id, 0, TRACK_PAGE_LIMIT)
        .await?;
    loop {
        permanent_uris.extend(page.items.iter().map(|item| item.track.uri.clone()));
        let Some(next_url) = page.next.take() else {
            break;
        };
        page = playlists.next_page(&next_url).await?;
    }

    let new_tracks = select_new_tracks(&week.track_uris, &permanent_uris);

    if new_tracks.is_empty() {
        info!(
            week = %week.week_label,
            "Archive already contains this week's tracks, skipping add"
        );
    } else {
        playlists.add_tracks(&playlist_id, &new_tracks).await?;
        info!(
            week = %week.week_label,
            added = new_tracks.len(),
            "Done archiving this week's tracks"
        );
    }

    Ok(MergeOutcome {
        playlist_id,
        created,
        added: new_tracks.len(),
    })
}

/// Weekly tracks not yet in the archive, in weekly order.
fn select_new_tracks(weekly_uris: &[String], permanent_uris: &[String]) -> Vec<String> {
    let existing: HashSet<&str> = permanent_uris.iter().map(String::as_str).collect();

    weekly_uris
        .iter()
        .filter(|uri| !existing.contains(uri.as_str()))
        .cloned()
        .collect()
}

fn week_label_from_added_at(added_at: &str) -> Result<String> {
    let added = NaiveDateTime::parse_from_str(added_at, ADDED_AT_FORMAT).map_err(|source| {
        ArchiverError::InvalidTimestamp {
            value: added_at.to_string(),
            source,
        }
    })?;

    Ok(added.format("%Y-%m-%d").to_string())
}
