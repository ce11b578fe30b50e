use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tabled::Tabled;

// Response bodies of the `/api/spotify` routes. Unknown fields are ignored.

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Image {
    pub url: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

/// Profile returned by `/current-user`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyUser {
    pub id: String,
    pub display_name: Option<String>,
    #[serde(default)]
    pub images: Vec<Image>,
    pub product: Option<String>,
    /// Spotify object type, `user` for profiles.
    #[serde(rename = "type")]
    pub kind: String,
    pub uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumRef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub images: Vec<Image>,
}

/// Track on the active device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayingItem {
    pub id: String,
    pub name: String,
    pub artists: Vec<ArtistRef>,
    pub album: AlbumRef,
    pub duration_ms: u64,
}

/// Playback state returned by `/currently-playing`.
///
/// `item` is `None` when nothing is playing. The backend then usually sets
/// `message` instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CurrentlyPlaying {
    pub is_playing: bool,
    pub item: Option<PlayingItem>,
    /// Position within the track in milliseconds.
    pub progress_ms: Option<u64>,
    pub message: Option<String>,
}

impl CurrentlyPlaying {
    /// State used for a `204 No Content` answer.
    pub fn idle() -> Self {
        Self {
            is_playing: false,
            message: Some("No track currently playing".to_string()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackSummary {
    pub id: String,
    pub name: String,
    pub artists: Vec<ArtistRef>,
    pub album: AlbumRef,
}

/// One entry of the listening history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayHistory {
    /// RFC 3339 timestamp, formatted for display by
    /// [`crate::utils::format_played_at`].
    pub played_at: String,
    pub track: TrackSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentlyPlayed {
    pub items: Vec<PlayHistory>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopTracks {
    pub items: Vec<TrackSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracks {
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub images: Vec<Image>,
    pub tracks: PlaylistTracks,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlists {
    pub items: Vec<PlaylistSummary>,
}

/// Body of `/refresh-token`. A missing `success` field counts as `false`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    #[serde(default)]
    pub success: bool,
    pub access_token: Option<String>,
}

/// Body of `/callback` after the backend exchanged the authorization code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackResponse {
    #[serde(default)]
    pub success: bool,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    /// Access token lifetime in seconds.
    pub expires_in: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackResponse {
    pub success: bool,
    pub action: Option<String>,
}

/// Period the top-tracks ranking is computed over.
///
/// Parses from `short_term`, `medium_term` and `long_term`, or the short
/// forms `short`, `medium` and `long`.
///
/// # Example
///
/// ```
/// use sporldeck::types::TimeRange;
///
/// let range: TimeRange = "short".parse().unwrap();
/// assert_eq!(range.as_query_value(), "short_term");
/// assert_eq!(TimeRange::default(), TimeRange::MediumTerm);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeRange {
    ShortTerm,
    #[default]
    MediumTerm,
    LongTerm,
}

impl TimeRange {
    /// Value of the `time_range` query parameter.
    pub fn as_query_value(&self) -> &'static str {
        match self {
            TimeRange::ShortTerm => "short_term",
            TimeRange::MediumTerm => "medium_term",
            TimeRange::LongTerm => "long_term",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query_value())
    }
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "short_term" | "short" => Ok(TimeRange::ShortTerm),
            "medium_term" | "medium" => Ok(TimeRange::MediumTerm),
            "long_term" | "long" => Ok(TimeRange::LongTerm),
            other => Err(format!(
                "invalid time range `{}` (expected short_term, medium_term or long_term)",
                other
            )),
        }
    }
}

/// Table row for the `top` command.
#[derive(Tabled)]
pub struct TrackTableRow {
    pub name: String,
    pub artists: String,
    pub album: String,
}

#[derive(Tabled)]
pub struct HistoryTableRow {
    pub played: String,
    pub name: String,
    pub artists: String,
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    pub name: String,
    pub tracks: u64,
    pub description: String,
}
