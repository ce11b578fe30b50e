use reqwest::Method;

use crate::{
    error::ClientError,
    spotify::client::SpotifyClient,
    types::{Playlists, RecentlyPlayed, TimeRange, TopTracks},
};

pub const DEFAULT_RECENT_LIMIT: u32 = 10;
pub const DEFAULT_TOP_LIMIT: u32 = 10;
pub const DEFAULT_PLAYLIST_LIMIT: u32 = 20;

impl SpotifyClient {
    /// Most recently played tracks, newest first.
    pub async fn recently_played(&self, limit: u32) -> Result<RecentlyPlayed, ClientError> {
        self.authorized_json(
            Method::GET,
            "recently-played",
            &[("limit", limit.to_string())],
        )
        .await
    }

    /// The user's most listened tracks over `time_range`.
    ///
    /// # Arguments
    ///
    /// * `time_range` - Ranking period, [`TimeRange::MediumTerm`] by default
    /// * `limit` - Number of tracks, [`DEFAULT_TOP_LIMIT`] by default
    pub async fn top_tracks(
        &self,
        time_range: TimeRange,
        limit: u32,
    ) -> Result<TopTracks, ClientError> {
        self.authorized_json(
            Method::GET,
            "top-tracks",
            &[
                ("time_range", time_range.as_query_value().to_string()),
                ("limit", limit.to_string()),
            ],
        )
        .await
    }

    /// The user's playlists, up to `limit` entries.
    pub async fn playlists(&self, limit: u32) -> Result<Playlists, ClientError> {
        self.authorized_json(Method::GET, "playlists", &[("limit", limit.to_string())])
            .await
    }
}
