use reqwest::{Method, StatusCode};

use crate::{
    error::ClientError,
    spotify::client::{SpotifyClient, decode_json},
    types::{CurrentlyPlaying, SpotifyUser},
};

impl SpotifyClient {
    /// Profile of the user the stored access token belongs to.
    pub async fn current_user(&self) -> Result<SpotifyUser, ClientError> {
        self.authorized_json(Method::GET, "current-user", &[]).await
    }

    /// Track currently playing on the user's active device.
    ///
    /// A `204 No Content` answer means nothing is playing and is returned as
    /// [`CurrentlyPlaying::idle`].
    pub async fn currently_playing(&self) -> Result<CurrentlyPlaying, ClientError> {
        let url = self.endpoint("currently-playing");
        let url = &url;
        self.execute(move || async move {
            let response = self
                .authorized_request(Method::GET, url)
                .await?
                .send()
                .await?;

            if response.status() == StatusCode::NO_CONTENT {
                return Ok(CurrentlyPlaying::idle());
            }

            decode_json(response).await
        })
        .await
    }
}
