use std::{fmt, str::FromStr};

use reqwest::{Method, StatusCode};

use crate::{
    error::ClientError,
    spotify::client::{SpotifyClient, check_status},
    types::PlaybackResponse,
};

/// Repeat state accepted by the `repeat` action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatMode {
    Track,
    Context,
    Off,
}

impl RepeatMode {
    pub fn as_query_value(&self) -> &'static str {
        match self {
            RepeatMode::Track => "track",
            RepeatMode::Context => "context",
            RepeatMode::Off => "off",
        }
    }
}

impl FromStr for RepeatMode {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "track" => Ok(RepeatMode::Track),
            "context" => Ok(RepeatMode::Context),
            "off" => Ok(RepeatMode::Off),
            other => Err(ClientError::InvalidAction(format!(
                "repeat expects track, context or off, got `{}`",
                other
            ))),
        }
    }
}

/// A player command together with the payload it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackAction {
    Play,
    Pause,
    Next,
    Previous,
    Seek { position_ms: u64 },
    Repeat(RepeatMode),
    Shuffle(bool),
}

impl PlaybackAction {
    /// Builds an action from its name and optional raw value.
    ///
    /// # Arguments
    ///
    /// * `name` - `play`, `pause`, `next`, `previous` (or `prev`), `seek`,
    ///   `repeat` or `shuffle`, case-insensitive
    /// * `value` - Position in ms for `seek`, `track|context|off` for
    ///   `repeat`, `true|false|on|off` for `shuffle`. Ignored otherwise.
    ///
    /// # Errors
    ///
    /// [`ClientError::InvalidAction`] for unknown names and for seek, repeat
    /// or shuffle without a value of the expected type.
    ///
    /// # Example
    ///
    /// ```
    /// use sporldeck::spotify::PlaybackAction;
    ///
    /// let seek = PlaybackAction::parse("seek", Some("30000")).unwrap();
    /// assert_eq!(seek, PlaybackAction::Seek { position_ms: 30000 });
    /// assert!(PlaybackAction::parse("seek", Some("soon")).is_err());
    /// ```
    pub fn parse(name: &str, value: Option<&str>) -> Result<Self, ClientError> {
        let name = name.trim().to_lowercase();
        match name.as_str() {
            "play" => Ok(PlaybackAction::Play),
            "pause" => Ok(PlaybackAction::Pause),
            "next" => Ok(PlaybackAction::Next),
            "previous" | "prev" => Ok(PlaybackAction::Previous),
            "seek" => {
                let raw = required_value(&name, value)?;
                let position_ms = raw.parse::<u64>().map_err(|_| {
                    ClientError::InvalidAction(format!(
                        "seek expects a position in milliseconds, got `{}`",
                        raw
                    ))
                })?;
                Ok(PlaybackAction::Seek { position_ms })
            }
            "repeat" => Ok(PlaybackAction::Repeat(
                required_value(&name, value)?.parse()?,
            )),
            "shuffle" => {
                let raw = required_value(&name, value)?;
                let state = match raw.to_lowercase().as_str() {
                    "true" | "on" => true,
                    "false" | "off" => false,
                    _ => {
                        return Err(ClientError::InvalidAction(format!(
                            "shuffle expects true or false, got `{}`",
                            raw
                        )));
                    }
                };
                Ok(PlaybackAction::Shuffle(state))
            }
            other => Err(ClientError::InvalidAction(format!(
                "unknown action `{}`",
                other
            ))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PlaybackAction::Play => "play",
            PlaybackAction::Pause => "pause",
            PlaybackAction::Next => "next",
            PlaybackAction::Previous => "previous",
            PlaybackAction::Seek { .. } => "seek",
            PlaybackAction::Repeat(_) => "repeat",
            PlaybackAction::Shuffle(_) => "shuffle",
        }
    }

    /// HTTP method of the proxy route.
    ///
    /// The backend registers `POST /player/{action}` only and picks the
    /// Spotify-side method itself, so every action is posted.
    pub fn method(&self) -> Method {
        Method::POST
    }

    /// Query parameters sent with the action, empty for the plain commands.
    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            PlaybackAction::Seek { position_ms } => vec![("position_ms", position_ms.to_string())],
            PlaybackAction::Repeat(mode) => vec![("state", mode.as_query_value().to_string())],
            PlaybackAction::Shuffle(state) => vec![("state", state.to_string())],
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for PlaybackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackAction::Seek { position_ms } => write!(f, "seek to {}ms", position_ms),
            PlaybackAction::Repeat(mode) => write!(f, "repeat {}", mode.as_query_value()),
            PlaybackAction::Shuffle(state) => write!(f, "shuffle {}", state),
            other => f.write_str(other.name()),
        }
    }
}

fn required_value<'a>(name: &str, value: Option<&'a str>) -> Result<&'a str, ClientError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ClientError::InvalidAction(format!(
            "{} requires a value",
            name
        ))),
    }
}

impl SpotifyClient {
    /// Sends a player command to the user's active device.
    ///
    /// The request goes through [`SpotifyClient::execute`], so a rejected
    /// access token is refreshed and the same command is posted once more.
    ///
    /// # Arguments
    ///
    /// * `action` - Command to send, usually from [`PlaybackAction::parse`]
    ///
    /// # Returns
    ///
    /// The backend's `{success, action}` body. An empty body
    /// (`204 No Content`) counts as success for `action`.
    pub async fn control_playback(
        &self,
        action: PlaybackAction,
    ) -> Result<PlaybackResponse, ClientError> {
        let url = self.endpoint(&format!("player/{}", action.name()));
        let query = action.query();
        let (url, query) = (&url, &query);

        self.execute(move || async move {
            let response = self
                .authorized_request(action.method(), url)
                .await?
                .query(query)
                .send()
                .await?;
            let response = check_status(response).await?;
            let status = response.status();
            let body = response.text().await?;

            if status == StatusCode::NO_CONTENT || body.trim().is_empty() {
                return Ok(PlaybackResponse {
                    success: true,
                    action: Some(action.name().to_string()),
                });
            }

            serde_json::from_str(&body).map_err(|e| {
                ClientError::status(status, format!("unexpected response body: {}", e))
            })
        })
        .await
    }
}
