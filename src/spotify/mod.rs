//! # Spotify Proxy Module
//!
//! Client for the `/api/spotify` routes of the companion backend. The backend
//! holds the Spotify application credentials and talks to the Spotify Web API;
//! this module only carries the user's bearer tokens to it and decodes what it
//! answers.
//!
//! ## Architecture
//!
//! ```text
//! CLI Layer
//!      ↓
//! SpotifyClient endpoint methods (user, player, library)
//!      ↓
//! SpotifyClient::execute (refresh once on 401, retry once)
//!      ↓
//! HTTP Layer (reqwest, JSON)          CredentialStore (access / refresh token)
//!      ↓
//! Backend /api/spotify/*
//! ```
//!
//! ## Core Modules
//!
//! - [`client`] - [`SpotifyClient`], the request executor and status mapping
//! - [`auth`] - token refresh, login status, browser login and token import
//! - [`user`] - current user profile and currently playing track
//! - [`player`] - typed [`PlaybackAction`] commands
//! - [`library`] - recently played, top tracks and playlists
//!
//! ## Token Handling
//!
//! Refresh is reactive only. No expiry is tracked; a token is refreshed when
//! the backend rejects it with `401 Unauthorized`, at most once per call.
//! Two calls failing at the same time refresh independently.
//!
//! ## API Coverage
//!
//! - `GET /login` - browser entry point of the login flow
//! - `GET /callback` - exchange of the authorization code
//! - `GET /refresh-token` - new access token for the stored refresh token
//! - `GET /current-user`
//! - `GET /currently-playing`
//! - `POST /player/{action}`
//! - `GET /recently-played?limit=`
//! - `GET /top-tracks?time_range=&limit=`
//! - `GET /playlists?limit=`
//!
//! ## Usage Patterns
//!
//! ```rust,ignore
//! let store = Arc::new(FileStore::open(config::credentials_path()).await?);
//! let client = SpotifyClient::from_env(store);
//!
//! let tracks = client.top_tracks(TimeRange::ShortTerm, 10).await?;
//! client.control_playback(PlaybackAction::parse("seek", Some("30000"))?).await?;
//! ```

pub mod auth;
pub mod client;
pub mod library;
pub mod player;
pub mod user;

pub use client::SpotifyClient;
pub use player::{PlaybackAction, RepeatMode};
