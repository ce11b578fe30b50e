//! # CLI Module
//!
//! User-facing commands of sporldeck. Each command takes a ready
//! [`crate::spotify::SpotifyClient`], calls one endpoint method and renders the
//! result as text or a table.
//!
//! ## Command Categories
//!
//! ### Authentication
//!
//! - [`login`] - opens the backend login in the browser and waits for the callback
//! - [`status`] - checks whether the stored token is accepted
//! - [`refresh`] - forces an access token refresh
//! - [`import`] - stores tokens obtained elsewhere
//! - [`logout`] - removes the stored tokens
//!
//! ### Playback
//!
//! - [`now_playing`] - shows the current track and progress
//! - [`player`] - play, pause, next, previous, seek, repeat, shuffle
//!
//! ### Library
//!
//! - [`me`] - profile of the logged in user
//! - [`recent`] - recently played tracks
//! - [`top`] - top tracks for a time range
//! - [`playlists`] - the user's playlists
//!
//! ## Error Presentation
//!
//! Failures end the process through the `error!` macro with exit code 1. The
//! one exception is [`status`], which only reports whether the user is logged
//! in.
//!
//! ## Usage Patterns
//!
//! ```bash
//! sporldeck auth login
//! sporldeck now
//! sporldeck player seek 30000
//! sporldeck top --time-range short_term --limit 5
//! ```

mod auth;
mod library;
mod player;

pub use auth::import;
pub use auth::login;
pub use auth::logout;
pub use auth::refresh;
pub use auth::status;
pub use library::me;
pub use library::playlists;
pub use library::recent;
pub use library::top;
pub use player::now_playing;
pub use player::player;
