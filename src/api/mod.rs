//! # API Module
//!
//! HTTP endpoints served by the local callback server during `sporldeck auth
//! login`.
//!
//! ## Endpoints
//!
//! - [`callback`] - receives the authorization code the backend redirects to,
//!   exchanges it for tokens via `GET /api/spotify/callback` and stores them.
//! - [`health`] - returns status and version, handy to check the address is
//!   reachable before starting a login.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Extension, Router, routing::get};
//! use sporldeck::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/spotify-callback", get(callback).layer(Extension(state)))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::CallbackState;
pub use callback::LoginOutcome;
pub use callback::callback;
pub use health::health;
