use axum::{Extension, Router, routing::get};
use std::{net::SocketAddr, str::FromStr};

use crate::{
    Res,
    api::{self, CallbackState},
    config,
};

pub const CALLBACK_PATH: &str = "/spotify-callback";

pub fn router(state: CallbackState) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route(CALLBACK_PATH, get(api::callback).layer(Extension(state)))
}

/// Serves the login callback on `SPORLDECK_CALLBACK_ADDRESS` until the task is
/// dropped.
pub async fn start_callback_server(state: CallbackState) -> Res<()> {
    let addr = SocketAddr::from_str(&config::callback_addr())
        .map_err(|e| format!("Failed to parse callback address: {}", e))?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router(state)).await?;
    Ok(())
}
