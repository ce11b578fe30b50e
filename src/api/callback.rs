use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use tokio::sync::Mutex;

use crate::{spotify::SpotifyClient, warning};

/// Outcome of the login callback, `None` until the backend redirected back.
pub type LoginOutcome = Arc<Mutex<Option<Result<(), String>>>>;

#[derive(Clone)]
pub struct CallbackState {
    pub client: SpotifyClient,
    pub outcome: LoginOutcome,
}

pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(state): Extension<CallbackState>,
) -> Html<&'static str> {
    let Some(code) = params.get("code") else {
        let reason = params
            .get("error")
            .cloned()
            .unwrap_or_else(|| "missing authorization code".to_string());
        *state.outcome.lock().await = Some(Err(reason));
        return Html("<h4>Missing authorization code.</h4>");
    };

    match state.client.complete_login(code).await {
        Ok(()) => {
            *state.outcome.lock().await = Some(Ok(()));
            Html("<h2>Authentication successful.</h2><p>Close browser window.</p>")
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            *state.outcome.lock().await = Some(Err(e.to_string()));
            Html("<h4>Login failed.</h4>")
        }
    }
}
