use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Mutex;

use crate::{
    api::{CallbackState, LoginOutcome},
    config, error, info,
    server::{CALLBACK_PATH, start_callback_server},
    spotify::SpotifyClient,
    success, warning,
};

const LOGIN_TIMEOUT: Duration = Duration::from_secs(60);

pub async fn login(client: &SpotifyClient) {
    let outcome: LoginOutcome = Arc::new(Mutex::new(None));
    let state = CallbackState {
        client: client.clone(),
        outcome: Arc::clone(&outcome),
    };

    let server = tokio::spawn(async move {
        if let Err(e) = start_callback_server(state).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    info!(
        "Waiting for the login callback on http://{}{}",
        config::callback_addr(),
        CALLBACK_PATH
    );
    client.login();

    let result = wait_for_callback(outcome).await;
    server.abort();

    match result {
        Some(Ok(())) => success!("Authentication successful!"),
        Some(Err(e)) => error!("Authentication failed: {}", e),
        None => error!("Authentication failed or timed out."),
    }
}

async fn wait_for_callback(outcome: LoginOutcome) -> Option<Result<(), String>> {
    let pb = ProgressBar::new_spinner();
    pb.set_message("Complete the login in your browser...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let start = Instant::now();
    let mut result = None;
    while start.elapsed() < LOGIN_TIMEOUT {
        if let Some(done) = outcome.lock().await.take() {
            result = Some(done);
            break;
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    pb.finish_and_clear();
    result
}

pub async fn status(client: &SpotifyClient) {
    if client.check_login_status().await {
        success!("Logged in against {}", client.base_url());
    } else {
        warning!("Not logged in. Run sporldeck auth login.");
    }
}

pub async fn refresh(client: &SpotifyClient) {
    match client.refresh_access_token().await {
        Ok(_) => success!("Access token refreshed."),
        Err(e) => error!("{}", e),
    }
}

pub async fn import(client: &SpotifyClient, access_token: String, refresh_token: Option<String>) {
    match client
        .import_tokens(&access_token, refresh_token.as_deref())
        .await
    {
        Ok(()) => success!("Tokens stored."),
        Err(e) => error!("Failed to store tokens: {}", e),
    }
}

pub async fn logout(client: &SpotifyClient) {
    match client.logout().await {
        Ok(()) => success!("Stored tokens removed."),
        Err(e) => error!("Failed to remove tokens: {}", e),
    }
}
