//! Configuration management for sporldeck.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory. Every setting has a default so the
//! client works against a locally running backend without any setup:
//!
//! | Variable | Default |
//! |---|---|
//! | `SPORLDECK_API_URL` | `http://localhost:8000` |
//! | `SPORLDECK_CALLBACK_ADDRESS` | `127.0.0.1:3000` |
//! | `SPORLDECK_CREDENTIALS_PATH` | `<data_local_dir>/sporldeck/cache/credentials.json` |

use std::{
    env,
    path::{Path, PathBuf},
};

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_CALLBACK_ADDRESS: &str = "127.0.0.1:3000";

/// Loads environment variables from `sporldeck/.env` in the local data directory.
///
/// The directory is created when missing. A missing `.env` file is not an
/// error, variables already present in the environment take precedence over
/// the file.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/sporldeck/.env`
/// - macOS: `~/Library/Application Support/sporldeck/.env`
/// - Windows: `%LOCALAPPDATA%/sporldeck/.env`
///
/// # Errors
///
/// Returns an error string if the directory cannot be created or the file
/// exists but cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    load_env_from(&data_dir()).await.map(|_| ())
}

/// Loads `.env` from `dir`, creating `dir` when missing.
///
/// # Arguments
///
/// * `dir` - Directory expected to hold the `.env` file
///
/// # Returns
///
/// `Ok(true)` when a file was loaded, `Ok(false)` when there was none.
pub async fn load_env_from(dir: &Path) -> Result<bool, String> {
    async_fs::create_dir_all(dir)
        .await
        .map_err(|e| e.to_string())?;

    let path = dir.join(".env");
    if async_fs::metadata(&path).await.is_err() {
        return Ok(false);
    }

    dotenv::from_path(&path).map_err(|e| e.to_string())?;
    Ok(true)
}

/// Base URL of the backend exposing the `/api/spotify` routes.
///
/// Trailing slashes are stripped so paths can be appended directly.
pub fn api_url() -> String {
    let url = env::var("SPORLDECK_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    url.trim_end_matches('/').to_string()
}

/// Address the local login callback server binds to.
pub fn callback_addr() -> String {
    env::var("SPORLDECK_CALLBACK_ADDRESS").unwrap_or_else(|_| DEFAULT_CALLBACK_ADDRESS.to_string())
}

/// Location of the credentials file used by the default store.
pub fn credentials_path() -> PathBuf {
    match env::var("SPORLDECK_CREDENTIALS_PATH") {
        Ok(path) if !path.is_empty() => PathBuf::from(path),
        _ => data_dir().join("cache/credentials.json"),
    }
}

fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("sporldeck");
    path
}
