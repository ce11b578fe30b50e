use std::sync::Arc;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::{
    config,
    error::ClientError,
    management::{ACCESS_TOKEN_KEY, CredentialStore},
    warning,
};

/// Client for the backend's `/api/spotify` routes.
///
/// Cloning is cheap: clones share the HTTP connection pool and the
/// credential store.
#[derive(Clone)]
pub struct SpotifyClient {
    http: Client,
    base_url: String,
    store: Arc<dyn CredentialStore>,
}

impl SpotifyClient {
    /// Creates a client for the backend at `base_url`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Backend origin, e.g. `http://localhost:8000`. Trailing
    ///   slashes are stripped.
    /// * `store` - Credential store holding the access and refresh tokens
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use sporldeck::{management::MemoryStore, spotify::SpotifyClient};
    ///
    /// let store = Arc::new(MemoryStore::with_tokens(Some("T1"), Some("R1")));
    /// let client = SpotifyClient::new("http://localhost:8000/", store);
    /// assert_eq!(client.base_url(), "http://localhost:8000");
    /// ```
    pub fn new(base_url: impl Into<String>, store: Arc<dyn CredentialStore>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            store,
        }
    }

    /// Builds a client for the configured `SPORLDECK_API_URL`.
    ///
    /// Call [`crate::config::load_env`] first so a value from the `.env`
    /// file is picked up. Falls back to [`crate::config::DEFAULT_API_URL`].
    pub fn from_env(store: Arc<dyn CredentialStore>) -> Self {
        Self::new(config::api_url(), store)
    }

    /// Backend origin without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Credential store shared by every clone of this client.
    ///
    /// The CLI uses it to inspect tokens without going through a request.
    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    /// Full URL of a route under `/api/spotify`.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!(
            "{base}/api/spotify/{path}",
            base = self.base_url,
            path = path.trim_start_matches('/')
        )
    }

    /// Runs `operation`, refreshing the access token and retrying once if the
    /// server rejects the first attempt with 401.
    ///
    /// - A successful first attempt is returned unchanged.
    /// - A 401 on the first attempt triggers [`SpotifyClient::refresh_access_token`].
    ///   If the refresh fails its error is returned instead of the 401.
    ///   Otherwise the operation runs one more time and that outcome is final,
    ///   including a second 401.
    /// - Any other error is returned immediately without refreshing.
    ///
    /// The operation must read the access token itself on every run so the
    /// retry picks up the refreshed value.
    ///
    /// Concurrent calls that hit a 401 at the same time each refresh on their
    /// own; nothing coalesces them.
    pub async fn execute<T, F, Fut>(&self, operation: F) -> Result<T, ClientError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, ClientError>>,
    {
        match operation().await {
            Err(ClientError::AuthorizationRejected) => {
                warning!("Access token rejected, refreshing and retrying once");
                self.refresh_access_token().await?;
                operation().await
            }
            outcome => outcome,
        }
    }

    /// Sends an authorized request and decodes the JSON body, through
    /// [`SpotifyClient::execute`].
    pub(crate) async fn authorized_json<T>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(path);
        let (url, method) = (&url, &method);
        self.execute(move || async move {
            let request = self.authorized_request(method.clone(), url).await?;
            let response = request.query(query).send().await?;
            decode_json(response).await
        })
        .await
    }

    /// Builds a request carrying the stored access token as bearer credential.
    pub(crate) async fn authorized_request(
        &self,
        method: Method,
        url: &str,
    ) -> Result<RequestBuilder, ClientError> {
        let token = self
            .store
            .get(ACCESS_TOKEN_KEY)
            .await
            .ok_or(ClientError::MissingCredential(ACCESS_TOKEN_KEY))?;

        Ok(self.http.request(method, url).bearer_auth(token))
    }
}

/// Maps the response status onto [`ClientError`] and leaves successful
/// responses untouched.
pub(crate) async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        return Err(ClientError::AuthorizationRejected);
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ClientError::status(status, body));
    }

    Ok(response)
}

pub(crate) async fn decode_json<T>(response: Response) -> Result<T, ClientError>
where
    T: DeserializeOwned,
{
    let response = check_status(response).await?;
    let status = response.status();
    let body = response.text().await?;
    serde_json::from_str(&body)
        .map_err(|e| ClientError::status(status, format!("unexpected response body: {}", e)))
}
