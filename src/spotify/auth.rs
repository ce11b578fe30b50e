use reqwest::Method;

use crate::{
    error::ClientError,
    management::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY},
    spotify::client::{SpotifyClient, decode_json},
    types::{CallbackResponse, RefreshResponse},
    warning,
};

impl SpotifyClient {
    /// Exchanges the stored refresh token for a new access token.
    ///
    /// Fails with [`ClientError::MissingCredential`] before any request when
    /// no refresh token is stored. Every other failure, including a response
    /// with `success: false` or without an `access_token`, is reported as
    /// [`ClientError::RefreshFailed`]. The stored access token is only
    /// overwritten once a usable new token has been received.
    ///
    /// # Returns
    ///
    /// The new access token, already persisted under
    /// [`ACCESS_TOKEN_KEY`].
    pub async fn refresh_access_token(&self) -> Result<String, ClientError> {
        let refresh_token = self
            .store()
            .get(REFRESH_TOKEN_KEY)
            .await
            .ok_or(ClientError::MissingCredential(REFRESH_TOKEN_KEY))?;

        let response = self
            .http()
            .get(self.endpoint("refresh-token"))
            .bearer_auth(refresh_token)
            .send()
            .await
            .map_err(|e| ClientError::RefreshFailed(e.to_string()))?;

        let body: RefreshResponse = decode_json(response)
            .await
            .map_err(|e| ClientError::RefreshFailed(e.to_string()))?;

        if !body.success {
            return Err(ClientError::RefreshFailed(
                "server reported an unsuccessful refresh".to_string(),
            ));
        }

        let access_token = match body.access_token {
            Some(token) if !token.is_empty() => token,
            _ => {
                return Err(ClientError::RefreshFailed(
                    "response did not contain an access token".to_string(),
                ));
            }
        };

        self.store()
            .set(ACCESS_TOKEN_KEY, &access_token)
            .await
            .map_err(|e| ClientError::RefreshFailed(e.to_string()))?;

        Ok(access_token)
    }

    /// Returns `true` when a token is stored and the server accepts it,
    /// refreshing it on the way if needed. Any failure yields `false`.
    pub async fn check_login_status(&self) -> bool {
        if self.store().get(ACCESS_TOKEN_KEY).await.is_none() {
            return false;
        }

        match self.current_user().await {
            Ok(_) => true,
            Err(e) => {
                warning!("Login check failed: {}", e);
                false
            }
        }
    }

    pub fn login_url(&self) -> String {
        self.endpoint("login")
    }

    /// Opens the backend's login route in the system browser.
    ///
    /// The backend drives the rest of the flow and eventually redirects to the
    /// local callback server.
    pub fn login(&self) {
        let url = self.login_url();
        if webbrowser::open(&url).is_err() {
            warning!(
                "Failed to open browser. Please navigate to the following URL manually:\n{}",
                url
            )
        }
    }

    /// Trades the authorization code handed to the callback for tokens and
    /// stores them.
    pub async fn complete_login(&self, code: &str) -> Result<(), ClientError> {
        let response = self
            .http()
            .request(Method::GET, self.endpoint("callback"))
            .query(&[("code", code)])
            .send()
            .await?;

        let body: CallbackResponse = decode_json(response).await?;
        let access_token = match body.access_token {
            Some(token) if body.success && !token.is_empty() => token,
            _ => {
                return Err(ClientError::transport(
                    "login callback did not return an access token",
                ));
            }
        };

        self.import_tokens(&access_token, body.refresh_token.as_deref())
            .await
    }

    /// Writes tokens obtained elsewhere into the credential store.
    pub async fn import_tokens(
        &self,
        access_token: &str,
        refresh_token: Option<&str>,
    ) -> Result<(), ClientError> {
        if let Some(refresh_token) = refresh_token {
            self.store().set(REFRESH_TOKEN_KEY, refresh_token).await?;
        }
        self.store().set(ACCESS_TOKEN_KEY, access_token).await?;
        Ok(())
    }

    pub async fn logout(&self) -> Result<(), ClientError> {
        self.store().remove(ACCESS_TOKEN_KEY).await?;
        self.store().remove(REFRESH_TOKEN_KEY).await?;
        Ok(())
    }
}
