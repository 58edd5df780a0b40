//! Implements AuthPort with Google OAuth.
//!
//! Sign-in uses the device-authorization grant (the terminal counterpart of
//! the browser token-client flow): request a user code, have the user confirm
//! it in a browser, poll the token endpoint until granted. Validation and
//! identity lookup go through the userinfo endpoint with a bearer token.

use crate::domain::{DomainError, User};
use crate::ports::AuthPort;
use serde::Deserialize;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

const DEVICE_CODE_URL: &str = "https://oauth2.googleapis.com/device/code";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v3/userinfo";
const REVOKE_URL: &str = "https://oauth2.googleapis.com/revoke";

const SCOPE: &str = "email profile";
const DEVICE_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:device_code";

/// Google OAuth adapter (device flow).
pub struct GoogleAuth {
    client: reqwest::Client,
    client_id: String,
    client_secret: String,
}

impl GoogleAuth {
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            client_id,
            client_secret,
        }
    }

    async fn fetch_user(&self, token: &str) -> Result<User, DomainError> {
        let response = self
            .client
            .get(USERINFO_URL)
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await
            .map_err(|e| DomainError::Auth(format!("userinfo request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(DomainError::Auth(format!(
                "token validation failed ({})",
                response.status()
            )));
        }

        let info: GoogleUserInfo = response
            .json()
            .await
            .map_err(|e| DomainError::Auth(format!("malformed userinfo response: {}", e)))?;

        Ok(User {
            id: info.sub,
            name: info.name,
            email: info.email,
            picture: info.picture,
            access_token: token.to_string(),
        })
    }
}

#[derive(Deserialize)]
struct GoogleUserInfo {
    sub: String,
    name: String,
    email: String,
    picture: Option<String>,
}

#[derive(Deserialize)]
struct DeviceCodeResponse {
    device_code: String,
    user_code: String,
    verification_url: String,
    expires_in: u64,
    interval: u64,
}

/// Token endpoint answer while polling. Either a grant or a retryable
/// (or fatal) error code.
#[derive(Deserialize)]
struct TokenPollResponse {
    access_token: Option<String>,
    error: Option<String>,
}

#[async_trait::async_trait]
impl AuthPort for GoogleAuth {
    async fn sign_in(&self) -> Result<User, DomainError> {
        let response = self
            .client
            .post(DEVICE_CODE_URL)
            .form(&[("client_id", self.client_id.as_str()), ("scope", SCOPE)])
            .send()
            .await
            .map_err(|e| DomainError::Auth(format!("device code request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(DomainError::Auth(format!(
                "device code request rejected ({}): {}",
                status,
                text.chars().take(200).collect::<String>()
            )));
        }

        let grant: DeviceCodeResponse = response
            .json()
            .await
            .map_err(|e| DomainError::Auth(format!("malformed device code response: {}", e)))?;

        println!();
        println!("To sign in, open {} in a browser", grant.verification_url);
        println!("and enter the code: {}", grant.user_code);
        println!();
        info!(expires_in = grant.expires_in, "waiting for device authorization");

        let deadline = Instant::now() + Duration::from_secs(grant.expires_in);
        let mut interval = grant.interval.max(1);

        loop {
            if Instant::now() >= deadline {
                return Err(DomainError::Auth("sign-in timed out, code expired".into()));
            }
            tokio::time::sleep(Duration::from_secs(interval)).await;

            let poll = self
                .client
                .post(TOKEN_URL)
                .form(&[
                    ("client_id", self.client_id.as_str()),
                    ("client_secret", self.client_secret.as_str()),
                    ("device_code", grant.device_code.as_str()),
                    ("grant_type", DEVICE_GRANT_TYPE),
                ])
                .send()
                .await
                .map_err(|e| DomainError::Auth(format!("token poll failed: {}", e)))?;

            let body: TokenPollResponse = poll
                .json()
                .await
                .map_err(|e| DomainError::Auth(format!("malformed token response: {}", e)))?;

            if let Some(token) = body.access_token {
                info!("device authorization granted");
                return self.fetch_user(&token).await;
            }
            match body.error.as_deref() {
                Some("authorization_pending") => {
                    debug!("authorization pending");
                }
                Some("slow_down") => {
                    interval += 5;
                    debug!(interval, "provider asked to slow down");
                }
                Some("access_denied") => {
                    return Err(DomainError::Auth("sign-in was declined".into()));
                }
                Some(other) => {
                    return Err(DomainError::Auth(format!("sign-in failed: {}", other)));
                }
                None => {
                    return Err(DomainError::Auth(
                        "token endpoint returned neither a grant nor an error".into(),
                    ));
                }
            }
        }
    }

    async fn validate(&self, token: &str) -> Result<User, DomainError> {
        self.fetch_user(token).await
    }

    async fn revoke(&self, token: &str) -> Result<(), DomainError> {
        let response = self
            .client
            .post(REVOKE_URL)
            .form(&[("token", token)])
            .send()
            .await
            .map_err(|e| DomainError::Auth(format!("revoke request failed: {}", e)))?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "token revoke rejected");
            return Err(DomainError::Auth(format!(
                "revoke rejected ({})",
                response.status()
            )));
        }
        Ok(())
    }
}
