use chrono::Utc;

use crate::{management, spotify, types::Token};

const TOKEN_PATH: &str = "cache/token.json";

/// Refresh this many seconds before the token actually expires.
const EXPIRY_BUFFER_SECS: u64 = 240;

pub struct TokenManager {
    token: Token,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager { token }
    }

    pub async fn load() -> Result<Self, String> {
        let token: Token = management::read_json(TOKEN_PATH)
            .await
            .map_err(|e| e.to_string())?;
        Ok(Self { token })
    }

    pub async fn persist(&self) -> Result<(), String> {
        management::write_json(TOKEN_PATH, &self.token)
            .await
            .map_err(|e| e.to_string())
    }

    /// Removes the cached token, signing the user out. A missing token file
    /// is fine; logging out twice is not an error.
    pub async fn clear() -> Result<(), String> {
        management::remove_record(TOKEN_PATH)
            .await
            .map_err(|e| e.to_string())
    }

    /// Returns a usable access token, refreshing and re-persisting it when
    /// it is about to expire.
    pub async fn get_valid_token(&mut self) -> String {
        if self.is_expired() {
            if let Ok(new_token) = spotify::auth::refresh_token(&self.token.refresh_token).await {
                self.token = new_token;
                let _ = self.persist().await;
            }
        }

        self.token.access_token.clone()
    }

    fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        now >= self.token.obtained_at + self.token.expires_in - EXPIRY_BUFFER_SECS
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }
}
