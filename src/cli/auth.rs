use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{error, management::TokenManager, spotify, success, types::PkceToken};

pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>) {
    spotify::auth::auth(shared_state).await;
}

/// Removes the cached token. Subsequent commands require a new `auth` run.
pub async fn logout() {
    if let Err(e) = TokenManager::clear().await {
        error!("Failed to remove the cached token. Err: {}", e);
    }

    success!("Signed out. Run djsportscli auth to sign in again.");
}
