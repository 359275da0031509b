use std::collections::HashMap;

use crate::{
    management::{self, StoreError},
    types::PlaylistRole,
};

const ROLES_PATH: &str = "settings/playlist-roles.json";

/// Per-playlist situational role tags (playlist id -> role).
pub struct RoleManager {
    roles: HashMap<String, PlaylistRole>,
}

impl RoleManager {
    pub fn new() -> Self {
        Self {
            roles: HashMap::new(),
        }
    }

    pub async fn load() -> Result<Self, StoreError> {
        let roles = management::read_json(ROLES_PATH).await?;
        Ok(Self { roles })
    }

    /// Loads the record, degrading to an empty map when the file is missing
    /// or corrupted.
    pub async fn load_or_default() -> Self {
        Self::load().await.unwrap_or_else(|_| Self::new())
    }

    pub async fn persist(&self) -> Result<(), StoreError> {
        management::write_json(ROLES_PATH, &self.roles).await
    }

    pub fn set(&mut self, playlist_id: String, role: PlaylistRole) {
        self.roles.insert(playlist_id, role);
    }

    pub fn get(&self, playlist_id: &str) -> Option<PlaylistRole> {
        self.roles.get(playlist_id).copied()
    }

    pub fn remove(&mut self, playlist_id: &str) {
        self.roles.remove(playlist_id);
    }

    pub fn all(&self) -> &HashMap<String, PlaylistRole> {
        &self.roles
    }

    /// Replaces the whole map, used by cloud restore.
    pub fn replace_all(&mut self, roles: HashMap<String, PlaylistRole>) {
        self.roles = roles;
    }

    pub fn clear(&mut self) {
        self.roles.clear();
    }
}
