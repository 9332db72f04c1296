/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - identity: IdentityStage, profiles: ProfileStore, 各種タイムアウト
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 * - すべて読み取り専用 (リクエスト間で可変状態を共有しない)
 */
use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderName, header};

use crate::config::{Config, ConfigError};
use crate::services::auth::IdentityStage;
use crate::services::profile::{ProfileStore, SimulatedProfileStore};

#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<IdentityStage>,
    pub profiles: Arc<dyn ProfileStore>,
    pub lookup_timeout: Duration,
    pub trusted_identity_header: HeaderName,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("identity", &self.identity)
            .field("profiles", &self.profiles.backend_name())
            .field("lookup_timeout", &self.lookup_timeout)
            .finish()
    }
}

impl AppState {
    pub fn new(
        identity: Arc<IdentityStage>,
        profiles: Arc<dyn ProfileStore>,
        lookup_timeout: Duration,
        trusted_identity_header: HeaderName,
    ) -> Self {
        Self {
            identity,
            profiles,
            lookup_timeout,
            trusted_identity_header,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let identity = Arc::new(IdentityStage::from_config(config)?);
        let profiles = Arc::new(SimulatedProfileStore::new(config.profile_lookup_latency));

        Ok(Self::new(
            identity,
            profiles,
            config.profile_lookup_timeout,
            config.trusted_identity_header.clone(),
        ))
    }

    /// Headers that carry raw credentials; removed before a request reaches a handler.
    pub fn credential_headers(&self) -> [HeaderName; 2] {
        [header::AUTHORIZATION, self.trusted_identity_header.clone()]
    }
}
