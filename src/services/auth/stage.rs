/// Factory + dispatch: build the identity-establishment stage from `Config`.
use std::net::SocketAddr;

use axum::http::HeaderMap;

use crate::config::{Config, ConfigError, TrustMode};
use crate::services::auth::{AuthError, TokenVerifier, TrustExtractor, VerifiedIdentity};

/// Exactly one way of establishing identity per process.
#[derive(Debug, Clone)]
pub enum IdentityStage {
    Gateway(TokenVerifier),
    Relay(TrustExtractor),
}

impl IdentityStage {
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Ok(match config.trust_mode {
            TrustMode::Gateway => Self::Gateway(TokenVerifier::from_config(config)?),
            TrustMode::Relay => Self::Relay(TrustExtractor::from_config(config)),
        })
    }

    pub fn establish(
        &self,
        headers: &HeaderMap,
        peer: Option<SocketAddr>,
    ) -> Result<VerifiedIdentity, AuthError> {
        match self {
            Self::Gateway(verifier) => verifier.verify_headers(headers),
            // The trusted value always wins; a raw Authorization header is never parsed here.
            Self::Relay(extractor) => extractor.extract(headers, peer),
        }
    }
}
