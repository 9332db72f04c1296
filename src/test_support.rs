//! Shared fixtures for unit and router tests.
use std::time::Duration;

use axum::http::HeaderName;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::Value;

use crate::config::{AppEnv, Config, TrustMode};
use crate::services::auth::TokenVerifier;

pub const SECRET: &str = "test-signing-secret";
pub const ISSUER: &str = "auth-service";
pub const AUDIENCE: &str = "api-service";
pub const TOLERANCE_SECONDS: u64 = 30;

pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

pub fn gateway_config() -> Config {
    Config {
        addr: "127.0.0.1:0".parse().unwrap(),
        app_env: AppEnv::Development,
        trust_mode: TrustMode::Gateway,
        jwt_secret: Some(SECRET.to_string()),
        auth_issuer: ISSUER.to_string(),
        auth_audience: AUDIENCE.to_string(),
        clock_tolerance_seconds: TOLERANCE_SECONDS,
        trusted_identity_header: HeaderName::from_static("x-user-id"),
        trusted_upstream_addrs: Vec::new(),
        profile_lookup_latency: Duration::ZERO,
        profile_lookup_timeout: Duration::from_secs(2),
        request_timeout: Duration::from_secs(30),
    }
}

pub fn relay_config() -> Config {
    Config {
        trust_mode: TrustMode::Relay,
        jwt_secret: None,
        ..gateway_config()
    }
}

pub fn verifier() -> TokenVerifier {
    TokenVerifier::new(SECRET.as_bytes(), ISSUER, AUDIENCE, TOLERANCE_SECONDS)
}

pub fn sign(claims: &Value) -> String {
    sign_with(SECRET.as_bytes(), Algorithm::HS256, claims)
}

pub fn sign_with(secret: &[u8], alg: Algorithm, claims: &Value) -> String {
    jsonwebtoken::encode(&Header::new(alg), claims, &EncodingKey::from_secret(secret)).unwrap()
}
