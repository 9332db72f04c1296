/*
 * Responsibility
 * - 環境変数や設定の読み込み (TRUST_MODE, JWT_SECRET, issuer/audience, trusted header など)
 * - 設定値のバリデーション (不足・不正なら起動失敗)
 * - 起動時に一度だけ構築し、以降は読み取り専用
 */
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use axum::http::HeaderName;

/// Demo secret used only outside production when `JWT_SECRET` is unset.
pub const DEV_JWT_SECRET: &str = "demo-secret-key-change-in-production";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Which side of the trust boundary this process runs as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrustMode {
    /// Terminates bearer tokens itself.
    Gateway,
    /// Trusts the identity header injected by the upstream gateway.
    Relay,
}

impl FromStr for TrustMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gateway" => Ok(Self::Gateway),
            "relay" => Ok(Self::Relay),
            _ => Err(ConfigError::Invalid("TRUST_MODE")),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub trust_mode: TrustMode,

    // Gateway only. `None` in relay mode.
    pub jwt_secret: Option<String>,
    pub auth_issuer: String,
    pub auth_audience: String,
    pub clock_tolerance_seconds: u64,

    pub trusted_identity_header: HeaderName,
    pub trusted_upstream_addrs: Vec<IpAddr>,

    pub profile_lookup_latency: Duration,
    pub profile_lookup_timeout: Duration,
    pub request_timeout: Duration,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print the signing secret
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("trust_mode", &self.trust_mode)
            .field("auth_issuer", &self.auth_issuer)
            .field("auth_audience", &self.auth_audience)
            .field("clock_tolerance_seconds", &self.clock_tolerance_seconds)
            .field("trusted_identity_header", &self.trusted_identity_header)
            .field("trusted_upstream_addrs", &self.trusted_upstream_addrs)
            .finish_non_exhaustive()
    }
}

fn parse_or<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => v.trim().parse().map_err(|_| ConfigError::Invalid(key)),
        _ => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = parse_or("PORT", 3000)?;

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();
        let trust_mode: TrustMode = parse_or("TRUST_MODE", TrustMode::Gateway)?;

        let jwt_secret = match trust_mode {
            TrustMode::Gateway => Some(Self::jwt_secret_from_env(app_env)?),
            TrustMode::Relay => None,
        };

        let auth_issuer =
            std::env::var("AUTH_ISSUER").unwrap_or_else(|_| "auth-service".to_string());
        let auth_audience =
            std::env::var("AUTH_AUDIENCE").unwrap_or_else(|_| "api-service".to_string());

        let clock_tolerance_seconds = parse_or("CLOCK_TOLERANCE_SECONDS", 30u64)?;

        let trusted_identity_header = std::env::var("TRUSTED_IDENTITY_HEADER")
            .unwrap_or_else(|_| "x-user-id".to_string());
        let trusted_identity_header = HeaderName::from_str(trusted_identity_header.trim())
            .map_err(|_| ConfigError::Invalid("TRUSTED_IDENTITY_HEADER"))?;

        let trusted_upstream_addrs = std::env::var("TRUSTED_UPSTREAM_ADDRS")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<IpAddr>()
                    .map_err(|_| ConfigError::Invalid("TRUSTED_UPSTREAM_ADDRS"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let profile_lookup_latency =
            Duration::from_millis(parse_or("PROFILE_LOOKUP_LATENCY_MS", 50u64)?);
        let profile_lookup_timeout =
            Duration::from_millis(parse_or("PROFILE_LOOKUP_TIMEOUT_MS", 2000u64)?);
        let request_timeout = Duration::from_secs(parse_or("REQUEST_TIMEOUT_SECONDS", 30u64)?);

        if profile_lookup_timeout.is_zero() {
            return Err(ConfigError::Invalid("PROFILE_LOOKUP_TIMEOUT_MS"));
        }
        if request_timeout.is_zero() {
            return Err(ConfigError::Invalid("REQUEST_TIMEOUT_SECONDS"));
        }

        Ok(Self {
            addr,
            app_env,
            trust_mode,
            jwt_secret,
            auth_issuer,
            auth_audience,
            clock_tolerance_seconds,
            trusted_identity_header,
            trusted_upstream_addrs,
            profile_lookup_latency,
            profile_lookup_timeout,
            request_timeout,
        })
    }

    fn jwt_secret_from_env(app_env: AppEnv) -> Result<String, ConfigError> {
        match std::env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => Ok(secret),
            _ if app_env.is_production() => Err(ConfigError::Missing("JWT_SECRET")),
            _ => {
                tracing::warn!("JWT_SECRET not set, using the demo secret (NOT for production)");
                Ok(DEV_JWT_SECRET.to_string())
            }
        }
    }
}
