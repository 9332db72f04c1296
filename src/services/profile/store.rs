//! Profile lookup interface used by the request handler.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

pub type ProfileResult<T> = Result<T, ProfileError>;

/// Read model for a subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRecord {
    pub id: String,
    pub username: String,
    pub role: String,
    pub last_login: DateTime<Utc>,
}

/// Lookup failures.
///
/// Kept independent from `AppError` so the handler decides how each maps to HTTP
/// (`NotFound` is a 404, not a 500).
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("profile not found")]
    NotFound,
    #[error("profile backend error: {0}")]
    Backend(String),
}

/// Data-store collaborator. Keyed only by the verified subject id.
///
/// Implementations must be cheap to share (held as `Arc<dyn ProfileStore>`).
#[async_trait]
pub trait ProfileStore: Send + Sync + 'static {
    // Backend name (for logging).
    fn backend_name(&self) -> &'static str;

    async fn lookup(&self, subject_id: &str) -> ProfileResult<ProfileRecord>;
}
