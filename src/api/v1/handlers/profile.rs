/*
 * Responsibility
 * - GET /user/profile
 * - Identity extractor だけから subject を受け取り、ProfileStore を引く
 * - raw token / upstream header には触れない (middleware で除去済み)
 */
use axum::{Json, extract::State};

use crate::{
    api::v1::{dto::profile::ProfileResponse, extractors::Identity},
    error::AppError,
    state::AppState,
};

pub async fn get_profile(
    State(state): State<AppState>,
    Identity(identity): Identity,
) -> Result<Json<ProfileResponse>, AppError> {
    let subject = identity.subject_id();

    let record = tokio::time::timeout(state.lookup_timeout, state.profiles.lookup(subject))
        .await
        .map_err(|_| {
            tracing::warn!(
                subject = %subject,
                backend = state.profiles.backend_name(),
                timeout_ms = state.lookup_timeout.as_millis() as u64,
                "profile lookup timed out"
            );
            AppError::UpstreamTimeout
        })?
        .map_err(|e| {
            tracing::warn!(subject = %subject, error = %e, "profile lookup failed");
            AppError::from(e)
        })?;

    tracing::info!(
        subject = %subject,
        source = ?identity.source(),
        established_at = %identity.established_at(),
        "served profile"
    );

    Ok(Json(record.into()))
}
