/*
 * Responsibility
 * - GET /auth/validate (gateway mode のみ)
 * - edge proxy の auth sub-request 用: 検証済み subject を trusted header で返す
 * - relay 側はこのヘッダを TrustExtractor で読む
 */
use axum::{
    extract::State,
    http::{HeaderValue, StatusCode},
    response::IntoResponse,
};

use crate::{
    api::v1::extractors::Identity, error::AppError, services::auth::AuthError, state::AppState,
};

pub async fn validate(
    State(state): State<AppState>,
    Identity(identity): Identity,
) -> Result<impl IntoResponse, AppError> {
    // Subjects come from a verified `sub` claim; still refuse anything not header-safe.
    let value = HeaderValue::from_str(identity.subject_id()).map_err(|_| {
        tracing::warn!("verified subject cannot be encoded as a header value");
        AppError::from(AuthError::Invalid)
    })?;

    Ok((
        StatusCode::OK,
        [(state.trusted_identity_header.clone(), value)],
    ))
}
