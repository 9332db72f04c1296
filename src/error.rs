/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / JSON error body)
 * - AuthError / ProfileError を統一的に変換
 *
 * Notes
 * - 認証失敗 (401) と設定不備 (500) は必ず別のステータス帯に落とす
 * - 内部の失敗理由 (署名/期限/aud など) はレスポンスに含めない
 */
use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::auth::AuthError;
use crate::services::profile::ProfileError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("unauthorized: {reason}")]
    Unauthorized {
        reason: &'static str,
        challenge: &'static str,
    },
    #[error("trusted identity missing")]
    MissingTrustedIdentity,
    #[error("identity missing at handler")]
    InternalConfiguration,
    #[error("not found: {resource}")]
    NotFound { resource: &'static str },
    #[error("upstream timeout")]
    UpstreamTimeout,
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Unauthorized { reason, .. } => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", reason.to_string())
            }
            AppError::MissingTrustedIdentity => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_AUTH_ERROR",
                "Internal Auth Error".into(),
            ),
            AppError::InternalConfiguration => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_CONFIGURATION_ERROR",
                "internal configuration error".into(),
            ),
            AppError::NotFound { resource } => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{resource} not found."),
            ),
            AppError::UpstreamTimeout => (
                StatusCode::GATEWAY_TIMEOUT,
                "UPSTREAM_TIMEOUT",
                "upstream timeout".into(),
            ),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_SERVER_ERROR",
                "internal server error".into(),
            ),
        };

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        let mut res = (status, Json(body)).into_response();
        if let AppError::Unauthorized { challenge, .. } = self {
            res.headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static(challenge));
        }
        res
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Missing => AppError::Unauthorized {
                reason: "missing credentials",
                challenge: "Bearer",
            },
            AuthError::Invalid => AppError::Unauthorized {
                reason: "invalid token",
                challenge: r#"Bearer error="invalid_token""#,
            },
            AuthError::MissingTrustedIdentity => AppError::MissingTrustedIdentity,
        }
    }
}

impl From<ProfileError> for AppError {
    fn from(e: ProfileError) -> Self {
        match e {
            ProfileError::NotFound => AppError::not_found("profile"),
            ProfileError::Backend(_) => AppError::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(e: AppError) -> StatusCode {
        e.into_response().status()
    }

    #[test]
    fn auth_failures_and_misconfiguration_use_distinct_status_ranges() {
        assert_eq!(status_of(AuthError::Missing.into()), StatusCode::UNAUTHORIZED);
        assert_eq!(status_of(AuthError::Invalid.into()), StatusCode::UNAUTHORIZED);
        assert!(status_of(AuthError::MissingTrustedIdentity.into()).is_server_error());
        assert!(status_of(AppError::InternalConfiguration).is_server_error());
    }

    #[test]
    fn unauthorized_carries_bearer_challenge() {
        let res = AppError::from(AuthError::Invalid).into_response();
        assert_eq!(
            res.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            r#"Bearer error="invalid_token""#
        );
    }

    #[test]
    fn profile_errors_map_to_not_found_and_internal() {
        assert_eq!(status_of(ProfileError::NotFound.into()), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(ProfileError::Backend("down".into()).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(status_of(AppError::UpstreamTimeout), StatusCode::GATEWAY_TIMEOUT);
    }
}
