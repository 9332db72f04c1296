use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::auth::VerifiedIdentity;

/// Handler で VerifiedIdentity を受け取るための extractor
///
/// Identity middleware が先に走っていれば必ず存在する。見つからない場合は
/// 認証エラーではなくパイプライン構成のバグなので 500 (InternalConfiguration) を返す。
#[derive(Debug, Clone)]
pub struct Identity(pub VerifiedIdentity);

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<VerifiedIdentity>()
            .cloned()
            .map(Identity)
            .ok_or_else(|| {
                tracing::error!(
                    path = %parts.uri.path(),
                    "no verified identity at handler; identity middleware is not wired in front of this route"
                );
                AppError::InternalConfiguration
            })
    }
}
