//! identity 確立 (Bearer 検証 or trusted header 抽出) → VerifiedIdentity を extensions に入れる
//!
//! - 失敗時は handler を呼ばずにその場でレスポンスを返す (401 / 500)
//! - 成功時は raw credential を運ぶヘッダ (Authorization / trusted header) を request から取り除く
//!   handler は VerifiedIdentity 以外から信頼を導出できない

use std::net::SocketAddr;

use axum::{
    Router,
    body::Body,
    extract::{ConnectInfo, State},
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::state::AppState;

/// identity が必要なルートに middleware を適用する。
///
/// 例：
/// ```ignore
/// let protected = Router::new().route("/user/profile", get(get_profile));
/// let protected = middleware::auth::identity::apply(protected, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.route_layer(middleware::from_fn_with_state(state, identity_middleware))
}

async fn identity_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    // Only present when served with `into_make_service_with_connect_info`.
    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);

    // 失敗理由の詳細は verifier / extractor 側でログ済み
    let identity = state.identity.establish(req.headers(), peer)?;

    for name in state.credential_headers() {
        req.headers_mut().remove(&name);
    }

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}
