/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /health は identity 不要、それ以外は identity middleware の内側
 * - /auth/validate は gateway mode のときだけ生やす
 */
use axum::{Router, routing::get};

use crate::api::v1::handlers::{auth::validate, health::health, profile::get_profile};
use crate::middleware;
use crate::services::auth::IdentityStage;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let mut protected = Router::new().route("/user/profile", get(get_profile));

    if matches!(*state.identity, IdentityStage::Gateway(_)) {
        protected = protected.route("/auth/validate", get(validate));
    }

    let protected = middleware::auth::identity::apply(protected, state);

    Router::new().route("/health", get(health)).merge(protected)
}
