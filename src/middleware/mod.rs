/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth: identity 確立 (Verifier / Extractor) → extensions へ格納
 * - http: request id / trace / body limit / timeout
 */
pub mod auth;
pub mod http;
