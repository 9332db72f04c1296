/*
 * Responsibility
 * - Handler から見える「認証済みアイデンティティ」の型
 * - middleware が verifier / extractor で確立して request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - コンストラクタは services::auth 内に閉じている (verifier / trust 以外からは作れない)
 * - Default / Deserialize は実装しない
 */
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// How the identity was established. Audit/logging only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentitySource {
    BearerToken,
    TrustedUpstream,
}

/// An identity that passed either full token verification or trusted-channel extraction.
///
/// Lives for exactly one request (stored in that request's extensions).
#[derive(Debug, Clone)]
pub struct VerifiedIdentity {
    subject_id: String,
    claims: Map<String, Value>,
    established_at: DateTime<Utc>,
    source: IdentitySource,
}

impl VerifiedIdentity {
    pub(in crate::services::auth) fn establish(
        subject_id: String,
        claims: Map<String, Value>,
        source: IdentitySource,
    ) -> Self {
        debug_assert!(!subject_id.is_empty());
        Self {
            subject_id,
            claims,
            established_at: Utc::now(),
            source,
        }
    }

    pub fn subject_id(&self) -> &str {
        &self.subject_id
    }

    pub fn claims(&self) -> &Map<String, Value> {
        &self.claims
    }

    pub fn established_at(&self) -> DateTime<Utc> {
        self.established_at
    }

    pub fn source(&self) -> IdentitySource {
        self.source
    }
}
