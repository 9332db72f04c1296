//! Trusted-identity header extraction (relay mode).
//!
//! Deployment precondition: the header is only trustworthy because untrusted
//! clients cannot reach this process except through the upstream gateway, which
//! overwrites the header after verifying the token. When `trusted_upstreams` is
//! non-empty this is checked against the TCP peer address; otherwise it is
//! assumed.
//!
//! No cryptographic re-verification happens here.

use std::net::{IpAddr, SocketAddr};

use axum::http::{HeaderMap, HeaderName};
use serde_json::Map;

use crate::config::Config;
use crate::services::auth::{AuthError, IdentitySource, VerifiedIdentity};

const MAX_SUBJECT_LEN: usize = 256;

#[derive(Debug, Clone)]
pub struct TrustExtractor {
    header_name: HeaderName,
    trusted_upstreams: Vec<IpAddr>,
}

impl TrustExtractor {
    pub fn new(header_name: HeaderName, trusted_upstreams: Vec<IpAddr>) -> Self {
        Self {
            header_name,
            trusted_upstreams,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.trusted_identity_header.clone(),
            config.trusted_upstream_addrs.clone(),
        )
    }

    /// Read the upstream-asserted subject. Fails closed on anything but exactly one
    /// well-formed value from a trusted peer.
    pub fn extract(
        &self,
        headers: &HeaderMap,
        peer: Option<SocketAddr>,
    ) -> Result<VerifiedIdentity, AuthError> {
        if !self.peer_is_trusted(peer) {
            tracing::error!(
                header = %self.header_name,
                header_present = headers.contains_key(&self.header_name),
                peer = ?peer,
                "request from untrusted peer; identity header disregarded"
            );
            return Err(AuthError::MissingTrustedIdentity);
        }

        let subject_id = self.read_subject(headers).map_err(|problem| {
            // The upstream is expected to always inject the header, so this is a
            // boundary configuration defect rather than a client error.
            tracing::error!(
                header = %self.header_name,
                problem,
                "trusted identity assertion missing or malformed"
            );
            AuthError::MissingTrustedIdentity
        })?;

        tracing::debug!(subject = %subject_id, "trusted identity extracted");
        Ok(VerifiedIdentity::establish(
            subject_id,
            Map::new(),
            IdentitySource::TrustedUpstream,
        ))
    }

    fn peer_is_trusted(&self, peer: Option<SocketAddr>) -> bool {
        if self.trusted_upstreams.is_empty() {
            return true;
        }
        peer.is_some_and(|addr| self.trusted_upstreams.contains(&addr.ip()))
    }

    fn read_subject(&self, headers: &HeaderMap) -> Result<String, &'static str> {
        let mut values = headers.get_all(&self.header_name).iter();
        let value = match (values.next(), values.next()) {
            (Some(v), None) => v,
            (None, _) => return Err("absent"),
            (Some(_), Some(_)) => return Err("repeated"),
        };

        let subject = value.to_str().map_err(|_| "not visible ascii")?.trim();
        if subject.is_empty() {
            return Err("empty");
        }
        if subject.len() > MAX_SUBJECT_LEN {
            return Err("too long");
        }
        if subject.chars().any(char::is_control) {
            return Err("control characters");
        }

        Ok(subject.to_string())
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn extractor() -> TrustExtractor {
        TrustExtractor::new(HeaderName::from_static("x-user-id"), Vec::new())
    }

    fn headers_with(values: &[&str]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for v in values {
            headers.append("x-user-id", HeaderValue::from_str(v).unwrap());
        }
        headers
    }

    #[test]
    fn present_header_becomes_identity_without_claims() {
        let identity = extractor().extract(&headers_with(&["ADMIN-7"]), None).unwrap();

        assert_eq!(identity.subject_id(), "ADMIN-7");
        assert!(identity.claims().is_empty());
        assert_eq!(identity.source(), IdentitySource::TrustedUpstream);
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_bytes(b"X-User-ID").unwrap(),
            HeaderValue::from_static("42"),
        );
        assert_eq!(extractor().extract(&headers, None).unwrap().subject_id(), "42");
    }

    #[test]
    fn absent_or_empty_header_fails_closed() {
        for headers in [HeaderMap::new(), headers_with(&[""]), headers_with(&["   "])] {
            assert_eq!(
                extractor().extract(&headers, None).unwrap_err(),
                AuthError::MissingTrustedIdentity
            );
        }
    }

    #[test]
    fn repeated_header_fails_closed() {
        assert_eq!(
            extractor()
                .extract(&headers_with(&["u1", "u2"]), None)
                .unwrap_err(),
            AuthError::MissingTrustedIdentity
        );
    }

    #[test]
    fn oversized_or_non_ascii_value_fails_closed() {
        let long = "a".repeat(MAX_SUBJECT_LEN + 1);
        assert!(extractor().extract(&headers_with(&[&long]), None).is_err());

        let mut headers = HeaderMap::new();
        headers.insert("x-user-id", HeaderValue::from_bytes(b"caf\xc3\xa9").unwrap());
        assert_eq!(
            extractor().extract(&headers, None).unwrap_err(),
            AuthError::MissingTrustedIdentity
        );
    }

    #[test]
    fn allowlisted_upstream_is_honoured_and_others_ignored() {
        let gateway: IpAddr = "10.0.0.2".parse().unwrap();
        let extractor = TrustExtractor::new(HeaderName::from_static("x-user-id"), vec![gateway]);
        let headers = headers_with(&["u1"]);

        let from_gateway = SocketAddr::new(gateway, 40000);
        assert!(extractor.extract(&headers, Some(from_gateway)).is_ok());

        let from_client: SocketAddr = "203.0.113.9:5555".parse().unwrap();
        assert_eq!(
            extractor.extract(&headers, Some(from_client)).unwrap_err(),
            AuthError::MissingTrustedIdentity
        );
        assert_eq!(
            extractor.extract(&headers, None).unwrap_err(),
            AuthError::MissingTrustedIdentity
        );
        assert_eq!(
            extractor
                .extract(&HeaderMap::new(), Some(from_client))
                .unwrap_err(),
            AuthError::MissingTrustedIdentity
        );
    }
}
