use axum::http::{HeaderMap, header};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, errors::ErrorKind};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::Config;
use crate::services::auth::{AuthError, IdentitySource, VerifiedIdentity};

/// Why a presented token was rejected. Logged only, never sent to the client.
#[derive(Debug, Error)]
pub enum TokenRejection {
    #[error("bad signature")]
    Signature,
    #[error("unexpected algorithm")]
    Algorithm,
    #[error("expired beyond clock tolerance")]
    Expired,
    #[error("not yet valid")]
    NotYetValid,
    #[error("issuer mismatch")]
    Issuer,
    #[error("audience mismatch")]
    Audience,
    #[error("missing required claim '{0}'")]
    MissingClaim(String),
    #[error("empty or non-string 'sub' claim")]
    EmptySubject,
    #[error("malformed token: {0}")]
    Malformed(jsonwebtoken::errors::Error),
}

impl From<jsonwebtoken::errors::Error> for TokenRejection {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::InvalidSignature => Self::Signature,
            ErrorKind::InvalidAlgorithm => Self::Algorithm,
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::ImmatureSignature => Self::NotYetValid,
            ErrorKind::InvalidIssuer => Self::Issuer,
            ErrorKind::InvalidAudience => Self::Audience,
            ErrorKind::MissingRequiredClaim(name) => Self::MissingClaim(name.clone()),
            _ => Self::Malformed(e),
        }
    }
}

/// Strip a case-insensitive `Bearer` scheme and return the token.
///
/// `None` for any other scheme, an empty token, or a token with inner whitespace.
pub fn bearer_token(raw: &str) -> Option<&str> {
    let (scheme, rest) = raw.trim().split_once(char::is_whitespace)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = rest.trim_start();
    if token.is_empty() || token.contains(char::is_whitespace) {
        return None;
    }
    Some(token)
}

/// HS256 bearer-token verifier.
///
/// - issuer/audience/clock tolerance are fixed at construction
/// - key material is intentionally not printable via Debug
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    pub fn new(secret: &[u8], issuer: &str, audience: &str, clock_tolerance_seconds: u64) -> Self {
        let decoding_key = DecodingKey::from_secret(secret);

        // Only HS256 is accepted; `alg` in the header must match exactly.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        // Applied to both `exp` and `nbf`.
        validation.leeway = clock_tolerance_seconds;

        Self {
            decoding_key,
            validation,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, crate::config::ConfigError> {
        let secret = config
            .jwt_secret
            .as_deref()
            .ok_or(crate::config::ConfigError::Missing("JWT_SECRET"))?;

        Ok(Self::new(
            secret.as_bytes(),
            &config.auth_issuer,
            &config.auth_audience,
            config.clock_tolerance_seconds,
        ))
    }

    pub fn clock_tolerance_seconds(&self) -> u64 {
        self.validation.leeway
    }

    /// Verify the `Authorization` header of a request.
    ///
    /// A repeated or non-UTF-8 header counts as malformed.
    pub fn verify_headers(&self, headers: &HeaderMap) -> Result<VerifiedIdentity, AuthError> {
        let mut values = headers.get_all(header::AUTHORIZATION).iter();
        let raw = match (values.next(), values.next()) {
            (Some(v), None) => v.to_str().ok(),
            (None, _) => None,
            (Some(_), Some(_)) => {
                tracing::warn!("multiple Authorization headers");
                return Err(AuthError::Missing);
            }
        };

        self.verify(raw)
    }

    /// Verify a raw `Authorization` value and establish the identity.
    ///
    /// Every verification failure surfaces as `AuthError::Invalid`; the concrete
    /// `TokenRejection` is only logged.
    pub fn verify(&self, raw_authorization: Option<&str>) -> Result<VerifiedIdentity, AuthError> {
        let Some(token) = raw_authorization.and_then(bearer_token) else {
            tracing::warn!(
                present = raw_authorization.is_some(),
                "missing or malformed Authorization header"
            );
            return Err(AuthError::Missing);
        };

        match self.decode(token) {
            Ok((subject_id, claims)) => {
                tracing::info!(subject = %subject_id, "bearer token verified");
                Ok(VerifiedIdentity::establish(
                    subject_id,
                    claims,
                    IdentitySource::BearerToken,
                ))
            }
            Err(reason) => {
                tracing::warn!(error = %reason, "access token verification failed");
                Err(AuthError::Invalid)
            }
        }
    }

    fn decode(&self, token: &str) -> Result<(String, Map<String, Value>), TokenRejection> {
        let data = jsonwebtoken::decode::<Map<String, Value>>(
            token,
            &self.decoding_key,
            &self.validation,
        )?;
        let claims = data.claims;

        let subject_id = claims
            .get("sub")
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .ok_or(TokenRejection::EmptySubject)?
            .to_string();

        Ok((subject_id, claims))
    }
}
