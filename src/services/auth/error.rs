use thiserror::Error;

/// Failures of the identity-establishment stage.
///
/// `Invalid` deliberately collapses every verification failure (signature,
/// issuer, audience, expiry, ...) into one variant. The concrete cause is only
/// logged by the verifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("no credential presented")]
    Missing,
    #[error("credential failed verification")]
    Invalid,
    #[error("trusted identity assertion missing")]
    MissingTrustedIdentity,
}
