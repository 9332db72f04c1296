//! Identity establishment: the only place a `VerifiedIdentity` can be created.
//!
//! - `verifier`: bearer token (HS256 JWT) verification (gateway mode)
//! - `trust`: upstream-injected identity header extraction (relay mode)
//! - `stage`: picks one of the two per deployment and is what the middleware calls
pub mod error;
pub mod identity;
pub mod stage;
pub mod trust;
pub mod verifier;

pub use error::AuthError;
pub use identity::{IdentitySource, VerifiedIdentity};
pub use stage::IdentityStage;
pub use trust::TrustExtractor;
pub use verifier::TokenVerifier;
