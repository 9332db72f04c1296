use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use crate::services::profile::store::{ProfileRecord, ProfileResult, ProfileStore};

/// Deterministic in-process stand-in for the user data store.
///
/// Sleeps for `latency` to model an I/O bound query; only the awaiting request
/// is suspended.
#[derive(Clone, Debug)]
pub struct SimulatedProfileStore {
    latency: Duration,
}

impl SimulatedProfileStore {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

pub fn derive_role(subject_id: &str) -> &'static str {
    if subject_id.starts_with("ADMIN") {
        "admin"
    } else {
        "standard"
    }
}

#[async_trait]
impl ProfileStore for SimulatedProfileStore {
    fn backend_name(&self) -> &'static str {
        "simulated"
    }

    async fn lookup(&self, subject_id: &str) -> ProfileResult<ProfileRecord> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        Ok(ProfileRecord {
            id: subject_id.to_string(),
            username: format!("User-{subject_id}"),
            role: derive_role(subject_id).to_string(),
            last_login: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lookup_derives_username_and_role() {
        let store = SimulatedProfileStore::new(Duration::ZERO);

        let admin = store.lookup("ADMIN-7").await.unwrap();
        assert_eq!(admin.id, "ADMIN-7");
        assert_eq!(admin.username, "User-ADMIN-7");
        assert_eq!(admin.role, "admin");

        let user = store.lookup("u123").await.unwrap();
        assert_eq!(user.role, "standard");
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_lookups_do_not_serialize() {
        let store = SimulatedProfileStore::new(Duration::from_millis(50));
        let started = tokio::time::Instant::now();

        let (a, b) = tokio::join!(store.lookup("a"), store.lookup("b"));
        assert!(a.is_ok() && b.is_ok());
        assert!(started.elapsed() < Duration::from_millis(100));
    }
}
