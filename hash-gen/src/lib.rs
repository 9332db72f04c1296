//! Offline bcrypt hashing for seeding the credential store.
//!
//! Not linked into the service; it only produces SQL seed data.

use thiserror::Error;

pub const DEFAULT_COST: u32 = 10;
pub const MIN_COST: u32 = 4;
pub const MAX_COST: u32 = 31;

#[derive(Debug, Error)]
pub enum HashGenError {
    #[error("work factor {0} out of range ({min}..={max})", min = MIN_COST, max = MAX_COST)]
    InvalidCost(u32),
    #[error("invalid credential spec {0:?} (expected name:password)")]
    InvalidSpec(String),
    #[error("bcrypt: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub identifier: String,
    pub plaintext: String,
}

impl Credential {
    pub fn new(identifier: impl Into<String>, plaintext: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            plaintext: plaintext.into(),
        }
    }

    /// Parse `name:password`. The password may itself contain `:`.
    pub fn parse(spec: &str) -> Result<Self, HashGenError> {
        match spec.split_once(':') {
            Some((name, password)) if !name.trim().is_empty() && !password.is_empty() => {
                Ok(Self::new(name.trim(), password))
            }
            _ => Err(HashGenError::InvalidSpec(spec.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HashedCredential {
    pub identifier: String,
    pub hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub identifier: String,
    pub verified: bool,
}

/// Demo users seeded when none are given on the command line.
pub fn demo_credentials() -> Vec<Credential> {
    vec![
        Credential::new("alice", "password123"),
        Credential::new("bob", "securepass456"),
        Credential::new("admin", "adminpass789"),
    ]
}

pub fn hash_credentials(
    credentials: &[Credential],
    cost: u32,
) -> Result<Vec<HashedCredential>, HashGenError> {
    if !(MIN_COST..=MAX_COST).contains(&cost) {
        return Err(HashGenError::InvalidCost(cost));
    }

    credentials
        .iter()
        .map(|c| {
            Ok(HashedCredential {
                identifier: c.identifier.clone(),
                hash: bcrypt::hash(&c.plaintext, cost)?,
            })
        })
        .collect()
}

pub fn verify_credential(plaintext: &str, hash: &str) -> Result<bool, HashGenError> {
    Ok(bcrypt::verify(plaintext, hash)?)
}

/// Verify every hash against its own plaintext (pairs matched by position).
pub fn self_check(credentials: &[Credential], hashed: &[HashedCredential]) -> Vec<CheckOutcome> {
    credentials
        .iter()
        .zip(hashed)
        .map(|(c, h)| CheckOutcome {
            identifier: c.identifier.clone(),
            verified: c.identifier == h.identifier
                && verify_credential(&c.plaintext, &h.hash).unwrap_or(false),
        })
        .collect()
}

/// `INSERT INTO users (username, password_hash)` statement for the seed file.
pub fn render_seed_sql(hashed: &[HashedCredential]) -> String {
    let rows = hashed
        .iter()
        .map(|h| {
            format!(
                "    ('{}', '{}')",
                h.identifier.replace('\'', "''"),
                h.hash
            )
        })
        .collect::<Vec<_>>()
        .join(",\n");

    format!("INSERT INTO users (username, password_hash) VALUES\n{rows};\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    // Lowest cost bcrypt allows; keeps the tests fast.
    const TEST_COST: u32 = MIN_COST;

    #[test]
    fn hash_verifies_against_its_plaintext_only() {
        let creds = demo_credentials();
        let hashed = hash_credentials(&creds, TEST_COST).unwrap();

        for (c, h) in creds.iter().zip(&hashed) {
            assert_eq!(c.identifier, h.identifier);
            assert!(verify_credential(&c.plaintext, &h.hash).unwrap());
            assert!(!verify_credential("wrong-password", &h.hash).unwrap());
        }
    }

    #[test]
    fn same_plaintext_hashes_differently_each_time() {
        let creds = [Credential::new("alice", "password123")];
        let a = hash_credentials(&creds, TEST_COST).unwrap();
        let b = hash_credentials(&creds, TEST_COST).unwrap();
        assert_ne!(a[0].hash, b[0].hash);
    }

    #[test]
    fn self_check_reports_each_pair() {
        let creds = demo_credentials();
        let mut hashed = hash_credentials(&creds, TEST_COST).unwrap();
        assert!(self_check(&creds, &hashed).iter().all(|o| o.verified));

        // Swap two hashes: both rows must now fail.
        hashed.swap(0, 1);
        let outcomes = self_check(&creds, &hashed);
        assert!(!outcomes[0].verified);
        assert!(!outcomes[1].verified);
        assert!(outcomes[2].verified);
    }

    #[test]
    fn cost_out_of_range_is_rejected() {
        let creds = demo_credentials();
        assert!(matches!(
            hash_credentials(&creds, 3),
            Err(HashGenError::InvalidCost(3))
        ));
        assert!(matches!(
            hash_credentials(&creds, 32),
            Err(HashGenError::InvalidCost(32))
        ));
        assert_eq!(
            HashGenError::InvalidCost(3).to_string(),
            "work factor 3 out of range (4..=31)"
        );
        assert!(hash_credentials(&creds[..1], MIN_COST).is_ok());
    }

    #[test]
    fn parse_credential_spec() {
        assert_eq!(
            Credential::parse("bob:pa:ss").unwrap(),
            Credential::new("bob", "pa:ss")
        );
        assert!(Credential::parse("bob").is_err());
        assert!(Credential::parse(":secret").is_err());
        assert!(Credential::parse("bob:").is_err());
    }

    #[test]
    fn seed_sql_lists_every_row() {
        let hashed = vec![
            HashedCredential {
                identifier: "alice".into(),
                hash: "$2b$04$abc".into(),
            },
            HashedCredential {
                identifier: "o'neil".into(),
                hash: "$2b$04$def".into(),
            },
        ];

        let sql = render_seed_sql(&hashed);
        assert!(sql.starts_with("INSERT INTO users (username, password_hash) VALUES\n"));
        assert!(sql.contains("    ('alice', '$2b$04$abc'),\n"));
        assert!(sql.contains("    ('o''neil', '$2b$04$def');"));
    }
}
