/*
 * Responsibility
 * - GET /user/profile の response DTO
 */
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::services::profile::ProfileRecord;

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub message: &'static str,
    pub data: ProfileData,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileData {
    pub id: String,
    pub username: String,
    pub role: String,
    pub last_login: DateTime<Utc>,
}

impl From<ProfileRecord> for ProfileResponse {
    fn from(r: ProfileRecord) -> Self {
        Self {
            message: "Profile data fetched successfully",
            data: ProfileData {
                id: r.id,
                username: r.username,
                role: r.role,
                last_login: r.last_login,
            },
            status: "OK",
        }
    }
}
