use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Row in the `users` table. Token issuance lives outside this service; the
/// row still carries the bcrypt hash so the password-change flow can verify
/// and rotate it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub about: Option<String>,
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub x: Option<String>,
    pub profile_picture: Option<String>,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Redacted view sent to the client. Never exposes the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub about: Option<String>,
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub x: Option<String>,
    pub profile_picture: Option<String>,
}

impl From<&UserRecord> for UserProfile {
    fn from(record: &UserRecord) -> Self {
        UserProfile {
            id: record.id,
            name: record.name.clone(),
            email: record.email.clone(),
            about: record.about.clone(),
            github: record.github.clone(),
            linkedin: record.linkedin.clone(),
            x: record.x.clone(),
            profile_picture: record.profile_picture.clone(),
        }
    }
}

/// Partial profile update. `None` means "leave the column alone"; empty
/// strings are filtered out before this struct is built.
#[derive(Debug, Default, Clone, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.about.is_none()
            && self.github.is_none()
            && self.linkedin.is_none()
            && self.x.is_none()
    }
}

/// Claims layout of the bearer tokens the identity collaborator issues.
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    /// subject / user id
    pub sub: String,
    pub exp: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
