use serde::{Deserialize, Serialize};

use crate::models::user::UserProfile;

#[derive(Debug, Deserialize)]
pub struct UpdateProfileIn {
    pub name: Option<String>,
    pub about: Option<String>,
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub x: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileOut {
    pub user: UserProfile,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileUpdatedOut {
    pub message: String,
    pub user: UserProfile,
}

/// Absent fields are treated like empty ones so the handler can answer with
/// its own message instead of a deserializer error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordIn {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageOut {
    pub message: String,
}
