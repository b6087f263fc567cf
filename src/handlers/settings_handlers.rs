use actix_web::{get, put, web, HttpResponse};
use regex::Regex;

use crate::dtos::settings_dtos::{
    ChangePasswordIn, MessageOut, ProfileOut, ProfileUpdatedOut, UpdateProfileIn,
};
use crate::error::{ApiError, StoreError};
use crate::middleware::auth_extractor::AuthenticatedUser;
use crate::models::user::{ProfileUpdate, UserProfile};
use crate::AppState;

const BCRYPT_COST: u32 = 10;

/// Loose per-platform checks, the same ones the settings screen applies
/// before submit. Anything under the right host passes.
fn is_valid_profile_url(platform: &str, url: &str) -> bool {
    let pattern = match platform {
        "linkedin" => r"(?i)^https?://(www\.)?linkedin\.com/.*$",
        "github" => r"(?i)^https?://(www\.)?github\.com/.*$",
        "x" => r"(?i)^https?://(www\.)?x\.com/.*$",
        _ => return false,
    };
    Regex::new(pattern).unwrap().is_match(url)
}

/// Empty and whitespace-only strings count as absent, so a field can be
/// replaced but never cleared.
fn clean(raw: &Option<String>) -> Option<String> {
    raw.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

#[get("/settings/profile")]
pub async fn get_profile(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let record = state
        .users
        .get(user.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    Ok(HttpResponse::Ok().json(ProfileOut {
        user: UserProfile::from(&record),
    }))
}

#[put("/settings/profile")]
pub async fn update_profile(
    body: web::Json<UpdateProfileIn>,
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let update = ProfileUpdate {
        name: clean(&body.name),
        about: clean(&body.about),
        github: clean(&body.github),
        linkedin: clean(&body.linkedin),
        x: clean(&body.x),
    };
    if update.is_empty() {
        return Err(ApiError::InvalidArgument(
            "At least one field must be provided to update".into(),
        ));
    }

    if state.users.get(user.user_id).await?.is_none() {
        return Err(ApiError::NotFound("User not found".into()));
    }

    if let Some(url) = &update.linkedin {
        if !is_valid_profile_url("linkedin", url) {
            return Err(ApiError::InvalidArgument("Invalid LinkedIn URL".into()));
        }
    }
    if let Some(url) = &update.github {
        if !is_valid_profile_url("github", url) {
            return Err(ApiError::InvalidArgument("Invalid GitHub URL".into()));
        }
    }
    if let Some(url) = &update.x {
        if !is_valid_profile_url("x", url) {
            return Err(ApiError::InvalidArgument("Invalid X URL".into()));
        }
    }

    let updated = state
        .users
        .update_profile(user.user_id, &update)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    Ok(HttpResponse::Ok().json(ProfileUpdatedOut {
        message: "Profile updated successfully".into(),
        user: UserProfile::from(&updated),
    }))
}

#[put("/settings/password")]
pub async fn change_password(
    body: web::Json<ChangePasswordIn>,
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    if body.current_password.is_empty() {
        return Err(ApiError::InvalidArgument(
            "Current password is required".into(),
        ));
    }
    if body.new_password.len() < 8 {
        return Err(ApiError::InvalidArgument(
            "New password must be at least 8 characters long".into(),
        ));
    }

    let record = state
        .users
        .get(user.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    let current_matches = bcrypt::verify(&body.current_password, &record.password_hash)
        .map_err(|err| StoreError::Backend(format!("bcrypt verify failed: {err}")))?;
    if !current_matches {
        return Err(ApiError::Unauthorized("Incorrect current password".into()));
    }

    // Compared against the stored hash, not the submitted string, so two
    // different submissions that hash-match still count as a reuse.
    let reused = bcrypt::verify(&body.new_password, &record.password_hash)
        .map_err(|err| StoreError::Backend(format!("bcrypt verify failed: {err}")))?;
    if reused {
        return Err(ApiError::InvalidArgument(
            "New password cannot be the same as the current password".into(),
        ));
    }

    let new_hash = bcrypt::hash(&body.new_password, BCRYPT_COST)
        .map_err(|err| StoreError::Backend(format!("bcrypt hash failed: {err}")))?;
    state.users.update_password(user.user_id, &new_hash).await?;

    Ok(HttpResponse::Ok().json(MessageOut {
        message: "Password changed successfully".into(),
    }))
}
