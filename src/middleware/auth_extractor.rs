use actix_web::error::Error;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures::future::{Ready, ready};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, errors::ErrorKind};
use uuid::Uuid;

use crate::config::Config;
use crate::error::ApiError;
use crate::models::user::JwtClaims;

/// Identity extracted from a verified bearer token. Handlers that work for
/// anonymous callers take `Option<AuthenticatedUser>` instead.
pub struct AuthenticatedUser {
    pub user_id: Uuid,
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<AuthenticatedUser, Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req).map_err(Error::from))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, ApiError> {
    let header = req
        .headers()
        .get("Authorization")
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".into()))?;
    let header = header
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid header format".into()))?;

    if !header.starts_with("Bearer ") {
        return Err(ApiError::Unauthorized("Invalid auth header format".into()));
    }
    let token = header.trim_start_matches("Bearer ").trim();

    // Config is registered at startup; a request arriving without it cannot
    // be verified, so it is rejected like any other bad token.
    let config = req
        .app_data::<web::Data<Config>>()
        .ok_or_else(|| ApiError::Unauthorized("Invalid token".into()))?;

    let validation = Validation::new(Algorithm::HS256);
    let data = decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => ApiError::Unauthorized("Token has expired".into()),
        _ => ApiError::Unauthorized("Invalid token".into()),
    })?;

    let user_id = Uuid::parse_str(&data.claims.sub)
        .map_err(|_| ApiError::Unauthorized("Invalid token".into()))?;

    Ok(AuthenticatedUser { user_id })
}

/// Mints a token the extractor accepts. Test helper only.
#[cfg(test)]
pub fn test_token(user_id: Uuid, secret: &str) -> String {
    use jsonwebtoken::{EncodingKey, Header, encode};

    let claims = JwtClaims {
        sub: user_id.to_string(),
        exp: (chrono::Utc::now().timestamp() + 3600) as u64,
        iat: None,
        email: None,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("test token encodes")
}
