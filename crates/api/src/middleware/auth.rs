//! # Authentication Module
//!
//! Stateless bearer-token verification. Every protected request carries
//! `Authorization: Bearer <jwt>` signed with the shared HS256 secret; the
//! token's `role` claim decides which routes it may reach.
//!
//! Routes opt in with [`require_doctor`], [`require_student`] or
//! [`require_member`] via `axum::middleware::from_fn_with_state`. On
//! success the verified [`Claims`] are stored in the request extensions,
//! where handlers pick them up with `Extension<Claims>`.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use campuscare_core::{
    errors::{CareError, CareResult},
    models::auth::{Claims, Role},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

/// Signs a token for `subject` with the given role and lifetime.
///
/// Token issuance belongs to the identity service; this exists for tooling
/// and tests that need a valid token.
pub fn issue_token(secret: &str, subject: Uuid, role: Role, ttl: Duration) -> CareResult<String> {
    let exp = (Utc::now() + ttl).timestamp().max(0) as u64;
    let claims = Claims { sub: subject, role, exp };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| CareError::Internal(Box::new(e)))
}

/// Verifies signature and expiry and returns the token's claims.
pub fn verify_token(secret: &str, token: &str) -> CareResult<Claims> {
    if secret.is_empty() {
        return Err(CareError::Authentication("JWT secret is not set".to_string()));
    }

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map_err(|e| {
        tracing::debug!("Token verification failed: {}", e);
        CareError::Authentication("Invalid or expired access token".to_string())
    })?;

    Ok(data.claims)
}

/// Pulls the token out of an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header: Option<&str>) -> CareResult<&str> {
    let value = header
        .ok_or_else(|| CareError::Authentication("Missing authorization header".to_string()))?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| CareError::Authentication("Invalid authorization header format".to_string()))
}

/// Fails with `Authorization` unless the token belongs to `id`.
///
/// Doctors may only manage their own schedule and students may only book
/// for themselves.
pub fn ensure_subject(claims: &Claims, id: Uuid) -> CareResult<()> {
    if claims.sub == id {
        Ok(())
    } else {
        Err(CareError::Authorization(format!(
            "This {} token cannot act on behalf of {}",
            claims.role.as_str(),
            id
        )))
    }
}

/// Doctors may read any student's records; a student only their own.
pub fn ensure_record_reader(claims: &Claims, student_id: Uuid) -> CareResult<()> {
    match claims.role {
        Role::Doctor => Ok(()),
        Role::Student => ensure_subject(claims, student_id),
    }
}

async fn authorize(
    state: &ApiState,
    allowed: &[Role],
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    let token = bearer_token(header)?;
    let claims = verify_token(&state.jwt_secret, token)?;

    if !allowed.contains(&claims.role) {
        return Err(AppError(CareError::Authorization(format!(
            "Role '{}' may not access this resource",
            claims.role.as_str()
        ))));
    }

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Admits doctor tokens only
pub async fn require_doctor(
    State(state): State<Arc<ApiState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    authorize(&state, &[Role::Doctor], request, next).await
}

/// Admits student tokens only
pub async fn require_student(
    State(state): State<Arc<ApiState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    authorize(&state, &[Role::Student], request, next).await
}

/// Admits any valid token
pub async fn require_member(
    State(state): State<Arc<ApiState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    authorize(&state, &[Role::Doctor, Role::Student], request, next).await
}
