use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::headers::{authorization::Bearer, Authorization};
use axum_extra::TypedHeader;
use jsonwebtoken::{decode, DecodingKey, Validation};
use crate::domain::value_objects::{UserId, UserRole};
use crate::error::AppError;
use crate::infrastructure::AppState;

/// Identity decoded from a bearer token issued by the external auth service.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub roles: Vec<UserRole>,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub roles: Vec<String>,
    pub exp: usize,
}

impl AuthenticatedUser {
    pub fn has_role(&self, role: UserRole) -> bool {
        self.roles.contains(&role)
    }

    pub fn require_role(&self, role: UserRole) -> Result<(), AppError> {
        if self.has_role(role) {
            Ok(())
        } else {
            Err(AppError::Forbidden(match role {
                UserRole::Student => "student role required",
                UserRole::Instructor => "instructor role required",
                UserRole::Admin => "admin role required",
            }))
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::AuthenticationRequired)?;
        decode_token(bearer.token(), &state.jwt_secret)
    }
}

pub fn decode_token(token: &str, secret: &str) -> Result<AuthenticatedUser, AppError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        tracing::debug!(error = %e, "rejected bearer token");
        AppError::AuthenticationRequired
    })?;

    let claims = token_data.claims;
    let id = claims
        .sub
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .map(UserId::new)
        .ok_or(AppError::AuthenticationRequired)?;
    let roles = claims
        .roles
        .iter()
        .filter_map(|r| UserRole::from_claim(r))
        .collect();

    Ok(AuthenticatedUser { id, roles })
}
