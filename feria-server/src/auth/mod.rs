//! Account JWT authentication for the booking API

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use shared::error::AppError;
use shared::models::Role;

use crate::state::AppState;

/// JWT claims for account authentication
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Account ID
    pub sub: i64,
    /// Account email
    pub email: String,
    /// Role tag (VENDOR | EMPLOYEE | ADMIN)
    pub role: String,
    /// Expiration (Unix timestamp seconds)
    pub exp: usize,
    /// Issued at (Unix timestamp seconds)
    pub iat: usize,
}

/// Authenticated identity extracted from JWT
#[derive(Debug, Clone)]
pub struct Identity {
    pub account_id: i64,
    pub email: String,
    pub role: Role,
}

const JWT_EXPIRY_DAYS: i64 = 7;

/// Create a JWT token for an account
pub fn create_token(
    account_id: i64,
    email: &str,
    role: &str,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now();
    let claims = Claims {
        sub: account_id,
        email: email.to_string(),
        role: role.to_string(),
        exp: (now + chrono::Duration::days(JWT_EXPIRY_DAYS)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Middleware that extracts and verifies the JWT from the Authorization header
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::not_authenticated().into_response())?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::invalid_token("Invalid Authorization format").into_response())?;

    let validation = Validation::default();
    let token_data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(state.jwt_secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        tracing::debug!("JWT validation failed: {e}");
        match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                AppError::token_expired().into_response()
            }
            _ => AppError::invalid_token("Invalid or expired token").into_response(),
        }
    })?;

    let role = Role::from_db(&token_data.claims.role)
        .ok_or_else(|| AppError::invalid_token("Unknown role").into_response())?;

    let identity = Identity {
        account_id: token_data.claims.sub,
        email: token_data.claims.email,
        role,
    };

    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_roundtrip() {
        let token = create_token(42, "vendor@example.com", "VENDOR", "test-secret").unwrap();
        let data = jsonwebtoken::decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"test-secret"),
            &Validation::default(),
        )
        .unwrap();
        assert_eq!(data.claims.sub, 42);
        assert_eq!(data.claims.email, "vendor@example.com");
        assert_eq!(data.claims.role, "VENDOR");
    }

    #[test]
    fn test_token_rejects_wrong_secret() {
        let token = create_token(42, "vendor@example.com", "VENDOR", "test-secret").unwrap();
        let result = jsonwebtoken::decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"other-secret"),
            &Validation::default(),
        );
        assert!(result.is_err());
    }
}
