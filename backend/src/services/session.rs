//! Session service: registration, login and token refresh
//!
//! Password work runs on the blocking pool. Tokens come from the shared
//! [`JwtService`] in `AppState`.

use crate::auth::{JwtService, PasswordService, MIN_PASSWORD_LEN};
use crate::error::ApiError;
use crate::repositories::UserRepository;
use healthlog_shared::types::{AuthTokens, UserProfile};
use healthlog_shared::{AuthError, ValidationError};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::ValidateEmail;

fn issue_tokens(jwt: &JwtService, user_id: Uuid) -> Result<AuthTokens, ApiError> {
    Ok(AuthTokens {
        access_token: jwt.generate_access_token(user_id)?,
        refresh_token: jwt.generate_refresh_token(user_id)?,
        token_type: "Bearer".to_string(),
        expires_in: jwt.access_token_expiry_secs(),
    })
}

/// Check registration input before touching the database
pub fn validate_credentials(email: &str, password: &str) -> Result<(), ValidationError> {
    if !email.validate_email() {
        return Err(ValidationError::new("email", "invalid email format"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::new(
            "password",
            format!("must be at least {} characters", MIN_PASSWORD_LEN),
        ));
    }
    Ok(())
}

pub struct SessionService;

impl SessionService {
    pub async fn register(
        pool: &PgPool,
        jwt: &JwtService,
        email: &str,
        password: &str,
    ) -> Result<AuthTokens, ApiError> {
        let email = email.trim().to_lowercase();
        validate_credentials(&email, password)?;

        if UserRepository::email_exists(pool, &email).await? {
            return Err(ApiError::Conflict("Email already registered".to_string()));
        }

        let password_hash = PasswordService::hash_async(password.to_string()).await?;
        let user = UserRepository::create(pool, &email, &password_hash).await?;

        metrics::counter!("healthlog_users_registered_total").increment(1);
        info!(user_id = %user.id, "User registered");

        issue_tokens(jwt, user.id)
    }

    pub async fn login(
        pool: &PgPool,
        jwt: &JwtService,
        email: &str,
        password: &str,
    ) -> Result<AuthTokens, ApiError> {
        let email = email.trim().to_lowercase();
        let user = UserRepository::find_by_email(pool, &email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let valid = PasswordService::verify_async(password.to_string(), user.password_hash.clone()).await?;
        if !valid {
            return Err(AuthError::InvalidCredentials.into());
        }

        issue_tokens(jwt, user.id)
    }

    /// Exchange a refresh token for a new token pair
    pub async fn refresh(pool: &PgPool, jwt: &JwtService, refresh_token: &str) -> Result<AuthTokens, ApiError> {
        let claims = jwt.validate_refresh_token(refresh_token)?;

        // Deleted users cannot refresh
        UserRepository::find_by_id(pool, claims.sub)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        issue_tokens(jwt, claims.sub)
    }

    pub async fn current_user(pool: &PgPool, user_id: Uuid) -> Result<UserProfile, ApiError> {
        let user = UserRepository::find_by_id(pool, user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        Ok(UserProfile {
            id: user.id.to_string(),
            email: user.email,
            created_at: user.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("not-an-email", "longenough", "email")]
    #[case("a@example.com", "short", "password")]
    fn test_invalid_credentials_rejected(#[case] email: &str, #[case] password: &str, #[case] field: &str) {
        assert_eq!(validate_credentials(email, password).unwrap_err().field, field);
    }

    #[test]
    fn test_valid_credentials_accepted() {
        assert!(validate_credentials("someone@example.com", "hunter2hunter2").is_ok());
    }

    #[test]
    fn test_generated_credentials_accepted() {
        use fake::faker::internet::en::{Password, SafeEmail};
        use fake::Fake;

        for _ in 0..20 {
            let email: String = SafeEmail().fake();
            let password: String = Password(MIN_PASSWORD_LEN..32).fake();
            assert!(validate_credentials(&email, &password).is_ok(), "{} rejected", email);
        }
    }

    #[test]
    fn test_issue_tokens_pair() {
        let jwt = JwtService::new("test-secret", 900, 3600);
        let user_id = Uuid::new_v4();
        let tokens = issue_tokens(&jwt, user_id).unwrap();

        assert_eq!(tokens.token_type, "Bearer");
        assert_eq!(tokens.expires_in, 900);
        assert_eq!(jwt.validate_access_token(&tokens.access_token).unwrap().sub, user_id);
        assert_eq!(jwt.validate_refresh_token(&tokens.refresh_token).unwrap().sub, user_id);
    }
}
