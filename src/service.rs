/// Authentication service
///
/// Business logic between the HTTP handlers and the user repository:
/// signup, login, token authentication, current user lookup and logout.

use std::sync::Arc;

use crate::auth::{
    decode_token, hash_password, issue_access_token, verify_password, Claims, IssuedToken,
    TokenBlacklist,
};
use crate::configuration::JwtSettings;
use crate::error::{AppError, AuthError, DatabaseError, DuplicateEmail};
use crate::models::{NewUser, User};
use crate::repository::UserRepository;
use crate::validators::{is_valid_email, is_valid_password};

/// Result of a successful login
#[derive(Debug)]
pub struct LoginOutcome {
    pub token: IssuedToken,
    pub user: User,
}

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    blacklist: TokenBlacklist,
    jwt: JwtSettings,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        blacklist: TokenBlacklist,
        jwt: JwtSettings,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            users,
            blacklist,
            jwt,
            bcrypt_cost,
        }
    }

    /// Register a new user.
    ///
    /// # Errors
    /// - `Validation` for a malformed email or a password outside the policy
    /// - `Duplicate` if the (normalized) email is already registered
    #[tracing::instrument(name = "Signing up user", skip_all)]
    pub async fn signup(&self, email: &str, password: &str) -> Result<User, AppError> {
        let email = is_valid_email(email)?;
        is_valid_password(password)?;

        if self.users.user_exists(&email).await? {
            return Err(DuplicateEmail(email).into());
        }

        let password_hash = self.hash(password).await?;

        let user = self
            .users
            .create_user(NewUser {
                email: email.clone(),
                password_hash,
            })
            .await
            .map_err(|e| match e {
                // Lost a race with a concurrent signup for the same email.
                DatabaseError::UniqueConstraintViolation(_) => DuplicateEmail(email).into(),
                other => AppError::from(other),
            })?;

        tracing::info!(user_id = %user.id, "User registered successfully");
        Ok(user)
    }

    /// Check credentials and issue an access token.
    ///
    /// Unknown email and wrong password produce the same error.
    #[tracing::instrument(name = "Logging in user", skip_all)]
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AppError> {
        let email = is_valid_email(email)?;

        let user = self
            .users
            .get_user_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.verify(password, &user.password_hash).await? {
            return Err(AuthError::InvalidCredentials.into());
        }

        if !user.is_active {
            return Err(AuthError::AccountInactive.into());
        }

        let token = issue_access_token(&user, &self.jwt)?;

        tracing::info!(user_id = %user.id, "User logged in successfully");
        Ok(LoginOutcome { token, user })
    }

    /// Decode a bearer token and make sure it has not been revoked.
    pub fn authenticate(&self, token: &str) -> Result<Claims, AuthError> {
        let claims = decode_token(token, &self.jwt)?;

        if self.blacklist.is_revoked(&claims.jti) {
            return Err(AuthError::TokenRevoked);
        }

        Ok(claims)
    }

    /// Load the user a validated token belongs to.
    pub async fn current_user(&self, claims: &Claims) -> Result<User, AppError> {
        let user_id = claims.user_id()?;

        self.users
            .get_user_by_id(user_id)
            .await?
            .ok_or_else(|| AuthError::UserNotFound.into())
    }

    /// Revoke the token the claims were decoded from.
    pub fn logout(&self, claims: &Claims) {
        self.blacklist.revoke(&claims.jti, claims.exp);
        tracing::info!(user_id = %claims.sub, "User logged out");
    }

    async fn hash(&self, password: &str) -> Result<String, AppError> {
        let password = password.to_string();
        let cost = self.bcrypt_cost;

        tokio::task::spawn_blocking(move || hash_password(&password, cost))
            .await
            .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))?
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        let password = password.to_string();
        let hash = hash.to_string();

        tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(|e| AppError::Internal(format!("Password verification task failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::encode_token;
    use crate::error::ValidationError;
    use crate::models::User;
    use crate::repository::InMemoryUserRepository;
    use chrono::Duration;

    fn jwt_settings() -> JwtSettings {
        JwtSettings {
            secret: "service-test-secret-with-enough-length".to_string(),
            algorithm: "HS256".to_string(),
            access_token_expire_minutes: 30,
            issuer: "test".to_string(),
        }
    }

    fn service_with(repo: InMemoryUserRepository) -> AuthService {
        AuthService::new(Arc::new(repo), TokenBlacklist::new(), jwt_settings(), 4)
    }

    #[tokio::test]
    async fn test_signup_normalizes_and_hashes() {
        let service = service_with(InMemoryUserRepository::new());

        let user = service
            .signup(" Test@Example.com ", "securepassword123")
            .await
            .expect("signup should succeed");

        assert_eq!(user.email, "test@example.com");
        assert_ne!(user.password_hash, "securepassword123");
        assert!(verify_password("securepassword123", &user.password_hash));
        assert!(user.is_active);
    }

    #[tokio::test]
    async fn test_signup_rejects_duplicate_email() {
        let service = service_with(InMemoryUserRepository::new());
        service.signup("test@example.com", "securepassword123").await.unwrap();

        let result = service.signup("TEST@example.com", "anotherpassword").await;
        assert!(matches!(result, Err(AppError::Duplicate(_))));
    }

    #[tokio::test]
    async fn test_signup_validates_input() {
        let service = service_with(InMemoryUserRepository::new());

        let bad_email = service.signup("invalid-email", "securepassword123").await;
        assert!(matches!(bad_email, Err(AppError::Validation(_))));

        let weak = service.signup("test@example.com", "weak").await;
        assert!(matches!(
            weak,
            Err(AppError::Validation(ValidationError::TooShort(_, 8)))
        ));
    }

    #[tokio::test]
    async fn test_login_and_authenticate() {
        let service = service_with(InMemoryUserRepository::new());
        let user = service.signup("test@example.com", "securepassword123").await.unwrap();

        let outcome = service.login("test@example.com", "securepassword123").await.unwrap();
        assert_eq!(outcome.user.id, user.id);

        let claims = service.authenticate(&outcome.token.token).unwrap();
        assert_eq!(claims.user_id().unwrap(), user.id);

        let current = service.current_user(&claims).await.unwrap();
        assert_eq!(current.email, "test@example.com");
    }

    #[tokio::test]
    async fn test_login_rejects_wrong_password_and_unknown_email() {
        let service = service_with(InMemoryUserRepository::new());
        service.signup("test@example.com", "securepassword123").await.unwrap();

        let wrong = service.login("test@example.com", "wrongpassword").await;
        assert!(matches!(wrong, Err(AppError::Auth(AuthError::InvalidCredentials))));

        let unknown = service.login("nobody@example.com", "securepassword123").await;
        assert!(matches!(unknown, Err(AppError::Auth(AuthError::InvalidCredentials))));
    }

    #[tokio::test]
    async fn test_login_rejects_inactive_account() {
        let repo = InMemoryUserRepository::new();
        let mut user = User::from_new(NewUser {
            email: "inactive@example.com".to_string(),
            password_hash: hash_password("securepassword123", 4).unwrap(),
        });
        user.is_active = false;
        repo.insert(user).await.unwrap();

        let service = service_with(repo);
        let result = service.login("inactive@example.com", "securepassword123").await;
        assert!(matches!(result, Err(AppError::Auth(AuthError::AccountInactive))));
    }

    #[tokio::test]
    async fn test_logout_revokes_token() {
        let blacklist = TokenBlacklist::new();
        let service = AuthService::new(
            Arc::new(InMemoryUserRepository::new()),
            blacklist.clone(),
            jwt_settings(),
            4,
        );
        service.signup("test@example.com", "securepassword123").await.unwrap();
        let outcome = service.login("test@example.com", "securepassword123").await.unwrap();

        let claims = service.authenticate(&outcome.token.token).unwrap();
        service.logout(&claims);

        assert_eq!(
            service.authenticate(&outcome.token.token),
            Err(AuthError::TokenRevoked)
        );
        assert!(blacklist.is_revoked(&claims.jti));
    }

    #[tokio::test]
    async fn test_logout_leaves_other_tokens_valid() {
        let service = service_with(InMemoryUserRepository::new());
        service.signup("test@example.com", "securepassword123").await.unwrap();
        let first = service.login("test@example.com", "securepassword123").await.unwrap();
        let second = service.login("test@example.com", "securepassword123").await.unwrap();

        service.logout(&first.token.claims);

        assert!(service.authenticate(&first.token.token).is_err());
        assert!(service.authenticate(&second.token.token).is_ok());
    }

    #[tokio::test]
    async fn test_current_user_for_deleted_account() {
        let service = service_with(InMemoryUserRepository::new());
        let claims = Claims::new(
            uuid::Uuid::new_v4(),
            "ghost@example.com".to_string(),
            Duration::minutes(5),
            "test".to_string(),
        );

        let result = service.current_user(&claims).await;
        assert!(matches!(result, Err(AppError::Auth(AuthError::UserNotFound))));
    }

    #[test]
    fn test_authenticate_rejects_expired_token() {
        let service = service_with(InMemoryUserRepository::new());
        let claims = Claims::new(
            uuid::Uuid::new_v4(),
            "test@example.com".to_string(),
            Duration::minutes(-5),
            "test".to_string(),
        );
        let token = encode_token(&claims, &jwt_settings()).unwrap();

        assert_eq!(service.authenticate(&token), Err(AuthError::TokenExpired));
    }
}
