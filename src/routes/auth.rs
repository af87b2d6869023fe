/// Authentication Routes
///
/// Handles user signup, login, current user information and logout.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::auth::Claims;
use crate::error::AppError;
use crate::models::{SignupResponse, UserResponse, UserSummary};
use crate::service::AuthService;

/// Credentials accepted by signup and login
#[derive(Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

/// Response body for a successful login
#[derive(Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserSummary,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct LogoutResponse {
    pub message: String,
}

/// POST /auth/signup
///
/// Register a new user with email and password.
///
/// # Errors
/// - 400: Validation errors (invalid email, password shorter than 8 characters)
/// - 409: Email already registered
/// - 500: Internal server error
pub async fn signup(
    form: web::Json<CredentialsRequest>,
    auth_service: web::Data<AuthService>,
) -> Result<HttpResponse, AppError> {
    let user = auth_service.signup(&form.email, &form.password).await?;

    Ok(HttpResponse::Created().json(SignupResponse::from(&user)))
}

/// POST /auth/login
///
/// Authenticate with email and password and receive a bearer token.
///
/// # Errors
/// - 400: Validation error (invalid email format)
/// - 401: Invalid credentials (unknown email, wrong password, inactive account)
/// - 500: Internal server error
pub async fn login(
    form: web::Json<CredentialsRequest>,
    auth_service: web::Data<AuthService>,
) -> Result<HttpResponse, AppError> {
    let outcome = auth_service.login(&form.email, &form.password).await?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        access_token: outcome.token.token,
        token_type: "bearer".to_string(),
        expires_in: outcome.token.expires_in,
        user: UserSummary::from(&outcome.user),
    }))
}

/// GET /auth/me
///
/// **Requires a valid bearer token**; claims are injected by `JwtMiddleware`.
///
/// # Errors
/// - 401: Missing, invalid, expired or revoked token (handled by middleware)
/// - 401: The user the token refers to no longer exists
pub async fn get_current_user(
    claims: web::ReqData<Claims>,
    auth_service: web::Data<AuthService>,
) -> Result<HttpResponse, AppError> {
    let user = auth_service.current_user(&claims).await?;

    Ok(HttpResponse::Ok().json(UserResponse::from(&user)))
}

/// POST /auth/logout
///
/// Revokes the presented bearer token. Later requests with it get 401.
pub async fn logout(
    claims: web::ReqData<Claims>,
    auth_service: web::Data<AuthService>,
) -> HttpResponse {
    auth_service.logout(&claims);

    HttpResponse::Ok().json(LogoutResponse {
        message: "Logged out successfully".to_string(),
    })
}
