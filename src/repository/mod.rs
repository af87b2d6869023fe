/// User persistence
///
/// `UserRepository` is the seam between the auth service and storage.
/// `PgUserRepository` is the production implementation; `InMemoryUserRepository`
/// backs the tests and the debug-mode fallback when Postgres is unreachable.

mod memory;
mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::DatabaseError;
use crate::models::{NewUser, User};

pub use memory::InMemoryUserRepository;
pub use postgres::PgUserRepository;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new active user.
    ///
    /// # Errors
    /// `DatabaseError::UniqueConstraintViolation` if the email is taken.
    async fn create_user(&self, new_user: NewUser) -> Result<User, DatabaseError>;

    /// Look up a user by normalized email
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;

    async fn get_user_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError>;

    async fn user_exists(&self, email: &str) -> Result<bool, DatabaseError> {
        Ok(self.get_user_by_email(email).await?.is_some())
    }
}
