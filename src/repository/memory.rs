use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::UserRepository;
use crate::error::DatabaseError;
use crate::models::{NewUser, User};

/// Process-local `UserRepository` keyed by user id
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }

    /// Store a user as-is. Lets tests seed rows such as inactive accounts.
    pub async fn insert(&self, user: User) -> Result<User, DatabaseError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(DatabaseError::UniqueConstraintViolation(format!(
                "users_email_key: {}",
                user.email
            )));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create_user(&self, new_user: NewUser) -> Result<User, DatabaseError> {
        self.insert(User::from_new(new_user)).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn get_user_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            password_hash: "$2b$04$not-a-real-hash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create_user(new_user("a@example.com")).await.unwrap();

        let by_id = repo.get_user_by_id(created.id).await.unwrap();
        assert_eq!(by_id.map(|u| u.email), Some("a@example.com".to_string()));

        let by_email = repo.get_user_by_email("a@example.com").await.unwrap();
        assert_eq!(by_email.map(|u| u.id), Some(created.id));
    }

    #[tokio::test]
    async fn test_email_uniqueness() {
        let repo = InMemoryUserRepository::new();
        repo.create_user(new_user("a@example.com")).await.unwrap();

        let result = repo.create_user(new_user("a@example.com")).await;
        assert!(matches!(result, Err(DatabaseError::UniqueConstraintViolation(_))));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_user_exists_default_method() {
        let repo = InMemoryUserRepository::new();
        assert!(!repo.user_exists("a@example.com").await.unwrap());

        repo.create_user(new_user("a@example.com")).await.unwrap();
        assert!(repo.user_exists("a@example.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_missing_user_returns_none() {
        let repo = InMemoryUserRepository::new();
        assert!(repo.is_empty().await);
        assert!(repo.get_user_by_id(Uuid::new_v4()).await.unwrap().is_none());
        assert!(repo.get_user_by_email("ghost@example.com").await.unwrap().is_none());
    }
}
