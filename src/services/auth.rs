//! Registration and login over the repository contract.

use std::sync::Arc;

use thiserror::Error;

use crate::models::{DomainError, User};
use crate::repository::CatalogueRepository;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Validation failed: {0}")]
    Validation(#[from] DomainError),

    #[error("Repository error: {0}")]
    Repository(String),
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Repository(err.to_string())
    }
}

pub struct AuthService {
    repo: Arc<dyn CatalogueRepository>,
}

impl AuthService {
    #[must_use]
    pub fn new(repo: Arc<dyn CatalogueRepository>) -> Self {
        Self { repo }
    }

    pub async fn user_registered(&self, username: &str) -> Result<bool, AuthError> {
        Ok(self.repo.get_user(username).await?.is_some())
    }

    /// Registers an account under the next free user id. Registering a
    /// username that already exists leaves the original account untouched
    /// and reports success, so seeding stays idempotent.
    pub async fn register(&self, username: &str, password: &str) -> Result<(), AuthError> {
        let user_count = self.repo.get_users().await?.len();
        let next_id = i32::try_from(user_count).unwrap_or(i32::MAX - 1) + 1;
        let user = User::new(next_id, username, password)?;
        self.repo.add_user(user).await?;
        Ok(())
    }

    /// Plain credential comparison; password handling beyond storage is the
    /// outer layer's concern.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let user = self
            .repo
            .get_user(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;
        if user.password() == password {
            Ok(user)
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }

    pub async fn get_user(&self, username: &str) -> Result<Option<User>, AuthError> {
        Ok(self.repo.get_user(username).await?)
    }
}
