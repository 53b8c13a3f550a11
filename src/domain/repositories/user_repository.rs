use async_trait::async_trait;

use crate::domain::{
    error::RepositoryError,
    models::user::{NewUser, UserId},
};

/// Storage access for registered users.
#[async_trait]
pub trait UserRepository {
    /// Stores a new row and returns the identifier the storage engine generated for it.
    /// Every call inserts, so the same record saved twice yields two rows.
    async fn insert(&self, user: &NewUser) -> Result<UserId, RepositoryError>;
}
