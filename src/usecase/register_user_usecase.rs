use crate::domain::{
    error::DomainError,
    models::user::{NewUser, User},
    repositories::user_repository::UserRepository,
};

/// Persists validated registrations. Validation happens before a `NewUser` exists,
/// so this only hands the record to storage.
pub struct RegisterUserUsecase<R: UserRepository> {
    user_repository: R,
}

impl<R: UserRepository> RegisterUserUsecase<R> {
    pub fn new(user_repository: R) -> Self {
        Self { user_repository }
    }

    pub async fn save_user(&self, user: NewUser) -> Result<User, DomainError>
    where
        R: Send + Sync,
    {
        let id = self.user_repository.insert(&user).await?;
        Ok(user.into_persisted(id))
    }
}
