use async_trait::async_trait;
use sea_orm::{ActiveValue::Set, DatabaseConnection, EntityTrait};

use crate::domain::{
    error::RepositoryError,
    models::user::{NewUser, UserId},
    repositories::user_repository::UserRepository,
};
use crate::entity::users;

#[derive(Clone)]
pub struct SqlUserRepository {
    db: DatabaseConnection,
}

impl SqlUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for SqlUserRepository {
    async fn insert(&self, user: &NewUser) -> Result<UserId, RepositoryError> {
        // id stays NotSet so the engine generates it
        let user_model = users::ActiveModel {
            username: Set(user.username().to_string()),
            email: Set(user.email().to_string()),
            password: Set(user.password().to_string()),
            ..Default::default()
        };

        let insert_result = users::Entity::insert(user_model)
            .exec(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        tracing::debug!(user_id = insert_result.last_insert_id, "users row inserted");
        Ok(UserId::new(insert_result.last_insert_id))
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{ConnectOptions, Database, PaginatorTrait};

    use super::*;
    use crate::{domain::models::user::UserDraft, infrastructure::schema::ensure_schema};

    async fn memory_db() -> DatabaseConnection {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).min_connections(1).sqlx_logging(false);
        Database::connect(opt).await.unwrap()
    }

    fn new_user() -> NewUser {
        UserDraft::new("validUser", "a@b.com", "Abcdef1")
            .validate()
            .unwrap()
    }

    #[tokio::test]
    async fn insert_stores_row_with_generated_id() {
        let db = memory_db().await;
        ensure_schema(&db).await.unwrap();
        let repository = SqlUserRepository::new(db.clone());

        let id = repository.insert(&new_user()).await.unwrap();

        let row = users::Entity::find_by_id(id.value())
            .one(&db)
            .await
            .unwrap()
            .expect("inserted row");
        assert_eq!(row.username, "validUser");
        assert_eq!(row.email, "a@b.com");
        assert_eq!(row.password, "Abcdef1");
    }

    #[tokio::test]
    async fn same_user_inserted_twice_creates_two_rows() {
        let db = memory_db().await;
        ensure_schema(&db).await.unwrap();
        let repository = SqlUserRepository::new(db.clone());
        let user = new_user();

        let first = repository.insert(&user).await.unwrap();
        let second = repository.insert(&user).await.unwrap();

        assert_ne!(first, second);
        assert_eq!(users::Entity::find().count(&db).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn storage_failure_is_reported() {
        // no schema: the insert hits a missing table
        let repository = SqlUserRepository::new(memory_db().await);

        let result = repository.insert(&new_user()).await;

        assert!(matches!(result, Err(RepositoryError::DatabaseError(_))));
    }
}
