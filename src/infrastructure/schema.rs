use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, Schema};

use crate::entity::users;

/// Creates the `users` table from its entity definition unless it already exists.
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut statement = schema.create_table_from_entity(users::Entity);
    statement.if_not_exists();
    db.execute(backend.build(&statement)).await?;

    tracing::debug!(?backend, "users table ensured");
    Ok(())
}
