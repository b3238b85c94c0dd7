use async_trait::async_trait;
use tokio_postgres::{error::SqlState, Row};
use uuid::Uuid;
use crate::{
    db::column,
    error::{AppError, Result},
    models::user::{NewUser, Role, User},
    repositories::{postgres::PgStore, store::UserRepository},
};

/// A helper function to map a `tokio_postgres::Row` to a `User`.
fn row_to_user(row: &Row) -> Result<User> {
    Ok(User {
        id: column(row, "id")?,
        email: column(row, "email")?,
        name: column(row, "name")?,
        password_hash: column(row, "password_hash")?,
        email_verified: column(row, "email_verified")?,
        image: column(row, "image")?,
        roles: column(row, "roles")?,
        created_at: column(row, "created_at")?,
        updated_at: column(row, "updated_at")?,
    })
}

fn is_unique_violation(err: &tokio_postgres::Error) -> bool {
    err.code() == Some(&SqlState::UNIQUE_VIOLATION)
}

#[async_trait]
impl UserRepository for PgStore {
    /// Creates a new user in the database.
    async fn create_user(&self, new_user: NewUser) -> Result<User> {
        let client = self.pool.get().await?;
        let id = Uuid::new_v4();
        let row = client
            .query_one(
                r#"
                INSERT INTO users (id, email, name, password_hash, roles)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING *
                "#,
                &[&id, &new_user.email, &new_user.name, &new_user.password_hash, &new_user.roles],
            )
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::Conflict("Email already registered".to_string())
                } else {
                    AppError::Database(e)
                }
            })?;
        row_to_user(&row)
    }

    /// Finds a user by their email address.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let client = self.pool.get().await?;
        let row = client
            .query_opt("SELECT * FROM users WHERE email = $1", &[&email])
            .await?;
        row.map(|r| row_to_user(&r)).transpose()
    }

    /// Finds a user by their ID.
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let client = self.pool.get().await?;
        let row = client
            .query_opt("SELECT * FROM users WHERE id = $1", &[&id])
            .await?;
        row.map(|r| row_to_user(&r)).transpose()
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let client = self.pool.get().await?;
        let rows = client
            .query("SELECT * FROM users ORDER BY created_at ASC", &[])
            .await?;
        rows.iter().map(row_to_user).collect()
    }

    /// Replaces a user's roles.
    async fn set_user_roles(&self, id: Uuid, roles: &[Role]) -> Result<Option<User>> {
        let client = self.pool.get().await?;
        let roles = roles.to_vec();
        let row = client
            .query_opt(
                r#"
                UPDATE users
                SET roles = $1, updated_at = NOW()
                WHERE id = $2
                RETURNING *
                "#,
                &[&roles, &id],
            )
            .await?;
        row.map(|r| row_to_user(&r)).transpose()
    }
}
