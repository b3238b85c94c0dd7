use garde::Validate;
use serde::Deserialize;

use crate::{
    crypto::password::{hash_password, verify_password},
    error::{AppError, Result},
    models::user::{NewUser, Role, User},
    repositories::store::Database,
    validation::input::normalize_email,
};

/// The request payload for user registration.
#[derive(Deserialize, Validate)]
pub struct RegisterInput {
    #[garde(email)]
    pub email: String,
    #[garde(length(min = 1, max = 100))]
    pub name: String,
    #[garde(length(min = 8, max = 128))]
    pub password: String,
}

/// The request payload for user login.
#[derive(Deserialize, Validate)]
pub struct LoginInput {
    #[garde(length(min = 1, max = 320))]
    pub email: String,
    #[garde(length(min = 1, max = 128))]
    pub password: String,
}

impl RegisterInput {
    /// Normalizes the email and trims the name before validation.
    pub fn normalized(self) -> Self {
        Self {
            email: normalize_email(&self.email),
            name: self.name.trim().to_string(),
            password: self.password,
        }
    }
}

/// Creates a new user holding the `USER` role.
///
/// # Arguments
///
/// * `db` - The database handle.
/// * `input` - Validated registration payload.
///
/// # Returns
///
/// A `Result` containing the created `User`.
pub async fn create_user(db: &dyn Database, input: RegisterInput) -> Result<User> {
    tracing::debug!("🔐 Creating user: {}", input.email);
    let password_hash = hash_password(&input.password)?;

    let user = db
        .users()
        .create_user(NewUser {
            email: input.email,
            name: input.name,
            password_hash,
            roles: vec![Role::User],
        })
        .await?;

    tracing::info!("✅ User created with ID: {}", user.id);
    Ok(user)
}

/// Authenticates a user by email and password.
///
/// Unknown emails and wrong passwords produce the same error.
pub async fn authenticate_user(db: &dyn Database, input: LoginInput) -> Result<User> {
    let email = normalize_email(&input.email);
    tracing::debug!("🔐 Authenticating user: {}", email);

    let user = db
        .users()
        .find_user_by_email(&email)
        .await?
        .ok_or_else(|| AppError::Authentication("Invalid email or password".to_string()))?;

    if !verify_password(&input.password, &user.password_hash)? {
        return Err(AppError::Authentication(
            "Invalid email or password".to_string(),
        ));
    }

    tracing::info!("✅ User authenticated: {}", user.id);
    Ok(user)
}
