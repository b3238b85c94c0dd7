use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    models::user::{Role, UserSummary},
    repositories::store::Database,
};

pub async fn list_users(db: &dyn Database) -> Result<Vec<UserSummary>> {
    let users = db.users().list_users().await?;
    Ok(users.iter().map(UserSummary::from).collect())
}

/// Replaces a user's roles. Duplicates are dropped, order is kept.
pub async fn set_roles(
    db: &dyn Database,
    acting_admin: Uuid,
    user_id: Uuid,
    roles: Vec<Role>,
) -> Result<UserSummary> {
    let mut unique: Vec<Role> = Vec::with_capacity(roles.len());
    for role in roles {
        if !unique.contains(&role) {
            unique.push(role);
        }
    }

    if acting_admin == user_id && !unique.contains(&Role::Admin) {
        return Err(AppError::Validation(
            "Administrators cannot remove their own ADMIN role".to_string(),
        ));
    }

    let user = db
        .users()
        .set_user_roles(user_id, &unique)
        .await?
        .ok_or(AppError::NotFound)?;

    tracing::info!("🛡️ Roles of {} set to {:?} by {}", user.id, user.roles, acting_admin);
    Ok(UserSummary::from(&user))
}
