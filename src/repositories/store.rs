//! Repository traits shared by the PostgreSQL and in-memory stores.

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::Result,
    models::{
        account::Account,
        category::Category,
        contact::Contact,
        email_log::{EmailLog, EmailLogInput, EmailLogRead, EmailLogSummary, NewEmailLogRead},
        note::Note,
        notification::{NewNotification, Notification},
        project::Project,
        resource::Resource,
        user::{NewUser, Role, User},
    },
};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a user. A taken email yields `AppError::Conflict`.
    async fn create_user(&self, new_user: NewUser) -> Result<User>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>>;
    async fn list_users(&self) -> Result<Vec<User>>;
    async fn set_user_roles(&self, id: Uuid, roles: &[Role]) -> Result<Option<User>>;
}

/// CRUD over rows owned by a single user. Every method is scoped by `owner_id`.
#[async_trait]
pub trait OwnedRepository<R: Resource>: Send + Sync {
    /// Newest first.
    async fn list_owned(&self, owner_id: Uuid) -> Result<Vec<R>>;
    async fn find_owned(&self, owner_id: Uuid, id: Uuid) -> Result<Option<R>>;
    async fn insert_owned(&self, owner_id: Uuid, input: R::Input) -> Result<R>;
    async fn update_owned(&self, owner_id: Uuid, id: Uuid, input: R::Input) -> Result<Option<R>>;
    async fn delete_owned(&self, owner_id: Uuid, id: Uuid) -> Result<bool>;
    async fn count_owned(&self, owner_id: Uuid) -> Result<i64>;
}

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Shared categories, ordered by name.
    async fn list_default_categories(&self) -> Result<Vec<Category>>;
    /// The user's own categories, ordered by name.
    async fn list_user_categories(&self, owner_id: Uuid) -> Result<Vec<Category>>;
    async fn insert_category(&self, owner_id: Uuid, name: String) -> Result<Category>;
    /// Deletes one of the user's categories. Defaults are never matched.
    async fn delete_user_category(&self, owner_id: Uuid, id: Uuid) -> Result<bool>;
}

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Newest first.
    async fn list_notifications(&self, user_id: Uuid) -> Result<Vec<Notification>>;
    async fn insert_notification(&self, new: NewNotification) -> Result<Notification>;
    async fn mark_notification_read(&self, user_id: Uuid, id: Uuid) -> Result<bool>;
    async fn mark_all_notifications_read(&self, user_id: Uuid) -> Result<u64>;
    async fn delete_notification(&self, user_id: Uuid, id: Uuid) -> Result<bool>;
    async fn count_unread_notifications(&self, user_id: Uuid) -> Result<i64>;
}

#[async_trait]
pub trait EmailLogRepository: Send + Sync {
    async fn insert_email_log(&self, owner_id: Uuid, input: EmailLogInput) -> Result<EmailLog>;
    /// Newest first, with open counts.
    async fn list_email_logs(&self, owner_id: Uuid) -> Result<Vec<EmailLogSummary>>;
    async fn find_owned_email_log(&self, owner_id: Uuid, id: Uuid) -> Result<Option<EmailLog>>;
    /// Unscoped lookup used by the tracking pixel.
    async fn find_email_log(&self, id: Uuid) -> Result<Option<EmailLog>>;
    /// Appends an open event. Never merges with earlier events.
    async fn insert_email_log_read(&self, read: NewEmailLogRead) -> Result<EmailLogRead>;
    /// Newest first.
    async fn list_email_log_reads(&self, email_log_id: Uuid) -> Result<Vec<EmailLogRead>>;
}

/// Every repository the application needs, behind one handle.
pub trait Database: Send + Sync {
    fn users(&self) -> &dyn UserRepository;
    fn projects(&self) -> &dyn OwnedRepository<Project>;
    fn contacts(&self) -> &dyn OwnedRepository<Contact>;
    fn accounts(&self) -> &dyn OwnedRepository<Account>;
    fn notes(&self) -> &dyn OwnedRepository<Note>;
    fn categories(&self) -> &dyn CategoryRepository;
    fn notifications(&self) -> &dyn NotificationRepository;
    fn email_logs(&self) -> &dyn EmailLogRepository;
}

/// Picks the repository of an owned resource out of a `Database`.
pub trait StoredResource: Resource {
    fn repository(db: &dyn Database) -> &dyn OwnedRepository<Self>;
}

impl StoredResource for Project {
    fn repository(db: &dyn Database) -> &dyn OwnedRepository<Self> {
        db.projects()
    }
}

impl StoredResource for Contact {
    fn repository(db: &dyn Database) -> &dyn OwnedRepository<Self> {
        db.contacts()
    }
}

impl StoredResource for Account {
    fn repository(db: &dyn Database) -> &dyn OwnedRepository<Self> {
        db.accounts()
    }
}

impl StoredResource for Note {
    fn repository(db: &dyn Database) -> &dyn OwnedRepository<Self> {
        db.notes()
    }
}
