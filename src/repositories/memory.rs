//! Process-local stores. Used by the test suite and by `STORAGE_BACKEND=memory`.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
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
    repositories::store::{
        CategoryRepository, Database, EmailLogRepository, NotificationRepository,
        OwnedRepository, UserRepository,
    },
};

/// Names and ids of the shared categories, matching `sql/schema.sql`.
const DEFAULT_CATEGORIES: [(u128, &str); 3] = [
    (0x00000000_0000_4000_8000_000000000001, "General"),
    (0x00000000_0000_4000_8000_000000000002, "Personal"),
    (0x00000000_0000_4000_8000_000000000003, "Work"),
];

/// Rows of one owned resource, in insertion order.
pub struct MemoryTable<R> {
    rows: Mutex<Vec<R>>,
}

impl<R> Default for MemoryTable<R> {
    fn default() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl<R: Resource> OwnedRepository<R> for MemoryTable<R> {
    async fn list_owned(&self, owner_id: Uuid) -> Result<Vec<R>> {
        let rows = self.rows.lock().await;
        Ok(rows
            .iter()
            .rev()
            .filter(|row| row.owner_id() == owner_id)
            .cloned()
            .collect())
    }

    async fn find_owned(&self, owner_id: Uuid, id: Uuid) -> Result<Option<R>> {
        let rows = self.rows.lock().await;
        Ok(rows
            .iter()
            .find(|row| row.id() == id && row.owner_id() == owner_id)
            .cloned())
    }

    async fn insert_owned(&self, owner_id: Uuid, input: R::Input) -> Result<R> {
        let record = R::build(Uuid::new_v4(), owner_id, input, Utc::now());
        self.rows.lock().await.push(record.clone());
        Ok(record)
    }

    async fn update_owned(&self, owner_id: Uuid, id: Uuid, input: R::Input) -> Result<Option<R>> {
        let mut rows = self.rows.lock().await;
        match rows
            .iter_mut()
            .find(|row| row.id() == id && row.owner_id() == owner_id)
        {
            Some(row) => {
                row.apply(input, Utc::now());
                Ok(Some(row.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_owned(&self, owner_id: Uuid, id: Uuid) -> Result<bool> {
        let mut rows = self.rows.lock().await;
        let before = rows.len();
        rows.retain(|row| !(row.id() == id && row.owner_id() == owner_id));
        Ok(rows.len() != before)
    }

    async fn count_owned(&self, owner_id: Uuid) -> Result<i64> {
        let rows = self.rows.lock().await;
        Ok(rows.iter().filter(|row| row.owner_id() == owner_id).count() as i64)
    }
}

#[derive(Default)]
struct Users {
    rows: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for Users {
    async fn create_user(&self, new_user: NewUser) -> Result<User> {
        let mut rows = self.rows.lock().await;
        if rows.iter().any(|user| user.email == new_user.email) {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: new_user.email,
            name: new_user.name,
            password_hash: new_user.password_hash,
            email_verified: false,
            image: None,
            roles: new_user.roles,
            created_at: now,
            updated_at: now,
        };
        rows.push(user.clone());
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let rows = self.rows.lock().await;
        Ok(rows.iter().find(|user| user.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let rows = self.rows.lock().await;
        Ok(rows.iter().find(|user| user.id == id).cloned())
    }

    /// Oldest first, like the PostgreSQL store.
    async fn list_users(&self) -> Result<Vec<User>> {
        let mut users = self.rows.lock().await.clone();
        users.sort_by_key(|user| user.created_at);
        Ok(users)
    }

    async fn set_user_roles(&self, id: Uuid, roles: &[Role]) -> Result<Option<User>> {
        let mut rows = self.rows.lock().await;
        match rows.iter_mut().find(|user| user.id == id) {
            Some(user) => {
                user.roles = roles.to_vec();
                user.updated_at = Utc::now();
                Ok(Some(user.clone()))
            }
            None => Ok(None),
        }
    }
}

struct Categories {
    rows: Mutex<Vec<Category>>,
}

impl Default for Categories {
    fn default() -> Self {
        let now = Utc::now();
        let defaults = DEFAULT_CATEGORIES
            .iter()
            .map(|(id, name)| Category {
                id: Uuid::from_u128(*id),
                owner_id: None,
                name: name.to_string(),
                is_default: true,
                created_at: now,
            })
            .collect();
        Self {
            rows: Mutex::new(defaults),
        }
    }
}

#[async_trait]
impl CategoryRepository for Categories {
    async fn list_default_categories(&self) -> Result<Vec<Category>> {
        let rows = self.rows.lock().await;
        let mut defaults: Vec<Category> = rows.iter().filter(|c| c.is_default).cloned().collect();
        defaults.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(defaults)
    }

    async fn list_user_categories(&self, owner_id: Uuid) -> Result<Vec<Category>> {
        let rows = self.rows.lock().await;
        let mut own: Vec<Category> = rows
            .iter()
            .filter(|c| !c.is_default && c.owner_id == Some(owner_id))
            .cloned()
            .collect();
        own.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(own)
    }

    async fn insert_category(&self, owner_id: Uuid, name: String) -> Result<Category> {
        let category = Category {
            id: Uuid::new_v4(),
            owner_id: Some(owner_id),
            name,
            is_default: false,
            created_at: Utc::now(),
        };
        self.rows.lock().await.push(category.clone());
        Ok(category)
    }

    async fn delete_user_category(&self, owner_id: Uuid, id: Uuid) -> Result<bool> {
        let mut rows = self.rows.lock().await;
        let before = rows.len();
        rows.retain(|c| !(c.id == id && !c.is_default && c.owner_id == Some(owner_id)));
        Ok(rows.len() != before)
    }
}

#[derive(Default)]
struct Notifications {
    rows: Mutex<Vec<Notification>>,
}

#[async_trait]
impl NotificationRepository for Notifications {
    async fn list_notifications(&self, user_id: Uuid) -> Result<Vec<Notification>> {
        let rows = self.rows.lock().await;
        Ok(rows.iter().rev().filter(|n| n.user_id == user_id).cloned().collect())
    }

    async fn insert_notification(&self, new: NewNotification) -> Result<Notification> {
        let notification = Notification {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            title: new.title,
            message: new.message,
            is_read: false,
            created_at: Utc::now(),
        };
        self.rows.lock().await.push(notification.clone());
        Ok(notification)
    }

    async fn mark_notification_read(&self, user_id: Uuid, id: Uuid) -> Result<bool> {
        let mut rows = self.rows.lock().await;
        match rows.iter_mut().find(|n| n.id == id && n.user_id == user_id) {
            Some(notification) => {
                notification.is_read = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn mark_all_notifications_read(&self, user_id: Uuid) -> Result<u64> {
        let mut rows = self.rows.lock().await;
        let mut updated = 0;
        for notification in rows.iter_mut().filter(|n| n.user_id == user_id && !n.is_read) {
            notification.is_read = true;
            updated += 1;
        }
        Ok(updated)
    }

    async fn delete_notification(&self, user_id: Uuid, id: Uuid) -> Result<bool> {
        let mut rows = self.rows.lock().await;
        let before = rows.len();
        rows.retain(|n| !(n.id == id && n.user_id == user_id));
        Ok(rows.len() != before)
    }

    async fn count_unread_notifications(&self, user_id: Uuid) -> Result<i64> {
        let rows = self.rows.lock().await;
        Ok(rows.iter().filter(|n| n.user_id == user_id && !n.is_read).count() as i64)
    }
}

#[derive(Default)]
struct EmailLogs {
    logs: Mutex<Vec<EmailLog>>,
    reads: Mutex<HashMap<Uuid, Vec<EmailLogRead>>>,
}

#[async_trait]
impl EmailLogRepository for EmailLogs {
    async fn insert_email_log(&self, owner_id: Uuid, input: EmailLogInput) -> Result<EmailLog> {
        let log = EmailLog {
            id: Uuid::new_v4(),
            owner_id,
            recipient: input.recipient,
            subject: input.subject,
            sent_at: Utc::now(),
        };
        self.logs.lock().await.push(log.clone());
        Ok(log)
    }

    async fn list_email_logs(&self, owner_id: Uuid) -> Result<Vec<EmailLogSummary>> {
        let logs = self.logs.lock().await;
        let reads = self.reads.lock().await;
        Ok(logs
            .iter()
            .rev()
            .filter(|log| log.owner_id == owner_id)
            .map(|log| EmailLogSummary {
                log: log.clone(),
                read_count: reads.get(&log.id).map_or(0, |r| r.len() as i64),
            })
            .collect())
    }

    async fn find_owned_email_log(&self, owner_id: Uuid, id: Uuid) -> Result<Option<EmailLog>> {
        let logs = self.logs.lock().await;
        Ok(logs
            .iter()
            .find(|log| log.id == id && log.owner_id == owner_id)
            .cloned())
    }

    async fn find_email_log(&self, id: Uuid) -> Result<Option<EmailLog>> {
        let logs = self.logs.lock().await;
        Ok(logs.iter().find(|log| log.id == id).cloned())
    }

    async fn insert_email_log_read(&self, read: NewEmailLogRead) -> Result<EmailLogRead> {
        let row = EmailLogRead {
            id: Uuid::new_v4(),
            email_log_id: read.email_log_id,
            ip_address: read.ip_address,
            browser: read.browser,
            operating_system: read.operating_system,
            read_at: read.read_at,
        };
        self.reads
            .lock()
            .await
            .entry(row.email_log_id)
            .or_default()
            .push(row.clone());
        Ok(row)
    }

    async fn list_email_log_reads(&self, email_log_id: Uuid) -> Result<Vec<EmailLogRead>> {
        let reads = self.reads.lock().await;
        Ok(reads
            .get(&email_log_id)
            .map(|r| r.iter().rev().cloned().collect())
            .unwrap_or_default())
    }
}

/// In-memory implementation of every repository.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    users: Users,
    projects: MemoryTable<Project>,
    contacts: MemoryTable<Contact>,
    accounts: MemoryTable<Account>,
    notes: MemoryTable<Note>,
    categories: Categories,
    notifications: Notifications,
    email_logs: EmailLogs,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Database for MemoryStore {
    fn users(&self) -> &dyn UserRepository {
        &self.inner.users
    }

    fn projects(&self) -> &dyn OwnedRepository<Project> {
        &self.inner.projects
    }

    fn contacts(&self) -> &dyn OwnedRepository<Contact> {
        &self.inner.contacts
    }

    fn accounts(&self) -> &dyn OwnedRepository<Account> {
        &self.inner.accounts
    }

    fn notes(&self) -> &dyn OwnedRepository<Note> {
        &self.inner.notes
    }

    fn categories(&self) -> &dyn CategoryRepository {
        &self.inner.categories
    }

    fn notifications(&self) -> &dyn NotificationRepository {
        &self.inner.notifications
    }

    fn email_logs(&self) -> &dyn EmailLogRepository {
        &self.inner.email_logs
    }
}
