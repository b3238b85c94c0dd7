use deadpool_postgres::Pool;

use crate::models::{account::Account, contact::Contact, note::Note, project::Project};
use crate::repositories::store::{
    CategoryRepository, Database, EmailLogRepository, NotificationRepository, OwnedRepository,
    UserRepository,
};

/// PostgreSQL-backed store. The repository impls live next to their concern
/// (`user.rs`, `resource.rs`, `category.rs`, ...).
#[derive(Clone)]
pub struct PgStore {
    pub(crate) pool: Pool,
}

impl PgStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

impl Database for PgStore {
    fn users(&self) -> &dyn UserRepository {
        self
    }

    fn projects(&self) -> &dyn OwnedRepository<Project> {
        self
    }

    fn contacts(&self) -> &dyn OwnedRepository<Contact> {
        self
    }

    fn accounts(&self) -> &dyn OwnedRepository<Account> {
        self
    }

    fn notes(&self) -> &dyn OwnedRepository<Note> {
        self
    }

    fn categories(&self) -> &dyn CategoryRepository {
        self
    }

    fn notifications(&self) -> &dyn NotificationRepository {
        self
    }

    fn email_logs(&self) -> &dyn EmailLogRepository {
        self
    }
}
