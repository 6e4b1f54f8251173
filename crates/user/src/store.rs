use async_trait::async_trait;

use userdesk_shared::user::{Role, State};

/// A user row as the store holds it. The `password` field is the argon2
/// hash and never crosses into search summaries.
#[derive(Clone, Debug)]
pub struct UserRecord {
    pub id: String,
    /// Stored normalized: trimmed, lower-cased. Unique.
    pub email: String,
    pub name: Option<String>,
    /// Case-folded `name`, kept in sync by the store on every name write.
    pub name_folded: Option<String>,
    /// Initial key of `name` (first letter per word, Hangul choseong).
    pub initials: Option<String>,
    pub role: Role,
    pub state: State,
    pub password: String,
    pub created_at: i64,
}

pub struct UpdateInput {
    pub id: String,
    pub name: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
    pub state: Option<State>,
}

/// Storage contract the engine is written against. Implementations must
/// keep `name_folded` and `initials` derived from `name` on update.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: &str) -> userdesk_shared::Result<Option<UserRecord>>;

    /// Lookup by normalized email. Callers normalize before calling.
    async fn find_by_email(&self, email: &str) -> userdesk_shared::Result<Option<UserRecord>>;

    async fn exists_with_role(&self, role: Role) -> userdesk_shared::Result<bool>;

    /// Count of active users holding one of `roles`, excluding `excluding_id`.
    /// The aggregate behind the last-admin guard.
    async fn count_active(
        &self,
        roles: &[Role],
        excluding_id: &str,
    ) -> userdesk_shared::Result<u64>;

    async fn insert(&self, user: &UserRecord) -> userdesk_shared::Result<()>;

    async fn update(&self, input: UpdateInput) -> userdesk_shared::Result<()>;

    /// Index-backed prefix match on normalized email.
    async fn find_by_email_prefix(
        &self,
        prefix: &str,
        limit: u64,
    ) -> userdesk_shared::Result<Vec<UserRecord>>;

    /// Most recently created users, newest first. The bounded window the
    /// search fallback scans instead of the whole table.
    async fn list_recent(&self, limit: u64) -> userdesk_shared::Result<Vec<UserRecord>>;

    /// First page of users ordered by display name (email for name-less rows).
    async fn list_by_name(&self, limit: u64) -> userdesk_shared::Result<Vec<UserRecord>>;
}
