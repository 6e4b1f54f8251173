use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use userdesk_shared::user::{Role, State};
use userdesk_shared::{fold_name, initial_key};

use crate::store::{UpdateInput, UserRecord, UserStore};

/// In-memory [`UserStore`] with the same observable behavior as
/// [`SqliteStore`](crate::SqliteStore). Useful for tests and for embedding
/// the engine without a database.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<String, UserRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> userdesk_shared::Result<RwLockReadGuard<'_, HashMap<String, UserRecord>>> {
        let Ok(guard) = self.users.read() else {
            userdesk_shared::bail!("user store lock poisoned");
        };

        Ok(guard)
    }

    fn write(&self) -> userdesk_shared::Result<RwLockWriteGuard<'_, HashMap<String, UserRecord>>> {
        let Ok(guard) = self.users.write() else {
            userdesk_shared::bail!("user store lock poisoned");
        };

        Ok(guard)
    }
}

fn by_display_name(a: &UserRecord, b: &UserRecord) -> std::cmp::Ordering {
    let a_key = a.name_folded.as_deref().unwrap_or(&a.email);
    let b_key = b.name_folded.as_deref().unwrap_or(&b.email);

    a_key.cmp(b_key)
}

#[async_trait::async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: &str) -> userdesk_shared::Result<Option<UserRecord>> {
        Ok(self.read()?.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> userdesk_shared::Result<Option<UserRecord>> {
        Ok(self
            .read()?
            .values()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn exists_with_role(&self, role: Role) -> userdesk_shared::Result<bool> {
        Ok(self.read()?.values().any(|user| user.role == role))
    }

    async fn count_active(
        &self,
        roles: &[Role],
        excluding_id: &str,
    ) -> userdesk_shared::Result<u64> {
        Ok(self
            .read()?
            .values()
            .filter(|user| {
                user.id != excluding_id
                    && user.state == State::Active
                    && roles.contains(&user.role)
            })
            .count() as u64)
    }

    async fn insert(&self, user: &UserRecord) -> userdesk_shared::Result<()> {
        self.write()?.insert(user.id.to_owned(), user.to_owned());

        Ok(())
    }

    async fn update(&self, input: UpdateInput) -> userdesk_shared::Result<()> {
        let mut users = self.write()?;
        // matches the sql store: updating an unknown id touches nothing
        let Some(user) = users.get_mut(&input.id) else {
            return Ok(());
        };

        if let Some(name) = input.name {
            user.name_folded = Some(fold_name(&name));
            user.initials = Some(initial_key(&name));
            user.name = Some(name);
        }

        if let Some(password) = input.password {
            user.password = password;
        }

        if let Some(role) = input.role {
            user.role = role;
        }

        if let Some(state) = input.state {
            user.state = state;
        }

        Ok(())
    }

    async fn find_by_email_prefix(
        &self,
        prefix: &str,
        limit: u64,
    ) -> userdesk_shared::Result<Vec<UserRecord>> {
        let mut matches: Vec<_> = self
            .read()?
            .values()
            .filter(|user| user.email.starts_with(prefix))
            .cloned()
            .collect();

        matches.sort_by(|a, b| a.email.cmp(&b.email));
        matches.truncate(limit as usize);

        Ok(matches)
    }

    async fn list_recent(&self, limit: u64) -> userdesk_shared::Result<Vec<UserRecord>> {
        let mut users: Vec<_> = self.read()?.values().cloned().collect();
        users.sort_by(|a, b| (b.created_at, &b.id).cmp(&(a.created_at, &a.id)));
        users.truncate(limit as usize);

        Ok(users)
    }

    async fn list_by_name(&self, limit: u64) -> userdesk_shared::Result<Vec<UserRecord>> {
        let mut users: Vec<_> = self.read()?.values().cloned().collect();
        users.sort_by(by_display_name);
        users.truncate(limit as usize);

        Ok(users)
    }
}
