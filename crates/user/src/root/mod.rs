use std::sync::Arc;

use crate::policy::Rejection;
use crate::store::{UserRecord, UserStore};

mod login;
mod register;
mod set_active;
mod set_role;

pub use register::RegisterInput;

/// Write side of the engine: registration, role changes, activation.
/// Takes its store at construction so callers can substitute
/// [`MemoryStore`](crate::MemoryStore) for the sql-backed one.
///
/// Every mutation runs its check-then-write sequence under `write_lock`.
/// The activation checks read rows other than the target (the last-admin
/// count), so per-target locking is not enough: two cross-deactivations
/// could each pass the count before either write lands. One `Command` is
/// constructed per store -- the single logical writer.
pub struct Command<S: UserStore> {
    pub(crate) store: Arc<S>,
    pub(crate) write_lock: tokio::sync::Mutex<()>,
}

impl<S: UserStore> Command<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    pub async fn load(&self, id: impl Into<String>) -> userdesk_shared::Result<Option<UserRecord>> {
        self.store.find_by_id(&id.into()).await
    }
}

/// Collapse a policy rejection to the boolean the public boundary reports.
/// The reason survives in the logs, never in the return value.
pub(crate) fn rejected(rejection: Rejection) -> bool {
    tracing::debug!(%rejection, "mutation rejected");

    false
}
