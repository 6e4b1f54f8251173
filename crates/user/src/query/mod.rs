use std::sync::Arc;

use serde::Serialize;

use userdesk_shared::user::{Role, State};

use crate::store::{UserRecord, UserStore};

mod admin;
mod search;

/// Read side of the engine: user lookup for autocomplete and the
/// administrative browser.
pub struct Query<S: UserStore> {
    pub(crate) store: Arc<S>,
}

impl<S: UserStore> Query<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

/// What unprivileged callers see of a user. No role, no state, and never
/// any credential material.
#[derive(Clone, Debug, Serialize)]
pub struct UserSummary {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
}

impl From<UserRecord> for UserSummary {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
        }
    }
}

/// The richer row the administrative browser renders. Still no
/// credential material.
#[derive(Clone, Debug, Serialize)]
pub struct AdminSummary {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub role: Role,
    pub state: State,
    pub created_at: i64,
}

impl From<UserRecord> for AdminSummary {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
            state: user.state,
            created_at: user.created_at,
        }
    }
}
