use std::path::PathBuf;
use std::str::FromStr;

use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};

use userdesk_shared::user::{Role, State};
use userdesk_shared::{fold_name, initial_key};
use userdesk_user::{Command, RegisterInput, SqliteStore, UserRecord, UserStore};

pub async fn setup_store(path: PathBuf) -> anyhow::Result<SqliteStore> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    userdesk_db::migrator::<sqlx::Sqlite>()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    Ok(SqliteStore::new(pool))
}

#[allow(dead_code)]
pub async fn register_user<S: UserStore>(
    cmd: &Command<S>,
    name: impl Into<String>,
) -> anyhow::Result<String> {
    let name = name.into();
    let id = cmd
        .register(RegisterInput {
            email: format!("{name}@userdesk.localhost"),
            password: "my_password".to_owned(),
            name: None,
        })
        .await?;

    Ok(id)
}

/// Seeded row for roles `register` can never produce (admins, the
/// superadmin) and for fixed timestamps.
#[allow(dead_code)]
pub fn record(id: &str, role: Role) -> UserRecord {
    UserRecord {
        id: id.to_owned(),
        email: format!("{id}@userdesk.localhost"),
        name: None,
        name_folded: None,
        initials: None,
        role,
        state: State::Active,
        password: "seeded".to_owned(),
        created_at: 0,
    }
}

#[allow(dead_code)]
pub fn with_name(mut user: UserRecord, name: &str) -> UserRecord {
    user.name_folded = Some(fold_name(name));
    user.initials = Some(initial_key(name));
    user.name = Some(name.to_owned());

    user
}
