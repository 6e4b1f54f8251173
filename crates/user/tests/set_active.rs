use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use temp_dir::TempDir;

use userdesk_shared::user::{Role, State};
use userdesk_user::{Command, UpdateInput, UserRecord, UserStore};

mod helpers;

/// Delegating store that widens the window between the last-admin
/// aggregate read and the write that follows it.
struct SlowAggregateStore<S>(S);

#[async_trait]
impl<S: UserStore> UserStore for SlowAggregateStore<S> {
    async fn find_by_id(&self, id: &str) -> userdesk_shared::Result<Option<UserRecord>> {
        self.0.find_by_id(id).await
    }

    async fn find_by_email(&self, email: &str) -> userdesk_shared::Result<Option<UserRecord>> {
        self.0.find_by_email(email).await
    }

    async fn exists_with_role(&self, role: Role) -> userdesk_shared::Result<bool> {
        self.0.exists_with_role(role).await
    }

    async fn count_active(
        &self,
        roles: &[Role],
        excluding_id: &str,
    ) -> userdesk_shared::Result<u64> {
        let count = self.0.count_active(roles, excluding_id).await?;
        tokio::time::sleep(Duration::from_millis(50)).await;

        Ok(count)
    }

    async fn insert(&self, user: &UserRecord) -> userdesk_shared::Result<()> {
        self.0.insert(user).await
    }

    async fn update(&self, input: UpdateInput) -> userdesk_shared::Result<()> {
        self.0.update(input).await
    }

    async fn find_by_email_prefix(
        &self,
        prefix: &str,
        limit: u64,
    ) -> userdesk_shared::Result<Vec<UserRecord>> {
        self.0.find_by_email_prefix(prefix, limit).await
    }

    async fn list_recent(&self, limit: u64) -> userdesk_shared::Result<Vec<UserRecord>> {
        self.0.list_recent(limit).await
    }

    async fn list_by_name(&self, limit: u64) -> userdesk_shared::Result<Vec<UserRecord>> {
        self.0.list_by_name(limit).await
    }
}

#[tokio::test]
async fn test_two_admins_one_survives() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let store = Arc::new(helpers::setup_store(dir.child("db.sqlite3")).await?);
    let cmd = Command::new(store.clone());

    store.insert(&helpers::record("alice", Role::Admin)).await?;
    store.insert(&helpers::record("bob", Role::Admin)).await?;

    // one other active privileged account remains: allowed
    assert!(cmd.set_active("alice", "bob", false).await?);
    assert_eq!(
        store.find_by_id("bob").await?.unwrap().state,
        State::Suspended
    );

    // the survivor may not lock itself out
    assert!(!cmd.set_active("alice", "alice", false).await?);
    assert_eq!(
        store.find_by_id("alice").await?.unwrap().state,
        State::Active
    );

    Ok(())
}

#[tokio::test]
async fn test_last_active_admin_is_protected() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let store = Arc::new(helpers::setup_store(dir.child("db.sqlite3")).await?);
    let cmd = Command::new(store.clone());

    // the acting admin is suspended, so the target is the only *active*
    // privileged account left
    let mut actor = helpers::record("old-admin", Role::Admin);
    actor.state = State::Suspended;
    store.insert(&actor).await?;
    store.insert(&helpers::record("alice", Role::Admin)).await?;

    assert!(!cmd.set_active("old-admin", "alice", false).await?);
    assert_eq!(
        store.find_by_id("alice").await?.unwrap().state,
        State::Active
    );

    // a second active privileged account unblocks the same call
    store.insert(&helpers::record("bob", Role::Admin)).await?;
    assert!(cmd.set_active("old-admin", "alice", false).await?);
    assert_eq!(
        store.find_by_id("alice").await?.unwrap().state,
        State::Suspended
    );

    Ok(())
}

#[tokio::test]
async fn test_concurrent_deactivations_cannot_strand_the_system() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let store = Arc::new(SlowAggregateStore(
        helpers::setup_store(dir.child("db.sqlite3")).await?,
    ));
    let cmd = Command::new(store.clone());

    store.insert(&helpers::record("alice", Role::Admin)).await?;
    store.insert(&helpers::record("bob", Role::Admin)).await?;

    // each call passes the last-admin count on its own; run together
    // they must serialize, and the loser is refused
    let (a, b) = tokio::join!(
        cmd.set_active("alice", "bob", false),
        cmd.set_active("bob", "alice", false),
    );
    let (a, b) = (a?, b?);

    assert_ne!(a, b);
    assert_eq!(
        store
            .count_active(&[Role::Admin, Role::SuperAdmin], "")
            .await?,
        1
    );

    Ok(())
}

#[tokio::test]
async fn test_superadmin_cannot_be_deactivated() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let store = Arc::new(helpers::setup_store(dir.child("db.sqlite3")).await?);
    let cmd = Command::new(store.clone());

    store.insert(&helpers::record("root", Role::SuperAdmin)).await?;
    store.insert(&helpers::record("alice", Role::Admin)).await?;

    assert!(!cmd.set_active("alice", "root", false).await?);
    assert_eq!(
        store.find_by_id("root").await?.unwrap().state,
        State::Active
    );

    Ok(())
}

#[tokio::test]
async fn test_plain_users_suspend_and_reactivate() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let store = Arc::new(helpers::setup_store(dir.child("db.sqlite3")).await?);
    let cmd = Command::new(store.clone());

    store.insert(&helpers::record("alice", Role::Admin)).await?;
    let user_id = helpers::register_user(&cmd, "john.doe").await?;

    // no privileged-count gate for unprivileged targets
    assert!(cmd.set_active("alice", &user_id, false).await?);
    assert_eq!(
        store.find_by_id(&user_id).await?.unwrap().state,
        State::Suspended
    );

    assert!(cmd.set_active("alice", &user_id, true).await?);
    assert_eq!(
        store.find_by_id(&user_id).await?.unwrap().state,
        State::Active
    );

    // users cannot suspend each other
    let other = helpers::register_user(&cmd, "jane.doe").await?;
    assert!(!cmd.set_active(&other, &user_id, false).await?);

    Ok(())
}
