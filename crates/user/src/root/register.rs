use time::OffsetDateTime;
use ulid::Ulid;
use validator::Validate;

use userdesk_shared::user::{Role, State};
use userdesk_shared::{fold_name, initial_key, normalize_email};

use crate::store::{UserRecord, UserStore};

#[derive(Validate)]
pub struct RegisterInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 64))]
    pub password: String,
    #[validate(length(min = 1, max = 80))]
    pub name: Option<String>,
}

impl<S: UserStore> super::Command<S> {
    /// Sign up a new account. Always `Role::User` and active; privilege
    /// only ever arrives later through `set_role`.
    pub async fn register(&self, input: RegisterInput) -> userdesk_shared::Result<String> {
        input.validate()?;

        // the uniqueness check and the insert must not interleave with
        // another registration of the same email
        let _write = self.write_lock.lock().await;

        let email = normalize_email(&input.email);

        if self.store.find_by_email(&email).await?.is_some() {
            userdesk_shared::user!("email already exists");
        }

        let password = crate::password::hash(&input.password)?;
        let id = Ulid::new().to_string();

        self.store
            .insert(&UserRecord {
                id: id.to_owned(),
                email,
                name_folded: input.name.as_deref().map(fold_name),
                initials: input.name.as_deref().map(initial_key),
                name: input.name,
                role: Role::User,
                state: State::Active,
                password,
                created_at: OffsetDateTime::now_utc().unix_timestamp(),
            })
            .await?;

        Ok(id)
    }
}
