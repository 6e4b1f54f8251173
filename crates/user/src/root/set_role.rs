use userdesk_shared::user::Role;

use crate::policy::{self, Rejection};
use crate::root::rejected;
use crate::store::{UpdateInput, UserStore};

impl<S: UserStore> super::Command<S> {
    /// Promote (`User -> Admin`) or demote (`Admin -> User`) a target
    /// account. `Ok(false)` means the rules said no -- which rule is
    /// deliberately not reported. Store failures surface as `Err`.
    ///
    /// All checks run before the single role write; a refused call leaves
    /// the store untouched.
    pub async fn set_role(
        &self,
        acting_id: impl Into<String>,
        target_id: impl Into<String>,
        requested: Role,
    ) -> userdesk_shared::Result<bool> {
        let _write = self.write_lock.lock().await;

        let actor = self.store.find_by_id(&acting_id.into()).await?;
        let actor = match policy::authorize_actor(actor.as_ref()) {
            Ok(actor) => actor,
            Err(rejection) => return Ok(rejected(rejection)),
        };

        let Some(target) = self.store.find_by_id(&target_id.into()).await? else {
            return Ok(rejected(Rejection::TargetNotFound));
        };

        // bootstrap gate input: Admin only, a lone superadmin still counts
        // as "no admin yet"
        let admin_exists = self.store.exists_with_role(Role::Admin).await?;

        if let Err(rejection) = policy::check_role_change(actor, &target, requested, admin_exists) {
            return Ok(rejected(rejection));
        }

        self.store
            .update(UpdateInput {
                id: target.id,
                name: None,
                password: None,
                role: Some(requested),
                state: None,
            })
            .await?;

        Ok(true)
    }
}
