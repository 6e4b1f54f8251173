use userdesk_shared::user::{Role, State};

use crate::policy::{self, Rejection};
use crate::root::rejected;
use crate::store::{UpdateInput, UserStore};

impl<S: UserStore> super::Command<S> {
    /// Enable or disable a target account. Deactivation is refused when it
    /// would strand the system without an active privileged account, when
    /// the target is the caller, or when the target is the superadmin.
    pub async fn set_active(
        &self,
        acting_id: impl Into<String>,
        target_id: impl Into<String>,
        active: bool,
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

        if !active {
            match policy::check_deactivation(actor, &target) {
                Err(rejection) => return Ok(rejected(rejection)),
                Ok(true) => {
                    let others = self
                        .store
                        .count_active(&[Role::Admin, Role::SuperAdmin], &target.id)
                        .await?;

                    if others == 0 {
                        return Ok(rejected(Rejection::LastAdmin));
                    }
                }
                Ok(false) => {}
            }
        }

        let state = if active { State::Active } else { State::Suspended };

        if target.state == state {
            return Ok(true);
        }

        self.store
            .update(UpdateInput {
                id: target.id,
                name: None,
                password: None,
                role: None,
                state: Some(state),
            })
            .await?;

        Ok(true)
    }
}
