use crate::store::UserStore;

impl<S: UserStore> super::Command<S> {
    /// Check credentials against the store. Returns the user id on
    /// success; unknown email, wrong password and suspended accounts all
    /// come back as `Ok(None)` so callers cannot probe which it was.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> userdesk_shared::Result<Option<String>> {
        let email = userdesk_shared::normalize_email(email);

        let Some(user) = self.store.find_by_email(&email).await? else {
            return Ok(None);
        };

        if !user.state.is_active() {
            tracing::debug!(user = %user.id, "login refused for suspended account");
            return Ok(None);
        }

        if !crate::password::verify(password, &user.password)? {
            return Ok(None);
        }

        Ok(Some(user.id))
    }
}
