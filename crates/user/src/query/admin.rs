use crate::query::AdminSummary;
use crate::store::UserStore;

impl<S: UserStore> super::Query<S> {
    /// Search as the administrative browser: same tiers as [`search`],
    /// richer rows. Callers that are unknown, unprivileged or suspended
    /// get an empty page, not an error.
    ///
    /// [`search`]: super::Query::search
    pub async fn search_for_admin(
        &self,
        acting_id: &str,
        query: &str,
    ) -> userdesk_shared::Result<Vec<AdminSummary>> {
        let Some(actor) = self.store.find_by_id(acting_id).await? else {
            return Ok(vec![]);
        };

        if !actor.role.is_privileged() || !actor.state.is_active() {
            tracing::debug!(actor = %actor.id, "admin search refused");
            return Ok(vec![]);
        }

        Ok(self
            .search_records(query)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }
}
