use std::collections::HashSet;

use userdesk_shared::normalize_email;

use crate::query::UserSummary;
use crate::store::{UserRecord, UserStore};

/// Result page cap for every search tier.
pub const PAGE_LIMIT: u64 = 50;

/// How many of the most recently created users the substring fallback
/// scans. Display names cannot use a plain index, so the scan is bounded
/// to keep latency flat as the table grows; very old accounts only match
/// by email.
pub const RECENT_WINDOW: u64 = 200;

impl<S: UserStore> super::Query<S> {
    /// Case-insensitive multi-field lookup, cheapest tier first:
    /// exact normalized email, then email prefix, then a bounded
    /// recent-window substring scan over name variants. An empty query is
    /// the first page of everyone, ordered by display name.
    pub async fn search(&self, query: &str) -> userdesk_shared::Result<Vec<UserSummary>> {
        Ok(self
            .search_records(query)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    pub(crate) async fn search_records(
        &self,
        query: &str,
    ) -> userdesk_shared::Result<Vec<UserRecord>> {
        let query = normalize_email(query);

        if query.is_empty() {
            return self.store.list_by_name(PAGE_LIMIT).await;
        }

        if let Some(user) = self.store.find_by_email(&query).await? {
            return Ok(vec![user]);
        }

        let mut matches = self.store.find_by_email_prefix(&query, PAGE_LIMIT).await?;

        for user in self.store.list_recent(RECENT_WINDOW).await? {
            if matches_name(&user, &query) {
                matches.push(user);
            }
        }

        let mut seen = HashSet::new();
        matches.retain(|user| seen.insert(user.id.to_owned()));
        matches.sort_by(|a, b| display_key(a).cmp(display_key(b)));
        matches.truncate(PAGE_LIMIT as usize);

        Ok(matches)
    }
}

fn display_key(user: &UserRecord) -> &str {
    user.name_folded.as_deref().unwrap_or(&user.email)
}

fn matches_name(user: &UserRecord, query: &str) -> bool {
    user.name_folded
        .as_deref()
        .is_some_and(|name| name.contains(query))
        || user
            .initials
            .as_deref()
            .is_some_and(|initials| initials.contains(query))
}
